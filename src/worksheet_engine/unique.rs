//! Uniqueness enforcer: the problem list on one worksheet has no repeated
//! questions whenever the type's question space allows it.

use std::collections::HashSet;

use rand::RngCore;
use tracing::warn;

use crate::worksheet_engine::{
    models::{Difficulty, Options, Problem},
    types::WorksheetType,
};

/// Outcome of [`generate_unique`].
#[derive(Debug, Clone)]
pub struct UniqueBatch {
    pub problems: Vec<Problem>,
    /// Fewer than `count` distinct problems were found; the tail was padded
    /// with problems that may repeat earlier ones.
    pub truncated: bool,
    /// Single-problem generation calls spent looking for distinct problems.
    pub attempts: usize,
}

/// Attempts allowed before giving up on finding `count` distinct problems.
pub fn attempt_budget(count: usize) -> usize {
    count.saturating_mul(10).max(50)
}

/// Upper bound on up-front allocation; larger batches grow as they fill.
const CAPACITY_HINT: usize = 1024;

/// Build `count` problems with pairwise-distinct [`Problem::dedup_key`]s.
///
/// Problems are drawn one at a time from the type. A duplicate key is thrown
/// away. Once the attempt budget is spent, whatever is still missing is filled
/// from a single `generate(remaining)` call without dedup checking and the
/// batch is marked truncated. The output has exactly `count` problems unless
/// the type produces none at all.
pub fn generate_unique(
    ty: &dyn WorksheetType,
    rng: &mut dyn RngCore,
    difficulty: Difficulty,
    count: usize,
    options: &Options,
) -> UniqueBatch {
    let budget = attempt_budget(count);
    let mut seen = HashSet::with_capacity(count.min(CAPACITY_HINT));
    let mut problems = Vec::with_capacity(count.min(CAPACITY_HINT));
    let mut attempts = 0;

    while problems.len() < count && attempts < budget {
        attempts += 1;
        // A type that yields nothing for a single draw will not recover.
        let Some(problem) = ty.generate(rng, difficulty, 1, options).into_iter().next() else {
            break;
        };
        if seen.insert(problem.dedup_key()) {
            problems.push(problem);
        }
    }

    let truncated = problems.len() < count;
    if truncated {
        let remaining = count - problems.len();
        warn!(
            target: "worksheet",
            type_id = ty.id(),
            difficulty = %difficulty,
            requested = count,
            distinct = problems.len(),
            attempts,
            "not enough distinct problems; padding worksheet with repeats"
        );
        problems.extend(ty.generate(rng, difficulty, remaining, options));
        // Keep the length contract even if the type under-delivers.
        if problems.len() > count {
            problems.truncate(count);
        }
        while problems.len() < count {
            match problems.last().cloned() {
                Some(last) => problems.push(last),
                None => break,
            }
        }
    }

    UniqueBatch { problems, truncated, attempts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::worksheet_engine::{rng::Mulberry32, types::arithmetic::Addition};

    /// Only ever produces two different questions.
    struct TwoFaced {
        calls: AtomicUsize,
    }

    impl WorksheetType for TwoFaced {
        fn id(&self) -> &'static str { "two-faced" }
        fn label(&self) -> &'static str { "Two Faced" }

        fn generate(&self, rng: &mut dyn RngCore, _d: Difficulty, count: usize, _o: &Options) -> Vec<Problem> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (0..count)
                .map(|_| {
                    let n = rng.next_u32() % 2;
                    Problem::text(format!("{n} + 0 ="), n.to_string())
                })
                .collect()
        }
    }

    /// Never produces anything.
    struct Silent;

    impl WorksheetType for Silent {
        fn id(&self) -> &'static str { "silent" }
        fn label(&self) -> &'static str { "Silent" }

        fn generate(&self, _rng: &mut dyn RngCore, _d: Difficulty, _count: usize, _o: &Options) -> Vec<Problem> {
            Vec::new()
        }
    }

    #[test]
    fn budget_has_a_floor_of_fifty() {
        assert_eq!(attempt_budget(1), 50);
        assert_eq!(attempt_budget(5), 50);
        assert_eq!(attempt_budget(20), 200);
        assert_eq!(attempt_budget(usize::MAX / 2), usize::MAX);
    }

    #[test]
    fn huge_counts_from_an_empty_type_end_quietly() {
        let batch = generate_unique(&Silent, &mut Mulberry32::new(1), Difficulty::Easy, usize::MAX / 2, &Options::new());
        assert!(batch.problems.is_empty());
        assert!(batch.truncated);
        assert_eq!(batch.attempts, 1);
    }

    #[test]
    fn wide_types_come_back_distinct() {
        let batch = generate_unique(&Addition, &mut Mulberry32::new(42), Difficulty::Normal, 30, &Options::new());
        assert!(!batch.truncated);
        assert_eq!(batch.problems.len(), 30);
        let keys: HashSet<_> = batch.problems.iter().map(Problem::dedup_key).collect();
        assert_eq!(keys.len(), 30);
    }

    #[test]
    fn narrow_types_are_padded_and_flagged() {
        let ty = TwoFaced { calls: AtomicUsize::new(0) };
        let batch = generate_unique(&ty, &mut Mulberry32::new(7), Difficulty::Easy, 5, &Options::new());
        assert!(batch.truncated);
        assert_eq!(batch.problems.len(), 5);
        assert_eq!(batch.attempts, 50);
        // 50 single draws plus one padding call.
        assert_eq!(ty.calls.load(Ordering::SeqCst), 51);
        let keys: HashSet<_> = batch.problems[..2].iter().map(Problem::dedup_key).collect();
        assert_eq!(keys.len(), 2);
    }

    #[test]
    fn zero_count_is_empty_and_not_truncated() {
        let batch = generate_unique(&Addition, &mut Mulberry32::new(1), Difficulty::Easy, 0, &Options::new());
        assert!(batch.problems.is_empty());
        assert!(!batch.truncated);
        assert_eq!(batch.attempts, 0);
    }

    #[test]
    fn same_seed_same_batch() {
        let a = generate_unique(&Addition, &mut Mulberry32::new(3), Difficulty::Hard, 20, &Options::new());
        let b = generate_unique(&Addition, &mut Mulberry32::new(3), Difficulty::Hard, 20, &Options::new());
        assert_eq!(a.problems, b.problems);
    }
}
