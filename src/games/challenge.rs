//! Maths challenge: a run of typed-answer questions from any problem type.
//!
//! Problems come through the uniqueness enforcer, so a run repeats a
//! question only when the type's question space is too small.

use crate::worksheet_engine::{
    format::MINUS,
    generator::DEFAULT_MAX_COUNT,
    models::{resolve_options, Difficulty, Options, Problem},
    registry::Registry,
    rng::Mulberry32,
    unique::generate_unique,
};

/// Canonical form for comparing typed answers: whitespace and thousands
/// separators removed, ASCII hyphens and en dashes read as the minus glyph,
/// letters lowercased.
pub fn normalise_answer(answer: &str) -> String {
    answer
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match c {
            '-' | '\u{2013}' => MINUS,
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Does `typed` match the problem's answer? The answer prefix (`x = `) is
/// optional for the player.
pub fn is_correct(problem: &Problem, typed: &str) -> bool {
    let Some(answer) = problem.answer.as_deref() else {
        return false;
    };
    let typed = normalise_answer(typed);
    let expected = normalise_answer(answer);
    if typed == expected {
        return true;
    }
    match &problem.answer_prefix {
        Some(prefix) => typed == format!("{}{expected}", normalise_answer(prefix)),
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub typed: String,
    pub correct: bool,
}

#[derive(Debug, Clone)]
pub struct Challenge {
    type_id: String,
    problems: Vec<Problem>,
    attempts: Vec<Attempt>,
    truncated: bool,
}

impl Challenge {
    /// `count` problems of `type_id` (default type if unknown) from a
    /// stream seeded by `seed`. `count` is capped at [`DEFAULT_MAX_COUNT`].
    pub fn new(registry: &Registry, type_id: &str, difficulty: Difficulty, count: usize, seed: &str) -> Self {
        Self::with_options(registry, type_id, difficulty, count, &Options::new(), seed)
    }

    pub fn with_options(
        registry: &Registry,
        type_id: &str,
        difficulty: Difficulty,
        count: usize,
        options: &Options,
        seed: &str,
    ) -> Self {
        let ty = registry.resolve(type_id);
        let options = resolve_options(ty.options(), options);
        let mut rng = Mulberry32::from_seed_str(seed);
        let count = count.min(DEFAULT_MAX_COUNT);
        let batch = generate_unique(ty, &mut rng, difficulty, count, &options);
        Challenge {
            type_id: ty.id().to_string(),
            problems: batch.problems,
            attempts: Vec::new(),
            truncated: batch.truncated,
        }
    }

    pub fn type_id(&self) -> &str {
        &self.type_id
    }

    /// The question waiting for an answer; `None` once finished.
    pub fn current(&self) -> Option<&Problem> {
        self.problems.get(self.attempts.len())
    }

    /// Answer the current question. `None` if the run is already over.
    pub fn submit(&mut self, typed: &str) -> Option<bool> {
        let correct = is_correct(self.current()?, typed);
        self.attempts.push(Attempt { typed: typed.to_string(), correct });
        Some(correct)
    }

    pub fn score(&self) -> usize {
        self.attempts.iter().filter(|a| a.correct).count()
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.attempts.len() >= self.problems.len()
    }

    /// Some questions repeat because the type ran out of distinct ones.
    pub fn truncated(&self) -> bool {
        self.truncated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::models::OptionValue;

    #[test]
    fn hyphen_and_spacing_are_forgiven() {
        assert_eq!(normalise_answer(" -12 "), "\u{2212}12");
        assert_eq!(normalise_answer("3X + 1"), "3x+1");
        let p = Problem::text("5 \u{2212} 8 =", "\u{2212}3");
        assert!(is_correct(&p, "-3"));
        assert!(is_correct(&p, "\u{2212} 3"));
        assert!(!is_correct(&p, "3"));
    }

    #[test]
    fn thousands_separators_are_optional() {
        assert_eq!(normalise_answer("28,000"), "28000");
        let p = Problem::text("Round 27,551 to the nearest 1,000", "28,000");
        assert!(is_correct(&p, "28000"));
        assert!(is_correct(&p, "28,000"));
        assert!(!is_correct(&p, "27000"));
    }

    #[test]
    fn rounding_run_accepts_plain_digits() {
        let registry = Registry::builtin();
        let mut options = Options::new();
        options.insert("roundTo".into(), OptionValue::text("1000"));
        let mut run = Challenge::with_options(&registry, "rounding", Difficulty::Hard, 10, &options, "commas");
        while let Some(answer) = run.current().and_then(|p| p.answer.clone()) {
            assert_eq!(run.submit(&answer.replace(',', "")), Some(true), "{answer}");
        }
        assert_eq!(run.score(), 10);
    }

    #[test]
    fn oversized_runs_are_capped() {
        let registry = Registry::builtin();
        let run = Challenge::new(&registry, "addition", Difficulty::Easy, usize::MAX / 2, "big");
        assert_eq!(run.len(), DEFAULT_MAX_COUNT);
    }

    #[test]
    fn prefix_is_optional() {
        let p = Problem::text("2x = 8", "4").with_prefix("x = ");
        assert!(is_correct(&p, "4"));
        assert!(is_correct(&p, "x=4"));
        assert!(!is_correct(&p, "y=4"));
    }

    #[test]
    fn a_run_scores_and_finishes() {
        let registry = Registry::builtin();
        let mut run = Challenge::new(&registry, "multiplication", Difficulty::Easy, 4, "class-7");
        assert_eq!(run.len(), 4);
        assert!(!run.truncated());

        let answer = run.current().and_then(|p| p.answer.clone()).unwrap();
        assert_eq!(run.submit(&answer), Some(true));
        assert_eq!(run.submit("nope"), Some(false));
        while !run.is_finished() {
            let answer = run.current().and_then(|p| p.answer.clone()).unwrap();
            run.submit(&answer);
        }
        assert_eq!(run.score(), 3);
        assert_eq!(run.submit("1"), None);
        assert!(run.current().is_none());
    }

    #[test]
    fn same_seed_same_questions() {
        let registry = Registry::builtin();
        let a = Challenge::new(&registry, "equations", Difficulty::Hard, 10, "s");
        let b = Challenge::new(&registry, "equations", Difficulty::Hard, 10, "s");
        assert_eq!(a.problems, b.problems);
        assert_eq!(Challenge::new(&registry, "bogus", Difficulty::Easy, 1, "s").type_id(), "addition");
    }
}
