//! Number-fact types.
//!
//! Each of these has a small, fully enumerable question space. Sampling it
//! independently per problem repeats facts long before the space is used up,
//! so these types build the whole pool and deal shuffled copies of it
//! (`shuffled_pool`). Any block of `pool.len()` problems is then repeat-free.

use rand::RngCore;

use crate::worksheet_engine::{
    format::{signed, with_commas, TIMES},
    helpers::shuffled_pool,
    models::{option_text, Difficulty, OptionKind, OptionSpec, Options, Problem},
    types::WorksheetType,
};

// ---------------------------------------------------------------------------
// Times tables
// ---------------------------------------------------------------------------

pub struct TimesTables;

const TIMES_TABLE_OPTIONS: &[OptionSpec] = &[OptionSpec {
    id: "table",
    label: "Table",
    kind: OptionKind::Select {
        values: &[
            ("mixed", "Mixed"),
            ("2", "2\u{00D7}"), ("3", "3\u{00D7}"), ("4", "4\u{00D7}"), ("5", "5\u{00D7}"),
            ("6", "6\u{00D7}"), ("7", "7\u{00D7}"), ("8", "8\u{00D7}"), ("9", "9\u{00D7}"),
            ("10", "10\u{00D7}"), ("11", "11\u{00D7}"), ("12", "12\u{00D7}"),
        ],
        default: "mixed",
    },
}];

#[derive(Debug, Clone, Copy)]
enum TableFact {
    Product(i64, i64),
    MissingFactor(i64, i64),
}

fn table_fact_problem(fact: TableFact) -> Problem {
    match fact {
        TableFact::Product(a, b) => Problem::text(format!("{a} {TIMES} {b} ="), (a * b).to_string()),
        TableFact::MissingFactor(a, b) => {
            Problem::text(format!("{a} {TIMES} \u{2610} = {}", a * b), b.to_string())
        }
    }
}

impl WorksheetType for TimesTables {
    fn id(&self) -> &'static str { "times-tables" }
    fn label(&self) -> &'static str { "Times Tables" }
    fn options(&self) -> &'static [OptionSpec] { TIMES_TABLE_OPTIONS }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, options: &Options) -> Vec<Problem> {
        let table = option_text(TIMES_TABLE_OPTIONS, options, "table");
        let tables: Vec<i64> = match table.parse::<i64>() {
            Ok(t) => vec![t],
            Err(_) => match difficulty {
                Difficulty::Easy   => vec![2, 5, 10],
                Difficulty::Normal => (2..=10).collect(),
                Difficulty::Hard   => (2..=12).collect(),
            },
        };
        let single = tables.len() == 1;

        let mut pool = Vec::new();
        for &t in &tables {
            for n in 1..=12 {
                pool.push(TableFact::Product(t, n));
                // A single table is only 12 facts; both orders double the pool.
                if single {
                    pool.push(TableFact::Product(n, t));
                }
                if difficulty == Difficulty::Hard {
                    pool.push(TableFact::MissingFactor(t, n));
                }
            }
        }

        shuffled_pool(rng, &pool, count).into_iter().map(table_fact_problem).collect()
    }

    fn print_title(&self, options: &Options) -> String {
        match option_text(TIMES_TABLE_OPTIONS, options, "table").as_str() {
            "mixed" => "Times Tables".into(),
            t => format!("{t} Times Table"),
        }
    }
}

// ---------------------------------------------------------------------------
// Squares and square roots
// ---------------------------------------------------------------------------

pub struct SquareNumbers;

impl WorksheetType for SquareNumbers {
    fn id(&self) -> &'static str { "square-numbers" }
    fn label(&self) -> &'static str { "Squares & Square Roots" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let max = match difficulty {
            Difficulty::Easy   => 12,
            Difficulty::Normal => 20,
            Difficulty::Hard   => 30,
        };
        let pool: Vec<(i64, bool)> = (1..=max).flat_map(|n| [(n, false), (n, true)]).collect();
        shuffled_pool(rng, &pool, count)
            .into_iter()
            .map(|(n, root)| {
                if root {
                    Problem::html(
                        format!("\u{221A}{} =", n * n),
                        format!("&radic;<span class=\"radicand\">{}</span> =", n * n),
                        n.to_string(),
                        n.to_string(),
                    )
                } else {
                    Problem::html(
                        format!("{n}\u{00B2} ="),
                        format!("{n}<sup>2</sup> ="),
                        (n * n).to_string(),
                        (n * n).to_string(),
                    )
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Number bonds
// ---------------------------------------------------------------------------

pub struct NumberBonds;

impl WorksheetType for NumberBonds {
    fn id(&self) -> &'static str { "number-bonds" }
    fn label(&self) -> &'static str { "Number Bonds" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let pool: Vec<(i64, i64)> = match difficulty {
            Difficulty::Easy => (0..=10).map(|a| (a, 10)).chain((0..=20).map(|a| (a, 20))).collect(),
            Difficulty::Normal => (0..=100).map(|a| (a, 100)).collect(),
            Difficulty::Hard => (0..=100).map(|a| (a * 10, 1000)).collect(),
        };
        shuffled_pool(rng, &pool, count)
            .into_iter()
            .map(|(a, target)| {
                Problem::text(
                    format!("{} + \u{2610} = {}", with_commas(a), with_commas(target)),
                    with_commas(target - a),
                )
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Fill in the missing number.".into())
    }
}

// ---------------------------------------------------------------------------
// Doubles and halves
// ---------------------------------------------------------------------------

pub struct DoublesHalves;

impl WorksheetType for DoublesHalves {
    fn id(&self) -> &'static str { "doubles-halves" }
    fn label(&self) -> &'static str { "Doubles & Halves" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (lo, hi, step) = match difficulty {
            Difficulty::Easy   => (1, 20, 1),
            Difficulty::Normal => (5, 50, 1),
            Difficulty::Hard   => (25, 500, 5),
        };
        let pool: Vec<(i64, bool)> = (lo..=hi)
            .step_by(step)
            .flat_map(|n| [(n, false), (n * 2, true)])
            .collect();
        shuffled_pool(rng, &pool, count)
            .into_iter()
            .map(|(n, halve)| {
                if halve {
                    Problem::text(format!("Half of {n} ="), (n / 2).to_string())
                } else {
                    Problem::text(format!("Double {n} ="), (n * 2).to_string())
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Shapes
// ---------------------------------------------------------------------------

pub struct Shapes;

const POLYGONS: &[(&str, i64)] = &[
    ("triangle", 3), ("square", 4), ("pentagon", 5), ("hexagon", 6), ("octagon", 8),
    ("heptagon", 7), ("nonagon", 9), ("decagon", 10), ("hendecagon", 11), ("dodecagon", 12),
];

impl WorksheetType for Shapes {
    fn id(&self) -> &'static str { "shapes" }
    fn label(&self) -> &'static str { "Shapes: Sides & Corners" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let shapes = match difficulty {
            Difficulty::Easy   => &POLYGONS[..5],
            Difficulty::Normal => &POLYGONS[..8],
            Difficulty::Hard   => POLYGONS,
        };
        let pool: Vec<(&str, i64, bool)> = shapes
            .iter()
            .flat_map(|&(name, sides)| [(name, sides, false), (name, sides, true)])
            .collect();
        shuffled_pool(rng, &pool, count)
            .into_iter()
            .map(|(name, sides, corners)| {
                let what = if corners { "corners" } else { "sides" };
                Problem::text(format!("How many {what} does a {name} have?"), signed(sides))
            })
            .collect()
    }

    fn pool_exempt(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::worksheet_engine::{models::OptionValue, rng::Mulberry32};

    fn distinct(problems: &[Problem]) -> usize {
        problems.iter().map(Problem::dedup_key).collect::<HashSet<_>>().len()
    }

    #[test]
    fn single_table_uses_both_orders() {
        let mut options = Options::new();
        options.insert("table".into(), OptionValue::text("7"));
        let problems = TimesTables.generate(&mut Mulberry32::new(1), Difficulty::Easy, 24, &options);
        // 7 × 7 appears in both orders, so 23 distinct facts in one pass.
        assert_eq!(distinct(&problems), 23);
        assert!(problems.iter().all(|p| p.question.as_ref().unwrap().contains('7')));
        assert_eq!(TimesTables.print_title(&options), "7 Times Table");
    }

    #[test]
    fn pools_do_not_repeat_before_exhaustion() {
        let problems = SquareNumbers.generate(&mut Mulberry32::new(2), Difficulty::Easy, 24, &Options::new());
        assert_eq!(distinct(&problems), 24);
        let bonds = NumberBonds.generate(&mut Mulberry32::new(2), Difficulty::Easy, 32, &Options::new());
        assert_eq!(distinct(&bonds), 32);
    }

    #[test]
    fn number_bond_answers_complete_the_target() {
        for difficulty in Difficulty::ALL {
            for p in NumberBonds.generate(&mut Mulberry32::new(6), difficulty, 40, &Options::new()) {
                let q = p.question.unwrap().replace(',', "");
                let parts: Vec<&str> = q.split(' ').collect();
                let a: i64 = parts[0].parse().unwrap();
                let target: i64 = parts[4].parse().unwrap();
                let answer: i64 = p.answer.unwrap().replace(',', "").parse().unwrap();
                assert_eq!(a + answer, target);
            }
        }
    }

    #[test]
    fn halves_are_whole() {
        for p in DoublesHalves.generate(&mut Mulberry32::new(9), Difficulty::Hard, 100, &Options::new()) {
            let q = p.question.unwrap();
            if let Some(n) = q.strip_prefix("Half of ").and_then(|s| s.strip_suffix(" =")) {
                let n: i64 = n.parse().unwrap();
                assert_eq!(n % 2, 0);
            }
        }
    }

    #[test]
    fn shapes_are_a_small_exempt_set() {
        assert!(Shapes.pool_exempt());
        let problems = Shapes.generate(&mut Mulberry32::new(1), Difficulty::Easy, 50, &Options::new());
        assert_eq!(distinct(&problems), 10);
    }
}
