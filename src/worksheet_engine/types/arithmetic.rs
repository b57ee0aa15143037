use rand::RngCore;

use crate::worksheet_engine::{
    format::{operand, signed, DIVIDE, MINUS, TIMES},
    helpers::{pick, rand_int},
    models::{option_flag, Difficulty, OptionKind, OptionSpec, Options, Problem},
    types::WorksheetType,
};

// ---------------------------------------------------------------------------
// Addition
// ---------------------------------------------------------------------------

pub struct Addition;

pub(crate) fn addition_range(difficulty: Difficulty) -> (i64, i64) {
    match difficulty {
        Difficulty::Easy   => (1, 10),
        Difficulty::Normal => (10, 99),
        Difficulty::Hard   => (100, 999),
    }
}

impl WorksheetType for Addition {
    fn id(&self) -> &'static str { "addition" }
    fn label(&self) -> &'static str { "Addition" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (lo, hi) = addition_range(difficulty);
        (0..count)
            .map(|_| {
                let a = rand_int(rng, lo, hi);
                let b = rand_int(rng, lo, hi);
                Problem::text(format!("{a} + {b} ="), (a + b).to_string())
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Work out each sum.".into())
    }
}

// ---------------------------------------------------------------------------
// Subtraction
// ---------------------------------------------------------------------------

pub struct Subtraction;

const SUBTRACTION_OPTIONS: &[OptionSpec] = &[OptionSpec {
    id: "allowNegatives",
    label: "Allow negative answers",
    kind: OptionKind::Checkbox { default: false },
}];

impl WorksheetType for Subtraction {
    fn id(&self) -> &'static str { "subtraction" }
    fn label(&self) -> &'static str { "Subtraction" }
    fn options(&self) -> &'static [OptionSpec] { SUBTRACTION_OPTIONS }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, options: &Options) -> Vec<Problem> {
        let negatives = option_flag(SUBTRACTION_OPTIONS, options, "allowNegatives");
        let (lo, hi) = addition_range(difficulty);
        (0..count)
            .map(|_| {
                let b = rand_int(rng, lo, hi);
                let answer = if negatives {
                    rand_int(rng, -hi, hi)
                } else {
                    rand_int(rng, if difficulty == Difficulty::Easy { 0 } else { 1 }, hi)
                };
                let a = b + answer;
                Problem::text(format!("{} {MINUS} {b} =", signed(a)), signed(answer))
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Work out each subtraction.".into())
    }
}

// ---------------------------------------------------------------------------
// Multiplication / division
// ---------------------------------------------------------------------------

pub struct Multiplication;

/// `(first factor range, second factor range)`.
fn product_ranges(difficulty: Difficulty) -> ((i64, i64), (i64, i64)) {
    match difficulty {
        Difficulty::Easy   => ((2, 10), (1, 10)),
        Difficulty::Normal => ((2, 12), (2, 12)),
        Difficulty::Hard   => ((12, 99), (2, 12)),
    }
}

impl WorksheetType for Multiplication {
    fn id(&self) -> &'static str { "multiplication" }
    fn label(&self) -> &'static str { "Multiplication" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let ((alo, ahi), (blo, bhi)) = product_ranges(difficulty);
        (0..count)
            .map(|_| {
                let a = rand_int(rng, alo, ahi);
                let b = rand_int(rng, blo, bhi);
                Problem::text(format!("{a} {TIMES} {b} ="), (a * b).to_string())
            })
            .collect()
    }
}

pub struct Division;

impl WorksheetType for Division {
    fn id(&self) -> &'static str { "division" }
    fn label(&self) -> &'static str { "Division" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let ((qlo, qhi), (dlo, dhi)) = match difficulty {
            Difficulty::Easy   => ((1, 10), (2, 10)),
            Difficulty::Normal => ((2, 12), (2, 12)),
            Difficulty::Hard   => ((10, 50), (11, 25)),
        };
        (0..count)
            .map(|_| {
                // Quotient and divisor first so the dividend is always whole.
                let quotient = rand_int(rng, qlo, qhi);
                let divisor = rand_int(rng, dlo, dhi);
                let dividend = quotient * divisor;
                Problem::text(format!("{dividend} {DIVIDE} {divisor} ="), quotient.to_string())
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Negative numbers
// ---------------------------------------------------------------------------

pub struct NegativeNumbers;

impl WorksheetType for NegativeNumbers {
    fn id(&self) -> &'static str { "negative-numbers" }
    fn label(&self) -> &'static str { "Negative Numbers" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (limit, ops): (i64, &[char]) = match difficulty {
            Difficulty::Easy   => (10, &['+', MINUS]),
            Difficulty::Normal => (20, &['+', MINUS]),
            Difficulty::Hard   => (12, &['+', MINUS, TIMES]),
        };
        (0..count)
            .map(|_| {
                let a = rand_int(rng, -limit, limit);
                let b = rand_int(rng, -limit, limit);
                let op = pick(rng, ops);
                let answer = match op {
                    '+' => a + b,
                    c if c == MINUS => a - b,
                    _ => a * b,
                };
                Problem::text(format!("{} {op} {} =", signed(a), operand(b)), signed(answer))
            })
            .collect()
    }

    fn print_title(&self, _options: &Options) -> String {
        "Calculating with Negative Numbers".into()
    }
}

// ---------------------------------------------------------------------------
// Order of operations
// ---------------------------------------------------------------------------

pub struct OrderOfOperations;

impl WorksheetType for OrderOfOperations {
    fn id(&self) -> &'static str { "order-of-operations" }
    fn label(&self) -> &'static str { "Order of Operations" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (hi, shapes) = match difficulty {
            Difficulty::Easy   => (10, 2),
            Difficulty::Normal => (12, 3),
            Difficulty::Hard   => (20, 4),
        };
        (0..count)
            .map(|_| {
                let shape = rand_int(rng, 0, shapes - 1);
                let a = rand_int(rng, 1, hi);
                let b = rand_int(rng, 1, hi);
                let c = rand_int(rng, 2, hi.min(12));
                let (question, answer) = match shape {
                    0 => (format!("{a} + {b} {TIMES} {c}"), a + b * c),
                    1 => (format!("({a} + {b}) {TIMES} {c}"), (a + b) * c),
                    2 => (format!("{a} {TIMES} {b} {MINUS} {c}"), a * b - c),
                    _ => {
                        // b ÷ c must be whole: rebuild b as a multiple of c.
                        let whole = b * c;
                        (format!("{a} {MINUS} {whole} {DIVIDE} {c}"), a - b)
                    }
                };
                Problem::text(format!("{question} ="), signed(answer))
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Use the correct order of operations.".into())
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

pub struct CompareNumbers;

impl WorksheetType for CompareNumbers {
    fn id(&self) -> &'static str { "compare-numbers" }
    fn label(&self) -> &'static str { "Comparing Numbers" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (lo, hi) = match difficulty {
            Difficulty::Easy   => (0, 20),
            Difficulty::Normal => (0, 1000),
            Difficulty::Hard   => (-100, 100),
        };
        (0..count)
            .map(|_| {
                let a = rand_int(rng, lo, hi);
                let b = if rand_int(rng, 0, 9) == 0 { a } else { rand_int(rng, lo, hi) };
                let (symbol, entity) = match a.cmp(&b) {
                    std::cmp::Ordering::Less    => ("<", "&lt;"),
                    std::cmp::Ordering::Greater => (">", "&gt;"),
                    std::cmp::Ordering::Equal   => ("=", "="),
                };
                let (sa, sb) = (signed(a), signed(b));
                // The key restates the comparison; a bare symbol reads badly.
                Problem::text(format!("{sa} \u{2610} {sb}"), symbol)
                    .with_key_html(format!("{sa} {entity} {sb}"))
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Write <, > or = in each box.".into())
    }
}
