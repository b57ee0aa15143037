use rand::RngCore;

use crate::worksheet_engine::{
    format::{expression, linear_factor, signed, surd_latex},
    helpers::{nonzero, pick, rand_int, random_sign, shuffled_pool},
    models::{option_text, Difficulty, OptionKind, OptionSpec, Options, Problem},
    types::WorksheetType,
};

// ---------------------------------------------------------------------------
// Equations
// ---------------------------------------------------------------------------

pub struct Equations;

/// Parsed `equationMode` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquationMode {
    OneStep,
    TwoStep,
    Mixed,
}

impl EquationMode {
    pub fn from_options(options: &Options) -> Self {
        match option_text(EQUATION_OPTIONS, options, "equationMode").as_str() {
            "one" => EquationMode::OneStep,
            "two" => EquationMode::TwoStep,
            _ => EquationMode::Mixed,
        }
    }
}

pub const EQUATION_OPTIONS: &[OptionSpec] = &[OptionSpec {
    id: "equationMode",
    label: "Equation type",
    kind: OptionKind::Select {
        values: &[("mixed", "Mixed"), ("one", "One-step"), ("two", "Two-step")],
        default: "mixed",
    },
}];

fn one_step<R: RngCore + ?Sized>(rng: &mut R, x: i64, a: i64) -> String {
    match rand_int(rng, 0, 3) {
        0 => format!("{} = {}", expression(&[(1, "x"), (a, "")]), signed(x + a)),
        1 => format!("{} = {}", expression(&[(1, "x"), (-a, "")]), signed(x - a)),
        2 => format!("{} = {}", expression(&[(a, "x")]), signed(a * x)),
        // x/a = q needs x to be a multiple of a; callers pass x = a·q for this.
        _ => format!("x/{a} = {}", signed(x / a)),
    }
}

fn two_step<R: RngCore + ?Sized>(rng: &mut R, x: i64, a: i64, b: i64) -> String {
    match rand_int(rng, 0, 2) {
        0 => format!("{} = {}", expression(&[(a, "x"), (b, "")]), signed(a * x + b)),
        1 => format!("{} = {}", expression(&[(a, "x"), (-b, "")]), signed(a * x - b)),
        _ => format!("x/{a} + {b} = {}", signed(x / a + b)),
    }
}

impl WorksheetType for Equations {
    fn id(&self) -> &'static str { "equations" }
    fn label(&self) -> &'static str { "Solving Equations" }
    fn options(&self) -> &'static [OptionSpec] { EQUATION_OPTIONS }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, options: &Options) -> Vec<Problem> {
        let mode = EquationMode::from_options(options);
        let ((qlo, qhi), (alo, ahi), bhi) = match difficulty {
            Difficulty::Easy   => ((1, 10), (2, 10), 10),
            Difficulty::Normal => ((1, 12), (2, 12), 20),
            Difficulty::Hard   => ((-12, 12), (2, 15), 30),
        };
        (0..count)
            .map(|_| {
                let two = match mode {
                    EquationMode::OneStep => false,
                    EquationMode::TwoStep => true,
                    EquationMode::Mixed   => rand_int(rng, 0, 1) == 1,
                };
                // The solution is a multiple of `a` so every form divides cleanly.
                let a = rand_int(rng, alo, ahi);
                let q = rand_int(rng, qlo, qhi);
                let x = a * q;
                let question = if two {
                    let b = rand_int(rng, 1, bhi);
                    two_step(rng, x, a, b)
                } else {
                    one_step(rng, x, a)
                };
                Problem::text(question, signed(x)).with_prefix("x = ")
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Solve each equation to find x.".into())
    }

    fn print_title(&self, options: &Options) -> String {
        match EquationMode::from_options(options) {
            EquationMode::OneStep => "One-Step Equations".into(),
            EquationMode::TwoStep => "Two-Step Equations".into(),
            EquationMode::Mixed   => self.label().into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Expanding brackets
// ---------------------------------------------------------------------------

pub struct ExpandingBrackets;

impl WorksheetType for ExpandingBrackets {
    fn id(&self) -> &'static str { "expanding-brackets" }
    fn label(&self) -> &'static str { "Expanding Brackets" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        (0..count)
            .map(|_| match difficulty {
                Difficulty::Easy => {
                    let k = rand_int(rng, 2, 9);
                    let a = rand_int(rng, 1, 9);
                    Problem::text(
                        format!("{k}{}", linear_factor("x", a)),
                        expression(&[(k, "x"), (k * a, "")]),
                    )
                }
                Difficulty::Normal => {
                    let magnitude = rand_int(rng, 2, 9);
                    let k = random_sign(rng, magnitude);
                    let b = rand_int(rng, 1, 5);
                    let a = nonzero(rng, 9);
                    Problem::text(
                        format!("{}({})", signed(k), expression(&[(b, "x"), (a, "")])),
                        expression(&[(k * b, "x"), (k * a, "")]),
                    )
                }
                Difficulty::Hard => {
                    let p = nonzero(rng, 9);
                    let q = nonzero(rng, 9);
                    Problem::text(
                        format!("{}{}", linear_factor("x", p), linear_factor("x", q)),
                        expression(&[(1, "x\u{00B2}"), (p + q, "x"), (p * q, "")]),
                    )
                }
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Expand and simplify.".into())
    }
}

// ---------------------------------------------------------------------------
// Factorising quadratics
// ---------------------------------------------------------------------------

pub struct FactorisingQuadratics;

/// `(x + p)(x + q)` with the smaller constant first, so the same quadratic
/// always factorises to the same string.
pub fn factorised(p: i64, q: i64) -> String {
    let (lo, hi) = (p.min(q), p.max(q));
    if lo == hi {
        format!("{}\u{00B2}", linear_factor("x", lo))
    } else {
        format!("{}{}", linear_factor("x", lo), linear_factor("x", hi))
    }
}

impl WorksheetType for FactorisingQuadratics {
    fn id(&self) -> &'static str { "factorising-quadratics" }
    fn label(&self) -> &'static str { "Factorising Quadratics" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        (0..count)
            .map(|_| {
                let (p, q) = match difficulty {
                    Difficulty::Easy   => (rand_int(rng, 1, 10), rand_int(rng, 1, 10)),
                    Difficulty::Normal => (nonzero(rng, 9), nonzero(rng, 9)),
                    Difficulty::Hard   => (nonzero(rng, 12), nonzero(rng, 12)),
                };
                let quadratic = expression(&[(1, "x\u{00B2}"), (p + q, "x"), (p * q, "")]);
                Problem::text(quadratic, factorised(p, q))
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Factorise each expression fully.".into())
    }
}

// ---------------------------------------------------------------------------
// Surds
// ---------------------------------------------------------------------------

pub struct SimplifySurds;

const SQUARE_FREE: &[i64] = &[2, 3, 5, 6, 7, 10, 11, 13, 14, 15];

fn surd_text(coef: i64, radicand: i64) -> String {
    if coef == 1 { format!("\u{221A}{radicand}") } else { format!("{coef}\u{221A}{radicand}") }
}

fn surd_problem(outside: i64, a: i64, b: i64) -> Problem {
    let radicand = a * a * b;
    Problem::html(
        surd_text(outside, radicand),
        format!("\\({}\\)", surd_latex(outside, radicand)),
        surd_text(outside * a, b),
        format!("\\({}\\)", surd_latex(outside * a, b)),
    )
}

impl WorksheetType for SimplifySurds {
    fn id(&self) -> &'static str { "simplify-surds" }
    fn label(&self) -> &'static str { "Simplifying Surds" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        match difficulty {
            Difficulty::Easy => {
                let pool: Vec<(i64, i64)> = (2..=6).flat_map(|a| SQUARE_FREE[..6].iter().map(move |&b| (a, b))).collect();
                shuffled_pool(rng, &pool, count).into_iter().map(|(a, b)| surd_problem(1, a, b)).collect()
            }
            Difficulty::Normal => (0..count)
                .map(|_| {
                    let a = rand_int(rng, 2, 10);
                    let b = pick(rng, SQUARE_FREE);
                    surd_problem(1, a, b)
                })
                .collect(),
            Difficulty::Hard => (0..count)
                .map(|_| {
                    let outside = rand_int(rng, 1, 5);
                    let a = rand_int(rng, 2, 12);
                    let b = pick(rng, SQUARE_FREE);
                    surd_problem(outside, a, b)
                })
                .collect(),
        }
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Write each surd in its simplest form.".into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::{
        format::MINUS, helpers::square_free_split, models::OptionValue, rng::Mulberry32,
    };

    fn number(s: &str) -> i64 {
        s.replace(MINUS, "-").parse().unwrap()
    }

    /// Evaluate `lhs` of a generated equation at `x`.
    fn evaluate(lhs: &str, x: i64) -> i64 {
        let lhs = lhs.replace(MINUS, "-");
        let tokens: Vec<&str> = lhs.split(' ').collect();
        let first = tokens[0];
        let mut value = if let Some(den) = first.strip_prefix("x/") {
            x / den.parse::<i64>().unwrap()
        } else if first == "x" {
            x
        } else {
            first.trim_end_matches('x').parse::<i64>().unwrap() * x
        };
        for pair in tokens[1..].chunks(2) {
            let n: i64 = pair[1].parse().unwrap();
            value += if pair[0] == "+" { n } else { -n };
        }
        value
    }

    #[test]
    fn equation_answers_satisfy_the_equation() {
        for difficulty in Difficulty::ALL {
            for p in Equations.generate(&mut Mulberry32::new(8), difficulty, 200, &Options::new()) {
                let q = p.question.unwrap();
                let (lhs, rhs) = q.split_once(" = ").unwrap();
                let x = number(p.answer.as_ref().unwrap());
                assert_eq!(evaluate(lhs, x), number(rhs), "{q} with x = {x}");
                assert_eq!(p.answer_prefix.as_deref(), Some("x = "));
            }
        }
    }

    #[test]
    fn equation_mode_restricts_forms() {
        let mut options = Options::new();
        options.insert("equationMode".into(), OptionValue::text("one"));
        assert_eq!(EquationMode::from_options(&options), EquationMode::OneStep);
        assert_eq!(Equations.print_title(&options), "One-Step Equations");
        for p in Equations.generate(&mut Mulberry32::new(1), Difficulty::Normal, 100, &options) {
            let q = p.question.unwrap();
            let lhs = q.split_once(" = ").unwrap().0;
            // One-step forms have at most one operation on the left.
            assert!(lhs.split(' ').count() <= 3, "{q}");
            assert!(!(lhs.contains("x/") && lhs.contains('+')), "{q}");
        }
        assert_eq!(EquationMode::from_options(&Options::new()), EquationMode::Mixed);
    }

    #[test]
    fn expanding_matches_known_cases() {
        assert_eq!(format!("3{}", linear_factor("x", 4)), "3(x + 4)");
        assert_eq!(expression(&[(3, "x"), (12, "")]), "3x + 12");
        for p in ExpandingBrackets.generate(&mut Mulberry32::new(2), Difficulty::Hard, 50, &Options::new()) {
            assert!(p.answer.unwrap().starts_with("x\u{00B2}"));
        }
    }

    #[test]
    fn factorised_form_is_canonical() {
        assert_eq!(factorised(3, -2), "(x \u{2212} 2)(x + 3)");
        assert_eq!(factorised(-2, 3), factorised(3, -2));
        assert_eq!(factorised(4, 4), "(x + 4)\u{00B2}");
    }

    #[test]
    fn swapped_roots_give_the_same_dedup_key() {
        let a = Problem::text(expression(&[(1, "x²"), (5, "x"), (6, "")]), factorised(2, 3));
        let b = Problem::text(expression(&[(1, "x²"), (5, "x"), (6, "")]), factorised(3, 2));
        assert_eq!(a, b);
    }

    #[test]
    fn surd_answers_are_fully_simplified() {
        for difficulty in Difficulty::ALL {
            for p in SimplifySurds.generate(&mut Mulberry32::new(3), difficulty, 60, &Options::new()) {
                let q = p.question.unwrap();
                let (coef, radicand) = q.split_once('\u{221A}').unwrap();
                let coef: i64 = if coef.is_empty() { 1 } else { coef.parse().unwrap() };
                let (out, inside) = square_free_split(radicand.parse().unwrap());
                let expected = surd_text(coef * out, inside);
                assert_eq!(p.answer.unwrap(), expected, "{q}");
            }
        }
    }
}
