use rand::RngCore;

use crate::worksheet_engine::{
    format::{fraction_answer, fraction_html, fraction_text, mixed_answer, MINUS},
    helpers::{gcd, lcm, pick, rand_int, reduce},
    models::{option_flag, Difficulty, OptionKind, OptionSpec, Options, Problem},
    types::WorksheetType,
};

/// A proper fraction `p/q` in lowest terms with `q` in `2..=max_den`.
fn proper_fraction<R: RngCore + ?Sized>(rng: &mut R, max_den: i64) -> (i64, i64) {
    let q = rand_int(rng, 2, max_den);
    let p = rand_int(rng, 1, q - 1);
    reduce(p, q)
}

// ---------------------------------------------------------------------------
// Simplifying
// ---------------------------------------------------------------------------

pub struct SimplifyFractions;

impl WorksheetType for SimplifyFractions {
    fn id(&self) -> &'static str { "simplify-fractions" }
    fn label(&self) -> &'static str { "Simplifying Fractions" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (max_den, max_k) = match difficulty {
            Difficulty::Easy   => (6, 6),
            Difficulty::Normal => (12, 10),
            Difficulty::Hard   => (20, 15),
        };
        (0..count)
            .map(|_| {
                // The simplest form is the answer; scale it up for the question.
                let (p, q) = proper_fraction(rng, max_den);
                let k = rand_int(rng, 2, max_k);
                let (text, html) = fraction_answer(p, q);
                Problem::html(
                    format!("{} =", fraction_text(p * k, q * k)),
                    format!("{} =", fraction_html(p * k, q * k)),
                    text,
                    html,
                )
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Write each fraction in its simplest form.".into())
    }
}

// ---------------------------------------------------------------------------
// Adding and subtracting
// ---------------------------------------------------------------------------

pub struct FractionAddition;

const FRACTION_ADDITION_OPTIONS: &[OptionSpec] = &[OptionSpec {
    id: "mixedNumbers",
    label: "Answers as mixed numbers",
    kind: OptionKind::Checkbox { default: false },
}];

impl WorksheetType for FractionAddition {
    fn id(&self) -> &'static str { "fraction-addition" }
    fn label(&self) -> &'static str { "Adding Fractions" }
    fn options(&self) -> &'static [OptionSpec] { FRACTION_ADDITION_OPTIONS }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, options: &Options) -> Vec<Problem> {
        let mixed = option_flag(FRACTION_ADDITION_OPTIONS, options, "mixedNumbers");
        (0..count)
            .map(|_| {
                let (a, b, c, d, subtract) = match difficulty {
                    Difficulty::Easy => {
                        let d = rand_int(rng, 3, 12);
                        let a = rand_int(rng, 1, d - 1);
                        let c = rand_int(rng, 1, d - 1);
                        (a, d, c, d, false)
                    }
                    Difficulty::Normal => {
                        let b = rand_int(rng, 2, 10);
                        let d = rand_int(rng, 2, 10);
                        let a = rand_int(rng, 1, b - 1);
                        let c = rand_int(rng, 1, d - 1);
                        (a, b, c, d, false)
                    }
                    Difficulty::Hard => {
                        let b = rand_int(rng, 2, 12);
                        let d = rand_int(rng, 2, 12);
                        let a = rand_int(rng, 1, 2 * b);
                        let c = rand_int(rng, 1, 2 * d);
                        (a, b, c, d, rand_int(rng, 0, 1) == 1)
                    }
                };
                let den = lcm(b, d);
                let left = a * (den / b);
                let right = c * (den / d);
                let num = if subtract { left - right } else { left + right };
                let (text, html) = if mixed { mixed_answer(num, den) } else { fraction_answer(num, den) };
                let op = if subtract { MINUS } else { '+' };
                Problem::html(
                    format!("{} {op} {} =", fraction_text(a, b), fraction_text(c, d)),
                    format!("{} {op} {} =", fraction_html(a, b), fraction_html(c, d)),
                    text,
                    html,
                )
            })
            .collect()
    }

    fn print_title(&self, _options: &Options) -> String {
        "Adding & Subtracting Fractions".into()
    }

    fn instruction(&self, options: &Options) -> Option<String> {
        Some(if option_flag(FRACTION_ADDITION_OPTIONS, options, "mixedNumbers") {
            "Simplify your answers and write improper fractions as mixed numbers.".into()
        } else {
            "Give each answer in its simplest form.".into()
        })
    }
}

// ---------------------------------------------------------------------------
// Fraction of an amount
// ---------------------------------------------------------------------------

pub struct FractionOfAmount;

impl WorksheetType for FractionOfAmount {
    fn id(&self) -> &'static str { "fraction-of-amount" }
    fn label(&self) -> &'static str { "Fractions of Amounts" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        (0..count)
            .map(|_| {
                let ((p, q), m) = match difficulty {
                    Difficulty::Easy => {
                        let q = pick(rng, &[2, 3, 4, 5, 10]);
                        ((1, q), rand_int(rng, 1, 10))
                    }
                    Difficulty::Normal => (proper_fraction(rng, 10), rand_int(rng, 2, 12)),
                    Difficulty::Hard   => (proper_fraction(rng, 12), rand_int(rng, 5, 25)),
                };
                // Amount is a multiple of the denominator so the answer is whole.
                let amount = q * m;
                debug_assert_eq!(gcd(p, q), 1);
                Problem::html(
                    format!("{} of {amount} =", fraction_text(p, q)),
                    format!("{} of {amount} =", fraction_html(p, q)),
                    (p * m).to_string(),
                    (p * m).to_string(),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::{models::OptionValue, rng::Mulberry32};

    fn parse_fraction(s: &str) -> (i64, i64) {
        let s = s.replace(MINUS, "-");
        match s.split_once('/') {
            Some((n, d)) => (n.parse().unwrap(), d.parse().unwrap()),
            None => (s.parse().unwrap(), 1),
        }
    }

    #[test]
    fn simplified_answers_are_in_lowest_terms_and_equal_the_question() {
        for difficulty in Difficulty::ALL {
            for p in SimplifyFractions.generate(&mut Mulberry32::new(4), difficulty, 100, &Options::new()) {
                let question = p.question.unwrap();
                let (qn, qd) = parse_fraction(question.trim_end_matches(" ="));
                let (an, ad) = parse_fraction(p.answer.as_ref().unwrap());
                assert_eq!(gcd(an, ad), 1);
                assert!(ad > 1, "simplest form of a proper fraction keeps a denominator");
                assert_eq!(qn * ad, an * qd, "{question}");
            }
        }
    }

    #[test]
    fn fraction_sums_never_show_denominator_one() {
        for difficulty in Difficulty::ALL {
            for p in FractionAddition.generate(&mut Mulberry32::new(12), difficulty, 200, &Options::new()) {
                let answer = p.answer.unwrap();
                assert!(!answer.ends_with("/1"), "{answer}");
                assert!(!p.answer_html.unwrap().contains("<sub>1</sub>"));
            }
        }
    }

    #[test]
    fn fraction_sum_values_are_correct() {
        for p in FractionAddition.generate(&mut Mulberry32::new(21), Difficulty::Hard, 200, &Options::new()) {
            let q = p.question.unwrap();
            let tokens: Vec<&str> = q.split(' ').collect();
            let (a, b) = parse_fraction(tokens[0]);
            let (c, d) = parse_fraction(tokens[2]);
            let (num, den) = if tokens[1] == "+" { (a * d + c * b, b * d) } else { (a * d - c * b, b * d) };
            let (an, ad) = parse_fraction(p.answer.as_ref().unwrap());
            assert_eq!(num * ad, an * den, "{q}");
        }
    }

    #[test]
    fn mixed_numbers_option_changes_improper_answers() {
        let mut options = Options::new();
        options.insert("mixedNumbers".into(), OptionValue::Bool(true));
        let problems = FractionAddition.generate(&mut Mulberry32::new(21), Difficulty::Hard, 100, &options);
        assert!(problems.iter().any(|p| p.answer.as_ref().unwrap().contains(' ')));
    }

    #[test]
    fn fraction_of_amount_is_whole() {
        for difficulty in Difficulty::ALL {
            for p in FractionOfAmount.generate(&mut Mulberry32::new(30), difficulty, 100, &Options::new()) {
                let q = p.question.unwrap();
                let (frac, rest) = q.split_once(" of ").unwrap();
                let (n, d) = parse_fraction(frac);
                let amount: i64 = rest.trim_end_matches(" =").parse().unwrap();
                let answer: i64 = p.answer.unwrap().parse().unwrap();
                assert_eq!(amount % d, 0);
                assert_eq!(answer, amount / d * n);
            }
        }
    }
}
