use rand::RngCore;

use crate::worksheet_engine::{
    format::{power_html, power_text, signed, superscript, with_commas, TIMES},
    helpers::{gcd, lcm, nonzero, pick, prime_factors, rand_int, shuffled_pool},
    models::{option_text, Difficulty, OptionKind, OptionSpec, Options, Problem},
    types::WorksheetType,
};

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

pub struct Rounding;

const ROUNDING_OPTIONS: &[OptionSpec] = &[OptionSpec {
    id: "roundTo",
    label: "Round to",
    kind: OptionKind::Select {
        values: &[("mixed", "Mixed"), ("10", "Nearest 10"), ("100", "Nearest 100"), ("1000", "Nearest 1,000")],
        default: "mixed",
    },
}];

/// Round half up to a multiple of `place`.
fn round_to(n: i64, place: i64) -> i64 {
    (n + place / 2) / place * place
}

impl WorksheetType for Rounding {
    fn id(&self) -> &'static str { "rounding" }
    fn label(&self) -> &'static str { "Rounding" }
    fn options(&self) -> &'static [OptionSpec] { ROUNDING_OPTIONS }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, options: &Options) -> Vec<Problem> {
        let (lo, hi, places): (i64, i64, &[i64]) = match difficulty {
            Difficulty::Easy   => (11, 999, &[10, 100]),
            Difficulty::Normal => (101, 9_999, &[10, 100, 1000]),
            Difficulty::Hard   => (1_001, 99_999, &[10, 100, 1000]),
        };
        let fixed = option_text(ROUNDING_OPTIONS, options, "roundTo").parse::<i64>().ok();
        (0..count)
            .map(|_| {
                let n = rand_int(rng, lo, hi);
                let place = match fixed {
                    Some(p) => p,
                    None => pick(rng, places),
                };
                Problem::text(
                    format!("Round {} to the nearest {}", with_commas(n), with_commas(place)),
                    with_commas(round_to(n, place)),
                )
            })
            .collect()
    }

    fn print_title(&self, options: &Options) -> String {
        match option_text(ROUNDING_OPTIONS, options, "roundTo").parse::<i64>() {
            Ok(place) => format!("Rounding to the Nearest {}", with_commas(place)),
            Err(_) => "Rounding".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Place value
// ---------------------------------------------------------------------------

pub struct PlaceValue;

/// `n` with thousands separators and the digit at `place` (0 = units)
/// wrapped by `mark`.
fn mark_digit(n: i64, place: usize, mark: impl Fn(char) -> String) -> String {
    let formatted = with_commas(n);
    let mut digit_index = 0;
    let mut out: Vec<String> = Vec::new();
    for ch in formatted.chars().rev() {
        if ch.is_ascii_digit() {
            out.push(if digit_index == place { mark(ch) } else { ch.to_string() });
            digit_index += 1;
        } else {
            out.push(ch.to_string());
        }
    }
    out.into_iter().rev().collect()
}

impl WorksheetType for PlaceValue {
    fn id(&self) -> &'static str { "place-value" }
    fn label(&self) -> &'static str { "Place Value" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (lo, hi) = match difficulty {
            Difficulty::Easy   => (100, 999),
            Difficulty::Normal => (1_000, 99_999),
            Difficulty::Hard   => (100_000, 9_999_999),
        };
        (0..count)
            .map(|_| {
                let n = rand_int(rng, lo, hi);
                let digits: Vec<i64> = n.to_string().chars().rev().filter_map(|c| c.to_digit(10)).map(i64::from).collect();
                let nonzero_places: Vec<usize> = (0..digits.len()).filter(|&i| digits[i] != 0).collect();
                let place = pick(rng, &nonzero_places);
                let value = digits[place] * 10i64.pow(place as u32);
                Problem::html(
                    format!("What is the value of the underlined digit in {}?", mark_digit(n, place, |c| format!("{c}\u{0332}"))),
                    format!("What is the value of the underlined digit in {}?", mark_digit(n, place, |c| format!("<u>{c}</u>"))),
                    with_commas(value),
                    with_commas(value),
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// HCF / LCM
// ---------------------------------------------------------------------------

pub struct HcfLcm;

const HCF_LCM_OPTIONS: &[OptionSpec] = &[OptionSpec {
    id: "mode",
    label: "Find",
    kind: OptionKind::Select {
        values: &[("mixed", "Both"), ("hcf", "HCF only"), ("lcm", "LCM only")],
        default: "mixed",
    },
}];

impl WorksheetType for HcfLcm {
    fn id(&self) -> &'static str { "hcf-lcm" }
    fn label(&self) -> &'static str { "HCF & LCM" }
    fn options(&self) -> &'static [OptionSpec] { HCF_LCM_OPTIONS }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, options: &Options) -> Vec<Problem> {
        let mode = option_text(HCF_LCM_OPTIONS, options, "mode");
        let ((hlo, hhi), (mlo, mhi)) = match difficulty {
            Difficulty::Easy   => ((2, 6), (1, 6)),
            Difficulty::Normal => ((2, 12), (1, 9)),
            Difficulty::Hard   => ((2, 20), (2, 12)),
        };
        (0..count)
            .map(|_| {
                // The HCF comes first; the numbers are it times coprime multipliers.
                let h = rand_int(rng, hlo, hhi);
                let m1 = rand_int(rng, mlo, mhi);
                let partners: Vec<i64> = (mlo..=mhi).filter(|&m| m != m1 && gcd(m, m1) == 1).collect();
                let m2 = pick(rng, &partners);
                let (a, b) = (h * m1.min(m2), h * m1.max(m2));
                let want_hcf = match mode.as_str() {
                    "hcf" => true,
                    "lcm" => false,
                    _ => rand_int(rng, 0, 1) == 0,
                };
                if want_hcf {
                    Problem::text(format!("HCF of {a} and {b}"), h.to_string())
                } else {
                    Problem::text(format!("LCM of {a} and {b}"), lcm(a, b).to_string())
                }
            })
            .collect()
    }

    fn print_title(&self, options: &Options) -> String {
        match option_text(HCF_LCM_OPTIONS, options, "mode").as_str() {
            "hcf" => "Highest Common Factor".into(),
            "lcm" => "Lowest Common Multiple".into(),
            _ => self.label().into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Prime factorisation
// ---------------------------------------------------------------------------

pub struct PrimeFactorisation;

impl WorksheetType for PrimeFactorisation {
    fn id(&self) -> &'static str { "prime-factorisation" }
    fn label(&self) -> &'static str { "Prime Factorisation" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (primes, min_n, max_n): (&[i64], i64, i64) = match difficulty {
            Difficulty::Easy   => (&[2, 3, 5, 7], 2, 4),
            Difficulty::Normal => (&[2, 3, 5, 7, 11], 3, 5),
            Difficulty::Hard   => (&[2, 3, 5, 7, 11, 13], 4, 6),
        };
        (0..count)
            .map(|_| {
                let how_many = rand_int(rng, min_n, max_n);
                let n: i64 = (0..how_many).map(|_| pick(rng, primes)).product();
                let factors = prime_factors(n);
                let sep = format!(" {TIMES} ");
                let text = factors
                    .iter()
                    .map(|&(p, e)| if e == 1 { p.to_string() } else { format!("{p}{}", superscript(e)) })
                    .collect::<Vec<_>>()
                    .join(sep.as_str());
                let html = factors
                    .iter()
                    .map(|&(p, e)| if e == 1 { p.to_string() } else { power_html(p, e) })
                    .collect::<Vec<_>>()
                    .join(sep.as_str());
                let question = format!("Write {} as a product of prime factors", with_commas(n));
                Problem::html(question.clone(), question, text, html)
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Use index notation for repeated factors.".into())
    }
}

// ---------------------------------------------------------------------------
// Powers
// ---------------------------------------------------------------------------

pub struct Powers;

fn power_pool(difficulty: Difficulty) -> Vec<(i64, u32)> {
    match difficulty {
        Difficulty::Easy => {
            let mut pool: Vec<(i64, u32)> = (2..=10).flat_map(|b| [(b, 2), (b, 3)]).collect();
            pool.extend([(2, 4), (2, 5), (2, 6), (3, 4), (10, 4), (10, 5)]);
            pool
        }
        Difficulty::Normal => (2..=12).flat_map(|b| (2..=4).map(move |e| (b, e))).collect(),
        Difficulty::Hard => (-5..=15)
            .filter(|b: &i64| b.abs() > 1)
            .flat_map(|b| (2..=5).map(move |e| (b, e)))
            .filter(|&(b, e)| b.abs().pow(e) <= 100_000)
            .collect(),
    }
}

impl WorksheetType for Powers {
    fn id(&self) -> &'static str { "powers" }
    fn label(&self) -> &'static str { "Powers & Indices" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        shuffled_pool(rng, &power_pool(difficulty), count)
            .into_iter()
            .map(|(base, exp)| {
                let value = base.pow(exp);
                Problem::html(
                    format!("{} =", power_text(base, exp)),
                    format!("{} =", power_html(base, exp)),
                    signed(value),
                    signed(value),
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Sequences
// ---------------------------------------------------------------------------

pub struct Sequences;

impl WorksheetType for Sequences {
    fn id(&self) -> &'static str { "sequences" }
    fn label(&self) -> &'static str { "Number Sequences" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        (0..count)
            .map(|_| {
                let (start, step) = match difficulty {
                    Difficulty::Easy => (rand_int(rng, 1, 20), rand_int(rng, 2, 10)),
                    Difficulty::Normal => (rand_int(rng, 1, 50), nonzero(rng, 10)),
                    Difficulty::Hard => (rand_int(rng, -50, 50), nonzero(rng, 25)),
                };
                let shown = (0..4).map(|i| signed(start + i * step)).collect::<Vec<_>>().join(", ");
                Problem::text(format!("{shown}, __"), signed(start + 4 * step))
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Write the next term in each sequence.".into())
    }
}

// ---------------------------------------------------------------------------
// Mean
// ---------------------------------------------------------------------------

pub struct Mean;

impl WorksheetType for Mean {
    fn id(&self) -> &'static str { "mean" }
    fn label(&self) -> &'static str { "Finding the Mean" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let ((nlo, nhi), (mlo, mhi)) = match difficulty {
            Difficulty::Easy   => ((3, 5), (2, 10)),
            Difficulty::Normal => ((4, 6), (5, 30)),
            Difficulty::Hard   => ((5, 8), (10, 100)),
        };
        (0..count)
            .map(|_| {
                let n = rand_int(rng, nlo, nhi) as usize;
                let mean = rand_int(rng, mlo, mhi);
                // Start level and move amounts between entries: the total, and
                // so the mean, never changes, and no entry drops below zero.
                let mut values = vec![mean; n];
                for _ in 0..n {
                    let from = rand_int(rng, 0, n as i64 - 1) as usize;
                    let to = rand_int(rng, 0, n as i64 - 1) as usize;
                    let amount = rand_int(rng, 0, values[from]);
                    values[from] -= amount;
                    values[to] += amount;
                }
                let list = values.iter().map(i64::to_string).collect::<Vec<_>>().join(", ");
                Problem::text(format!("Mean of {list}"), mean.to_string())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::{format::MINUS, models::OptionValue, rng::Mulberry32};

    fn number(s: &str) -> i64 {
        s.replace(',', "").replace(MINUS, "-").parse().unwrap()
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_to(45, 10), 50);
        assert_eq!(round_to(44, 10), 40);
        assert_eq!(round_to(4_500, 1000), 5_000);
        assert_eq!(round_to(4_499, 1000), 4_000);
    }

    #[test]
    fn rounding_respects_fixed_place() {
        let mut options = Options::new();
        options.insert("roundTo".into(), OptionValue::text("100"));
        for p in Rounding.generate(&mut Mulberry32::new(1), Difficulty::Normal, 50, &options) {
            assert!(p.question.as_ref().unwrap().ends_with("nearest 100"));
            assert_eq!(number(p.answer.as_ref().unwrap()) % 100, 0);
        }
        assert_eq!(Rounding.print_title(&options), "Rounding to the Nearest 100");
    }

    #[test]
    fn rounding_title_matches_question_wording() {
        let mut options = Options::new();
        options.insert("roundTo".into(), OptionValue::text("1000"));
        assert_eq!(Rounding.print_title(&options), "Rounding to the Nearest 1,000");
        let p = &Rounding.generate(&mut Mulberry32::new(4), Difficulty::Hard, 1, &options)[0];
        assert!(p.question.as_ref().unwrap().ends_with("nearest 1,000"));
        assert_eq!(Rounding.print_title(&Options::new()), "Rounding");
    }

    #[test]
    fn place_value_marks_one_nonzero_digit() {
        assert_eq!(mark_digit(47_382, 2, |c| format!("[{c}]")), "47,[3]82");
        assert_eq!(mark_digit(47_382, 4, |c| format!("[{c}]")), "[4]7,382");
        for p in PlaceValue.generate(&mut Mulberry32::new(2), Difficulty::Hard, 50, &Options::new()) {
            let html = p.question_html.unwrap();
            assert_eq!(html.matches("<u>").count(), 1);
            assert_ne!(number(p.answer.as_ref().unwrap()), 0);
        }
    }

    #[test]
    fn hcf_and_lcm_are_consistent() {
        for difficulty in Difficulty::ALL {
            for p in HcfLcm.generate(&mut Mulberry32::new(3), difficulty, 100, &Options::new()) {
                let q = p.question.unwrap();
                let words: Vec<&str> = q.split(' ').collect();
                let (a, b) = (number(words[2]), number(words[4]));
                let expected = if words[0] == "HCF" { gcd(a, b) } else { lcm(a, b) };
                assert_eq!(number(p.answer.as_ref().unwrap()), expected, "{q}");
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn prime_factorisation_answers_multiply_back() {
        for p in PrimeFactorisation.generate(&mut Mulberry32::new(4), Difficulty::Hard, 50, &Options::new()) {
            let q = p.question.unwrap();
            let n = number(q.split(' ').nth(1).unwrap());
            let html = p.answer_html.unwrap();
            let product: i64 = html
                .split(&format!(" {TIMES} "))
                .map(|f| match f.split_once("<sup>") {
                    Some((base, rest)) => number(base).pow(rest.trim_end_matches("</sup>").parse().unwrap()),
                    None => number(f),
                })
                .product();
            assert_eq!(product, n, "{q}");
        }
    }

    #[test]
    fn power_pools_meet_the_distinct_floor() {
        for difficulty in Difficulty::ALL {
            assert!(power_pool(difficulty).len() >= 20, "{difficulty}");
        }
    }

    #[test]
    fn sequences_continue_by_the_common_difference() {
        for p in Sequences.generate(&mut Mulberry32::new(5), Difficulty::Hard, 50, &Options::new()) {
            let q = p.question.unwrap();
            let terms: Vec<i64> = q.trim_end_matches(", __").split(", ").map(number).collect();
            let step = terms[1] - terms[0];
            assert_ne!(step, 0);
            assert_eq!(number(p.answer.as_ref().unwrap()), terms[3] + step);
        }
    }

    #[test]
    fn mean_lists_average_to_the_answer() {
        for difficulty in Difficulty::ALL {
            for p in Mean.generate(&mut Mulberry32::new(6), difficulty, 50, &Options::new()) {
                let q = p.question.unwrap();
                let values: Vec<i64> = q.trim_start_matches("Mean of ").split(", ").map(number).collect();
                assert!(values.iter().all(|&v| v >= 0));
                let mean = number(p.answer.as_ref().unwrap());
                assert_eq!(values.iter().sum::<i64>(), mean * values.len() as i64, "{q}");
            }
        }
    }
}
