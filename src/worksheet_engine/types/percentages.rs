use rand::RngCore;

use crate::worksheet_engine::{
    format::with_commas,
    helpers::{coin, gcd, pick, rand_int},
    models::{Difficulty, Options, Problem},
    types::WorksheetType,
};

fn percent_pool(difficulty: Difficulty) -> &'static [i64] {
    match difficulty {
        Difficulty::Easy   => &[10, 25, 50],
        Difficulty::Normal => &[5, 10, 15, 20, 25, 30, 40, 50, 60, 75],
        Difficulty::Hard   => &[1, 2, 3, 12, 15, 35, 45, 65, 85, 95],
    }
}

fn base_bounds(difficulty: Difficulty) -> (i64, i64) {
    match difficulty {
        Difficulty::Easy   => (10, 200),
        Difficulty::Normal => (20, 500),
        Difficulty::Hard   => (100, 2000),
    }
}

/// A base amount in `lo..=hi` that `percent` divides into a whole number.
///
/// The base is a multiple of `100 / gcd(percent, 100)`; every pool entry keeps
/// that step at or below `lo`, so the multiplier range is never empty.
fn whole_base<R: RngCore + ?Sized>(rng: &mut R, percent: i64, (lo, hi): (i64, i64)) -> i64 {
    let step = 100 / gcd(percent, 100);
    let min_m = (lo + step - 1) / step;
    let max_m = hi / step;
    step * rand_int(rng, min_m.max(1), max_m.max(min_m.max(1)))
}

// ---------------------------------------------------------------------------
// Percentage of an amount
// ---------------------------------------------------------------------------

pub struct PercentageOfAmount;

impl WorksheetType for PercentageOfAmount {
    fn id(&self) -> &'static str { "percentage-of-amount" }
    fn label(&self) -> &'static str { "Percentages of Amounts" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let pool = percent_pool(difficulty);
        let bounds = base_bounds(difficulty);
        (0..count)
            .map(|_| {
                let percent = pick(rng, pool);
                let base = whole_base(rng, percent, bounds);
                let answer = base * percent / 100;
                Problem::text(
                    format!("{percent}% of {} =", with_commas(base)),
                    with_commas(answer),
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Percentage change
// ---------------------------------------------------------------------------

pub struct PercentageChange;

impl WorksheetType for PercentageChange {
    fn id(&self) -> &'static str { "percentage-change" }
    fn label(&self) -> &'static str { "Percentage Increase & Decrease" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let pool = percent_pool(difficulty);
        let bounds = base_bounds(difficulty);
        (0..count)
            .map(|_| {
                let percent = pick(rng, pool);
                let base = whole_base(rng, percent, bounds);
                let part = base * percent / 100;
                let (verb, answer) = if coin(rng) { ("Increase", base + part) } else { ("Decrease", base - part) };
                Problem::text(
                    format!("{verb} {} by {percent}%", with_commas(base)),
                    with_commas(answer),
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Ratio sharing
// ---------------------------------------------------------------------------

pub struct RatioSharing;

impl WorksheetType for RatioSharing {
    fn id(&self) -> &'static str { "ratio-sharing" }
    fn label(&self) -> &'static str { "Sharing in a Ratio" }

    fn generate(&self, rng: &mut dyn RngCore, difficulty: Difficulty, count: usize, _options: &Options) -> Vec<Problem> {
        let (parts, max_part, max_k) = match difficulty {
            Difficulty::Easy   => (2, 5, 10),
            Difficulty::Normal => (2, 9, 20),
            Difficulty::Hard   => (3, 9, 25),
        };
        (0..count)
            .map(|_| {
                let mut ratio: Vec<i64> = (0..parts).map(|_| rand_int(rng, 1, max_part)).collect();
                // Keep the ratio in simplest form.
                let g = ratio.iter().fold(0, |g, &r| gcd(g, r));
                ratio.iter_mut().for_each(|r| *r /= g);
                let k = rand_int(rng, 2, max_k);
                let total: i64 = ratio.iter().sum::<i64>() * k;
                let ratio_str = ratio.iter().map(i64::to_string).collect::<Vec<_>>().join(":");
                let shares = ratio.iter().map(|r| with_commas(r * k)).collect::<Vec<_>>().join(" : ");
                Problem::text(format!("Share {} in the ratio {ratio_str}", with_commas(total)), shares)
            })
            .collect()
    }

    fn instruction(&self, _options: &Options) -> Option<String> {
        Some("Give the shares in the same order as the ratio.".into())
    }
}
