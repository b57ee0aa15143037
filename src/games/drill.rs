//! Timed addition drill.
//!
//! The caller drives the clock by reporting elapsed milliseconds through
//! [`AdditionDrill::tick`]; nothing here reads a real clock.

use rand::RngCore;

use crate::worksheet_engine::{helpers::rand_int, types::arithmetic::addition_range, Difficulty};

pub const ROUND_MS: u64 = 60_000;
/// Every this many answers in a row adds one bonus point per answer.
pub const STREAK_STEP: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum {
    pub a: i64,
    pub b: i64,
}

impl Sum {
    pub fn answer(&self) -> i64 {
        self.a + self.b
    }

    pub fn question(&self) -> String {
        format!("{} + {} =", self.a, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Correct { points: u32 },
    Wrong { expected: i64 },
    /// Time is up; the answer was not counted.
    Finished,
}

pub struct AdditionDrill<R: RngCore> {
    rng: R,
    difficulty: Difficulty,
    current: Sum,
    remaining_ms: u64,
    score: u32,
    streak: u32,
    best_streak: u32,
    answered: u32,
}

impl<R: RngCore> AdditionDrill<R> {
    pub fn new(rng: R, difficulty: Difficulty) -> Self {
        Self::with_duration(rng, difficulty, ROUND_MS)
    }

    pub fn with_duration(mut rng: R, difficulty: Difficulty, duration_ms: u64) -> Self {
        let current = draw(&mut rng, difficulty);
        AdditionDrill {
            rng,
            difficulty,
            current,
            remaining_ms: duration_ms,
            score: 0,
            streak: 0,
            best_streak: 0,
            answered: 0,
        }
    }

    pub fn current(&self) -> Sum {
        self.current
    }

    /// Advance the clock. Returns whether the drill is still running.
    pub fn tick(&mut self, elapsed_ms: u64) -> bool {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
        !self.is_finished()
    }

    pub fn answer(&mut self, value: i64) -> Outcome {
        if self.is_finished() {
            return Outcome::Finished;
        }
        self.answered += 1;
        let expected = self.current.answer();
        self.current = draw(&mut self.rng, self.difficulty);
        if value == expected {
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            let points = 1 + self.streak / STREAK_STEP;
            self.score += points;
            Outcome::Correct { points }
        } else {
            self.streak = 0;
            Outcome::Wrong { expected }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    pub fn answered(&self) -> u32 {
        self.answered
    }
}

fn draw<R: RngCore + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Sum {
    let (lo, hi) = addition_range(difficulty);
    let a = rand_int(rng, lo, hi);
    let b = rand_int(rng, lo, hi);
    Sum { a, b }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::rng::Mulberry32;

    #[test]
    fn streaks_earn_bonus_points() {
        let mut drill = AdditionDrill::new(Mulberry32::new(3), Difficulty::Easy);
        for _ in 0..4 {
            let sum = drill.current();
            assert_eq!(drill.answer(sum.answer()), Outcome::Correct { points: 1 });
        }
        let sum = drill.current();
        assert_eq!(drill.answer(sum.answer()), Outcome::Correct { points: 2 });
        assert_eq!(drill.score(), 6);

        let sum = drill.current();
        assert_eq!(drill.answer(sum.answer() + 1), Outcome::Wrong { expected: sum.answer() });
        assert_eq!(drill.streak(), 0);
        assert_eq!(drill.best_streak(), 5);
        assert_eq!(drill.answered(), 6);
    }

    #[test]
    fn the_clock_ends_the_drill() {
        let mut drill = AdditionDrill::with_duration(Mulberry32::new(1), Difficulty::Normal, 1_000);
        assert!(drill.tick(400));
        assert_eq!(drill.remaining_ms(), 600);
        assert!(!drill.tick(5_000));
        let sum = drill.current();
        assert_eq!(drill.answer(sum.answer()), Outcome::Finished);
        assert_eq!(drill.score(), 0);
    }

    #[test]
    fn sums_use_the_difficulty_range() {
        let mut drill = AdditionDrill::new(Mulberry32::new(8), Difficulty::Hard);
        for _ in 0..50 {
            let sum = drill.current();
            assert!((100..=999).contains(&sum.a) && (100..=999).contains(&sum.b));
            drill.answer(0);
        }
        assert!(drill.current().question().ends_with(" ="));
    }
}
