//! Target number: pick tiles that add up to the target.
//!
//! The target is the sum of a random non-empty subset of the tiles, so every
//! round has at least one solution.

use rand::RngCore;

use crate::worksheet_engine::{
    helpers::{rand_int, shuffle},
    Difficulty,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Hit,
    Miss { off_by: i64 },
    /// Nothing selected.
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRound {
    tiles: Vec<i64>,
    selected: Vec<bool>,
    target: i64,
}

fn layout(difficulty: Difficulty) -> (usize, i64, i64) {
    match difficulty {
        Difficulty::Easy   => (4, 1, 10),
        Difficulty::Normal => (5, 1, 25),
        Difficulty::Hard   => (6, 5, 60),
    }
}

impl TargetRound {
    pub fn new<R: RngCore + ?Sized>(rng: &mut R, difficulty: Difficulty) -> Self {
        let (n, lo, hi) = layout(difficulty);
        let tiles: Vec<i64> = (0..n).map(|_| rand_int(rng, lo, hi)).collect();

        // Answer first: choose the solution subset, then sum it.
        let mut order: Vec<usize> = (0..n).collect();
        shuffle(rng, &mut order);
        let size = rand_int(rng, 2, n as i64 - 1) as usize;
        let target = order[..size].iter().map(|&i| tiles[i]).sum();

        TargetRound { selected: vec![false; n], tiles, target }
    }

    pub fn tiles(&self) -> &[i64] {
        &self.tiles
    }

    pub fn target(&self) -> i64 {
        self.target
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    /// Flip a tile. Out-of-range indices are ignored.
    pub fn toggle(&mut self, index: usize) {
        if let Some(s) = self.selected.get_mut(index) {
            *s = !*s;
        }
    }

    pub fn clear(&mut self) {
        self.selected.iter_mut().for_each(|s| *s = false);
    }

    pub fn selected_sum(&self) -> i64 {
        self.tiles.iter().zip(&self.selected).filter(|(_, s)| **s).map(|(t, _)| t).sum()
    }

    pub fn submit(&self) -> Verdict {
        if !self.selected.iter().any(|&s| s) {
            return Verdict::Empty;
        }
        match self.selected_sum() - self.target {
            0 => Verdict::Hit,
            off_by => Verdict::Miss { off_by },
        }
    }

    /// Some subset of tiles that hits the target.
    pub fn solution(&self) -> Option<Vec<usize>> {
        let n = self.tiles.len();
        (1u32..(1 << n)).find_map(|mask| {
            let picked: Vec<usize> = (0..n).filter(|i| mask & (1 << i) != 0).collect();
            let sum: i64 = picked.iter().map(|&i| self.tiles[i]).sum();
            (sum == self.target).then_some(picked)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::rng::Mulberry32;

    #[test]
    fn every_round_is_solvable() {
        let mut rng = Mulberry32::new(11);
        for difficulty in Difficulty::ALL {
            for _ in 0..100 {
                let round = TargetRound::new(&mut rng, difficulty);
                assert_eq!(round.tiles().len(), layout(difficulty).0);
                assert!(round.solution().is_some(), "{round:?}");
            }
        }
    }

    #[test]
    fn toggling_and_submitting() {
        let mut round = TargetRound::new(&mut Mulberry32::new(2), Difficulty::Normal);
        assert_eq!(round.submit(), Verdict::Empty);
        let solution = round.solution().unwrap();
        for &i in &solution {
            round.toggle(i);
        }
        assert_eq!(round.submit(), Verdict::Hit);

        let extra = (0..round.tiles().len()).find(|i| !solution.contains(i)).unwrap();
        round.toggle(extra);
        assert_eq!(round.submit(), Verdict::Miss { off_by: round.tiles()[extra] });

        round.toggle(99);
        round.clear();
        assert!(!round.is_selected(solution[0]));
        assert_eq!(round.selected_sum(), 0);
    }
}
