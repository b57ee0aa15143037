//! Simon: repeat a growing sequence of coloured pads.
//!
//! The caller plays the sequence back to the player (timing and sound are
//! its business), then calls [`Simon::start_input`] and feeds presses in.

use rand::RngCore;

use crate::worksheet_engine::helpers::rand_int;

pub const PADS: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The sequence is being shown; presses are ignored.
    Showing,
    /// Waiting for the pad at `position` in the sequence.
    Input { position: usize },
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Correct,
    /// Whole sequence repeated; one pad was added and the game is showing again.
    RoundComplete,
    Wrong,
    /// Not accepting input right now, or not a pad.
    Ignored,
}

pub struct Simon<R: RngCore> {
    rng: R,
    sequence: Vec<u8>,
    phase: Phase,
}

impl<R: RngCore> Simon<R> {
    pub fn new(rng: R) -> Self {
        let mut game = Simon { rng, sequence: Vec::new(), phase: Phase::Showing };
        game.extend();
        game
    }

    fn extend(&mut self) {
        let pad = rand_int(&mut self.rng, 0, i64::from(PADS) - 1) as u8;
        self.sequence.push(pad);
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Rounds fully repeated so far.
    pub fn score(&self) -> usize {
        self.sequence.len() - 1
    }

    /// The playback finished; start taking presses.
    pub fn start_input(&mut self) {
        if self.phase == Phase::Showing {
            self.phase = Phase::Input { position: 0 };
        }
    }

    pub fn press(&mut self, pad: u8) -> Press {
        let Phase::Input { position } = self.phase else {
            return Press::Ignored;
        };
        if pad >= PADS {
            return Press::Ignored;
        }
        if self.sequence[position] != pad {
            self.phase = Phase::GameOver;
            return Press::Wrong;
        }
        if position + 1 == self.sequence.len() {
            self.extend();
            self.phase = Phase::Showing;
            Press::RoundComplete
        } else {
            self.phase = Phase::Input { position: position + 1 };
            Press::Correct
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worksheet_engine::rng::Mulberry32;

    #[test]
    fn repeating_the_sequence_grows_it() {
        let mut game = Simon::new(Mulberry32::new(5));
        for round in 1..=5 {
            assert_eq!(game.sequence().len(), round);
            assert_eq!(game.press(0), Press::Ignored, "presses during playback are ignored");
            game.start_input();
            let sequence = game.sequence().to_vec();
            for (i, &pad) in sequence.iter().enumerate() {
                let expected = if i + 1 == sequence.len() { Press::RoundComplete } else { Press::Correct };
                assert_eq!(game.press(pad), expected);
            }
            assert_eq!(game.phase(), Phase::Showing);
        }
        assert_eq!(game.score(), 5);
        assert!(game.sequence().iter().all(|&p| p < PADS));
    }

    #[test]
    fn a_wrong_pad_ends_the_game() {
        let mut game = Simon::new(Mulberry32::new(1));
        game.start_input();
        let wrong = (game.sequence()[0] + 1) % PADS;
        assert_eq!(game.press(wrong), Press::Wrong);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.press(game.sequence()[0]), Press::Ignored);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = Simon::new(Mulberry32::new(77));
        let b = Simon::new(Mulberry32::new(77));
        assert_eq!(a.sequence(), b.sequence());
    }
}
