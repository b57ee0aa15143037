//! Quiz buzzer for several players sharing one screen.
//!
//! The first buzz locks the question to that player. A correct answer scores
//! and closes the question; a wrong one locks that player out and reopens
//! the question for everyone else.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub score: u32,
    locked_out: bool,
}

impl Player {
    pub fn is_locked_out(&self) -> bool {
        self.locked_out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionState {
    Open,
    /// `player` buzzed first and owes an answer.
    Answering { player: usize },
    /// Answered correctly, or every player got it wrong.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buzz {
    Accepted,
    /// Somebody else already holds the question.
    TooLate,
    LockedOut,
    Closed,
    UnknownPlayer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buzzer {
    players: Vec<Player>,
    state: QuestionState,
    question: usize,
}

impl Buzzer {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let players = names
            .into_iter()
            .map(|name| Player { name: name.into(), score: 0, locked_out: false })
            .collect();
        Buzzer { players, state: QuestionState::Open, question: 1 }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn state(&self) -> QuestionState {
        self.state
    }

    /// 1-based number of the current question.
    pub fn question(&self) -> usize {
        self.question
    }

    pub fn buzz(&mut self, player: usize) -> Buzz {
        let Some(p) = self.players.get(player) else {
            return Buzz::UnknownPlayer;
        };
        match self.state {
            QuestionState::Closed => Buzz::Closed,
            QuestionState::Answering { .. } => Buzz::TooLate,
            QuestionState::Open if p.locked_out => Buzz::LockedOut,
            QuestionState::Open => {
                self.state = QuestionState::Answering { player };
                Buzz::Accepted
            }
        }
    }

    /// Mark the locked-in player's answer. Returns the player judged, or
    /// `None` when nobody holds the question.
    pub fn judge(&mut self, correct: bool) -> Option<usize> {
        let QuestionState::Answering { player } = self.state else {
            return None;
        };
        if correct {
            self.players[player].score += 1;
            self.state = QuestionState::Closed;
        } else {
            self.players[player].locked_out = true;
            self.state = if self.players.iter().all(|p| p.locked_out) {
                QuestionState::Closed
            } else {
                QuestionState::Open
            };
        }
        Some(player)
    }

    /// Move on: lockouts clear and the question opens.
    pub fn next_question(&mut self) {
        self.players.iter_mut().for_each(|p| p.locked_out = false);
        self.state = QuestionState::Open;
        self.question += 1;
    }

    /// Index of the highest scorer; ties go to the earlier player.
    pub fn leader(&self) -> Option<usize> {
        self.players
            .iter()
            .enumerate()
            .rev()
            .max_by_key(|(_, p)| p.score)
            .map(|(i, _)| i)
    }
}
