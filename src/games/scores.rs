//! High-score tables shared by every mini-game.
//!
//! One board per `{game}-{mode}-{difficulty}` key, stored as a JSON array of
//! `{scores, topScore, date}` entries and capped at the best five.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MAX_ENTRIES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    /// Per-round scores of the session.
    pub scores: Vec<u32>,
    pub top_score: u32,
    pub date: String,
}

impl ScoreEntry {
    pub fn new(scores: Vec<u32>, date: impl Into<String>) -> Self {
        let top_score = scores.iter().copied().max().unwrap_or(0);
        ScoreEntry { scores, top_score, date: date.into() }
    }
}

/// Best entries first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    entries: Vec<ScoreEntry>,
}

impl ScoreBoard {
    /// Parse a stored board. Anything unreadable loads as an empty board.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Vec<ScoreEntry>>(raw) {
            Ok(mut entries) => {
                entries.sort_by(|a, b| b.top_score.cmp(&a.top_score));
                entries.truncate(MAX_ENTRIES);
                ScoreBoard { entries }
            }
            Err(e) => {
                warn!(target: "worksheet", error = %e, "discarding malformed score board");
                ScoreBoard::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }

    /// Insert `entry` in rank order. Returns its 0-based rank, or `None` if it
    /// did not make the board. Ties rank below existing entries.
    pub fn record(&mut self, entry: ScoreEntry) -> Option<usize> {
        let rank = self.entries.iter().position(|e| e.top_score < entry.top_score).unwrap_or(self.entries.len());
        if rank >= MAX_ENTRIES {
            return None;
        }
        self.entries.insert(rank, entry);
        self.entries.truncate(MAX_ENTRIES);
        Some(rank)
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    pub fn best(&self) -> Option<u32> {
        self.entries.first().map(|e| e.top_score)
    }

    /// Would `score` make the board?
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_ENTRIES || self.entries.last().is_some_and(|e| e.top_score < score)
    }
}

pub fn storage_key(game: &str, mode: &str, difficulty: &str) -> String {
    format!("{game}-{mode}-{difficulty}")
}

/// String key/value persistence, e.g. browser local storage.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.items.insert(key.to_string(), value);
    }
}

pub fn load_board(store: &dyn ScoreStore, key: &str) -> ScoreBoard {
    store.get(key).map(|raw| ScoreBoard::from_json(&raw)).unwrap_or_default()
}

pub fn save_board(store: &mut dyn ScoreStore, key: &str, board: &ScoreBoard) {
    store.set(key, board.to_json());
}

/// Load, record, save. Returns the entry's rank if it made the board.
pub fn submit_score(store: &mut dyn ScoreStore, key: &str, entry: ScoreEntry) -> Option<usize> {
    let mut board = load_board(store, key);
    let rank = board.record(entry)?;
    save_board(store, key, &board);
    Some(rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(top: u32) -> ScoreEntry {
        ScoreEntry::new(vec![top / 2, top], "2024-03-01")
    }

    #[test]
    fn board_keeps_the_top_five() {
        let mut board = ScoreBoard::default();
        for top in [10, 50, 30, 70, 20, 60] {
            board.record(entry(top));
        }
        let tops: Vec<u32> = board.entries().iter().map(|e| e.top_score).collect();
        assert_eq!(tops, [70, 60, 50, 30, 20]);
        assert_eq!(board.record(entry(5)), None);
        assert!(!board.qualifies(20));
        assert!(board.qualifies(21));
    }

    #[test]
    fn ties_rank_below_existing_entries() {
        let mut board = ScoreBoard::default();
        board.record(ScoreEntry::new(vec![40], "first"));
        assert_eq!(board.record(ScoreEntry::new(vec![40], "second")), Some(1));
        assert_eq!(board.entries()[0].date, "first");
    }

    #[test]
    fn json_uses_camel_case() {
        let mut board = ScoreBoard::default();
        board.record(ScoreEntry::new(vec![3, 9], "2024-03-01"));
        assert_eq!(board.to_json(), r#"[{"scores":[3,9],"topScore":9,"date":"2024-03-01"}]"#);
    }

    #[test]
    fn malformed_storage_loads_empty() {
        assert!(ScoreBoard::from_json("not json").entries().is_empty());
        assert!(ScoreBoard::from_json(r#"{"topScore":1}"#).entries().is_empty());
    }

    #[test]
    fn store_round_trip_through_key() {
        let key = storage_key("simon", "classic", "hard");
        assert_eq!(key, "simon-classic-hard");
        let mut store = MemoryStore::default();
        assert_eq!(submit_score(&mut store, &key, entry(12)), Some(0));
        assert_eq!(submit_score(&mut store, &key, entry(30)), Some(0));
        assert_eq!(load_board(&store, &key).best(), Some(30));
        assert_eq!(load_board(&store, "other").best(), None);
    }
}
