use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::{Difficulty, MoveCount};
pub use storage::*;

mod storage;

/// Entries kept per difficulty.
pub const MAX_ENTRIES: usize = 3;

/// Format used for the completion date, e.g. `10/19/2026`.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

#[derive(Error, Debug)]
pub enum LeaderboardError {
    #[error("Malformed leaderboard data: {0}")]
    Format(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// One finished game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    difficulty: String,
    moves: MoveCount,
    date: String,
}

impl LeaderboardEntry {
    pub fn new(difficulty: impl Into<String>, moves: MoveCount, date: impl Into<String>) -> Self {
        Self {
            difficulty: difficulty.into(),
            moves,
            date: date.into(),
        }
    }

    pub fn dated(difficulty: Difficulty, moves: MoveCount, date: NaiveDate) -> Self {
        Self::new(difficulty.name(), moves, date.format(DATE_FORMAT).to_string())
    }

    pub fn difficulty(&self) -> &str {
        &self.difficulty
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}

/// Best results per difficulty name, fewest moves first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderboardTable {
    scores: BTreeMap<String, Vec<LeaderboardEntry>>,
}

impl StorageKey for LeaderboardTable {
    const KEY: &'static str = "pairs:leaderboard";
}

impl LeaderboardTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.values().all(Vec::is_empty)
    }

    pub fn entries(&self, difficulty: &str) -> &[LeaderboardEntry] {
        self.scores
            .get(difficulty)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn best(&self, difficulty: &str) -> Option<&LeaderboardEntry> {
        self.entries(difficulty).first()
    }

    /// Entries with their 1-based rank.
    pub fn ranked(&self, difficulty: &str) -> impl Iterator<Item = (usize, &LeaderboardEntry)> {
        self.entries(difficulty)
            .iter()
            .enumerate()
            .map(|(index, entry)| (index + 1, entry))
    }

    pub fn difficulties(&self) -> impl Iterator<Item = &str> {
        self.scores.keys().map(String::as_str)
    }

    /// Whether a game finished in `moves` would make it onto the list.
    pub fn qualifies(&self, difficulty: &str, moves: MoveCount) -> bool {
        let entries = self.entries(difficulty);
        entries.len() < MAX_ENTRIES || entries.last().is_some_and(|last| moves < last.moves)
    }

    /// Adds a result for `difficulty` and keeps only the best [`MAX_ENTRIES`].
    pub fn submit(mut self, difficulty: &str, moves: MoveCount, date: &str) -> Self {
        self.insert(LeaderboardEntry::new(difficulty, moves, date));
        self
    }

    pub fn insert(&mut self, entry: LeaderboardEntry) {
        let entries = self.scores.entry(entry.difficulty.clone()).or_default();
        entries.push(entry);
        rank(entries);
    }

    /// Restores ordering and length limits on data that did not come from [`Self::insert`].
    fn normalize(&mut self) {
        self.scores.values_mut().for_each(rank);
    }
}

fn rank(entries: &mut Vec<LeaderboardEntry>) {
    // stable, so equal scores keep their submission order
    entries.sort_by_key(LeaderboardEntry::moves);
    entries.truncate(MAX_ENTRIES);
}

/// Loads and saves the [`LeaderboardTable`] through some [`KeyValueStorage`].
#[derive(Clone, Debug, Default)]
pub struct LeaderboardStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> LeaderboardStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Persisted table, or an empty one on a cold start. Unreadable data is logged and treated as empty.
    pub fn load(&self) -> LeaderboardTable {
        match self.try_load() {
            Ok(table) => table,
            Err(err) => {
                log::warn!("Discarding stored leaderboard: {}", err);
                LeaderboardTable::default()
            }
        }
    }

    pub fn try_load(&self) -> Result<LeaderboardTable, LeaderboardError> {
        let Some(bytes) = self.storage.get(LeaderboardTable::KEY)? else {
            log::debug!("No stored leaderboard, starting empty");
            return Ok(LeaderboardTable::default());
        };
        let mut table: LeaderboardTable = serde_json::from_slice(&bytes)?;
        table.normalize();
        Ok(table)
    }

    /// Writes the whole table in a single `put`.
    pub fn save(&mut self, table: &LeaderboardTable) -> Result<(), LeaderboardError> {
        let bytes = serde_json::to_vec(table)?;
        self.storage.put(LeaderboardTable::KEY, &bytes)?;
        Ok(())
    }

    /// Submits a finished game and persists right away.
    ///
    /// `table` keeps the new entry even when saving fails.
    pub fn record(
        &mut self,
        table: &mut LeaderboardTable,
        entry: LeaderboardEntry,
    ) -> Result<(), LeaderboardError> {
        table.insert(entry);
        self.save(table).inspect_err(|err| {
            log::error!("Could not save leaderboard: {}", err);
        })
    }
}
