//! High-score table, stored as a plain JSON list under its own key.

use log::warn;
use serde::{Deserialize, Serialize};

use super::rules::{LEADERBOARD_KEY, LEADERBOARD_SIZE};
use super::save::{KeyValueStore, SaveError};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: u64,
    /// `YYYY-MM-DD`.
    pub date: String,
}

impl LeaderboardEntry {
    pub fn new(username: &str, score: u64, date: &str) -> Self {
        Self {
            username: username.to_string(),
            score,
            date: date.to_string(),
        }
    }
}

/// Entries shown to a fresh install.
pub fn default_entries() -> Vec<LeaderboardEntry> {
    [
        ("MasterChef", 2500, "2023-04-15"),
        ("FoodNinja", 2200, "2023-04-16"),
        ("QuickServer", 2100, "2023-04-14"),
        ("SpeedCooker", 1800, "2023-04-13"),
        ("GourmetGuru", 1700, "2023-04-12"),
        ("RecipeMaster", 1500, "2023-04-11"),
        ("FoodArtist", 1300, "2023-04-10"),
        ("ChefSupreme", 1200, "2023-04-09"),
        ("CookingPro", 1000, "2023-04-08"),
        ("KitchenKing", 900, "2023-04-07"),
    ]
    .into_iter()
    .map(|(name, score, date)| LeaderboardEntry::new(name, score, date))
    .collect()
}

#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard {
    entries: Vec<LeaderboardEntry>,
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::from_entries(default_entries())
    }
}

impl Leaderboard {
    /// Sorts by score, highest first. Ties keep their input order.
    pub fn from_entries(mut entries: Vec<LeaderboardEntry>) -> Self {
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        Self { entries }
    }

    /// Load the table. A missing key is seeded with the default entries.
    pub fn load(store: &mut dyn KeyValueStore) -> Result<Self, SaveError> {
        match store.get(LEADERBOARD_KEY)? {
            Some(json) => {
                let entries: Vec<LeaderboardEntry> =
                    serde_json::from_str(&json).map_err(SaveError::Parse)?;
                Ok(Self::from_entries(entries))
            }
            None => {
                let board = Self::default();
                board.save(store)?;
                Ok(board)
            }
        }
    }

    /// Like [`Leaderboard::load`], but an unreadable table is replaced by
    /// the defaults.
    pub fn load_or_default(store: &mut dyn KeyValueStore) -> Self {
        match Self::load(store) {
            Ok(board) => board,
            Err(e) => {
                warn!("leaderboard unreadable, resetting: {e}");
                let board = Self::default();
                if let Err(e) = board.save(store) {
                    warn!("failed to reset leaderboard: {e}");
                }
                board
            }
        }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) -> Result<(), SaveError> {
        let json = serde_json::to_string(&self.entries).map_err(SaveError::Serialize)?;
        store.set(LEADERBOARD_KEY, &json)?;
        Ok(())
    }

    /// Record a finished run. Returns its 1-based rank if it made the top
    /// table. Entries below the table are dropped.
    pub fn submit(&mut self, entry: LeaderboardEntry) -> Option<usize> {
        // after existing entries with the same score
        let idx = self
            .entries
            .iter()
            .position(|e| e.score < entry.score)
            .unwrap_or(self.entries.len());
        if idx >= LEADERBOARD_SIZE {
            return None;
        }
        self.entries.insert(idx, entry);
        self.entries.truncate(LEADERBOARD_SIZE);
        Some(idx + 1)
    }

    /// Best entries, highest first.
    pub fn top(&self) -> &[LeaderboardEntry] {
        &self.entries[..self.entries.len().min(LEADERBOARD_SIZE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::save::MemoryStore;

    #[test]
    fn missing_table_is_seeded() {
        let mut store = MemoryStore::new();
        let board = Leaderboard::load(&mut store).unwrap();
        assert_eq!(board.top().len(), 10);
        assert_eq!(board.top()[0].username, "MasterChef");
        assert_eq!(board.top()[9].score, 900);
        assert!(store.get(LEADERBOARD_KEY).unwrap().is_some());
    }

    #[test]
    fn stored_table_is_sorted_on_load() {
        let mut store = MemoryStore::new();
        store
            .set(
                LEADERBOARD_KEY,
                r#"[{"username":"a","score":5,"date":"2024-01-01"},
                    {"username":"b","score":50,"date":"2024-01-02"}]"#,
            )
            .unwrap();
        let board = Leaderboard::load(&mut store).unwrap();
        let names: Vec<&str> = board.top().iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn submit_ranks_and_truncates() {
        let mut board = Leaderboard::default();
        assert_eq!(
            board.submit(LeaderboardEntry::new("Me", 2000, "2024-05-01")),
            Some(4)
        );
        assert_eq!(board.top().len(), 10);
        assert_eq!(board.top()[3].username, "Me");
        assert!(board.top().iter().all(|e| e.username != "KitchenKing"));
    }

    #[test]
    fn low_score_misses_the_table() {
        let mut board = Leaderboard::default();
        assert_eq!(board.submit(LeaderboardEntry::new("Me", 10, "2024-05-01")), None);
        assert_eq!(board, Leaderboard::default());
    }

    #[test]
    fn tie_goes_below_existing_entry() {
        let mut board = Leaderboard::default();
        assert_eq!(
            board.submit(LeaderboardEntry::new("Me", 2500, "2024-05-01")),
            Some(2)
        );
    }

    #[test]
    fn corrupt_table_resets_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(LEADERBOARD_KEY, "oops").unwrap();
        assert!(Leaderboard::load(&mut store).is_err());
        let board = Leaderboard::load_or_default(&mut store);
        assert_eq!(board, Leaderboard::default());
        assert!(Leaderboard::load(&mut store).is_ok());
    }

    #[test]
    fn save_then_load() {
        let mut store = MemoryStore::new();
        let mut board = Leaderboard::default();
        board.submit(LeaderboardEntry::new("Me", 3000, "2024-05-01"));
        board.save(&mut store).unwrap();
        assert_eq!(Leaderboard::load(&mut store).unwrap(), board);
    }
}
