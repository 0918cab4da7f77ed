//! Best-score tracking
//!
//! Keeps a single best score in memory and writes it through to a
//! [`ScoreStore`] whenever it improves.

use crate::persistence::ScoreStore;

/// Best score so far, backed by a store
#[derive(Debug)]
pub struct HighScore<S: ScoreStore> {
    best: u64,
    store: S,
}

impl<S: ScoreStore> HighScore<S> {
    /// Read the stored best; a missing or unreadable store counts as 0
    pub fn load(store: S) -> Self {
        let best = match store.load() {
            Ok(Some(score)) => {
                log::info!("Loaded high score {}", score);
                score
            }
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                0
            }
            Err(e) => {
                log::warn!("Ignoring unreadable high score: {}", e);
                0
            }
        };
        Self { best, store }
    }

    pub fn best(&self) -> u64 {
        self.best
    }

    /// Check if a final score would beat the stored best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.best
    }

    /// Offer a final score. Keeps `max(best, score)` and returns true when
    /// the score set a new best. A failed write is logged and the in-memory
    /// best still updates.
    pub fn record(&mut self, score: u64) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        match self.store.save(score) {
            Ok(()) => log::info!("New high score {} saved", score),
            Err(e) => log::warn!("Failed to save high score {}: {}", score, e),
        }
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryScoreStore, PersistenceError, Result};

    /// Store whose reads and writes always fail
    struct BrokenStore;

    impl ScoreStore for BrokenStore {
        fn load(&self) -> Result<Option<u64>> {
            Err(PersistenceError::Io(std::io::Error::other("disk gone")))
        }

        fn save(&mut self, _score: u64) -> Result<()> {
            Err(PersistenceError::Io(std::io::Error::other("disk gone")))
        }
    }

    #[test]
    fn test_missing_store_defaults_to_zero() {
        let hs = HighScore::load(MemoryScoreStore::default());
        assert_eq!(hs.best(), 0);
    }

    #[test]
    fn test_keeps_larger_score() {
        let mut hs = HighScore::load(MemoryScoreStore { value: Some(1000) });
        assert!(!hs.record(400));
        assert_eq!(hs.best(), 1000);
        assert_eq!(hs.store().value, Some(1000));

        assert!(hs.record(2500));
        assert_eq!(hs.best(), 2500);
        assert_eq!(hs.store().value, Some(2500));

        // Ties are not a new best
        assert!(!hs.record(2500));
    }

    #[test]
    fn test_broken_store_degrades() {
        let mut hs = HighScore::load(BrokenStore);
        assert_eq!(hs.best(), 0);
        assert!(hs.record(700));
        assert_eq!(hs.best(), 700);
    }
}
