use tracing::{info, warn};

use crate::core::PROGRESS_KEY;
use crate::storage::LocalStorage;

/// Highest level index the player may select.
pub struct Progress {
    storage: LocalStorage,
    unlocked: usize,
}

impl Progress {
    pub fn load(storage: LocalStorage) -> Self {
        let unlocked = storage
            .get_item(PROGRESS_KEY)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0);
        Progress { storage, unlocked }
    }

    pub fn unlocked(&self) -> usize {
        self.unlocked
    }

    pub fn is_unlocked(&self, level_idx: usize) -> bool {
        level_idx <= self.unlocked
    }

    /// Advances progress when `level_idx` is at or past the frontier.
    /// Replaying an earlier level changes nothing.
    pub fn record_win(&mut self, level_idx: usize) -> bool {
        if level_idx < self.unlocked {
            return false;
        }
        self.unlocked += 1;
        info!(level = level_idx, unlocked = self.unlocked, "progress advanced");
        if let Err(err) = self.storage.set_item(PROGRESS_KEY, self.unlocked.to_string()) {
            warn!(%err, "failed to persist progress");
        }
        true
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn progress_at(value: &str) -> Progress {
        let mut storage = LocalStorage::in_memory();
        storage.set_item(PROGRESS_KEY, value).unwrap();
        Progress::load(storage)
    }

    #[test]
    fn defaults_to_zero() {
        assert_eq!(Progress::load(LocalStorage::in_memory()).unlocked(), 0);
        assert_eq!(progress_at("garbage").unlocked(), 0);
    }

    #[test]
    fn win_at_frontier_advances() {
        let mut progress = progress_at("2");
        assert!(progress.record_win(2));
        assert_eq!(progress.unlocked(), 3);
        assert_eq!(progress.storage.get_item(PROGRESS_KEY), Some("3"));
    }

    #[test]
    fn win_of_earlier_level_changes_nothing() {
        let mut progress = progress_at("2");
        assert!(!progress.record_win(1));
        assert_eq!(progress.unlocked(), 2);
    }

    #[test]
    fn unlocked_levels_are_selectable() {
        let progress = progress_at("1");
        assert!(progress.is_unlocked(0));
        assert!(progress.is_unlocked(1));
        assert!(!progress.is_unlocked(2));
    }
}
