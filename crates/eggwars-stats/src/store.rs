//! The `StatsStore` trait and the in-memory implementation.
//!
//! # Concurrency note
//!
//! Stores take `&self` because the arena layer holds them behind `Arc`,
//! but all calls arrive from the single tick thread. The `Mutex` inside
//! the implementations is uncontended interior mutability, not a
//! synchronization point.

use std::collections::HashMap;
use std::sync::Mutex;

use eggwars_core::{PlayerId, PlayerStats};

/// External storage for per-player {kills, deaths, wins} counters.
pub trait StatsStore: Send + Sync + 'static {
    /// Loads a player's counters. Unknown players get all zeros.
    fn load(&self, player: PlayerId) -> PlayerStats;

    /// Persists a player's counters. Best-effort: implementations log
    /// failures instead of surfacing them into the match loop.
    fn save(&self, player: PlayerId, stats: PlayerStats);
}

/// A purely in-memory store for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStatsStore {
    entries: Mutex<HashMap<PlayerId, PlayerStats>>,
}

impl MemoryStatsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current contents, for assertions.
    pub fn snapshot(&self) -> HashMap<PlayerId, PlayerStats> {
        self.entries.lock().expect("stats mutex poisoned").clone()
    }
}

impl StatsStore for MemoryStatsStore {
    fn load(&self, player: PlayerId) -> PlayerStats {
        self.entries
            .lock()
            .expect("stats mutex poisoned")
            .get(&player)
            .copied()
            .unwrap_or_default()
    }

    fn save(&self, player: PlayerId, stats: PlayerStats) {
        self.entries
            .lock()
            .expect("stats mutex poisoned")
            .insert(player, stats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_player_loads_zeros() {
        let store = MemoryStatsStore::new();
        assert_eq!(store.load(PlayerId(9)), PlayerStats::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = MemoryStatsStore::new();
        let stats = PlayerStats { kills: 3, deaths: 1, wins: 2 };
        store.save(PlayerId(1), stats);
        assert_eq!(store.load(PlayerId(1)), stats);
    }

    #[test]
    fn test_save_overwrites() {
        let store = MemoryStatsStore::new();
        store.save(PlayerId(1), PlayerStats { kills: 1, ..Default::default() });
        store.save(PlayerId(1), PlayerStats { kills: 5, ..Default::default() });
        assert_eq!(store.load(PlayerId(1)).kills, 5);
    }
}
