//! File-backed stats store (one JSON object, player id → counters).

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use eggwars_core::{PlayerId, PlayerStats};

use crate::{StatsError, StatsStore};

/// Persists stats to a single JSON file, keeping a full copy in memory.
///
/// The file is read once at construction and rewritten on every save.
/// Write failures are logged and swallowed — the in-memory copy stays
/// authoritative for the rest of the process lifetime.
pub struct JsonStatsStore {
    path: PathBuf,
    entries: Mutex<HashMap<PlayerId, PlayerStats>>,
}

impl JsonStatsStore {
    /// Opens (or initializes) the store at `path`.
    ///
    /// # Errors
    /// Fails if an existing file can't be read or doesn't parse; a
    /// missing file is fine and starts the store empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                HashMap::new()
            }
            Err(err) => return Err(err.into()),
        };
        tracing::info!(path = %path.display(), players = entries.len(), "stats store opened");
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn flush(&self, entries: &HashMap<PlayerId, PlayerStats>) {
        let json = match serde_json::to_vec_pretty(entries) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(%err, "failed to serialize stats, skipping flush");
                return;
            }
        };
        if let Err(err) = std::fs::write(&self.path, json) {
            tracing::warn!(
                path = %self.path.display(),
                %err,
                "failed to write stats file, keeping in-memory copy"
            );
        }
    }
}

impl StatsStore for JsonStatsStore {
    fn load(&self, player: PlayerId) -> PlayerStats {
        self.entries
            .lock()
            .expect("stats mutex poisoned")
            .get(&player)
            .copied()
            .unwrap_or_default()
    }

    fn save(&self, player: PlayerId, stats: PlayerStats) {
        let mut entries = self.entries.lock().expect("stats mutex poisoned");
        entries.insert(player, stats);
        self.flush(&entries);
    }
}
