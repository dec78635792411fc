//! Error types for the arena layer.

use eggwars_core::PlayerId;

use crate::GameState;

/// Request validation errors. None of these mutate any state.
#[derive(Debug, thiserror::Error)]
pub enum ArenaError {
    /// No arena with this name is loaded.
    #[error("arena '{0}' not found")]
    NotFound(String),

    /// The arena has no free player slots.
    #[error("arena '{0}' is full")]
    Full(String),

    /// The arena is not accepting players in its current state.
    #[error("arena '{arena}' is not available ({state})")]
    Unavailable { arena: String, state: GameState },

    /// The player is already in an arena (one arena at a time).
    #[error("player {0} is already in an arena")]
    AlreadyInArena(PlayerId),

    /// The player is not in any arena.
    #[error("player {0} is not in any arena")]
    NotInArena(PlayerId),
}

/// Errors loading the arena catalog. A missing world for a single arena
/// is NOT one of these — that arena is skipped with a warning and the
/// rest of the catalog still loads.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog file i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
