//! Arena lifecycle management for EggWars.
//!
//! One [`Arena`] is one independent match instance: a lifecycle state
//! machine that owns its teams, player sessions and block ledger, and
//! borrows the world it plays in. The [`GameManager`] holds every arena
//! and every resource generator and advances them once per raw tick.
//!
//! The whole crate is synchronous and single-threaded: player actions
//! (join, leave, place/break, fatal damage) arrive as discrete calls
//! between ticks, and every timed behavior — lobby countdown, respawn
//! countdown, end-of-round relocation — is an explicit counter advanced
//! by the tick, not a scheduled closure.
//!
//! # Key types
//!
//! - [`Arena`] — the per-match state machine
//! - [`GameManager`] — arena pool, join/leave routing, global tick
//! - [`Team`] / [`PlayerSession`] — roster bookkeeping
//! - [`BlockLedger`] — player-placed (breakable, revertible) blocks
//! - [`ResourceGenerator`] — timed, density-capped item spawning
//! - [`ArenaCatalog`] — serde config the arenas are built from

mod arena;
mod blocks;
mod config;
mod error;
mod generator;
mod manager;
mod respawn;
mod state;
mod team;

pub use arena::{
    Arena, ArenaSettings, PlayerSession, COUNTDOWN_SECONDS, EGG_BREAK_GOLD_REWARD,
    ENDING_DELAY_SECONDS,
};
pub use blocks::BlockLedger;
pub use config::{
    ArenaCatalog, ArenaEntry, GeneratorEntry, TeamEntry, WorldProvider,
};
pub use error::{ArenaError, CatalogError};
pub use generator::{ResourceGenerator, GENERATOR_ITEM_CAP};
pub use manager::GameManager;
pub use respawn::{RespawnCoordinator, RespawnEvent, RESPAWN_SECONDS};
pub use state::GameState;
pub use team::Team;
