//! Player statistics storage for EggWars.
//!
//! The match core calls [`StatsStore::load`] when a player joins an
//! arena and [`StatsStore::save`] on leave, on win credit, and on
//! shutdown. Missing entries default to all-zero counters.
//!
//! Two implementations ship here: [`JsonStatsStore`] persists to a JSON
//! file the way the rest of the workspace serializes things, and
//! [`MemoryStatsStore`] backs tests and the demo.

mod error;
mod json;
mod store;

pub use error::StatsError;
pub use json::JsonStatsStore;
pub use store::{MemoryStatsStore, StatsStore};
