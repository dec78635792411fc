//! # EggWars
//!
//! Round-based team-elimination match core for embedding game servers.
//!
//! The embedding server implements two traits — [`World`](eggwars_core::World)
//! for block and item effects, [`PlayerConnector`](eggwars_core::PlayerConnector)
//! for player effects — and feeds the core three kinds of input: player
//! commands, gameplay events (place, break, fatal damage) and a fixed
//! 20 Hz tick. Everything else — lobbies, countdowns, teams, eggs,
//! respawns, generators, win detection, stats — happens in here.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use eggwars::prelude::*;
//! use std::path::Path;
//!
//! # fn run(worlds: &dyn WorldProvider, players: std::sync::Arc<dyn eggwars_core::PlayerConnector>, stats: std::sync::Arc<dyn eggwars_stats::StatsStore>) -> Result<(), EggWarsError> {
//! let catalog = ArenaCatalog::load(Path::new("arenas.json"))?;
//! let mut manager = GameManager::from_catalog(&catalog, worlds, players, stats);
//!
//! // ... in the host's loop, 20 times a second:
//! manager.tick();
//! # Ok(())
//! # }
//! ```

mod command;
mod error;
mod scoreboard;
mod shop;

pub use command::{dispatch, Command, CommandOutcome, ParseError};
pub use error::EggWarsError;
pub use scoreboard::render_scoreboard;
pub use shop::{ShopCatalog, ShopCategory, ShopError, ShopItem, Wallet};

/// Everything an embedding server typically needs in one import.
pub mod prelude {
    pub use crate::{
        dispatch, render_scoreboard, Command, CommandOutcome, EggWarsError, ParseError,
        ShopCatalog, Wallet,
    };
    pub use eggwars_arena::{
        Arena, ArenaCatalog, ArenaError, GameManager, GameState, WorldProvider,
    };
    pub use eggwars_core::{
        BlockKind, BlockPos, GameMode, Notice, PlayerConnector, PlayerId, ResourceKind,
        TeamColor, Vec3, World, TICKS_PER_SECOND,
    };
    pub use eggwars_stats::{JsonStatsStore, MemoryStatsStore, StatsStore};
    pub use eggwars_tick::{TickConfig, TickDriver};
}
