//! Shared types for the EggWars match core.
//!
//! This crate is the leaf of the workspace: identity newtypes, geometry,
//! the closed resource/gamemode/color variants, and the two collaborator
//! traits ([`World`], [`PlayerConnector`]) through which the core pushes
//! fire-and-forget side effects to the embedding server.
//!
//! # How it fits in the stack
//!
//! ```text
//! eggwars (commands, scoreboard, shop)
//!     ↕
//! eggwars-arena (lifecycle, teams, generators)  ← uses these types
//!     ↕
//! eggwars-core (this crate)  ← owns PlayerId, Vec3, World, ...
//! ```

mod geometry;
mod hooks;
mod types;

pub use geometry::{Aabb, BlockPos, Vec3};
pub use hooks::{BlockKind, DropError, PlayerConnector, World};
pub use types::{
    GameMode, Notice, PlayerId, PlayerStats, ResourceKind, TeamColor,
    Title, Tone, TICKS_PER_SECOND,
};
