//! Collaborator seams: the traits the match core pushes side effects
//! through.
//!
//! The core never owns a world or a network connection. It receives
//! these trait objects at construction (no ambient global lookup) and
//! treats every call as an immediate, fire-and-forget effect. Nothing
//! here blocks, and apart from [`World::drop_resource`] nothing can
//! fail in a way the core reacts to.

use crate::{Aabb, BlockPos, GameMode, Notice, PlayerId, ResourceKind, Title, Vec3};

/// The block states the core writes back into an arena world: eggs at
/// round start/reset, air when reverting player-built structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Air,
    Egg,
}

/// A resource drop the world refused (full chunk, despawned region, …).
/// Generation is best-effort, so callers swallow this.
#[derive(Debug, thiserror::Error)]
#[error("world rejected the drop: {0}")]
pub struct DropError(pub String);

/// Handle to the arena's world, owned by the embedding server.
///
/// `Send + Sync` because the tick driver may live on a runtime thread;
/// implementations use interior mutability where they record anything.
pub trait World: Send + Sync + 'static {
    /// Writes a block state. Used for egg placement and reversion only;
    /// player-placed blocks are written by the external event adapter.
    fn set_block(&self, pos: BlockPos, block: BlockKind);

    /// Drops one unit of a resource item at a world position.
    ///
    /// # Errors
    /// Returns [`DropError`] if the world refuses the spawn. Generators
    /// log and skip the interval.
    fn drop_resource(&self, pos: Vec3, kind: ResourceKind) -> Result<(), DropError>;

    /// Number of droppable resource items currently inside `region`.
    fn resource_item_count(&self, region: Aabb) -> usize;

    /// Despawns every dropped resource item in this world (end of round).
    fn clear_dropped_resources(&self);
}

/// Handle to the embedding server's player API.
///
/// All calls are fire-and-forget; a call naming a player who just
/// disconnected is simply ignored by the implementation.
pub trait PlayerConnector: Send + Sync + 'static {
    fn teleport(&self, player: PlayerId, pos: Vec3);

    fn set_mode(&self, player: PlayerId, mode: GameMode);

    /// Restores full health, hunger and saturation.
    fn restore_vitals(&self, player: PlayerId);

    /// Clears main and armor inventories.
    fn clear_inventory(&self, player: PlayerId);

    /// Adds `count` units of a resource item to the player's inventory.
    fn give_resource(&self, player: PlayerId, kind: ResourceKind, count: u32);

    /// Hands out the basic respawn kit.
    fn give_basic_kit(&self, player: PlayerId);

    fn send_notice(&self, player: PlayerId, notice: Notice);

    fn send_title(&self, player: PlayerId, title: Title);
}
