//! The block ledger: which blocks players placed during the round.
//!
//! Natural terrain is never a member, which makes the ledger double as
//! the grief guard — a break is only permitted for tracked coordinates.
//! At the end of a round every tracked coordinate is reverted to air.

use std::collections::HashSet;

use eggwars_core::{BlockKind, BlockPos, Vec3, World};

/// Tracks player-placed blocks for one arena. Empty outside of an
/// active round.
#[derive(Debug, Default)]
pub struct BlockLedger {
    placed: HashSet<BlockPos>,
}

impl BlockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a placement. The position is floor-discretized onto the
    /// block grid before insertion.
    pub fn add_placed(&mut self, pos: Vec3) {
        self.placed.insert(BlockPos::from_world(pos));
    }

    /// Membership test: `true` only for tracked, player-placed blocks.
    pub fn can_break(&self, pos: Vec3) -> bool {
        self.placed.contains(&BlockPos::from_world(pos))
    }

    /// Erases a key after a successful break.
    pub fn remove_placed(&mut self, pos: Vec3) {
        self.placed.remove(&BlockPos::from_world(pos));
    }

    /// Restores every tracked coordinate to air and clears the ledger.
    /// Safe to call twice — the second call sees an empty set.
    pub fn revert(&mut self, world: &dyn World) {
        for pos in self.placed.drain() {
            world.set_block(pos, BlockKind::Air);
        }
    }

    pub fn len(&self) -> usize {
        self.placed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}
