//! Timed resource generators.
//!
//! A generator is a dumb counter: every N raw ticks it asks the world
//! to drop one item of its kind at its position, unless the area around
//! it is already saturated. It only runs while its arena's round is
//! live.

use eggwars_core::{Aabb, ResourceKind, Vec3, World};
use tracing::debug;

use crate::state::GameState;

/// Most items allowed in a generator's density box before it skips a
/// spawn. Keeps an unattended island from flooding with drops.
pub const GENERATOR_ITEM_CAP: usize = 8;

#[derive(Debug)]
pub struct ResourceGenerator {
    pub arena: String,
    pub position: Vec3,
    pub kind: ResourceKind,
    interval_ticks: u64,
    tick_counter: u64,
}

impl ResourceGenerator {
    pub fn new(arena: String, position: Vec3, kind: ResourceKind) -> Self {
        Self {
            arena,
            position,
            kind,
            interval_ticks: kind.spawn_interval_ticks(),
            tick_counter: 0,
        }
    }

    /// The box inspected before each spawn: 2 blocks out horizontally,
    /// one below to three above.
    fn density_box(&self) -> Aabb {
        Aabb {
            min: self.position.offset(-2.0, -1.0, -2.0),
            max: self.position.offset(2.0, 3.0, 2.0),
        }
    }

    /// Advances the generator by one raw tick. Off-round ticks do not
    /// accumulate, so a generator never fires a backlog when the round
    /// starts.
    pub fn tick(&mut self, state: GameState, world: &dyn World) {
        if state != GameState::Active {
            self.tick_counter = 0;
            return;
        }

        self.tick_counter += 1;
        if self.tick_counter < self.interval_ticks {
            return;
        }
        self.tick_counter = 0;

        if world.resource_item_count(self.density_box()) >= GENERATOR_ITEM_CAP {
            return;
        }

        let drop_at = self.position.offset(0.5, 1.0, 0.5);
        if let Err(err) = world.drop_resource(drop_at, self.kind) {
            // A chunk can unload mid-round; losing one drop is fine.
            debug!(arena = %self.arena, kind = %self.kind.display_name(), %err, "resource drop failed");
        }
    }
}
