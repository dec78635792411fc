//! Per-player respawn countdowns.
//!
//! Each downed player with a living egg gets an explicit timer that the
//! arena advances once per raw tick. The coordinator never touches the
//! player itself; it emits events and leaves the teleport/restore work
//! to the arena, which still owns all the context.

use std::collections::HashMap;

use eggwars_core::{PlayerId, TICKS_PER_SECOND};

/// Seconds a downed player waits before being put back on their island.
pub const RESPAWN_SECONDS: u32 = 5;

#[derive(Debug)]
struct RespawnTimer {
    countdown: u32,
    tick_acc: u64,
}

/// What a single tick of advancement produced for one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnEvent {
    /// A second elapsed; `remaining` seconds are still on the clock.
    Notify { player: PlayerId, remaining: u32 },
    /// The countdown ran out; the player should be placed back in play.
    Due { player: PlayerId },
}

#[derive(Debug, Default)]
pub struct RespawnCoordinator {
    timers: HashMap<PlayerId, RespawnTimer>,
}

impl RespawnCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts (or restarts) the countdown for a player.
    pub fn begin(&mut self, player: PlayerId) {
        self.timers.insert(
            player,
            RespawnTimer {
                countdown: RESPAWN_SECONDS,
                tick_acc: 0,
            },
        );
    }

    /// Drops a pending countdown, e.g. when the player leaves.
    pub fn cancel(&mut self, player: PlayerId) {
        self.timers.remove(&player);
    }

    pub fn is_respawning(&self, player: PlayerId) -> bool {
        self.timers.contains_key(&player)
    }

    pub fn clear(&mut self) {
        self.timers.clear();
    }

    /// Drops every pending countdown and reports who was still waiting.
    pub fn drain(&mut self) -> Vec<PlayerId> {
        self.timers.drain().map(|(player, _)| player).collect()
    }

    /// Advances every timer by one raw tick. Timers fire once per
    /// second: a fire first announces the remaining time, and the fire
    /// after the count hits zero reports the player as due. Due players
    /// are removed from the coordinator before this returns.
    pub fn advance_tick(&mut self) -> Vec<RespawnEvent> {
        let mut events = Vec::new();
        let mut done = Vec::new();

        for (player, timer) in &mut self.timers {
            timer.tick_acc += 1;
            if timer.tick_acc < TICKS_PER_SECOND {
                continue;
            }
            timer.tick_acc = 0;

            if timer.countdown > 0 {
                events.push(RespawnEvent::Notify {
                    player: *player,
                    remaining: timer.countdown,
                });
                timer.countdown -= 1;
            } else {
                events.push(RespawnEvent::Due { player: *player });
                done.push(*player);
            }
        }

        for player in done {
            self.timers.remove(&player);
        }
        events
    }
}
