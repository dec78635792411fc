//! The arena pool.
//!
//! The [`GameManager`] owns every loaded arena and every resource
//! generator, routes join/leave requests, and fans the global tick out
//! to all of them. Player lookups scan the arenas rather than keeping a
//! reverse map, so an arena resetting itself can never leave a stale
//! player entry behind.

use std::sync::Arc;

use eggwars_core::{PlayerConnector, PlayerId, Vec3};
use eggwars_stats::StatsStore;
use tracing::{info, warn};

use crate::arena::{Arena, ArenaSettings};
use crate::config::{ArenaCatalog, WorldProvider};
use crate::error::ArenaError;
use crate::generator::ResourceGenerator;
use crate::team::Team;

pub struct GameManager {
    arenas: Vec<Arena>,
    generators: Vec<ResourceGenerator>,
}

impl GameManager {
    pub fn new() -> Self {
        Self {
            arenas: Vec::new(),
            generators: Vec::new(),
        }
    }

    /// Builds the pool from a catalog. Entries whose world cannot be
    /// resolved are skipped with a warning; entries marked disabled
    /// still load, but as disabled arenas that never tick or admit
    /// players.
    pub fn from_catalog(
        catalog: &ArenaCatalog,
        worlds: &dyn WorldProvider,
        players: Arc<dyn PlayerConnector>,
        stats: Arc<dyn StatsStore>,
    ) -> Self {
        let mut manager = Self::new();
        for (name, entry) in &catalog.arenas {
            let Some(world) = worlds.world(&entry.world) else {
                warn!(arena = %name, world = %entry.world, "world not found, skipping arena");
                continue;
            };

            let teams: Vec<Team> = entry
                .teams
                .iter()
                .map(|(team_name, team)| {
                    Team::new(
                        team_name.clone(),
                        team.color,
                        team.spawn,
                        team.egg,
                        team.generators.clone(),
                    )
                })
                .collect();

            if entry.enabled {
                for team in &teams {
                    for generator in &team.generators {
                        manager.generators.push(ResourceGenerator::new(
                            name.clone(),
                            generator.position,
                            generator.kind,
                        ));
                    }
                }
                for generator in &entry.center_generators {
                    manager.generators.push(ResourceGenerator::new(
                        name.clone(),
                        generator.position,
                        generator.kind,
                    ));
                }
            }

            let mut arena = Arena::new(
                ArenaSettings {
                    name: name.clone(),
                    min_players: entry.min_players,
                    max_players: entry.max_players,
                    lobby_spawn: entry.lobby_spawn,
                    spectator_spawn: entry.spectator_spawn,
                },
                teams,
                world,
                Arc::clone(&players),
                Arc::clone(&stats),
            );
            if !entry.enabled {
                arena.disable();
            }
            info!(arena = %name, enabled = entry.enabled, "arena loaded");
            manager.arenas.push(arena);
        }
        manager
    }

    /// Registers a hand-built arena and its generators.
    pub fn add_arena(&mut self, arena: Arena, generators: Vec<(Vec3, eggwars_core::ResourceKind)>) {
        for (position, kind) in generators {
            self.generators
                .push(ResourceGenerator::new(arena.name().to_string(), position, kind));
        }
        self.arenas.push(arena);
    }

    pub fn arenas(&self) -> &[Arena] {
        &self.arenas
    }

    pub fn arena(&self, name: &str) -> Option<&Arena> {
        self.arenas.iter().find(|a| a.name() == name)
    }

    pub fn arena_mut(&mut self, name: &str) -> Option<&mut Arena> {
        self.arenas.iter_mut().find(|a| a.name() == name)
    }

    pub fn player_arena(&self, player: PlayerId) -> Option<&Arena> {
        self.arenas.iter().find(|a| a.contains_player(player))
    }

    pub fn player_arena_mut(&mut self, player: PlayerId) -> Option<&mut Arena> {
        self.arenas.iter_mut().find(|a| a.contains_player(player))
    }

    /// Puts a player into the named arena.
    ///
    /// # Errors
    /// [`ArenaError::NotFound`] for an unknown arena,
    /// [`ArenaError::AlreadyInArena`] if the player is in any arena,
    /// plus whatever [`Arena::add_player`] refuses.
    pub fn join_arena(&mut self, player: PlayerId, name: &str) -> Result<(), ArenaError> {
        if !self.arenas.iter().any(|a| a.name() == name) {
            return Err(ArenaError::NotFound(name.to_string()));
        }
        if self.arenas.iter().any(|a| a.contains_player(player)) {
            return Err(ArenaError::AlreadyInArena(player));
        }
        let arena = self
            .arena_mut(name)
            .ok_or_else(|| ArenaError::NotFound(name.to_string()))?;
        arena.add_player(player)
    }

    /// Removes a player from whichever arena holds them.
    ///
    /// # Errors
    /// [`ArenaError::NotInArena`] if no arena does.
    pub fn leave_arena(&mut self, player: PlayerId) -> Result<(), ArenaError> {
        let arena = self
            .player_arena_mut(player)
            .ok_or(ArenaError::NotInArena(player))?;
        arena.remove_player(player)
    }

    /// Advances every arena, then every generator, by one raw tick.
    /// Disabled arenas are skipped.
    pub fn tick(&mut self) {
        for arena in &mut self.arenas {
            if arena.state().is_simulated() {
                arena.tick();
            }
        }
        for generator in &mut self.generators {
            let Some(arena) = self.arenas.iter().find(|a| a.name() == generator.arena) else {
                continue;
            };
            let (state, world) = (arena.state(), Arc::clone(arena.world()));
            generator.tick(state, world.as_ref());
        }
    }

    /// Saves the stats of every player still in any arena.
    pub fn shutdown(&self) {
        for arena in &self.arenas {
            arena.save_all_stats();
        }
        info!("all arena stats saved");
    }
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}
