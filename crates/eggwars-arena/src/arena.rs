//! The per-match state machine.
//!
//! An [`Arena`] owns everything one match needs: the lifecycle state,
//! the teams, the player sessions, the block ledger and the respawn
//! coordinator. Side effects leave through the [`World`] and
//! [`PlayerConnector`] handles injected at construction. All timing is
//! explicit: [`Arena::tick`] is called once per raw tick and every
//! countdown in here is a counter it advances.

use std::collections::HashMap;
use std::sync::Arc;

use eggwars_core::{
    BlockKind, BlockPos, GameMode, Notice, PlayerConnector, PlayerId, PlayerStats, ResourceKind,
    Title, Vec3, World, TICKS_PER_SECOND,
};
use eggwars_stats::StatsStore;
use tracing::{debug, info};

use crate::blocks::BlockLedger;
use crate::error::ArenaError;
use crate::respawn::{RespawnCoordinator, RespawnEvent};
use crate::state::GameState;
use crate::team::Team;

/// Seconds on the lobby countdown once enough players are in.
pub const COUNTDOWN_SECONDS: u32 = 30;

/// Seconds between the round ending and everyone being sent home.
pub const ENDING_DELAY_SECONDS: u32 = 8;

/// Gold handed to the player who destroys an egg.
pub const EGG_BREAK_GOLD_REWARD: u32 = 5;

/// Static per-arena parameters, read from the catalog.
#[derive(Debug, Clone)]
pub struct ArenaSettings {
    pub name: String,
    pub min_players: usize,
    pub max_players: usize,
    pub lobby_spawn: Vec3,
    pub spectator_spawn: Vec3,
}

/// One player's in-arena state.
#[derive(Debug, Clone)]
pub struct PlayerSession {
    pub id: PlayerId,
    /// Index into the arena's team list. `None` until the round starts.
    pub team: Option<usize>,
    pub stats: PlayerStats,
    pub spectator: bool,
}

#[derive(Debug)]
struct EndingTimer {
    seconds_left: u32,
    tick_acc: u64,
}

pub struct Arena {
    settings: ArenaSettings,
    state: GameState,
    world: Arc<dyn World>,
    players: Arc<dyn PlayerConnector>,
    stats: Arc<dyn StatsStore>,
    /// Pristine team layout the live list is rebuilt from on reset.
    layout: Vec<Team>,
    teams: Vec<Team>,
    sessions: HashMap<PlayerId, PlayerSession>,
    /// Players in the order they joined; drives team assignment.
    join_order: Vec<PlayerId>,
    respawns: RespawnCoordinator,
    blocks: BlockLedger,
    countdown: u32,
    tick_acc: u64,
    elapsed_secs: u64,
    ending: Option<EndingTimer>,
}

impl Arena {
    pub fn new(
        settings: ArenaSettings,
        teams: Vec<Team>,
        world: Arc<dyn World>,
        players: Arc<dyn PlayerConnector>,
        stats: Arc<dyn StatsStore>,
    ) -> Self {
        Self {
            settings,
            state: GameState::Waiting,
            world,
            players,
            stats,
            layout: teams.clone(),
            teams,
            sessions: HashMap::new(),
            join_order: Vec::new(),
            respawns: RespawnCoordinator::new(),
            blocks: BlockLedger::new(),
            countdown: COUNTDOWN_SECONDS,
            tick_acc: 0,
            elapsed_secs: 0,
            ending: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn world(&self) -> &Arc<dyn World> {
        &self.world
    }

    pub fn player_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn max_players(&self) -> usize {
        self.settings.max_players
    }

    pub fn contains_player(&self, player: PlayerId) -> bool {
        self.sessions.contains_key(&player)
    }

    pub fn session(&self, player: PlayerId) -> Option<&PlayerSession> {
        self.sessions.get(&player)
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn countdown_remaining(&self) -> u32 {
        self.countdown
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn is_respawning(&self, player: PlayerId) -> bool {
        self.respawns.is_respawning(player)
    }

    /// Players still in the fight on the given team.
    pub fn team_alive_count(&self, team: usize) -> usize {
        self.teams
            .get(team)
            .map(|t| t.alive_players(&self.sessions, |p| self.respawns.is_respawning(p)))
            .unwrap_or(0)
    }

    // ---- joining and leaving -------------------------------------------

    /// Admits a player into the waiting lobby.
    ///
    /// # Errors
    /// [`ArenaError::Unavailable`] outside the waiting state,
    /// [`ArenaError::Full`] at capacity.
    pub fn add_player(&mut self, player: PlayerId) -> Result<(), ArenaError> {
        if !self.state.is_joinable() {
            return Err(ArenaError::Unavailable {
                arena: self.settings.name.clone(),
                state: self.state,
            });
        }
        if self.sessions.len() >= self.settings.max_players {
            return Err(ArenaError::Full(self.settings.name.clone()));
        }

        let stats = self.stats.load(player);
        self.sessions.insert(
            player,
            PlayerSession {
                id: player,
                team: None,
                stats,
                spectator: false,
            },
        );
        self.join_order.push(player);

        self.players.teleport(player, self.settings.lobby_spawn);
        self.players.set_mode(player, GameMode::Adventure);
        self.players.clear_inventory(player);
        self.players.restore_vitals(player);

        info!(arena = %self.settings.name, %player, count = self.sessions.len(), "player joined");
        self.broadcast(Notice::info(format!(
            "◆ {player} joined the game! ({}/{})",
            self.sessions.len(),
            self.settings.max_players
        )));

        if self.sessions.len() >= self.settings.min_players {
            self.start_countdown();
        }
        Ok(())
    }

    /// Removes a player, saving their stats. Falls back to the waiting
    /// state if the departure breaks the start threshold mid-countdown.
    ///
    /// # Errors
    /// [`ArenaError::NotInArena`] if the player holds no session here.
    pub fn remove_player(&mut self, player: PlayerId) -> Result<(), ArenaError> {
        let session = self
            .sessions
            .remove(&player)
            .ok_or(ArenaError::NotInArena(player))?;

        self.stats.save(player, session.stats);
        self.respawns.cancel(player);
        self.join_order.retain(|p| *p != player);
        if let Some(team) = session.team {
            self.teams[team].remove_member(player);
        }

        info!(arena = %self.settings.name, %player, count = self.sessions.len(), "player left");

        match self.state {
            GameState::Starting if self.sessions.len() < self.settings.min_players => {
                self.state = GameState::Waiting;
                self.countdown = COUNTDOWN_SECONDS;
                self.tick_acc = 0;
                self.broadcast(Notice::error("✗ Countdown cancelled!"));
            }
            GameState::Active => self.check_win(),
            _ => {}
        }
        Ok(())
    }

    fn start_countdown(&mut self) {
        if self.state != GameState::Waiting {
            return;
        }
        self.state = GameState::Starting;
        self.countdown = COUNTDOWN_SECONDS;
        self.tick_acc = 0;
        info!(arena = %self.settings.name, "countdown started");
        self.broadcast(Notice::info(format!(
            "Game starts in {COUNTDOWN_SECONDS} seconds!"
        )));
    }

    // ---- the tick -------------------------------------------------------

    /// Advances the arena by one raw tick.
    pub fn tick(&mut self) {
        match self.state {
            GameState::Waiting | GameState::Disabled => {}
            GameState::Starting => self.tick_countdown(),
            GameState::Active => self.tick_round(),
            GameState::Ending => self.tick_ending(),
        }
    }

    fn tick_countdown(&mut self) {
        self.tick_acc += 1;
        if self.tick_acc < TICKS_PER_SECOND {
            return;
        }
        self.tick_acc = 0;

        self.countdown -= 1;
        if self.countdown == 0 {
            self.start_game();
        } else if self.countdown <= 5 {
            self.broadcast(Notice::warning(format!(
                "Game starts in {} seconds!",
                self.countdown
            )));
        } else if self.countdown % 10 == 0 {
            self.broadcast(Notice::info(format!(
                "Game starts in {} seconds!",
                self.countdown
            )));
        }
    }

    fn tick_round(&mut self) {
        self.tick_acc += 1;
        if self.tick_acc >= TICKS_PER_SECOND {
            self.tick_acc = 0;
            self.elapsed_secs += 1;
        }

        for event in self.respawns.advance_tick() {
            match event {
                RespawnEvent::Notify { player, remaining } => {
                    self.players.send_title(
                        player,
                        Title {
                            title: remaining.to_string(),
                            subtitle: "Respawning...".into(),
                        },
                    );
                }
                RespawnEvent::Due { player } => self.resolve_respawn(player),
            }
        }

        // Event handlers also evaluate immediately; this pass catches
        // anything they raced with (a leaver mid-respawn, for one).
        self.check_win();
    }

    fn tick_ending(&mut self) {
        let Some(timer) = self.ending.as_mut() else {
            return;
        };
        timer.tick_acc += 1;
        if timer.tick_acc < TICKS_PER_SECOND {
            return;
        }
        timer.tick_acc = 0;
        timer.seconds_left -= 1;
        if timer.seconds_left == 0 {
            self.finish_round();
        }
    }

    // ---- round start ----------------------------------------------------

    fn start_game(&mut self) {
        self.state = GameState::Active;
        self.elapsed_secs = 0;
        self.tick_acc = 0;
        info!(arena = %self.settings.name, players = self.sessions.len(), "round started");

        // Teams fill round-robin in join order, so sizes differ by at
        // most one.
        let team_count = self.teams.len();
        for (i, player) in self.join_order.clone().into_iter().enumerate() {
            let team = i % team_count;
            self.teams[team].add_member(player);
            if let Some(session) = self.sessions.get_mut(&player) {
                session.team = Some(team);
            }
            self.players.teleport(player, self.teams[team].spawn);
            self.players.set_mode(player, GameMode::Survival);
        }

        // A slot nobody filled forfeits its egg, so it can never hold
        // the round open.
        for team in &mut self.teams {
            if team.members.is_empty() {
                team.destroy_egg();
            }
        }
        for team in &self.teams {
            if team.egg_alive() {
                self.world.set_block(team.egg_pos, BlockKind::Egg);
            }
        }

        self.broadcast(Notice::success(
            "⚔ Game started! Protect your egg and destroy the others!",
        ));
        self.broadcast_title(Title {
            title: "EggWars".into(),
            subtitle: "Protect your egg!".into(),
        });
    }

    // ---- blocks ---------------------------------------------------------

    /// Records a block the player just placed. Only live rounds track
    /// placements; outside of one the placement is refused.
    pub fn try_place_block(&mut self, player: PlayerId, pos: Vec3) -> bool {
        if self.state != GameState::Active {
            return false;
        }
        match self.sessions.get(&player) {
            Some(session) if !session.spectator => {
                self.blocks.add_placed(pos);
                true
            }
            _ => false,
        }
    }

    /// Decides whether a break at `pos` may proceed. A break on a live
    /// egg block is rerouted to egg handling and always refused as a
    /// normal break; everything else is permitted only for ledgered
    /// blocks. Eggs are never ledger entries, so the egg check runs
    /// first on the exact block coordinate.
    pub fn try_break_block(&mut self, player: PlayerId, pos: Vec3) -> bool {
        if self.state != GameState::Active {
            return false;
        }
        let Some(session) = self.sessions.get(&player) else {
            return false;
        };
        if session.spectator {
            return false;
        }

        let broken = BlockPos::from_world(pos);
        for idx in 0..self.teams.len() {
            let team = &self.teams[idx];
            if team.egg_alive() && team.egg_pos == broken {
                self.handle_egg_break(player, idx);
                return false;
            }
        }

        if self.blocks.can_break(pos) {
            self.blocks.remove_placed(pos);
            true
        } else {
            false
        }
    }

    fn handle_egg_break(&mut self, breaker: PlayerId, team_idx: usize) {
        let own_team = self
            .sessions
            .get(&breaker)
            .and_then(|s| s.team)
            .is_some_and(|t| t == team_idx);
        if own_team {
            self.players.send_notice(
                breaker,
                Notice::error("✗ You cannot destroy your own team's egg!"),
            );
            return;
        }

        let (egg_pos, color, victims) = {
            let team = &mut self.teams[team_idx];
            team.destroy_egg();
            (team.egg_pos, team.color, team.members.clone())
        };
        self.world.set_block(egg_pos, BlockKind::Air);
        info!(arena = %self.settings.name, %breaker, team = %color, "egg destroyed");

        self.broadcast(Notice::warning(format!(
            "⚠ {breaker} destroyed {color} team's egg!"
        )));
        for victim in victims {
            if self.sessions.contains_key(&victim) {
                self.players.send_title(
                    victim,
                    Title {
                        title: "Egg destroyed!".into(),
                        subtitle: "You will no longer respawn!".into(),
                    },
                );
            }
        }

        self.players
            .give_resource(breaker, ResourceKind::Gold, EGG_BREAK_GOLD_REWARD);
        self.players.send_notice(
            breaker,
            Notice::success(format!("+{EGG_BREAK_GOLD_REWARD} gold for the egg!")),
        );

        self.check_win();
    }

    // ---- combat, death and respawn ---------------------------------------

    /// Whether `attacker` may damage `victim`: live round, both in
    /// play, different teams.
    pub fn can_attack(&self, attacker: PlayerId, victim: PlayerId) -> bool {
        if self.state != GameState::Active {
            return false;
        }
        let (Some(a), Some(v)) = (self.sessions.get(&attacker), self.sessions.get(&victim))
        else {
            return false;
        };
        if a.spectator || v.spectator {
            return false;
        }
        match (a.team, v.team) {
            (Some(at), Some(vt)) => at != vt,
            _ => false,
        }
    }

    /// Handles a killing blow. With the victim's egg alive this starts
    /// a respawn countdown; without it the victim is out for good.
    pub fn handle_fatal_damage(&mut self, victim: PlayerId, killer: Option<PlayerId>) {
        if self.state != GameState::Active {
            return;
        }
        let Some(session) = self.sessions.get_mut(&victim) else {
            return;
        };
        if session.spectator {
            return;
        }
        session.stats.deaths += 1;
        let victim_team = session.team;

        if let Some(killer) = killer {
            if let Some(killer_session) = self.sessions.get_mut(&killer) {
                killer_session.stats.kills += 1;
                self.players
                    .send_notice(killer, Notice::success(format!("⚔ Killed {victim}")));
            }
        }

        let egg_alive = victim_team
            .map(|t| self.teams[t].egg_alive())
            .unwrap_or(false);

        self.put_in_spectator_limbo(victim);
        if egg_alive {
            self.respawns.begin(victim);
            self.players.send_notice(victim, Notice::info("You died! Respawning..."));
        } else {
            self.players
                .send_notice(victim, Notice::error("✗ You are eliminated!"));
            self.check_win();
        }
    }

    fn put_in_spectator_limbo(&mut self, player: PlayerId) {
        if let Some(session) = self.sessions.get_mut(&player) {
            session.spectator = true;
        }
        self.players
            .teleport(player, self.settings.spectator_spawn);
        self.players.set_mode(player, GameMode::Spectator);
        self.players.clear_inventory(player);
    }

    fn resolve_respawn(&mut self, player: PlayerId) {
        if self.state != GameState::Active {
            return;
        }
        let Some(team_idx) = self.sessions.get(&player).and_then(|s| s.team) else {
            return;
        };
        let (spawn, egg_alive) = {
            let team = &self.teams[team_idx];
            (team.spawn, team.egg_alive())
        };

        if let Some(session) = self.sessions.get_mut(&player) {
            session.spectator = false;
        }
        self.players.teleport(player, spawn);
        self.players.set_mode(player, GameMode::Survival);
        self.players.restore_vitals(player);
        self.players.give_basic_kit(player);
        self.players
            .send_notice(player, Notice::success("✓ You have respawned successfully!"));

        // The egg can fall while the countdown runs.
        if !egg_alive {
            self.players.send_notice(
                player,
                Notice::warning("⚠ Your egg is destroyed — this is your final life!"),
            );
        }
        debug!(arena = %self.settings.name, %player, "respawned");
    }

    // ---- win handling and teardown ----------------------------------------

    /// A team stays in the running while its egg holds or anyone on it
    /// still stands; an egg-less team dies with its last member.
    fn check_win(&mut self) {
        if self.state != GameState::Active {
            return;
        }
        let respawning = |p: PlayerId| self.respawns.is_respawning(p);
        let contenders: Vec<usize> = (0..self.teams.len())
            .filter(|i| {
                let team = &self.teams[*i];
                team.egg_alive() || team.alive_players(&self.sessions, respawning) > 0
            })
            .collect();
        if contenders.len() <= 1 {
            self.end_game(contenders.first().copied());
        }
    }

    fn end_game(&mut self, winner: Option<usize>) {
        self.state = GameState::Ending;
        // Players caught mid-respawn sit in spectator limbo but still
        // count as survivors; remember them before the timers go away.
        let interrupted = self.respawns.drain();

        match winner {
            Some(idx) => {
                let (color, members) = {
                    let team = &self.teams[idx];
                    (team.color, team.members.clone())
                };
                info!(arena = %self.settings.name, team = %color, "round won");
                self.broadcast(Notice::success(format!(
                    "★ Team {color} won the game! ★"
                )));

                for member in members {
                    let Some(session) = self.sessions.get_mut(&member) else {
                        continue;
                    };
                    // Members eliminated for good stay spectators and
                    // get no win credit.
                    if session.spectator && !interrupted.contains(&member) {
                        continue;
                    }
                    session.spectator = false;
                    session.stats.wins += 1;
                    self.players.send_title(
                        member,
                        Title {
                            title: "Victory!".into(),
                            subtitle: format!("Team {color} wins!"),
                        },
                    );
                    self.players.clear_inventory(member);
                    self.players.set_mode(member, GameMode::Adventure);
                    self.players.restore_vitals(member);
                }
            }
            None => {
                info!(arena = %self.settings.name, "round ended with no winner");
                self.broadcast(Notice::info("Game ended with no winner!"));
            }
        }

        // Everyone not on the winning team watches the outro.
        let losers: Vec<PlayerId> = self
            .sessions
            .values()
            .filter(|s| s.team != winner || winner.is_none())
            .map(|s| s.id)
            .collect();
        for player in losers {
            self.players.set_mode(player, GameMode::Spectator);
        }

        for (player, session) in &self.sessions {
            self.stats.save(*player, session.stats);
        }

        self.blocks.revert(self.world.as_ref());
        self.world.clear_dropped_resources();

        self.ending = Some(EndingTimer {
            seconds_left: ENDING_DELAY_SECONDS,
            tick_acc: 0,
        });
    }

    /// Sends everyone home and resets the arena for the next round.
    fn finish_round(&mut self) {
        let leavers: Vec<PlayerId> = self.sessions.keys().copied().collect();
        for player in leavers {
            self.players.teleport(player, self.settings.lobby_spawn);
            self.players.set_mode(player, GameMode::Survival);
            self.players.restore_vitals(player);
            self.players.clear_inventory(player);
        }
        self.reset();
    }

    /// Returns the arena to a fresh waiting state. Safe to call at any
    /// point; stats of anyone still inside are saved first.
    pub fn reset(&mut self) {
        for (player, session) in &self.sessions {
            self.stats.save(*player, session.stats);
        }
        self.sessions.clear();
        self.join_order.clear();
        self.respawns.clear();
        self.blocks.revert(self.world.as_ref());
        self.teams = self.layout.clone();
        for team in &self.teams {
            self.world.set_block(team.egg_pos, BlockKind::Egg);
        }
        self.state = GameState::Waiting;
        self.countdown = COUNTDOWN_SECONDS;
        self.tick_acc = 0;
        self.elapsed_secs = 0;
        self.ending = None;
        info!(arena = %self.settings.name, "arena reset");
    }

    /// Takes the arena out of rotation: joins are refused and the tick
    /// loop skips it. It still shows up in listings as "disabled".
    pub fn disable(&mut self) {
        self.state = GameState::Disabled;
        info!(arena = %self.settings.name, "arena disabled");
    }

    /// Saves everyone's stats without resetting; used on shutdown.
    pub fn save_all_stats(&self) {
        for (player, session) in &self.sessions {
            self.stats.save(*player, session.stats);
        }
    }

    fn broadcast(&self, notice: Notice) {
        for player in self.sessions.keys() {
            self.players.send_notice(*player, notice.clone());
        }
    }

    fn broadcast_title(&self, title: Title) {
        for player in self.sessions.keys() {
            self.players.send_title(*player, title.clone());
        }
    }
}
