//! Team roster and egg state.

use std::collections::HashMap;

use eggwars_core::{BlockPos, PlayerId, TeamColor, Vec3};

use crate::arena::PlayerSession;
use crate::config::GeneratorEntry;

/// One team inside an arena: its members, its island spawn, and the
/// egg that keeps it respawnable.
#[derive(Debug, Clone)]
pub struct Team {
    pub name: String,
    pub color: TeamColor,
    pub spawn: Vec3,
    pub egg_pos: BlockPos,
    egg_alive: bool,
    pub members: Vec<PlayerId>,
    pub generators: Vec<GeneratorEntry>,
}

impl Team {
    pub fn new(
        name: String,
        color: TeamColor,
        spawn: Vec3,
        egg_pos: BlockPos,
        generators: Vec<GeneratorEntry>,
    ) -> Self {
        Self {
            name,
            color,
            spawn,
            egg_pos,
            egg_alive: true,
            members: Vec::new(),
            generators,
        }
    }

    pub fn egg_alive(&self) -> bool {
        self.egg_alive
    }

    /// Marks the egg destroyed. The transition is one-way for the
    /// remainder of the round; only a full arena reset restores it.
    pub fn destroy_egg(&mut self) {
        self.egg_alive = false;
    }

    pub fn add_member(&mut self, player: PlayerId) {
        if !self.members.contains(&player) {
            self.members.push(player);
        }
    }

    pub fn remove_member(&mut self, player: PlayerId) {
        self.members.retain(|m| *m != player);
    }

    pub fn has_member(&self, player: PlayerId) -> bool {
        self.members.contains(&player)
    }

    /// Counts members still in the fight. A member is alive when they
    /// hold a session and are either not spectating or only spectating
    /// transiently while a respawn countdown runs.
    pub fn alive_players(
        &self,
        sessions: &HashMap<PlayerId, PlayerSession>,
        respawning: impl Fn(PlayerId) -> bool,
    ) -> usize {
        self.members
            .iter()
            .filter(|m| match sessions.get(m) {
                Some(session) => !session.spectator || respawning(**m),
                None => false,
            })
            .count()
    }

    /// A team is out of the round once its egg is gone and nobody is
    /// left standing.
    pub fn is_eliminated(
        &self,
        sessions: &HashMap<PlayerId, PlayerSession>,
        respawning: impl Fn(PlayerId) -> bool,
    ) -> bool {
        !self.egg_alive && self.alive_players(sessions, respawning) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eggwars_core::PlayerStats;

    fn session(id: PlayerId, team: usize, spectator: bool) -> PlayerSession {
        PlayerSession {
            id,
            team: Some(team),
            stats: PlayerStats::default(),
            spectator,
        }
    }

    fn team_with(members: &[PlayerId]) -> Team {
        let mut team = Team::new(
            "red".into(),
            TeamColor::Red,
            Vec3::new(0.0, 64.0, 0.0),
            BlockPos { x: 0, y: 65, z: 0 },
            Vec::new(),
        );
        for m in members {
            team.add_member(*m);
        }
        team
    }

    #[test]
    fn test_egg_destruction_is_one_way() {
        let mut team = team_with(&[]);
        assert!(team.egg_alive());
        team.destroy_egg();
        team.destroy_egg();
        assert!(!team.egg_alive());
    }

    #[test]
    fn test_alive_players_ignores_departed_and_spectating() {
        let a = PlayerId(1);
        let b = PlayerId(2);
        let c = PlayerId(3);
        let team = team_with(&[a, b, c]);

        let mut sessions = HashMap::new();
        sessions.insert(a, session(a, 0, false));
        sessions.insert(b, session(b, 0, true)); // eliminated spectator
        // c has left: no session at all.

        assert_eq!(team.alive_players(&sessions, |_| false), 1);
    }

    #[test]
    fn test_respawning_spectator_counts_as_alive() {
        let a = PlayerId(1);
        let team = team_with(&[a]);

        let mut sessions = HashMap::new();
        sessions.insert(a, session(a, 0, true));

        assert_eq!(team.alive_players(&sessions, |p| p == a), 1);
        assert!(!team.is_eliminated(&sessions, |p| p == a));
    }

    #[test]
    fn test_eliminated_requires_dead_egg_and_empty_roster() {
        let a = PlayerId(1);
        let mut team = team_with(&[a]);
        let mut sessions = HashMap::new();
        sessions.insert(a, session(a, 0, false));

        // Egg alive: never eliminated, even with nobody standing.
        assert!(!team.is_eliminated(&HashMap::new(), |_| false));

        team.destroy_egg();
        assert!(!team.is_eliminated(&sessions, |_| false));

        sessions.get_mut(&a).map(|s| s.spectator = true);
        assert!(team.is_eliminated(&sessions, |_| false));
    }
}
