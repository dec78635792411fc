//! Scoreboard line rendering.
//!
//! Produces the plain text lines for one viewer; the host owns the
//! actual sidebar transport. Content depends on the arena's state:
//! lobby info while waiting or counting down, the team overview during
//! the round, nothing during the outro.

use eggwars_arena::{Arena, GameState};
use eggwars_core::PlayerId;

/// Renders the sidebar lines for `viewer`. An empty vec means the host
/// should hide the board.
pub fn render_scoreboard(arena: &Arena, viewer: PlayerId) -> Vec<String> {
    match arena.state() {
        GameState::Waiting => vec![
            format!("Map: {}", arena.name()),
            format!("Players: {}/{}", arena.player_count(), arena.max_players()),
            "Waiting for players...".to_string(),
        ],
        GameState::Starting => vec![
            format!("Map: {}", arena.name()),
            format!("Players: {}/{}", arena.player_count(), arena.max_players()),
            format!("Starting in: {}s", arena.countdown_remaining()),
        ],
        GameState::Active => {
            let viewer_team = arena.session(viewer).and_then(|s| s.team);
            arena
                .teams()
                .iter()
                .enumerate()
                .map(|(idx, team)| {
                    let egg = if team.egg_alive() { "✓" } else { "✗" };
                    let you = if viewer_team == Some(idx) { " ← YOU" } else { "" };
                    format!(
                        "{} {} [{}]{}",
                        team.color,
                        egg,
                        arena.team_alive_count(idx),
                        you
                    )
                })
                .collect()
        }
        GameState::Ending | GameState::Disabled => Vec::new(),
    }
}
