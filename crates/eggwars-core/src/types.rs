//! Identity and closed-variant types shared across the workspace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw ticks per fixed time quantum (one second of game time).
///
/// All countdown/elapsed-time logic accumulates raw ticks and fires once
/// this threshold is reached, so a 30 "second" lobby countdown takes
/// 600 raw ticks regardless of what drives the loop.
pub const TICKS_PER_SECOND: u64 = 20;

/// A unique identifier for a player.
///
/// Newtype over `u64`: you can't accidentally pass an arena index where
/// a player is expected. `#[serde(transparent)]` keeps the JSON
/// representation a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// The three resources generators produce, with their timing and
/// identity carried as associated data instead of string tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Iron,
    Gold,
    Diamond,
}

impl ResourceKind {
    /// Spawn interval in raw ticks (iron 1 s, gold 5 s, diamond 15 s).
    pub fn spawn_interval_ticks(self) -> u64 {
        match self {
            Self::Iron => TICKS_PER_SECOND,
            Self::Gold => 5 * TICKS_PER_SECOND,
            Self::Diamond => 15 * TICKS_PER_SECOND,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Iron => "iron",
            Self::Gold => "gold",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A player's interaction mode, set by the core and enforced by the
/// embedding server.
///
/// - **Survival**: combat-capable, takes damage (active round).
/// - **Adventure**: non-damageable, can't modify blocks (lobby, winners).
/// - **Spectator**: free-flying observer (eliminated players, and the
///   temporary state during a respawn countdown).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameMode {
    Survival,
    Adventure,
    Spectator,
}

/// Display color of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamColor {
    Red,
    Blue,
    Green,
    Yellow,
    Aqua,
    White,
    Purple,
    Orange,
}

impl fmt::Display for TeamColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Aqua => "aqua",
            Self::White => "white",
            Self::Purple => "purple",
            Self::Orange => "orange",
        };
        f.write_str(name)
    }
}

/// The emphasis of a chat notice. The countdown flips from `Info` to
/// `Warning` at five seconds remaining; rendering is the embedder's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Info,
    Success,
    Warning,
    Error,
}

/// A chat message pushed to one player or broadcast to an arena.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub text: String,
    pub tone: Tone,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Info }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Success }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Warning }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { text: text.into(), tone: Tone::Error }
    }
}

/// An on-screen title/subtitle pair (egg destroyed, victory, respawn).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub title: String,
    pub subtitle: String,
}

/// Persisted per-player counters. Missing entries in the store default
/// to all zeros.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub kills: u32,
    pub deaths: u32,
    pub wins: u32,
}
