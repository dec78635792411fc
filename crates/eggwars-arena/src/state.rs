//! The arena lifecycle state machine.

use serde::{Deserialize, Serialize};

/// The lifecycle state of an arena.
///
/// Transitions cycle with no skipped states:
///
/// ```text
/// Waiting → Starting → Active → Ending → Waiting
/// ```
///
/// - **Waiting**: lobby open, accepting joins, below minimum players.
/// - **Starting**: minimum reached, 30-second countdown running. Drops
///   back to Waiting if the roster shrinks below the minimum.
/// - **Active**: the round is live — combat, building, generation.
/// - **Ending**: winner declared; a delayed relocation returns everyone
///   to the lobby and resets the arena back to Waiting.
/// - **Disabled**: configuration-only terminal state. Never ticked,
///   never joinable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Waiting,
    Starting,
    Active,
    Ending,
    Disabled,
}

impl GameState {
    /// Returns `true` if the arena is accepting new players.
    pub fn is_joinable(&self) -> bool {
        matches!(self, Self::Waiting)
    }

    /// Returns `true` if a round is currently being played.
    pub fn is_round_live(&self) -> bool {
        matches!(self, Self::Active)
    }

    /// Returns `true` if the arena participates in the tick loop.
    pub fn is_simulated(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    /// The next state in the cycle, or `None` for `Disabled`.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Waiting => Some(Self::Starting),
            Self::Starting => Some(Self::Active),
            Self::Active => Some(Self::Ending),
            Self::Ending => Some(Self::Waiting),
            Self::Disabled => None,
        }
    }

    /// Returns `true` if moving to `target` follows the cycle. Starting
    /// may also fall back to Waiting (countdown cancellation).
    pub fn can_transition_to(self, target: Self) -> bool {
        self.next() == Some(target)
            || (self == Self::Starting && target == Self::Waiting)
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Waiting => write!(f, "waiting"),
            Self::Starting => write!(f, "starting"),
            Self::Active => write!(f, "active"),
            Self::Ending => write!(f, "ending"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}
