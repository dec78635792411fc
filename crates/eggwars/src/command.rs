//! The chat-command surface.
//!
//! The host parses nothing itself: it hands the raw argument string to
//! [`Command::parse`] and the parsed command to [`dispatch`], and sends
//! the returned lines back to the player. Failures come back as
//! human-readable lines too — a player typing `/ew join nowhere` gets
//! told why, not an error code.

use eggwars_arena::GameManager;
use eggwars_core::PlayerId;
use eggwars_stats::StatsStore;
use tracing::info;

use crate::shop::ShopCatalog;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join { arena: String },
    Leave,
    List,
    Shop,
    Stats,
    Create { arena: String },
    Reload,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no command given")]
    Empty,

    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' needs a {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

impl Command {
    /// Parses the argument string after the command prefix.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let mut words = input.split_whitespace();
        let head = words.next().ok_or(ParseError::Empty)?;
        match head.to_ascii_lowercase().as_str() {
            "join" => {
                let arena = words.next().ok_or(ParseError::MissingArgument {
                    command: "join",
                    argument: "arena name",
                })?;
                Ok(Self::Join {
                    arena: arena.to_string(),
                })
            }
            "leave" => Ok(Self::Leave),
            "list" => Ok(Self::List),
            "shop" => Ok(Self::Shop),
            "stats" => Ok(Self::Stats),
            "create" => {
                let arena = words.next().ok_or(ParseError::MissingArgument {
                    command: "create",
                    argument: "arena name",
                })?;
                Ok(Self::Create {
                    arena: arena.to_string(),
                })
            }
            "reload" => Ok(Self::Reload),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }

    pub fn requires_admin(&self) -> bool {
        matches!(self, Self::Create { .. } | Self::Reload)
    }

    /// The `/ew help` listing.
    pub fn help_lines() -> Vec<&'static str> {
        vec![
            "join <arena> — enter an arena lobby",
            "leave — leave your current arena",
            "list — show all arenas and their states",
            "shop — show the item shop",
            "stats — show your kills, deaths and wins",
            "create <arena> — (admin) set up a new arena",
            "reload — (admin) reload the arena catalog",
        ]
    }
}

/// What a dispatched command produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CommandOutcome {
    /// Lines to send back to the issuing player.
    pub lines: Vec<String>,
    /// Set by `reload`; the host re-reads the catalog and rebuilds the
    /// manager (the core has no handle to the file or the worlds).
    pub reload_requested: bool,
}

impl CommandOutcome {
    fn lines(lines: Vec<String>) -> Self {
        Self {
            lines,
            reload_requested: false,
        }
    }

    fn line(line: impl Into<String>) -> Self {
        Self::lines(vec![line.into()])
    }
}

/// Executes a parsed command for a player.
pub fn dispatch(
    manager: &mut GameManager,
    stats: &dyn StatsStore,
    shop: &ShopCatalog,
    player: PlayerId,
    admin: bool,
    command: &Command,
) -> CommandOutcome {
    if command.requires_admin() && !admin {
        return CommandOutcome::line("✗ You don't have permission to do that.");
    }

    match command {
        Command::Join { arena } => match manager.join_arena(player, arena) {
            Ok(()) => CommandOutcome::line(format!("✓ Joined arena '{arena}'.")),
            Err(err) => CommandOutcome::line(format!("✗ {err}")),
        },
        Command::Leave => match manager.leave_arena(player) {
            Ok(()) => CommandOutcome::line("✓ You left the arena."),
            Err(err) => CommandOutcome::line(format!("✗ {err}")),
        },
        Command::List => {
            if manager.arenas().is_empty() {
                return CommandOutcome::line("No arenas are loaded.");
            }
            CommandOutcome::lines(
                manager
                    .arenas()
                    .iter()
                    .map(|a| {
                        format!(
                            "{} — {} ({}/{})",
                            a.name(),
                            a.state(),
                            a.player_count(),
                            a.max_players()
                        )
                    })
                    .collect(),
            )
        }
        Command::Shop => CommandOutcome::lines(shop.lines()),
        Command::Stats => {
            // A live session carries counters the store hasn't seen yet.
            let stats = match manager.player_arena(player).and_then(|a| a.session(player)) {
                Some(session) => session.stats,
                None => stats.load(player),
            };
            CommandOutcome::lines(vec![
                format!("Kills: {}", stats.kills),
                format!("Deaths: {}", stats.deaths),
                format!("Wins: {}", stats.wins),
            ])
        }
        Command::Create { arena } => {
            info!(%player, %arena, "arena creation requested");
            CommandOutcome::line(format!(
                "Arena setup for '{arena}' is not available in-game yet; add it to the catalog file and reload."
            ))
        }
        Command::Reload => CommandOutcome {
            lines: vec!["✓ Reloading the arena catalog...".to_string()],
            reload_requested: true,
        },
    }
}
