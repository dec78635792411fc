//! Arena catalog: the serde-backed description every arena is built
//! from.
//!
//! The catalog is pure data — positions, team layouts, player bounds.
//! Turning an entry into a live [`crate::Arena`] additionally needs a
//! world, which the host supplies through [`WorldProvider`]. An entry
//! whose world cannot be resolved is skipped with a warning rather than
//! failing the whole load.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use eggwars_core::{BlockPos, ResourceKind, TeamColor, Vec3, World};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Resolves a world name from the catalog to a live world handle.
pub trait WorldProvider {
    fn world(&self, name: &str) -> Option<Arc<dyn World>>;
}

/// One resource generator placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorEntry {
    pub position: Vec3,
    pub kind: ResourceKind,
}

/// One team's layout inside an arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamEntry {
    pub color: TeamColor,
    pub spawn: Vec3,
    pub egg: BlockPos,
    #[serde(default)]
    pub generators: Vec<GeneratorEntry>,
}

fn default_enabled() -> bool {
    true
}

/// One arena's full description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaEntry {
    /// Name of the world this arena plays in.
    pub world: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub min_players: usize,
    pub max_players: usize,
    pub lobby_spawn: Vec3,
    pub spectator_spawn: Vec3,
    /// Team name -> layout. Iteration order (and thereby round-robin
    /// slot order) is the sorted team name.
    pub teams: BTreeMap<String, TeamEntry>,
    /// Shared mid-map generators, typically diamond.
    #[serde(default)]
    pub center_generators: Vec<GeneratorEntry>,
}

/// The full set of configured arenas, keyed by arena name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaCatalog {
    #[serde(default)]
    pub arenas: BTreeMap<String, ArenaEntry>,
}

impl ArenaCatalog {
    /// Loads a catalog from a JSON file. A missing file is an empty
    /// catalog, not an error — fresh installs start with no arenas.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(path, raw)?;
        Ok(())
    }
}
