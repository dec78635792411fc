//! Unified error type for the EggWars workspace.

use eggwars_arena::{ArenaError, CatalogError};
use eggwars_stats::StatsError;

/// Top-level error that wraps all crate-specific errors.
///
/// Hosts embedding the `eggwars` meta-crate deal with this single type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant generates the `From` impls, so `?`
/// converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum EggWarsError {
    /// An arena-level error (full, not found, wrong state, membership).
    #[error(transparent)]
    Arena(#[from] ArenaError),

    /// A catalog loading/saving error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// A stats persistence error.
    #[error(transparent)]
    Stats(#[from] StatsError),
}
