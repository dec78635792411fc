//! Error types for the stats layer.

/// Errors opening or parsing the stats file.
///
/// Only construction can fail; once a store exists, save failures are
/// logged and swallowed (stats are never worth killing a match over).
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    /// Could not read or create the backing file.
    #[error("stats file i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file holds something that isn't a stats map.
    #[error("stats file is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}
