use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timestamp \"{input}\" (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidTimestamp { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("No snapshot given. Pass --snapshot, set LISTENSTATS_SNAPSHOT, or add `snapshot` to the config file.")]
    MissingSnapshot,

    #[error("{0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}
