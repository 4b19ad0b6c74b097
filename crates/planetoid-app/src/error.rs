//! Errors surfaced by the driver binary.

use std::path::PathBuf;

use planetoid_config::ConfigError;
use thiserror::Error;

use crate::platform::PlatformError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write snapshot to {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    SnapshotEncode(#[from] serde_json::Error),
}
