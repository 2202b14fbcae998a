//! CLI error types.

use std::path::PathBuf;

use docnav_config::ConfigError;
use docnav_tree::RecordError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Records(#[from] RecordError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid collapse state file {}: {source}", path.display())]
    State {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
