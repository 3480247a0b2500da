//! Errors surfaced while loading configuration and level files.
//!
//! The simulation itself never fails; only reading and parsing can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
