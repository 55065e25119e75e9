use crate::open_meteo::error::FetchError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindBlendError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("No forecast model produced any data ({attempts} alias fetches tried)")]
    NoModelData { attempts: usize },

    #[error("Failed to encode snapshot as JSON")]
    SnapshotEncode(#[source] serde_json::Error),

    #[error("Failed to write snapshot to '{path}'")]
    SnapshotWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read snapshot from '{path}'")]
    SnapshotRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot at '{path}'")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
