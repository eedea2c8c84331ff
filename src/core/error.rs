//! Error types for the pinchcraft engine
//!
//! Only the host-facing surfaces (configuration and voxel import/export)
//! return these. The per-frame path reports refusals as `bool`/`Option`.

use thiserror::Error;

/// Main error type for the engine
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Import error: {0}")]
    Import(String),
}
