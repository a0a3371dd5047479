//! Crate error type.
//!
//! The path codec never produces these: it degrades to `None` or passes the
//! input through. Errors only surface from deep writes, project loading and
//! template serialization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid property path '{0}'")]
    InvalidPath(String),
    #[error("cannot write through '{path}': found {found}")]
    PathConflict { path: String, found: &'static str },
    #[error("dialog '{0}' not found")]
    DialogNotFound(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
