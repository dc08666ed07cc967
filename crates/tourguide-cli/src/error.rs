//! Tour guide CLI — startup error types.

use thiserror::Error;
use tourguide_core::error::TourError;

/// Errors that stop the binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading stdin failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend client could not be created.
    #[error("client error: {0}")]
    Client(#[from] TourError),

    /// The tour task panicked or was cancelled.
    #[error("runtime error: {0}")]
    Runtime(#[from] tokio::task::JoinError),
}
