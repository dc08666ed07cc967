//! Error taxonomy shared by every crate in the workspace.

use thiserror::Error;

use crate::capability::Capability;

/// Top-level error type for the narration client.
///
/// No variant is fatal. Background work (polling, fetching) logs and skips
/// the cycle; explicit user actions turn errors into a dismissible alert
/// through `Alert::from`.
#[derive(Debug, Error)]
pub enum TourError {
    /// The user refused access to a device capability.
    #[error("permission denied: {0}")]
    PermissionDenied(Capability),

    /// A transport-level failure talking to the backend.
    #[error("network error: {0}")]
    Network(String),

    /// A response body could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),

    /// The speech recognizer reported an error.
    #[error("voice recognition error: {0}")]
    VoiceRecognition(String),

    /// User input failed validation.
    #[error("validation error: {0}")]
    Validation(String),

    /// A capability provider failed to start or stop.
    #[error("capability error: {0}")]
    Capability(String),

    /// The session runtime is no longer accepting events.
    #[error("tour session closed")]
    SessionClosed,
}
