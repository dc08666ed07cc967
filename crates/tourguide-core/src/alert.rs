//! User-visible alerts.

use serde::Serialize;

use crate::capability::Capability;
use crate::error::TourError;

/// A dismissible message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Short heading, e.g. `"Error"`.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Alert {
    /// Creates a new alert.
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    /// Generic failure alert shown when an explanation request fails.
    #[must_use]
    pub fn explanation_failed() -> Self {
        Self::new("Error", "Failed to get explanation")
    }

    /// Generic failure alert shown when a question cannot be answered.
    #[must_use]
    pub fn response_failed() -> Self {
        Self::new("Error", "Failed to get response")
    }
}

impl From<&TourError> for Alert {
    fn from(error: &TourError) -> Self {
        match error {
            TourError::PermissionDenied(Capability::Location) => {
                Self::new("Permission denied", "Location permission is required")
            }
            TourError::PermissionDenied(Capability::Microphone) => Self::new(
                "Permission denied",
                "Microphone permission is required for speech recognition.",
            ),
            TourError::VoiceRecognition(message) => Self::new("Voice Error", message.clone()),
            TourError::Validation(message) => Self::new("Error", message.clone()),
            other => Self::new("Error", other.to_string()),
        }
    }
}
