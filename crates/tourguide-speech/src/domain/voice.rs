//! Voice capture session state machine.
//!
//! ```text
//! Idle --toggle--> (permission) --granted--> Listening
//! Listening --result--> Listening     (query text overwritten)
//! Listening --end--> Idle
//! any --error--> Idle                 (alert)
//! ```

use tourguide_core::alert::Alert;
use tourguide_core::capability::Capability;
use tourguide_core::error::TourError;
use tracing::warn;

/// Capture session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VoiceSession {
    /// No capture in progress.
    #[default]
    Idle,
    /// Capturing; transcripts overwrite the query text.
    Listening,
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceAction {
    /// Ask the user for a capability.
    RequestPermission(Capability),
    /// Start the recognizer.
    StartRecognition,
    /// Stop the recognizer.
    StopRecognition,
    /// Overwrite the query text.
    SetQueryText(String),
    /// Show an alert.
    Alert(Alert),
}

/// Drives a single capture session.
#[derive(Debug, Clone, Default)]
pub struct VoiceInputController {
    session: VoiceSession,
    awaiting_permission: bool,
}

impl VoiceInputController {
    /// Creates an idle controller.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current session state.
    #[must_use]
    pub fn session(&self) -> VoiceSession {
        self.session
    }

    /// Mic button pressed. Starts the permission check when idle, asks the
    /// recognizer to stop when listening.
    pub fn toggle(&mut self) -> Option<VoiceAction> {
        match self.session {
            VoiceSession::Listening => Some(VoiceAction::StopRecognition),
            VoiceSession::Idle if self.awaiting_permission => None,
            VoiceSession::Idle => {
                self.awaiting_permission = true;
                Some(VoiceAction::RequestPermission(Capability::Microphone))
            }
        }
    }

    /// Microphone permission answered.
    pub fn permission_resolved(&mut self, granted: bool) -> Option<VoiceAction> {
        if !std::mem::take(&mut self.awaiting_permission) {
            return None;
        }
        if granted {
            self.session = VoiceSession::Listening;
            Some(VoiceAction::StartRecognition)
        } else {
            let error = TourError::PermissionDenied(Capability::Microphone);
            warn!(%error, "voice input unavailable");
            Some(VoiceAction::Alert(Alert::from(&error)))
        }
    }

    /// The engine reported capture started.
    pub fn started(&mut self) {
        self.session = VoiceSession::Listening;
    }

    /// A transcript arrived. Ignored unless listening.
    pub fn transcript(&mut self, text: String) -> Option<VoiceAction> {
        match self.session {
            VoiceSession::Listening => Some(VoiceAction::SetQueryText(text)),
            VoiceSession::Idle => None,
        }
    }

    /// The engine reported capture ended.
    pub fn ended(&mut self) {
        self.session = VoiceSession::Idle;
    }

    /// The engine failed. Always returns to idle and alerts.
    pub fn failed(&mut self, message: Option<String>) -> VoiceAction {
        self.session = VoiceSession::Idle;
        self.awaiting_permission = false;
        let error = TourError::VoiceRecognition(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| "Could not start voice recognition".to_owned()),
        );
        warn!(%error, "voice capture failed");
        VoiceAction::Alert(Alert::from(&error))
    }

    /// The tour screen is going away; returns the stop action if capture was
    /// active or about to start.
    pub fn shutdown(&mut self) -> Option<VoiceAction> {
        let active = self.session == VoiceSession::Listening || self.awaiting_permission;
        self.session = VoiceSession::Idle;
        self.awaiting_permission = false;
        active.then_some(VoiceAction::StopRecognition)
    }
}
