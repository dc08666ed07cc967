//! Capability providers: the device-facing seams of the client.
//!
//! Positioning, permission prompts, speech synthesis, speech recognition,
//! the map surface, and alert presentation are all external. Each is
//! described here only by its start/stop/event contract.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::alert::Alert;
use crate::error::TourError;
use crate::geo::RawPosition;
use crate::map::MapMessage;

/// A device capability guarded by a user permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    /// Foreground location access.
    Location,
    /// Microphone access for speech recognition.
    Microphone,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Microphone => f.write_str("microphone"),
        }
    }
}

/// Presents permission prompts.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Asks for `capability`; resolves to `true` when granted.
    async fn request(&self, capability: Capability) -> bool;
}

/// Options for a position watch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatchOptions {
    /// Request the provider's highest accuracy mode.
    pub high_accuracy: bool,
    /// Minimum movement between updates, in provider distance units.
    pub distance_interval: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            distance_interval: 5.0,
        }
    }
}

/// Callback invoked for every raw position update.
pub type PositionCallback = Box<dyn Fn(RawPosition) + Send + Sync>;

/// Handle to an active position subscription.
pub trait PositionWatch: Send {
    /// Unsubscribes. Calling it more than once is harmless.
    fn remove(&mut self);
}

/// Continuous positioning.
pub trait PositionProvider: Send + Sync {
    /// Starts delivering updates to `on_update` until the returned watch is
    /// removed.
    ///
    /// # Errors
    ///
    /// Returns `TourError::Capability` if the provider cannot start.
    fn watch(
        &self,
        options: &WatchOptions,
        on_update: PositionCallback,
    ) -> Result<Box<dyn PositionWatch>, TourError>;
}

/// Voice parameters for synthesized speech.
#[derive(Debug, Clone, PartialEq)]
pub struct UtteranceOptions {
    /// BCP-47 language tag.
    pub language: String,
    /// Pitch multiplier.
    pub pitch: f32,
    /// Rate multiplier.
    pub rate: f32,
}

impl Default for UtteranceOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_owned(),
            pitch: 1.0,
            rate: 0.9,
        }
    }
}

/// Speech synthesis engine.
pub trait SpeechSynthesizer: Send + Sync {
    /// Starts speaking `text`.
    ///
    /// # Errors
    ///
    /// Returns `TourError::Capability` if the engine rejects the utterance.
    fn speak(&self, text: &str, options: &UtteranceOptions) -> Result<(), TourError>;

    /// Stops whatever is currently playing.
    fn stop(&self);
}

/// Options for a recognition session.
#[derive(Debug, Clone, PartialEq)]
pub struct RecognitionOptions {
    /// BCP-47 language tag.
    pub language: String,
    /// Deliver partial transcripts while the user is still speaking.
    pub interim_results: bool,
    /// Keep listening after the first final result.
    pub continuous: bool,
}

impl Default for RecognitionOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_owned(),
            interim_results: true,
            continuous: false,
        }
    }
}

/// Events raised by a speech recognizer.
#[derive(Debug, Clone, PartialEq)]
pub enum RecognitionSignal {
    /// Capture began.
    Started,
    /// A (possibly interim) transcript of the whole utterance so far.
    Result(String),
    /// Capture ended.
    End,
    /// The engine failed; carries its message when it has one.
    Error(Option<String>),
}

/// Callback invoked for every recognizer event.
pub type RecognitionCallback = Box<dyn Fn(RecognitionSignal) + Send + Sync>;

/// Speech recognition engine.
pub trait SpeechRecognizer: Send + Sync {
    /// Starts a capture session delivering events to `on_signal`.
    ///
    /// # Errors
    ///
    /// Returns `TourError::Capability` if capture cannot start.
    fn start(
        &self,
        options: &RecognitionOptions,
        on_signal: RecognitionCallback,
    ) -> Result<(), TourError>;

    /// Stops the current session, if any.
    fn stop(&self);
}

/// The map/visual surface.
pub trait MapSurface: Send + Sync {
    /// Posts a fire-and-forget message.
    fn post(&self, message: &MapMessage);
}

/// Presents alerts to the user.
pub trait Notifier: Send + Sync {
    /// Shows `alert`.
    fn alert(&self, alert: &Alert);
}
