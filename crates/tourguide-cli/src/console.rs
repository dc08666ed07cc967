//! Console capability providers.
//!
//! Positions and transcripts are typed in as commands; speech, map updates
//! and alerts are reported as log events.

use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use tourguide_core::alert::Alert;
use tourguide_core::capability::{
    Capability, MapSurface, Notifier, PermissionProvider, PositionCallback, PositionProvider,
    PositionWatch, RecognitionCallback, RecognitionOptions, RecognitionSignal, SpeechRecognizer,
    SpeechSynthesizer, UtteranceOptions, WatchOptions,
};
use tourguide_core::error::TourError;
use tourguide_core::geo::RawPosition;
use tourguide_core::map::MapMessage;
use tracing::{debug, info, warn};

/// Grants every permission; there is no one to ask on a console.
#[derive(Debug, Default)]
pub struct ConsolePermissions;

#[async_trait]
impl PermissionProvider for ConsolePermissions {
    async fn request(&self, capability: Capability) -> bool {
        info!(%capability, "permission granted");
        true
    }
}

type CallbackSlot<T> = Arc<Mutex<Option<T>>>;

/// Positions entered with the `fix` command.
#[derive(Default)]
pub struct ConsolePositionProvider {
    callback: CallbackSlot<PositionCallback>,
}

impl ConsolePositionProvider {
    /// Creates a provider with no active watch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `position` to the active watch. Returns `false` when no
    /// watch is active and the position was dropped.
    pub fn push(&self, position: RawPosition) -> bool {
        let slot = self.callback.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref() {
            Some(callback) => {
                callback(position);
                true
            }
            None => false,
        }
    }
}

struct ConsoleWatch {
    callback: CallbackSlot<PositionCallback>,
}

impl PositionWatch for ConsoleWatch {
    fn remove(&mut self) {
        self.callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl PositionProvider for ConsolePositionProvider {
    fn watch(
        &self,
        options: &WatchOptions,
        on_update: PositionCallback,
    ) -> Result<Box<dyn PositionWatch>, TourError> {
        debug!(
            high_accuracy = options.high_accuracy,
            distance_interval = options.distance_interval,
            "console position watch started"
        );
        *self.callback.lock().unwrap_or_else(PoisonError::into_inner) = Some(on_update);
        Ok(Box::new(ConsoleWatch {
            callback: Arc::clone(&self.callback),
        }))
    }
}

/// Transcripts entered with the `say` command.
#[derive(Default)]
pub struct ConsoleRecognizer {
    callback: CallbackSlot<RecognitionCallback>,
}

impl ConsoleRecognizer {
    /// Creates an idle recognizer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds `transcript` as a final result and ends the session. Returns
    /// `false` when no capture is active.
    pub fn say(&self, transcript: &str) -> bool {
        let Some(callback) = self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        else {
            return false;
        };
        callback(RecognitionSignal::Result(transcript.to_owned()));
        callback(RecognitionSignal::End);
        true
    }
}

impl SpeechRecognizer for ConsoleRecognizer {
    fn start(
        &self,
        options: &RecognitionOptions,
        on_signal: RecognitionCallback,
    ) -> Result<(), TourError> {
        info!(language = %options.language, "listening; type `say <text>`");
        on_signal(RecognitionSignal::Started);
        *self.callback.lock().unwrap_or_else(PoisonError::into_inner) = Some(on_signal);
        Ok(())
    }

    fn stop(&self) {
        let callback = self
            .callback
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(callback) = callback {
            callback(RecognitionSignal::End);
        }
    }
}

/// Logs each utterance instead of playing it.
#[derive(Debug, Default)]
pub struct ConsoleSynthesizer;

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&self, text: &str, options: &UtteranceOptions) -> Result<(), TourError> {
        info!(rate = options.rate, pitch = options.pitch, text, "speaking");
        Ok(())
    }

    fn stop(&self) {
        debug!("speech stopped");
    }
}

/// Logs each map message as JSON.
#[derive(Debug, Default)]
pub struct ConsoleMap;

impl MapSurface for ConsoleMap {
    fn post(&self, message: &MapMessage) {
        match serde_json::to_string(message) {
            Ok(json) => info!(message = %json, "map update"),
            Err(e) => warn!(error = %e, "map message could not be encoded"),
        }
    }
}

/// Logs alerts at `warn`.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn alert(&self, alert: &Alert) {
        warn!(title = %alert.title, message = %alert.message, "alert");
    }
}
