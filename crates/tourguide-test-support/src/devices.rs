//! Test devices — recording fakes for the capability providers.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

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

/// A permission provider with fixed answers that records every request.
#[derive(Debug, Default)]
pub struct StaticPermissions {
    denied: HashSet<Capability>,
    requests: Mutex<Vec<Capability>>,
}

impl StaticPermissions {
    /// Grants every capability.
    #[must_use]
    pub fn granting_all() -> Self {
        Self::default()
    }

    /// Grants everything except `capability`.
    #[must_use]
    pub fn denying(capability: Capability) -> Self {
        Self {
            denied: HashSet::from([capability]),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every capability requested, in order.
    pub fn requests(&self) -> Vec<Capability> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PermissionProvider for StaticPermissions {
    async fn request(&self, capability: Capability) -> bool {
        self.requests.lock().unwrap().push(capability);
        !self.denied.contains(&capability)
    }
}

#[derive(Default)]
struct WatchSlot {
    callback: Option<PositionCallback>,
    removals: usize,
}

/// A position provider driven by the test. Positions pushed before a watch
/// starts are delivered as soon as it does.
#[derive(Default)]
pub struct ManualPositionProvider {
    slot: Arc<Mutex<WatchSlot>>,
    pending: Mutex<Vec<RawPosition>>,
    options: Mutex<Option<WatchOptions>>,
}

impl ManualPositionProvider {
    /// Creates a provider with nothing queued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `position` to the active watch, or queues it until one starts.
    pub fn push(&self, position: RawPosition) {
        let slot = self.slot.lock().unwrap();
        match &slot.callback {
            Some(callback) => callback(position),
            None => self.pending.lock().unwrap().push(position),
        }
    }

    /// Whether a watch is currently active.
    pub fn is_watching(&self) -> bool {
        self.slot.lock().unwrap().callback.is_some()
    }

    /// How many times a watch was removed.
    pub fn removals(&self) -> usize {
        self.slot.lock().unwrap().removals
    }

    /// Options passed to the most recent `watch` call.
    pub fn last_options(&self) -> Option<WatchOptions> {
        *self.options.lock().unwrap()
    }
}

struct ManualWatch {
    slot: Arc<Mutex<WatchSlot>>,
}

impl PositionWatch for ManualWatch {
    fn remove(&mut self) {
        let mut slot = self.slot.lock().unwrap();
        if slot.callback.take().is_some() {
            slot.removals += 1;
        }
    }
}

impl PositionProvider for ManualPositionProvider {
    fn watch(
        &self,
        options: &WatchOptions,
        on_update: PositionCallback,
    ) -> Result<Box<dyn PositionWatch>, TourError> {
        *self.options.lock().unwrap() = Some(*options);
        for position in self.pending.lock().unwrap().drain(..) {
            on_update(position);
        }
        self.slot.lock().unwrap().callback = Some(on_update);
        Ok(Box::new(ManualWatch {
            slot: Arc::clone(&self.slot),
        }))
    }
}

/// A synthesizer that records what it was asked to say.
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    spoken: Mutex<Vec<String>>,
    stops: Mutex<usize>,
}

impl RecordingSynthesizer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text passed to `speak`, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }

    /// Number of `stop` calls.
    pub fn stops(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn speak(&self, text: &str, _options: &UtteranceOptions) -> Result<(), TourError> {
        self.spoken.lock().unwrap().push(text.to_owned());
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// A recognizer whose events are emitted by the test.
#[derive(Default)]
pub struct RecordingRecognizer {
    callback: Mutex<Option<RecognitionCallback>>,
    starts: Mutex<usize>,
    stops: Mutex<usize>,
    fail_start: bool,
}

impl RecordingRecognizer {
    /// Creates a recognizer that starts successfully.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recognizer whose `start` always fails.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Emits `signal` to the active session's callback, if any.
    pub fn emit(&self, signal: RecognitionSignal) {
        if let Some(callback) = self.callback.lock().unwrap().as_ref() {
            callback(signal);
        }
    }

    /// Number of successful `start` calls.
    pub fn starts(&self) -> usize {
        *self.starts.lock().unwrap()
    }

    /// Number of `stop` calls.
    pub fn stops(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl SpeechRecognizer for RecordingRecognizer {
    fn start(
        &self,
        _options: &RecognitionOptions,
        on_signal: RecognitionCallback,
    ) -> Result<(), TourError> {
        if self.fail_start {
            return Err(TourError::Capability("recognizer unavailable".into()));
        }
        *self.starts.lock().unwrap() += 1;
        *self.callback.lock().unwrap() = Some(on_signal);
        Ok(())
    }

    fn stop(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// A map surface that records every posted message.
#[derive(Debug, Default)]
pub struct RecordingMap {
    messages: Mutex<Vec<MapMessage>>,
}

impl RecordingMap {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message posted, in order.
    pub fn messages(&self) -> Vec<MapMessage> {
        self.messages.lock().unwrap().clone()
    }
}

impl MapSurface for RecordingMap {
    fn post(&self, message: &MapMessage) {
        self.messages.lock().unwrap().push(message.clone());
    }
}

/// A notifier that records every alert.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<Alert>>,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every alert shown, in order.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, alert: &Alert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}
