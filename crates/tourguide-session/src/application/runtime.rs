//! The tour runtime.
//!
//! A single loop owns the [`TourSession`] and is its only writer. Each
//! iteration takes one event (user input from a [`TourHandle`], a provider
//! callback, or the completion of an earlier backend call), reduces it, and
//! executes the resulting effects. Backend calls run as spawned tasks whose
//! results come back as events, so feed entries land in completion order.
//!
//! Position updates travel through a latest-value channel: a fix that is
//! superseded before the loop gets to it is never processed.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tourguide_core::backend::TourBackend;
use tourguide_core::capability::{
    MapSurface, Notifier, PermissionProvider, PositionCallback, PositionProvider, PositionWatch,
    RecognitionCallback, RecognitionSignal, SpeechRecognizer, SpeechSynthesizer,
};
use tourguide_core::clock::Clock;
use tourguide_core::error::TourError;
use tourguide_core::geo::RawPosition;
use tourguide_location::application::fetch::handle_fetch_attractions;
use tourguide_narration::application::poll::handle_poll;
use tourguide_speech::application::output::SpeechOutputController;
use tracing::{debug, info, warn};

use super::queries::{handle_ask, handle_explain};
use crate::domain::config::TourConfig;
use crate::domain::effects::{Effect, ExplainPurpose};
use crate::domain::events::TourEvent;
use crate::domain::state::TourSession;

type PositionSender = Arc<watch::Sender<Option<RawPosition>>>;

/// The external collaborators a tour runs against.
#[derive(Clone)]
pub struct TourProviders {
    /// Remote backend.
    pub backend: Arc<dyn TourBackend>,
    /// Permission prompts.
    pub permissions: Arc<dyn PermissionProvider>,
    /// Positioning.
    pub positions: Arc<dyn PositionProvider>,
    /// Speech synthesis.
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Speech recognition.
    pub recognizer: Arc<dyn SpeechRecognizer>,
    /// Map surface.
    pub map: Arc<dyn MapSurface>,
    /// Alert presentation.
    pub notifier: Arc<dyn Notifier>,
    /// Feed timestamps.
    pub clock: Arc<dyn Clock>,
}

/// Sends user input to a running tour.
///
/// Every method fails with [`TourError::SessionClosed`] once the runtime
/// has stopped.
#[derive(Debug, Clone)]
pub struct TourHandle {
    events: mpsc::UnboundedSender<TourEvent>,
}

impl TourHandle {
    fn send(&self, event: TourEvent) -> Result<(), TourError> {
        self.events
            .send(event)
            .map_err(|_| TourError::SessionClosed)
    }

    /// Submits the entry-screen place name.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has stopped.
    pub fn submit_place(&self, name: impl Into<String>) -> Result<(), TourError> {
        self.send(TourEvent::InitialPlaceSubmitted(name.into()))
    }

    /// Replaces the query text field.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has stopped.
    pub fn set_query_text(&self, text: impl Into<String>) -> Result<(), TourError> {
        self.send(TourEvent::QueryTextChanged(text.into()))
    }

    /// Submits the current query text as a question.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has stopped.
    pub fn ask(&self) -> Result<(), TourError> {
        self.send(TourEvent::AskSubmitted)
    }

    /// Reports a tap on the marker named `name`.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has stopped.
    pub fn tap_marker(&self, name: impl Into<String>) -> Result<(), TourError> {
        self.send(TourEvent::MarkerTapped(name.into()))
    }

    /// Presses the microphone button.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has stopped.
    pub fn toggle_voice(&self) -> Result<(), TourError> {
        self.send(TourEvent::VoiceToggled)
    }

    /// Leaves the tour screen. The runtime stops after releasing its
    /// resources.
    ///
    /// # Errors
    ///
    /// Returns `TourError::SessionClosed` if the runtime has already stopped.
    pub fn exit(&self) -> Result<(), TourError> {
        self.send(TourEvent::TourExited)
    }
}

/// Resources held while the tour screen is up. Dropping the scope, on any
/// exit path, removes the position watch and stops the recognizer.
struct TourScope {
    watch: Option<Box<dyn PositionWatch>>,
    recognizer: Arc<dyn SpeechRecognizer>,
    recognizer_started: bool,
}

impl TourScope {
    fn new(recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        Self {
            watch: None,
            recognizer,
            recognizer_started: false,
        }
    }

    fn hold_watch(&mut self, watch: Box<dyn PositionWatch>) {
        if let Some(mut previous) = self.watch.replace(watch) {
            previous.remove();
        }
    }

    fn release_watch(&mut self) {
        if let Some(mut watch) = self.watch.take() {
            watch.remove();
            info!("position watch released");
        }
    }

    fn stop_recognition(&mut self) {
        self.recognizer.stop();
        self.recognizer_started = false;
    }
}

impl Drop for TourScope {
    fn drop(&mut self) {
        self.release_watch();
        if self.recognizer_started {
            self.stop_recognition();
        }
    }
}

/// Drives one tour session.
pub struct TourRuntime {
    config: TourConfig,
    providers: TourProviders,
    events: mpsc::UnboundedReceiver<TourEvent>,
    feedback: mpsc::WeakUnboundedSender<TourEvent>,
}

impl TourRuntime {
    /// Creates a runtime and the first handle to it.
    ///
    /// The runtime keeps only a weak sender for itself: [`TourRuntime::run`]
    /// returns once the tour is exited, or once every handle is dropped and
    /// no backend call is outstanding.
    #[must_use]
    pub fn new(config: TourConfig, providers: TourProviders) -> (Self, TourHandle) {
        let (sender, events) = mpsc::unbounded_channel();
        let runtime = Self {
            config,
            providers,
            events,
            feedback: sender.downgrade(),
        };
        (runtime, TourHandle { events: sender })
    }

    /// Runs the event loop to completion and returns the final session.
    pub async fn run(mut self) -> TourSession {
        let mut session = TourSession::new(&self.config);
        let mut scope = TourScope::new(Arc::clone(&self.providers.recognizer));
        let mut speech = SpeechOutputController::new(
            Arc::clone(&self.providers.synthesizer),
            self.config.utterance.clone(),
        );
        let (position_sender, mut positions) = watch::channel(None);
        let position_sender = Arc::new(position_sender);
        info!(
            radius = self.config.speak_radius,
            trust_policy = %self.config.trust_policy,
            "tour runtime started"
        );

        loop {
            let event = tokio::select! {
                received = self.events.recv() => match received {
                    Some(event) => event,
                    None => break,
                },
                Ok(()) = positions.changed() => {
                    let latest = *positions.borrow_and_update();
                    let Some(position) = latest else { continue };
                    TourEvent::FixReceived(position)
                }
            };
            debug!(event = event.event_type(), "reducing event");
            let (next, effects) = session.reduce(event, self.providers.clock.as_ref());
            session = next;
            for effect in effects {
                self.execute(effect, &mut scope, &mut speech, &position_sender);
            }
            if session.is_closed() {
                break;
            }
        }

        drop(scope);
        info!(entries = session.feed().len(), "tour runtime stopped");
        session
    }

    fn execute(
        &self,
        effect: Effect,
        scope: &mut TourScope,
        speech: &mut SpeechOutputController,
        position_sender: &PositionSender,
    ) {
        match effect {
            Effect::FetchAttractions(request) => {
                let backend = Arc::clone(&self.providers.backend);
                self.spawn_request(async move {
                    let outcome = handle_fetch_attractions(&request, backend.as_ref()).await;
                    TourEvent::AttractionsFetched {
                        epoch: request.epoch,
                        outcome,
                    }
                });
            }
            Effect::PollNarration(request) => {
                let backend = Arc::clone(&self.providers.backend);
                self.spawn_request(async move {
                    let outcome = handle_poll(&request, backend.as_ref()).await;
                    TourEvent::PollCompleted {
                        epoch: request.epoch,
                        outcome,
                    }
                });
            }
            Effect::Explain { name, purpose } => {
                let backend = Arc::clone(&self.providers.backend);
                self.spawn_request(async move {
                    let outcome = handle_explain(&name, backend.as_ref()).await;
                    match purpose {
                        ExplainPurpose::InitialPlace => {
                            TourEvent::InitialPlaceExplained { name, outcome }
                        }
                        ExplainPurpose::Attraction => TourEvent::AttractionExplained { name, outcome },
                    }
                });
            }
            Effect::Ask { query } => {
                let backend = Arc::clone(&self.providers.backend);
                self.spawn_request(async move {
                    let outcome = handle_ask(&query, backend.as_ref()).await;
                    TourEvent::AskCompleted { query, outcome }
                });
            }
            Effect::RequestPermission(capability) => {
                let permissions = Arc::clone(&self.providers.permissions);
                self.spawn_request(async move {
                    let granted = permissions.request(capability).await;
                    info!(%capability, granted, "permission resolved");
                    TourEvent::PermissionResolved {
                        capability,
                        granted,
                    }
                });
            }
            Effect::Speak { entry_id, content } => match speech.say(&content) {
                Ok(Some(utterance)) => debug!(%entry_id, utterance = utterance.id, "narrating feed head"),
                Ok(None) => {}
                Err(e) => warn!(%entry_id, error = %e, "speech synthesis failed"),
            },
            Effect::StopSpeech => speech.silence(),
            Effect::RenderMap(message) => self.providers.map.post(&message),
            Effect::Alert(alert) => {
                info!(title = %alert.title, message = %alert.message, "alert raised");
                self.providers.notifier.alert(&alert);
            }
            Effect::AcquirePositionWatch => {
                let sender = Arc::clone(position_sender);
                let on_update: PositionCallback = Box::new(move |position| {
                    sender.send_replace(Some(position));
                });
                match self.providers.positions.watch(&self.config.watch, on_update) {
                    Ok(watch) => {
                        info!(
                            high_accuracy = self.config.watch.high_accuracy,
                            distance_interval = self.config.watch.distance_interval,
                            "position watch acquired"
                        );
                        scope.hold_watch(watch);
                    }
                    Err(e) => warn!(error = %e, "position watch failed to start"),
                }
            }
            Effect::ReleasePositionWatch => scope.release_watch(),
            Effect::StartRecognition => {
                if speech.current().is_some() {
                    debug!("voice capture starting while narration may still be playing");
                }
                let feedback = self.feedback.clone();
                let on_signal: RecognitionCallback = Box::new(move |signal| {
                    if let Some(events) = feedback.upgrade() {
                        if events.send(TourEvent::Recognition(signal)).is_err() {
                            debug!("tour stopped; dropping recognition signal");
                        }
                    }
                });
                match self.providers.recognizer.start(&self.config.recognition, on_signal) {
                    Ok(()) => {
                        info!("voice capture started");
                        scope.recognizer_started = true;
                    }
                    Err(e) => {
                        warn!(error = %e, "voice capture failed to start");
                        self.feed_back(TourEvent::Recognition(RecognitionSignal::Error(Some(
                            e.to_string(),
                        ))));
                    }
                }
            }
            Effect::StopRecognition => scope.stop_recognition(),
        }
    }

    fn spawn_request<F>(&self, request: F)
    where
        F: Future<Output = TourEvent> + Send + 'static,
    {
        let Some(events) = self.feedback.upgrade() else {
            debug!("no live handles; skipping request");
            return;
        };
        tokio::spawn(async move {
            let completion = request.await;
            if events.send(completion).is_err() {
                debug!("tour stopped; dropping completion");
            }
        });
    }

    fn feed_back(&self, event: TourEvent) {
        if let Some(events) = self.feedback.upgrade() {
            if events.send(event).is_err() {
                debug!("tour stopped; dropping event");
            }
        }
    }
}
