//! The session reactor: folds one event into the session record.

use tourguide_core::alert::Alert;
use tourguide_core::capability::{Capability, RecognitionSignal};
use tourguide_core::clock::Clock;
use tourguide_core::error::TourError;
use tourguide_core::geo::RawPosition;
use tourguide_core::map::MapMessage;
use tourguide_location::domain::attractions::FetchOutcome;
use tourguide_narration::domain::feed::{NarrationEvent, NarrationKind};
use tourguide_narration::domain::poller::PollOutcome;
use tourguide_speech::domain::voice::VoiceAction;
use tracing::{debug, info, warn};

use super::effects::Effect;
use super::events::TourEvent;
use super::state::{Screen, TourSession};

impl TourSession {
    /// Applies `event` and returns the next session record together with
    /// the effects the runtime must carry out.
    ///
    /// Performs no I/O. A closed session returns itself unchanged and
    /// requests nothing.
    #[must_use]
    pub fn reduce(mut self, event: TourEvent, clock: &dyn Clock) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();
        if self.closed {
            debug!(event = event.event_type(), "session closed; dropping event");
            return (self, effects);
        }
        match event {
            TourEvent::InitialPlaceSubmitted(name) => {
                effects.extend(self.dispatcher.submit_initial_place(self.screen, &name));
            }
            TourEvent::InitialPlaceExplained { name, outcome } => {
                self.on_initial_place(name, outcome, clock, &mut effects);
            }
            TourEvent::PermissionResolved {
                capability,
                granted,
            } => self.on_permission(capability, granted, &mut effects),
            TourEvent::FixReceived(position) => self.on_fix(position, &mut effects),
            TourEvent::AttractionsFetched { epoch, outcome } => {
                match self.fetcher.complete(epoch, outcome) {
                    FetchOutcome::Replaced { count } => {
                        debug!(%epoch, count, "attraction set replaced");
                        self.render_map(&mut effects);
                    }
                    FetchOutcome::Stale => debug!(%epoch, "discarding stale attraction fetch"),
                    FetchOutcome::Retained => {}
                }
            }
            TourEvent::PollCompleted { epoch, outcome } => {
                match self.poller.complete(epoch, outcome) {
                    PollOutcome::Narrate(narration) => {
                        let entry = NarrationEvent::new(
                            NarrationKind::Speak,
                            narration.explanation,
                            narration.attraction,
                            clock,
                        );
                        self.prepend(entry, &mut effects);
                    }
                    PollOutcome::Silent => debug!(%epoch, "nothing to narrate"),
                    PollOutcome::Stale => debug!(%epoch, "discarding stale narration poll"),
                    PollOutcome::Failed => {}
                }
            }
            TourEvent::QueryTextChanged(text) => self.query_text = text,
            TourEvent::AskSubmitted => {
                if self.screen == Screen::Tour {
                    effects.extend(self.dispatcher.ask(&self.query_text));
                }
            }
            TourEvent::AskCompleted { query, outcome } => match outcome {
                Ok(answer) => {
                    // An edit made while the answer was pending is kept.
                    if self.query_text.trim() == query {
                        self.query_text.clear();
                    }
                    let entry = NarrationEvent::new(NarrationKind::Ask, answer, Some(query), clock);
                    self.prepend(entry, &mut effects);
                }
                Err(_) => effects.push(Effect::Alert(Alert::response_failed())),
            },
            TourEvent::MarkerTapped(name) => {
                if self.screen == Screen::Tour {
                    effects.extend(self.dispatcher.explain_attraction(&name));
                }
            }
            TourEvent::AttractionExplained { name, outcome } => match outcome {
                Ok(explanation) => {
                    let entry =
                        NarrationEvent::new(NarrationKind::Explain, explanation, Some(name), clock);
                    self.prepend(entry, &mut effects);
                }
                Err(_) => effects.push(Effect::Alert(Alert::explanation_failed())),
            },
            TourEvent::VoiceToggled => {
                if self.screen == Screen::Tour {
                    let action = self.voice.toggle();
                    self.apply_voice(action, &mut effects);
                }
            }
            TourEvent::Recognition(signal) => self.on_recognition(signal, &mut effects),
            TourEvent::TourExited => self.on_exit(&mut effects),
        }
        (self, effects)
    }

    fn on_initial_place(
        &mut self,
        name: String,
        outcome: Result<String, TourError>,
        clock: &dyn Clock,
        effects: &mut Vec<Effect>,
    ) {
        self.dispatcher.initial_place_settled();
        if self.screen == Screen::Tour {
            debug!(place = %name, "tour already started; ignoring initial place result");
            return;
        }
        let Ok(explanation) = outcome else {
            effects.push(Effect::Alert(Alert::explanation_failed()));
            return;
        };
        let entry = NarrationEvent::new(NarrationKind::Explain, explanation, Some(name), clock);
        let head = self.feed.reset_to(entry);
        effects.push(Effect::Speak {
            entry_id: head.id,
            content: head.content.clone(),
        });
        info!(place = head.source_label.as_deref().unwrap_or_default(), "tour started");
        self.screen = Screen::Tour;
        effects.push(Effect::RequestPermission(Capability::Location));
    }

    fn on_permission(&mut self, capability: Capability, granted: bool, effects: &mut Vec<Effect>) {
        match capability {
            Capability::Location => {
                if !granted {
                    let error = TourError::PermissionDenied(capability);
                    warn!(%error, "position watch not started");
                    effects.push(Effect::Alert(Alert::from(&error)));
                    return;
                }
                if self.screen != Screen::Tour || self.watching {
                    return;
                }
                self.watching = true;
                effects.push(Effect::AcquirePositionWatch);
            }
            Capability::Microphone => {
                let action = self.voice.permission_resolved(granted);
                self.apply_voice(action, effects);
            }
        }
    }

    fn on_fix(&mut self, position: RawPosition, effects: &mut Vec<Effect>) {
        if !self.watching {
            debug!("no position watch; dropping update");
            return;
        }
        let Some(fix) = self.fixes.accept(position) else {
            debug!(
                lat = position.latitude,
                lon = position.longitude,
                policy = %self.fixes.policy(),
                "untrusted position dropped"
            );
            return;
        };
        effects.push(Effect::FetchAttractions(self.fetcher.begin(&fix)));
        effects.push(Effect::PollNarration(self.poller.begin(&fix)));
        self.render_map(effects);
    }

    fn on_recognition(&mut self, signal: RecognitionSignal, effects: &mut Vec<Effect>) {
        match signal {
            RecognitionSignal::Started => self.voice.started(),
            RecognitionSignal::Result(transcript) => {
                let action = self.voice.transcript(transcript);
                self.apply_voice(action, effects);
            }
            RecognitionSignal::End => self.voice.ended(),
            RecognitionSignal::Error(message) => {
                let action = self.voice.failed(message);
                self.apply_voice(Some(action), effects);
            }
        }
    }

    fn on_exit(&mut self, effects: &mut Vec<Effect>) {
        self.closed = true;
        if std::mem::take(&mut self.watching) {
            effects.push(Effect::ReleasePositionWatch);
        }
        let action = self.voice.shutdown();
        self.apply_voice(action, effects);
        effects.push(Effect::StopSpeech);
        info!(entries = self.feed.len(), "tour exited");
    }

    fn apply_voice(&mut self, action: Option<VoiceAction>, effects: &mut Vec<Effect>) {
        match action {
            None => {}
            Some(VoiceAction::RequestPermission(capability)) => {
                effects.push(Effect::RequestPermission(capability));
            }
            Some(VoiceAction::StartRecognition) => effects.push(Effect::StartRecognition),
            Some(VoiceAction::StopRecognition) => effects.push(Effect::StopRecognition),
            Some(VoiceAction::SetQueryText(text)) => self.query_text = text,
            Some(VoiceAction::Alert(alert)) => effects.push(Effect::Alert(alert)),
        }
    }

    fn prepend(&mut self, entry: NarrationEvent, effects: &mut Vec<Effect>) {
        let head = self.feed.prepend(entry);
        info!(
            kind = head.kind.label(),
            source = head.source_label.as_deref().unwrap_or_default(),
            "feed entry added"
        );
        effects.push(Effect::Speak {
            entry_id: head.id,
            content: head.content.clone(),
        });
    }

    fn render_map(&self, effects: &mut Vec<Effect>) {
        if let Some(fix) = self.fixes.current() {
            effects.push(Effect::RenderMap(MapMessage::update(
                fix,
                self.fetcher.attractions(),
            )));
        }
    }
}
