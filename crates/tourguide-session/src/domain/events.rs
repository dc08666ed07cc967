//! Events consumed by the session reactor.

use tourguide_core::backend::{AttractionsResponse, SpeakResponse};
use tourguide_core::capability::{Capability, RecognitionSignal};
use tourguide_core::epoch::Epoch;
use tourguide_core::error::TourError;
use tourguide_core::geo::RawPosition;

/// Everything that can happen to a tour session: user input, provider
/// callbacks, and completions of backend calls started by earlier effects.
#[derive(Debug)]
pub enum TourEvent {
    /// The user submitted the initial place name on the entry screen.
    InitialPlaceSubmitted(String),
    /// The initial-place explanation request finished.
    InitialPlaceExplained {
        /// Name that was submitted.
        name: String,
        /// Explanation text or the failure.
        outcome: Result<String, TourError>,
    },
    /// A permission prompt was answered.
    PermissionResolved {
        /// The capability asked for.
        capability: Capability,
        /// Whether it was granted.
        granted: bool,
    },
    /// The position provider delivered an update.
    FixReceived(RawPosition),
    /// An `/attractions` request finished.
    AttractionsFetched {
        /// Epoch the request was issued with.
        epoch: Epoch,
        /// Backend result.
        outcome: Result<Option<AttractionsResponse>, TourError>,
    },
    /// A `/speak` poll finished.
    PollCompleted {
        /// Epoch the poll was issued with.
        epoch: Epoch,
        /// Backend result.
        outcome: Result<Option<SpeakResponse>, TourError>,
    },
    /// The query text field was edited.
    QueryTextChanged(String),
    /// The user submitted the current query text.
    AskSubmitted,
    /// An `/ask` request finished.
    AskCompleted {
        /// The question that was sent.
        query: String,
        /// Answer text or the failure.
        outcome: Result<String, TourError>,
    },
    /// A map marker was tapped.
    MarkerTapped(String),
    /// The explanation for a tapped marker finished.
    AttractionExplained {
        /// Name of the tapped attraction.
        name: String,
        /// Explanation text or the failure.
        outcome: Result<String, TourError>,
    },
    /// The microphone button was pressed.
    VoiceToggled,
    /// The speech recognizer raised a signal.
    Recognition(RecognitionSignal),
    /// The tour screen is being left.
    TourExited,
}

impl TourEvent {
    /// Stable name used in logs.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::InitialPlaceSubmitted(_) => "tour.initial_place_submitted",
            Self::InitialPlaceExplained { .. } => "tour.initial_place_explained",
            Self::PermissionResolved { .. } => "tour.permission_resolved",
            Self::FixReceived(_) => "tour.fix_received",
            Self::AttractionsFetched { .. } => "tour.attractions_fetched",
            Self::PollCompleted { .. } => "tour.poll_completed",
            Self::QueryTextChanged(_) => "tour.query_text_changed",
            Self::AskSubmitted => "tour.ask_submitted",
            Self::AskCompleted { .. } => "tour.ask_completed",
            Self::MarkerTapped(_) => "tour.marker_tapped",
            Self::AttractionExplained { .. } => "tour.attraction_explained",
            Self::VoiceToggled => "tour.voice_toggled",
            Self::Recognition(_) => "tour.recognition",
            Self::TourExited => "tour.exited",
        }
    }
}
