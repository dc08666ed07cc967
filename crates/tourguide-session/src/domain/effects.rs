//! Effects requested by the session reactor.

use tourguide_core::alert::Alert;
use tourguide_core::capability::Capability;
use tourguide_core::map::MapMessage;
use tourguide_location::domain::attractions::FetchRequest;
use tourguide_narration::domain::poller::PollRequest;
use uuid::Uuid;

/// Why an explanation is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExplainPurpose {
    /// The entry-screen place; success replaces the feed.
    InitialPlace,
    /// A tapped map marker; success prepends to the feed.
    Attraction,
}

/// Work for the runtime to carry out. The reactor never performs I/O
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fetch nearby attractions.
    FetchAttractions(FetchRequest),
    /// Ask the backend whether a narration is due.
    PollNarration(PollRequest),
    /// Request an explanation for a named place.
    Explain {
        /// Place name.
        name: String,
        /// Where the result goes.
        purpose: ExplainPurpose,
    },
    /// Post a free-form question.
    Ask {
        /// Question text.
        query: String,
    },
    /// Speak a new feed head.
    Speak {
        /// Feed entry being spoken.
        entry_id: Uuid,
        /// Markdown content.
        content: String,
    },
    /// Stop any narration in progress.
    StopSpeech,
    /// Post a snapshot to the map surface.
    RenderMap(MapMessage),
    /// Show an alert.
    Alert(Alert),
    /// Prompt for a capability.
    RequestPermission(Capability),
    /// Start the position subscription.
    AcquirePositionWatch,
    /// Remove the position subscription.
    ReleasePositionWatch,
    /// Start a recognition session.
    StartRecognition,
    /// Stop the recognition session.
    StopRecognition,
}
