//! The session-state record.

use tourguide_core::geo::{Attraction, GeoFix};
use tourguide_location::domain::attractions::AttractionFetcher;
use tourguide_location::domain::fixes::GeoFixSource;
use tourguide_narration::domain::feed::ResponseFeed;
use tourguide_narration::domain::poller::NarrationPoller;
use tourguide_narration::domain::spoken::SpokenSet;
use tourguide_speech::domain::voice::{VoiceInputController, VoiceSession};

use super::config::TourConfig;
use super::dispatcher::QueryDispatcher;

/// Which screen the client is on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Screen {
    /// Initial-place entry.
    #[default]
    Entry,
    /// The live tour.
    Tour,
}

/// All state shared by the tour's event sources.
///
/// Only the reactor mutates it; every other component sees snapshots.
#[derive(Debug, Clone)]
pub struct TourSession {
    pub(crate) screen: Screen,
    pub(crate) fixes: GeoFixSource,
    pub(crate) fetcher: AttractionFetcher,
    pub(crate) poller: NarrationPoller,
    pub(crate) feed: ResponseFeed,
    pub(crate) voice: VoiceInputController,
    pub(crate) dispatcher: QueryDispatcher,
    pub(crate) query_text: String,
    pub(crate) watching: bool,
    pub(crate) closed: bool,
}

impl TourSession {
    /// Creates a session on the entry screen.
    #[must_use]
    pub fn new(config: &TourConfig) -> Self {
        Self {
            screen: Screen::Entry,
            fixes: GeoFixSource::new(config.trust_policy),
            fetcher: AttractionFetcher::new(),
            poller: NarrationPoller::new(config.speak_radius),
            feed: ResponseFeed::new(),
            voice: VoiceInputController::new(),
            dispatcher: QueryDispatcher::new(),
            query_text: String::new(),
            watching: false,
            closed: false,
        }
    }

    /// Current screen.
    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// The response feed.
    #[must_use]
    pub fn feed(&self) -> &ResponseFeed {
        &self.feed
    }

    /// The nearby-attraction working set.
    #[must_use]
    pub fn attractions(&self) -> &[Attraction] {
        self.fetcher.attractions()
    }

    /// The latest accepted fix.
    #[must_use]
    pub fn current_fix(&self) -> Option<&GeoFix> {
        self.fixes.current()
    }

    /// Attractions the backend has confirmed as narrated.
    #[must_use]
    pub fn spoken(&self) -> &SpokenSet {
        self.poller.spoken()
    }

    /// Contents of the query text field.
    #[must_use]
    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    /// Voice capture state.
    #[must_use]
    pub fn voice_session(&self) -> VoiceSession {
        self.voice.session()
    }

    /// Whether the initial-place request is pending.
    #[must_use]
    pub fn is_place_in_flight(&self) -> bool {
        self.dispatcher.is_place_in_flight()
    }

    /// Whether the position watch has been requested.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Whether the tour screen has been left. A closed session ignores all
    /// further events.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
