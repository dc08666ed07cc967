//! Session configuration.

use tourguide_core::capability::{RecognitionOptions, UtteranceOptions, WatchOptions};
use tourguide_location::domain::fixes::TrustPolicy;
use tourguide_narration::domain::poller::DEFAULT_RADIUS;

/// Tunables for one tour session. The binary builds this from the
/// environment; tests use [`TourConfig::default`].
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    /// `/speak` search radius.
    pub speak_radius: f64,
    /// Which raw positions are accepted as fixes.
    pub trust_policy: TrustPolicy,
    /// Voice parameters for narration.
    pub utterance: UtteranceOptions,
    /// Recognition session options.
    pub recognition: RecognitionOptions,
    /// Position watch options.
    pub watch: WatchOptions,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            speak_radius: DEFAULT_RADIUS,
            trust_policy: TrustPolicy::default(),
            utterance: UtteranceOptions::default(),
            recognition: RecognitionOptions::default(),
            watch: WatchOptions::default(),
        }
    }
}
