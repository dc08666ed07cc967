//! Proximity narration polling.

use tourguide_core::backend::{SpeakQuery, SpeakResponse};
use tourguide_core::epoch::{Epoch, EpochGate};
use tourguide_core::error::TourError;
use tourguide_core::geo::GeoFix;

use super::spoken::SpokenSet;

/// Default `/speak` search radius.
pub const DEFAULT_RADIUS: f64 = 100.0;

/// An outgoing `/speak` request.
#[derive(Debug, Clone, PartialEq)]
pub struct PollRequest {
    /// Tag used to discard the result if a newer one lands first.
    pub epoch: Epoch,
    /// Query parameters.
    pub query: SpeakQuery,
}

/// A narration the backend says is due now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    /// Markdown narration text.
    pub explanation: String,
    /// Name of the narrated attraction.
    pub attraction: Option<String>,
}

/// What happened to a completed poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A narration is due; the spoken set has been replaced.
    Narrate(Narration),
    /// Nothing to narrate; no state changed.
    Silent,
    /// A newer poll result had already been applied.
    Stale,
    /// The request failed or the body was unusable; no state changed.
    Failed,
}

/// Asks the backend, on every accepted fix, whether a narration is due.
///
/// Owns the [`SpokenSet`]. The set is replaced only from a positive
/// response and only if that response is not older than one already applied.
#[derive(Debug, Clone)]
pub struct NarrationPoller {
    radius: f64,
    gate: EpochGate,
    spoken: SpokenSet,
}

impl Default for NarrationPoller {
    fn default() -> Self {
        Self::new(DEFAULT_RADIUS)
    }
}

impl NarrationPoller {
    /// Creates a poller searching within `radius`.
    #[must_use]
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            gate: EpochGate::new(),
            spoken: SpokenSet::new(),
        }
    }

    /// Issues a poll for `fix` carrying the current spoken set.
    pub fn begin(&mut self, fix: &GeoFix) -> PollRequest {
        PollRequest {
            epoch: self.gate.issue(),
            query: SpeakQuery {
                latitude: fix.latitude,
                longitude: fix.longitude,
                radius: self.radius,
                spoken: self.spoken.to_query_list(),
            },
        }
    }

    /// Applies the result of the poll tagged `epoch`.
    ///
    /// Any parsed response, positive or not, advances the gate so that an
    /// older response landing later cannot override it.
    pub fn complete(
        &mut self,
        epoch: Epoch,
        result: Result<Option<SpeakResponse>, TourError>,
    ) -> PollOutcome {
        let Ok(Some(response)) = result else {
            return PollOutcome::Failed;
        };
        if !self.gate.admit(epoch) {
            return PollOutcome::Stale;
        }
        let explanation = response
            .explanation
            .filter(|text| !text.trim().is_empty());
        match explanation {
            Some(explanation) if response.speak => {
                self.spoken
                    .replace_with(response.spoken.unwrap_or_default());
                PollOutcome::Narrate(Narration {
                    explanation,
                    attraction: response.attraction.and_then(|a| a.name),
                })
            }
            _ => PollOutcome::Silent,
        }
    }

    /// The server-confirmed spoken set.
    #[must_use]
    pub fn spoken(&self) -> &SpokenSet {
        &self.spoken
    }

    /// The configured search radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}
