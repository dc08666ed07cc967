//! The nearby-attraction working set.

use tourguide_core::backend::AttractionsResponse;
use tourguide_core::epoch::{Epoch, EpochGate};
use tourguide_core::error::TourError;
use tourguide_core::geo::{Attraction, GeoFix};

/// An outgoing `/attractions` request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FetchRequest {
    /// Tag used to discard the result if a newer one lands first.
    pub epoch: Epoch,
    /// Latitude of the triggering fix.
    pub latitude: f64,
    /// Longitude of the triggering fix.
    pub longitude: f64,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The working set was replaced with `count` attractions.
    Replaced {
        /// Size of the new set.
        count: usize,
    },
    /// A newer result had already been applied.
    Stale,
    /// The request failed or returned no usable data; the set was kept.
    Retained,
}

/// Owns the attraction working set and replaces it wholesale from each
/// successful, non-stale response.
#[derive(Debug, Clone, Default)]
pub struct AttractionFetcher {
    gate: EpochGate,
    attractions: Vec<Attraction>,
}

impl AttractionFetcher {
    /// Creates a fetcher with an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a request for `fix`.
    pub fn begin(&mut self, fix: &GeoFix) -> FetchRequest {
        FetchRequest {
            epoch: self.gate.issue(),
            latitude: fix.latitude,
            longitude: fix.longitude,
        }
    }

    /// Applies the result of the request tagged `epoch`.
    pub fn complete(
        &mut self,
        epoch: Epoch,
        result: Result<Option<AttractionsResponse>, TourError>,
    ) -> FetchOutcome {
        let Ok(Some(response)) = result else {
            return FetchOutcome::Retained;
        };
        let Some(attractions) = response.into_attractions() else {
            return FetchOutcome::Retained;
        };
        if !self.gate.admit(epoch) {
            return FetchOutcome::Stale;
        }
        let count = attractions.len();
        self.attractions = attractions;
        FetchOutcome::Replaced { count }
    }

    /// The current working set.
    #[must_use]
    pub fn attractions(&self) -> &[Attraction] {
        &self.attractions
    }
}
