//! Backend wire types and the `TourBackend` abstraction.
//!
//! Every response field is optional on the wire. Bodies that do not parse at
//! all are reported as `Ok(None)` ("no data") by implementations; only
//! transport failures are errors.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::TourError;
use crate::geo::Attraction;

/// Attraction entry as returned by `GET /attractions`.
///
/// Coordinates are accepted as either `latitude`/`longitude` or `lat`/`lon`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireAttraction {
    /// Attraction name.
    #[serde(default)]
    pub name: Option<String>,
    /// Latitude in decimal degrees.
    #[serde(default, alias = "lat")]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    #[serde(default, alias = "lon")]
    pub longitude: Option<f64>,
    /// Backend-provided kind.
    #[serde(default, rename = "type")]
    pub category: Option<String>,
}

impl WireAttraction {
    /// Converts to a domain [`Attraction`], dropping entries that lack a name
    /// or coordinates.
    #[must_use]
    pub fn into_attraction(self) -> Option<Attraction> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(Attraction {
            name,
            latitude: self.latitude?,
            longitude: self.longitude?,
            category: self.category,
        })
    }
}

/// Body of `GET /attractions`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AttractionsResponse {
    /// Nearby attractions. Absent when the backend reported an error.
    #[serde(default)]
    pub attractions: Option<Vec<WireAttraction>>,
}

impl AttractionsResponse {
    /// Returns the usable attractions, or `None` if the body carried no list.
    #[must_use]
    pub fn into_attractions(self) -> Option<Vec<Attraction>> {
        self.attractions.map(|list| {
            list.into_iter()
                .filter_map(WireAttraction::into_attraction)
                .collect()
        })
    }
}

/// Query for `GET /speak`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeakQuery {
    /// Latitude of the current fix.
    pub latitude: f64,
    /// Longitude of the current fix.
    pub longitude: f64,
    /// Search radius in backend distance units.
    pub radius: f64,
    /// Normalized names already narrated; sent as repeated `spoken=` params.
    pub spoken: Vec<String>,
}

/// The attraction a `/speak` response narrates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpokenAttraction {
    /// Attraction name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Body of `GET /speak`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SpeakResponse {
    /// Whether a narration is due now.
    #[serde(default)]
    pub speak: bool,
    /// Narration text (markdown).
    #[serde(default)]
    pub explanation: Option<String>,
    /// The narrated attraction.
    #[serde(default)]
    pub attraction: Option<SpokenAttraction>,
    /// Server-confirmed list of narrated attraction names.
    #[serde(default)]
    pub spoken: Option<Vec<String>>,
    /// Informational message sent with negative responses.
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `GET /explain`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExplainResponse {
    /// Explanation text (markdown).
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Body sent to `POST /ask`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AskRequest<'a> {
    /// The user's question.
    pub query: &'a str,
}

/// Body of `POST /ask`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AskResponse {
    /// Answer text (markdown).
    #[serde(default)]
    pub response: Option<String>,
}

/// Remote tour backend.
///
/// `Ok(None)` means the backend answered with a body that could not be
/// parsed; callers treat it exactly like a response without data.
#[async_trait]
pub trait TourBackend: Send + Sync {
    /// `GET /attractions?lat&lon`.
    async fn attractions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<AttractionsResponse>, TourError>;

    /// `GET /speak?lat&lon&radius&spoken…`.
    async fn speak(&self, query: &SpeakQuery) -> Result<Option<SpeakResponse>, TourError>;

    /// `GET /explain?name`.
    async fn explain(&self, name: &str) -> Result<Option<ExplainResponse>, TourError>;

    /// `POST /ask`.
    async fn ask(&self, query: &str) -> Result<Option<AskResponse>, TourError>;
}
