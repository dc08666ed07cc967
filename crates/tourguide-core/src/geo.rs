//! Positions and points of interest.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A position update as delivered by the positioning provider, before any
/// trust policy has been applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawPosition {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Whether the provider reports this position as simulated (mocked).
    pub simulated: bool,
    /// When the provider produced the update.
    pub timestamp: DateTime<Utc>,
}

/// An accepted position fix. Only the latest one is retained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoFix {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Whether the trust policy accepted the source position.
    pub trusted: bool,
    /// When the source position was produced.
    pub timestamp: DateTime<Utc>,
}

/// A named point of interest with coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    /// Display name; also the attraction's identifier.
    pub name: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Backend-provided kind, e.g. `"museum"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Attraction {
    /// Creates an attraction without a category.
    #[must_use]
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            category: None,
        }
    }
}
