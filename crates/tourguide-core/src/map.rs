//! Messages posted to the map surface.

use serde::Serialize;

use crate::geo::{Attraction, GeoFix};

/// Marker entry in a map update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    /// Attraction name, shown in the marker popup.
    pub name: String,
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lon: f64,
}

/// One-way message to the map surface. The surface re-renders all markers
/// from each message; no diffing is expected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapMessage {
    /// Full snapshot of the user position and attraction markers.
    Update {
        /// User latitude.
        #[serde(rename = "userLat")]
        user_lat: f64,
        /// User longitude.
        #[serde(rename = "userLon")]
        user_lon: f64,
        /// Attraction markers.
        attractions: Vec<MapMarker>,
    },
}

impl MapMessage {
    /// Builds an update snapshot from the current fix and attraction set.
    #[must_use]
    pub fn update(fix: &GeoFix, attractions: &[Attraction]) -> Self {
        Self::Update {
            user_lat: fix.latitude,
            user_lon: fix.longitude,
            attractions: attractions
                .iter()
                .map(|a| MapMarker {
                    name: a.name.clone(),
                    lat: a.latitude,
                    lon: a.longitude,
                })
                .collect(),
        }
    }
}
