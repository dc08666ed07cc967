//! Tour guide — HTTP backend client.
//!
//! Implements [`TourBackend`] over the four JSON endpoints. Response bodies
//! are read as text whatever the status code; a body that does not parse is
//! reported as "no data" rather than as an error.

use std::fmt::Display;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tourguide_core::backend::{
    AskRequest, AskResponse, AttractionsResponse, ExplainResponse, SpeakQuery, SpeakResponse,
    TourBackend,
};
use tourguide_core::error::TourError;
use tracing::{debug, instrument, warn};

/// Production backend address.
pub const DEFAULT_BASE_URL: &str = "https://tourguide-grel.onrender.com";

/// [`TourBackend`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTourBackend {
    base_url: String,
    client: Client,
}

impl HttpTourBackend {
    /// Creates a client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `TourError::Network` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, TourError> {
        let client = Client::builder()
            .build()
            .map_err(|e| TourError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(base_url, client))
    }

    /// Creates a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { base_url, client }
    }

    /// The backend address, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

fn transport_error(endpoint: &str, e: impl Display) -> TourError {
    TourError::Network(format!("{endpoint} request failed: {e}"))
}

/// Reads `response` as text and parses it as `T`. Unparsable bodies are
/// `Ok(None)`.
async fn parse_body<T: DeserializeOwned>(
    endpoint: &str,
    response: Response,
) -> Result<Option<T>, TourError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_error(endpoint, e))?;
    match serde_json::from_str::<T>(&body) {
        Ok(parsed) => {
            if !status.is_success() {
                debug!(endpoint, %status, "parsed body of unsuccessful response");
            }
            Ok(Some(parsed))
        }
        Err(e) => {
            warn!(endpoint, %status, error = %e, "unparsable response body");
            Ok(None)
        }
    }
}

#[async_trait]
impl TourBackend for HttpTourBackend {
    #[instrument(skip(self))]
    async fn attractions(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<AttractionsResponse>, TourError> {
        let response = self
            .client
            .get(self.endpoint("attractions"))
            .query(&[("lat", latitude), ("lon", longitude)])
            .send()
            .await
            .map_err(|e| transport_error("/attractions", e))?;
        parse_body("/attractions", response).await
    }

    #[instrument(skip(self, query), fields(lat = query.latitude, lon = query.longitude, spoken = query.spoken.len()))]
    async fn speak(&self, query: &SpeakQuery) -> Result<Option<SpeakResponse>, TourError> {
        let mut params = vec![
            ("lat", query.latitude.to_string()),
            ("lon", query.longitude.to_string()),
            ("radius", query.radius.to_string()),
        ];
        params.extend(query.spoken.iter().map(|name| ("spoken", name.clone())));
        let response = self
            .client
            .get(self.endpoint("speak"))
            .query(&params)
            .send()
            .await
            .map_err(|e| transport_error("/speak", e))?;
        parse_body("/speak", response).await
    }

    #[instrument(skip(self))]
    async fn explain(&self, name: &str) -> Result<Option<ExplainResponse>, TourError> {
        let response = self
            .client
            .get(self.endpoint("explain"))
            .query(&[("name", name)])
            .send()
            .await
            .map_err(|e| transport_error("/explain", e))?;
        parse_body("/explain", response).await
    }

    #[instrument(skip(self))]
    async fn ask(&self, query: &str) -> Result<Option<AskResponse>, TourError> {
        let response = self
            .client
            .post(self.endpoint("ask"))
            .json(&AskRequest { query })
            .send()
            .await
            .map_err(|e| transport_error("/ask", e))?;
        parse_body("/ask", response).await
    }
}
