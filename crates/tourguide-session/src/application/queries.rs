//! Handlers for user-initiated backend requests.

use tourguide_core::backend::TourBackend;
use tourguide_core::error::TourError;
use tracing::{instrument, warn};

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

/// Requests an explanation of `name`.
///
/// # Errors
///
/// Returns `TourError::Network` on transport failure and `TourError::Parse`
/// when the backend answered without an explanation.
#[instrument(skip(backend))]
pub async fn handle_explain(name: &str, backend: &dyn TourBackend) -> Result<String, TourError> {
    let result = backend
        .explain(name)
        .await
        .and_then(|response| {
            non_empty(response.and_then(|r| r.explanation))
                .ok_or_else(|| TourError::Parse("response carried no explanation".into()))
        });
    if let Err(e) = &result {
        warn!(error = %e, "explain request failed");
    }
    result
}

/// Posts `query` to the question endpoint.
///
/// # Errors
///
/// Returns `TourError::Network` on transport failure and `TourError::Parse`
/// when the backend answered without a response.
#[instrument(skip(backend))]
pub async fn handle_ask(query: &str, backend: &dyn TourBackend) -> Result<String, TourError> {
    let result = backend.ask(query).await.and_then(|response| {
        non_empty(response.and_then(|r| r.response))
            .ok_or_else(|| TourError::Parse("response carried no answer".into()))
    });
    if let Err(e) = &result {
        warn!(error = %e, "ask request failed");
    }
    result
}
