//! Handler that performs an attraction fetch against the backend.

use tourguide_core::backend::{AttractionsResponse, TourBackend};
use tourguide_core::error::TourError;
use tracing::{instrument, warn};

use crate::domain::attractions::FetchRequest;

/// Sends `request` to the backend. Failures are logged here and returned so
/// the fetcher can retain its previous set.
///
/// # Errors
///
/// Returns `TourError::Network` if the backend is unreachable.
#[instrument(skip(backend), fields(epoch = %request.epoch, lat = request.latitude, lon = request.longitude))]
pub async fn handle_fetch_attractions(
    request: &FetchRequest,
    backend: &dyn TourBackend,
) -> Result<Option<AttractionsResponse>, TourError> {
    let result = backend
        .attractions(request.latitude, request.longitude)
        .await;
    match &result {
        Err(e) => warn!(error = %e, "attraction fetch failed; keeping previous set"),
        Ok(None) => warn!("attraction fetch returned no data; keeping previous set"),
        Ok(Some(_)) => {}
    }
    result
}
