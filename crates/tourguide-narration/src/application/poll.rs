//! Handler that performs a narration poll against the backend.

use tourguide_core::backend::{SpeakResponse, TourBackend};
use tourguide_core::error::TourError;
use tracing::{debug, instrument, warn};

use crate::domain::poller::PollRequest;

/// Sends `request` to `/speak`. Failures are logged and returned; the next
/// accepted fix is the only retry.
///
/// # Errors
///
/// Returns `TourError::Network` if the backend is unreachable.
#[instrument(
    skip(backend, request),
    fields(epoch = %request.epoch, spoken = request.query.spoken.len())
)]
pub async fn handle_poll(
    request: &PollRequest,
    backend: &dyn TourBackend,
) -> Result<Option<SpeakResponse>, TourError> {
    let result = backend.speak(&request.query).await;
    match &result {
        Err(e) => warn!(error = %e, "narration poll failed; skipping cycle"),
        Ok(None) => warn!("narration poll returned no data; skipping cycle"),
        Ok(Some(response)) => debug!(speak = response.speak, "narration poll answered"),
    }
    result
}
