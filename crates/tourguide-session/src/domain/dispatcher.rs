//! Question and explanation submission.

use tourguide_core::alert::Alert;
use tourguide_core::error::TourError;
use tracing::debug;

use super::effects::{Effect, ExplainPurpose};
use super::state::Screen;

/// Validates user submissions and turns them into backend effects.
///
/// Tracks whether the initial-place request is in flight so that repeated
/// submissions cannot race each other into the feed.
#[derive(Debug, Clone, Default)]
pub struct QueryDispatcher {
    place_in_flight: bool,
}

impl QueryDispatcher {
    /// Creates a dispatcher with nothing in flight.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits the entry-screen place name.
    ///
    /// Ignored once the tour has started or while a submission is pending.
    /// Blank input yields an alert instead of a request.
    pub fn submit_initial_place(&mut self, screen: Screen, name: &str) -> Option<Effect> {
        if screen == Screen::Tour {
            debug!("initial place already explained; ignoring submission");
            return None;
        }
        if self.place_in_flight {
            debug!("initial place request in flight; ignoring submission");
            return None;
        }
        let name = match non_blank(name, "Please enter a place name") {
            Ok(name) => name,
            Err(error) => return Some(Effect::Alert(Alert::from(&error))),
        };
        self.place_in_flight = true;
        Some(Effect::Explain {
            name: name.to_owned(),
            purpose: ExplainPurpose::InitialPlace,
        })
    }

    /// Marks the initial-place request as finished.
    pub fn initial_place_settled(&mut self) {
        self.place_in_flight = false;
    }

    /// Whether an initial-place request is pending.
    #[must_use]
    pub fn is_place_in_flight(&self) -> bool {
        self.place_in_flight
    }

    /// Submits a free-form question. Blank input is a silent no-op.
    #[must_use]
    pub fn ask(&self, query: &str) -> Option<Effect> {
        let query = match non_blank(query, "question is empty") {
            Ok(query) => query,
            Err(error) => {
                debug!(%error, "ignoring question");
                return None;
            }
        };
        Some(Effect::Ask {
            query: query.to_owned(),
        })
    }

    /// Requests an explanation for a tapped marker.
    #[must_use]
    pub fn explain_attraction(&self, name: &str) -> Option<Effect> {
        let name = non_blank(name, "marker has no name").ok()?;
        Some(Effect::Explain {
            name: name.to_owned(),
            purpose: ExplainPurpose::Attraction,
        })
    }
}

/// Trims `input`, rejecting blank text with `message`.
fn non_blank<'a>(input: &'a str, message: &str) -> Result<&'a str, TourError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        Err(TourError::Validation(message.to_owned()))
    } else {
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_initial_place_trims_and_requests_explanation() {
        // Arrange
        let mut dispatcher = QueryDispatcher::new();

        // Act
        let effect = dispatcher.submit_initial_place(Screen::Entry, "  Red Fort ");

        // Assert
        assert_eq!(
            effect,
            Some(Effect::Explain {
                name: "Red Fort".into(),
                purpose: ExplainPurpose::InitialPlace,
            })
        );
        assert!(dispatcher.is_place_in_flight());
    }

    #[test]
    fn test_blank_initial_place_alerts_without_request() {
        let mut dispatcher = QueryDispatcher::new();

        let effect = dispatcher.submit_initial_place(Screen::Entry, "   ");

        assert_eq!(
            effect,
            Some(Effect::Alert(Alert::new("Error", "Please enter a place name")))
        );
        assert!(!dispatcher.is_place_in_flight());
    }

    #[test]
    fn test_second_submission_while_in_flight_is_ignored() {
        let mut dispatcher = QueryDispatcher::new();
        dispatcher.submit_initial_place(Screen::Entry, "Red Fort");

        assert_eq!(dispatcher.submit_initial_place(Screen::Entry, "India Gate"), None);

        dispatcher.initial_place_settled();
        assert!(dispatcher.submit_initial_place(Screen::Entry, "India Gate").is_some());
    }

    #[test]
    fn test_submission_after_tour_started_is_ignored() {
        let mut dispatcher = QueryDispatcher::new();

        assert_eq!(dispatcher.submit_initial_place(Screen::Tour, "Red Fort"), None);
    }

    #[test]
    fn test_blank_question_is_silent_no_op() {
        let dispatcher = QueryDispatcher::new();

        assert_eq!(dispatcher.ask(" \n "), None);
        assert_eq!(
            dispatcher.ask("What year was it built?"),
            Some(Effect::Ask {
                query: "What year was it built?".into()
            })
        );
    }

    #[test]
    fn test_explain_attraction_uses_marker_name() {
        let dispatcher = QueryDispatcher::new();

        let effect = dispatcher.explain_attraction("Jama Masjid");

        assert_eq!(
            effect,
            Some(Effect::Explain {
                name: "Jama Masjid".into(),
                purpose: ExplainPurpose::Attraction,
            })
        );
    }

    #[test]
    fn test_non_blank_reports_validation_error() {
        assert_eq!(non_blank("  Qutub Minar ", "empty").ok(), Some("Qutub Minar"));
        assert!(matches!(
            non_blank("\t", "Please enter a place name"),
            Err(TourError::Validation(message)) if message == "Please enter a place name"
        ));
    }
}
