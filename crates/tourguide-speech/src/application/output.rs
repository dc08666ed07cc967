//! Speech output as a single-slot register.
//!
//! The slot holds the utterance most recently handed to the engine. Starting
//! a new one while the slot is occupied stops the engine first, so the newest
//! narration always wins and nothing queues.

use std::sync::Arc;

use tourguide_core::capability::{SpeechSynthesizer, UtteranceOptions};
use tourguide_core::error::TourError;
use tracing::{debug, info};

use crate::domain::markdown::strip_markdown;

/// An utterance handed to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    /// Sequence number, starting at 1.
    pub id: u64,
    /// Plain text sent to the engine.
    pub text: String,
}

/// Converts feed heads into speech, one utterance at a time.
pub struct SpeechOutputController {
    synthesizer: Arc<dyn SpeechSynthesizer>,
    options: UtteranceOptions,
    slot: Option<Utterance>,
    next_id: u64,
}

impl std::fmt::Debug for SpeechOutputController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechOutputController")
            .field("options", &self.options)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl SpeechOutputController {
    /// Creates a controller with an empty slot.
    #[must_use]
    pub fn new(synthesizer: Arc<dyn SpeechSynthesizer>, options: UtteranceOptions) -> Self {
        Self {
            synthesizer,
            options,
            slot: None,
            next_id: 1,
        }
    }

    /// Speaks `markdown` after stripping its markup, interrupting any
    /// utterance already in the slot.
    ///
    /// Empty text after stripping is skipped and leaves the slot unchanged.
    ///
    /// # Errors
    ///
    /// Returns the engine's error; the slot is then left empty.
    pub fn say(&mut self, markdown: &str) -> Result<Option<&Utterance>, TourError> {
        let text = strip_markdown(markdown);
        if text.is_empty() {
            debug!("nothing narratable after stripping markup");
            return Ok(None);
        }
        if let Some(previous) = self.slot.take() {
            debug!(utterance = previous.id, "interrupting current utterance");
            self.synthesizer.stop();
        }
        self.synthesizer.speak(&text, &self.options)?;
        let utterance = Utterance {
            id: self.next_id,
            text,
        };
        self.next_id += 1;
        info!(utterance = utterance.id, "speaking");
        let current: &Utterance = self.slot.insert(utterance);
        Ok(Some(current))
    }

    /// Stops playback and empties the slot.
    pub fn silence(&mut self) {
        if self.slot.take().is_some() {
            self.synthesizer.stop();
        }
    }

    /// The utterance currently in the slot.
    #[must_use]
    pub fn current(&self) -> Option<&Utterance> {
        self.slot.as_ref()
    }

    /// The voice parameters in use.
    #[must_use]
    pub fn options(&self) -> &UtteranceOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourguide_test_support::RecordingSynthesizer;

    fn controller() -> (SpeechOutputController, Arc<RecordingSynthesizer>) {
        let synthesizer = Arc::new(RecordingSynthesizer::new());
        let controller = SpeechOutputController::new(synthesizer.clone(), UtteranceOptions::default());
        (controller, synthesizer)
    }

    #[test]
    fn test_say_strips_markup_before_synthesis() {
        // Arrange
        let (mut output, synthesizer) = controller();

        // Act
        let utterance = output.say("**Red Fort** is a fort.").unwrap().cloned();

        // Assert
        assert_eq!(synthesizer.spoken(), vec!["Red Fort is a fort."]);
        assert_eq!(utterance.unwrap().text, "Red Fort is a fort.");
        assert_eq!(synthesizer.stops(), 0);
    }

    #[test]
    fn test_new_utterance_interrupts_current_one() {
        // Arrange
        let (mut output, synthesizer) = controller();
        output.say("first").unwrap();

        // Act
        output.say("second").unwrap();

        // Assert
        assert_eq!(synthesizer.stops(), 1);
        assert_eq!(synthesizer.spoken(), vec!["first", "second"]);
        let current = output.current().unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.id, 2);
    }

    #[test]
    fn test_empty_text_is_not_spoken() {
        let (mut output, synthesizer) = controller();

        let utterance = output.say("   ").unwrap();

        assert!(utterance.is_none());
        assert!(synthesizer.spoken().is_empty());
    }

    #[test]
    fn test_silence_empties_slot() {
        let (mut output, synthesizer) = controller();
        output.say("first").unwrap();

        output.silence();
        output.silence();

        assert!(output.current().is_none());
        assert_eq!(synthesizer.stops(), 1);
    }

    #[test]
    fn test_default_voice_parameters() {
        let (output, _) = controller();

        assert_eq!(output.options().language, "en-US");
        assert!((output.options().rate - 0.9).abs() < f32::EPSILON);
        assert!((output.options().pitch - 1.0).abs() < f32::EPSILON);
    }
}
