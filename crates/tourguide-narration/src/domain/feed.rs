//! The newest-first response feed.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tourguide_core::clock::Clock;
use uuid::Uuid;

/// What produced a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NarrationKind {
    /// An explanation of a named place (initial place or tapped marker).
    Explain,
    /// An answer to a free-form question.
    Ask,
    /// A proximity narration chosen by the backend.
    Speak,
}

impl NarrationKind {
    /// Upper-case label shown on the entry header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Explain => "EXPLAIN",
            Self::Ask => "ASK",
            Self::Speak => "SPEAK",
        }
    }
}

/// One immutable feed entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NarrationEvent {
    /// Entry identifier.
    pub id: Uuid,
    /// Producer of the entry.
    pub kind: NarrationKind,
    /// Markdown content as returned by the backend.
    pub content: String,
    /// Place name or question text the entry answers.
    pub source_label: Option<String>,
    /// When the entry was created.
    pub timestamp: DateTime<Utc>,
}

impl NarrationEvent {
    /// Creates an entry stamped with `clock`.
    #[must_use]
    pub fn new(
        kind: NarrationKind,
        content: impl Into<String>,
        source_label: Option<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            content: content.into(),
            source_label,
            timestamp: clock.now(),
        }
    }
}

/// Ordered log of entries, newest first by insertion order.
///
/// Entries are never mutated or removed individually. The feed grows
/// without bound.
#[derive(Debug, Clone, Default)]
pub struct ResponseFeed {
    entries: VecDeque<NarrationEvent>,
}

impl ResponseFeed {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `event` at index 0 and returns it.
    pub fn prepend(&mut self, event: NarrationEvent) -> &NarrationEvent {
        self.entries.push_front(event);
        &self.entries[0]
    }

    /// Replaces the whole feed with the single entry `event`.
    pub fn reset_to(&mut self, event: NarrationEvent) -> &NarrationEvent {
        self.entries.clear();
        self.prepend(event)
    }

    /// The newest entry.
    #[must_use]
    pub fn head(&self) -> Option<&NarrationEvent> {
        self.entries.front()
    }

    /// The entry at `index` (0 is newest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&NarrationEvent> {
        self.entries.get(index)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates newest first.
    pub fn iter(&self) -> impl Iterator<Item = &NarrationEvent> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourguide_test_support::FixedClock;

    fn entry(kind: NarrationKind, content: &str) -> NarrationEvent {
        NarrationEvent::new(kind, content, None, &FixedClock::default())
    }

    #[test]
    fn test_prepend_places_entry_at_index_zero() {
        // Arrange
        let mut feed = ResponseFeed::new();
        feed.prepend(entry(NarrationKind::Explain, "first"));

        // Act
        feed.prepend(entry(NarrationKind::Ask, "second"));

        // Assert
        assert_eq!(feed.len(), 2);
        assert_eq!(feed.head().unwrap().content, "second");
        assert_eq!(feed.get(1).unwrap().content, "first");
    }

    #[test]
    fn test_reset_to_leaves_singleton() {
        let mut feed = ResponseFeed::new();
        feed.prepend(entry(NarrationKind::Speak, "a"));
        feed.prepend(entry(NarrationKind::Speak, "b"));

        feed.reset_to(entry(NarrationKind::Explain, "fresh"));

        assert_eq!(feed.len(), 1);
        assert_eq!(feed.head().unwrap().kind, NarrationKind::Explain);
    }

    #[test]
    fn test_entries_are_timestamped_by_clock() {
        let clock = FixedClock::default();

        let event = NarrationEvent::new(NarrationKind::Ask, "1648", Some("When?".into()), &clock);

        assert_eq!(event.timestamp, clock.0);
        assert_eq!(event.source_label.as_deref(), Some("When?"));
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(NarrationKind::Speak.label(), "SPEAK");
        assert_eq!(NarrationKind::Explain.label(), "EXPLAIN");
        assert_eq!(NarrationKind::Ask.label(), "ASK");
    }
}
