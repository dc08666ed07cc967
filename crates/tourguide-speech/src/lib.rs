//! Tour guide — Speech context.
//!
//! Speech output turns the newest feed entry into a single interruptible
//! utterance; voice input runs a capture session whose transcripts become
//! the query text.

pub mod application;
pub mod domain;
