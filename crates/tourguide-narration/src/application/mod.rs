//! Application handlers for the Narration context.

pub mod poll;
