//! Domain types for the Narration context.

pub mod feed;
pub mod poller;
pub mod spoken;
