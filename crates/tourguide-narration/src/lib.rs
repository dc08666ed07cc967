//! Tour guide — Narration context.
//!
//! Decides, with the backend as the sole authority, which nearby attraction
//! to narrate next, and records every narration, explanation and answer in
//! the newest-first response feed.

pub mod application;
pub mod domain;
