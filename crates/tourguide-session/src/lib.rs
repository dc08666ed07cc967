//! Tour guide — Session context.
//!
//! All shared tour state lives in one [`domain::state::TourSession`] record.
//! The reactor folds typed events into it and returns effects; the runtime
//! executes those effects against the capability providers and feeds
//! completions back as events.

pub mod application;
pub mod domain;
