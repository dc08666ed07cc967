//! Application handlers for the Location context.

pub mod fetch;
