//! Domain types for the Speech context.

pub mod markdown;
pub mod voice;
