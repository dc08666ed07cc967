//! Domain types for the Location context.

pub mod attractions;
pub mod fixes;
