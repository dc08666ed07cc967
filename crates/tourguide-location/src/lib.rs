//! Tour guide — Location context.
//!
//! Filters raw position updates into accepted fixes and keeps the set of
//! nearby attractions in step with the latest fix.

pub mod application;
pub mod domain;
