//! Application services for the Session context.

pub mod queries;
pub mod runtime;
