//! Application services for the Speech context.

pub mod output;
