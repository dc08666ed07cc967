//! Tour guide console front end.
//!
//! Reads line commands from stdin and drives a tour runtime through console
//! capability providers that report speech, map updates and alerts as log
//! events.

pub mod commands;
pub mod config;
pub mod console;
pub mod error;
