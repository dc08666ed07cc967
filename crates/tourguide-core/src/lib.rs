//! Tour Guide Core — shared abstractions.
//!
//! This crate defines the value types, wire DTOs, and capability traits that
//! every other crate depends on. It contains no infrastructure code.

pub mod alert;
pub mod backend;
pub mod capability;
pub mod clock;
pub mod epoch;
pub mod error;
pub mod geo;
pub mod map;
