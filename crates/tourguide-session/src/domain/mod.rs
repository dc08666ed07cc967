//! Domain types for the Session context.

pub mod config;
pub mod dispatcher;
pub mod effects;
pub mod events;
pub mod reactor;
pub mod state;
