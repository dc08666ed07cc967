//! Shared test fakes and utilities for the tour guide client.

mod backend;
mod clock;
mod devices;

pub use backend::{FailingBackend, ScriptedBackend};
pub use clock::{FixedClock, fixed_now};
pub use devices::{
    ManualPositionProvider, RecordingMap, RecordingNotifier, RecordingRecognizer,
    RecordingSynthesizer, StaticPermissions,
};
