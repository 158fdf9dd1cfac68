//! Playback sessions: the controller state machine and the pieces it owns.

pub mod controller;
pub mod controls;
pub mod fallback;
pub mod tracker;

pub use controller::{SessionController, SessionOptions, SessionState, SubtitleChoice};
pub use controls::ControlsVisibility;
pub use fallback::{FailureController, FailureDecision};
pub use tracker::{format_timestamp, PlaybackFields, PlaybackTracker};
