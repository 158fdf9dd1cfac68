//! marquee-core: shared types, IDs, errors, and the session event bus.
//!
//! This crate is the foundational dependency for the marquee workspace,
//! providing type-safe identifiers for adapter handles and surfaces, the
//! catalog data model (sources, subtitles), normalized playback state, a
//! unified error type, and a broadcast event bus for UI consumers.

pub mod error;
pub mod events;
pub mod ids;
pub mod media;
pub mod playback;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use ids::*;
pub use media::*;
pub use playback::*;
