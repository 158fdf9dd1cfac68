//! Marquee - adaptive playback session manager
//!
//! Turns a catalog of heterogeneous video sources into one playable session:
//! ranks sources by quality, attaches them to a playback surface, swaps them
//! without losing position, and recovers from source failures.

pub mod catalog;
pub mod config;
pub mod driver;
pub mod engine;
pub mod session;
pub mod store;

pub use marquee_core::{Error, Result};
