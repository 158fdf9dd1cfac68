//! marquee-media: HLS manifest handling for adaptive playback.
//!
//! This crate turns master and media playlists fetched by the adaptive
//! loader into plain types, and picks the variant that fits the display
//! surface. Parsing itself is done by `hls_m3u8`.
//!
//! # Modules
//!
//! - [`hls`] - Playlist types, parsing, and variant selection

pub mod error;
pub mod hls;

pub use error::{Error, Result};
pub use hls::{parse_playlist, MasterPlaylist, MediaPlaylist, Playlist, Segment, Variant};
