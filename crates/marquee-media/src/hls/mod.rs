//! HLS playlists.
//!
//! A fetched manifest is either a master playlist listing quality variants or
//! a media playlist listing segments directly. [`parse_playlist`] tells them
//! apart; [`MasterPlaylist::select_variant`] applies the player-size cap.

mod parser;
mod types;

pub use parser::parse_playlist;
pub use types::{MasterPlaylist, MediaPlaylist, Playlist, Segment, Variant};
