//! Playlist parsing.
//!
//! `hls_m3u8` does the M3U8 work; this module converts its borrowed types
//! into the owned [`MasterPlaylist`] and [`MediaPlaylist`] the loader uses.

use hls_m3u8::tags::VariantStream as HlsVariantStream;
use hls_m3u8::MasterPlaylist as HlsMasterPlaylist;
use hls_m3u8::MediaPlaylist as HlsMediaPlaylist;

use super::types::{MasterPlaylist, MediaPlaylist, Playlist, Segment, Variant};
use crate::error::{Error, Result};

const STREAM_INF: &str = "#EXT-X-STREAM-INF:";

/// Parse a master or media playlist.
///
/// A document with at least one `#EXT-X-STREAM-INF` is a master playlist;
/// anything else is treated as a media playlist. A leading byte-order mark
/// is ignored.
pub fn parse_playlist(text: &str) -> Result<Playlist> {
    let text = text.trim_start_matches('\u{feff}').trim_start();

    let declared = text
        .lines()
        .filter(|l| l.trim_start().starts_with(STREAM_INF))
        .count();
    if declared > 0 {
        parse_master(text, declared).map(Playlist::Master)
    } else {
        parse_media(text).map(Playlist::Media)
    }
}

fn parse_master(text: &str, declared: usize) -> Result<MasterPlaylist> {
    let master = HlsMasterPlaylist::try_from(text)?;

    let variants: Vec<Variant> = master
        .variant_streams
        .iter()
        .filter_map(|vs| match vs {
            HlsVariantStream::ExtXStreamInf {
                uri, stream_data, ..
            } => Some(Variant {
                bandwidth: stream_data.bandwidth(),
                resolution: stream_data
                    .resolution()
                    .map(|r| (r.width() as u32, r.height() as u32)),
                codecs: stream_data
                    .codecs()
                    .map(|c| c.to_string())
                    .unwrap_or_default(),
                uri: uri.to_string(),
            }),
            // I-frame playlists are for trick play, never for the surface.
            HlsVariantStream::ExtXIFrame { .. } => None,
        })
        .filter(|v| !v.uri.is_empty() && !v.uri.starts_with('#'))
        .collect();

    if variants.len() != declared {
        return Err(Error::MissingVariantUri {
            declared,
            parsed: variants.len(),
        });
    }

    Ok(MasterPlaylist { variants })
}

fn parse_media(text: &str) -> Result<MediaPlaylist> {
    let media = HlsMediaPlaylist::try_from(text)?;

    let segments = media
        .segments
        .iter()
        .map(|(_, seg)| Segment {
            duration: seg.duration.duration().as_secs_f64(),
            uri: seg.uri().to_string(),
        })
        .collect();

    Ok(MediaPlaylist {
        target_duration: media.target_duration.as_secs(),
        media_sequence: media.media_sequence as u64,
        segments,
        // hls_m3u8 folds ENDLIST into the playlist type; read the tag itself.
        ended: text.lines().any(|l| l.trim() == "#EXT-X-ENDLIST"),
    })
}
