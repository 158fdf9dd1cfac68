//! HLS playlist types.

use serde::{Deserialize, Serialize};

/// A stream variant in a master playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Peak bandwidth in bits per second.
    pub bandwidth: u64,
    /// Optional resolution as (width, height).
    pub resolution: Option<(u32, u32)>,
    /// Codec string (e.g. "avc1.64001f,mp4a.40.2"), empty when absent.
    pub codecs: String,
    /// URI to the media playlist for this variant, as written in the manifest.
    pub uri: String,
}

impl Variant {
    /// Vertical resolution, if advertised.
    pub fn height(&self) -> Option<u32> {
        self.resolution.map(|(_, h)| h)
    }
}

/// A single segment in a media playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    /// Segment duration in seconds.
    pub duration: f64,
    /// URI for this segment.
    pub uri: String,
}

/// An HLS master playlist containing multiple stream variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MasterPlaylist {
    /// Stream variants in manifest order.
    pub variants: Vec<Variant>,
}

impl MasterPlaylist {
    /// Pick the variant to load for a surface `max_height` pixels tall.
    ///
    /// Among variants no taller than the surface, the highest bandwidth wins.
    /// If every variant is taller, the shortest one is used. Variants without
    /// a resolution always fit. Without a cap the highest bandwidth wins.
    pub fn select_variant(&self, max_height: Option<u32>) -> Option<&Variant> {
        let fits = |v: &&Variant| match (max_height, v.height()) {
            (Some(cap), Some(h)) => h <= cap,
            _ => true,
        };

        self.variants
            .iter()
            .filter(fits)
            .max_by_key(|v| v.bandwidth)
            .or_else(|| self.variants.iter().min_by_key(|v| v.height()))
    }
}

/// An HLS media playlist describing a sequence of segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaPlaylist {
    /// Maximum segment duration in whole seconds.
    pub target_duration: u64,
    /// Sequence number of the first segment.
    pub media_sequence: u64,
    /// Ordered list of segments.
    pub segments: Vec<Segment>,
    /// Whether the playlist is complete (VOD, `#EXT-X-ENDLIST`).
    pub ended: bool,
}

impl MediaPlaylist {
    /// Sum of all segment durations.
    pub fn total_duration(&self) -> f64 {
        self.segments.iter().map(|s| s.duration).sum()
    }
}

/// Either kind of playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Playlist {
    Master(MasterPlaylist),
    Media(MediaPlaylist),
}
