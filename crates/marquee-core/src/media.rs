//! Catalog data model: sources, subtitles, and the catalog envelope.
//!
//! Field names follow the catalog backend's camelCase JSON so a response body
//! deserializes directly into [`Catalog`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ContainerType
// ---------------------------------------------------------------------------

/// Container / delivery format of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerType {
    /// Progressive MP4 download.
    Mp4,
    /// Segmented adaptive stream described by an HLS manifest.
    Hls,
    /// Matroska file.
    Mkv,
}

impl ContainerType {
    /// Whether the source is delivered as indexed segments via a manifest.
    pub fn is_segmented(&self) -> bool {
        matches!(self, Self::Hls)
    }
}

impl fmt::Display for ContainerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mp4 => write!(f, "mp4"),
            Self::Hls => write!(f, "hls"),
            Self::Mkv => write!(f, "mkv"),
        }
    }
}

// ---------------------------------------------------------------------------
// Source
// ---------------------------------------------------------------------------

/// Origin service of a source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub name: String,
}

/// An alternate audio track advertised by a source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioTrack {
    pub language: String,
    pub label: String,
}

/// One playable candidate. `url` is the unique key within a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub url: String,
    #[serde(rename = "type")]
    pub container: ContainerType,
    /// Free-text quality label ("1080", "4k", "HD", "unknown", ...).
    #[serde(default)]
    pub quality: String,
    pub provider: Provider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub audio_tracks: Vec<AudioTrack>,
}

impl Source {
    /// Build a source with no language or audio-track metadata.
    pub fn new(
        url: impl Into<String>,
        container: ContainerType,
        quality: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        let provider = provider.into();
        Self {
            url: url.into(),
            container,
            quality: quality.into(),
            provider: Provider {
                id: provider.to_ascii_lowercase(),
                name: provider,
            },
            language: None,
            audio_tracks: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Subtitle
// ---------------------------------------------------------------------------

/// Subtitle file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubtitleFormat {
    Vtt,
    Srt,
}

impl fmt::Display for SubtitleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vtt => write!(f, "vtt"),
            Self::Srt => write!(f, "srt"),
        }
    }
}

/// A subtitle track. `label` is the uniqueness key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Subtitle {
    pub url: String,
    pub format: SubtitleFormat,
    pub label: String,
}

impl Subtitle {
    pub fn new(url: impl Into<String>, format: SubtitleFormat, label: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format,
            label: label.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// A catalog response: every candidate source and subtitle for one title.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub subtitles: Vec<Subtitle>,
}

impl Catalog {
    pub fn new(sources: Vec<Source>, subtitles: Vec<Subtitle>) -> Self {
        Self {
            response_id: None,
            expires_at: None,
            sources,
            subtitles,
        }
    }

    /// Look up a source by its url.
    pub fn source(&self, url: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.url == url)
    }

    /// Whether the catalog has passed its expiry timestamp.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

// ---------------------------------------------------------------------------
// ContentRef
// ---------------------------------------------------------------------------

/// What a catalog was fetched for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Episode { season: u32, episode: u32 },
}

/// Content identifier scoping a catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentRef {
    pub tmdb_id: u64,
    #[serde(flatten)]
    pub kind: ContentKind,
}

impl ContentRef {
    pub fn movie(tmdb_id: u64) -> Self {
        Self {
            tmdb_id,
            kind: ContentKind::Movie,
        }
    }

    pub fn episode(tmdb_id: u64, season: u32, episode: u32) -> Self {
        Self {
            tmdb_id,
            kind: ContentKind::Episode { season, episode },
        }
    }
}

impl fmt::Display for ContentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ContentKind::Movie => write!(f, "movie {}", self.tmdb_id),
            ContentKind::Episode { season, episode } => {
                write!(f, "tv {} S{:02}E{:02}", self.tmdb_id, season, episode)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_deserializes_backend_shape() {
        let json = r#"{
            "responseId": "r-1",
            "expiresAt": "2030-01-01T00:00:00Z",
            "sources": [{
                "url": "https://cdn.example/a.m3u8",
                "type": "hls",
                "quality": "1080",
                "audioTracks": [{"language": "en", "label": "English"}],
                "provider": {"id": "x", "name": "ProviderX"}
            }],
            "subtitles": [{"url": "https://cdn.example/en.vtt", "format": "vtt", "label": "English"}]
        }"#;

        let catalog: Catalog = serde_json::from_str(json).unwrap();
        assert_eq!(catalog.response_id.as_deref(), Some("r-1"));
        assert_eq!(catalog.sources[0].container, ContainerType::Hls);
        assert_eq!(catalog.sources[0].audio_tracks.len(), 1);
        assert_eq!(catalog.subtitles[0].format, SubtitleFormat::Vtt);
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let catalog: Catalog = serde_json::from_str("{}").unwrap();
        assert!(catalog.sources.is_empty());
        assert!(catalog.subtitles.is_empty());
    }

    #[test]
    fn source_lookup_by_url() {
        let catalog = Catalog::new(
            vec![Source::new("u1", ContainerType::Mp4, "720", "A")],
            vec![],
        );
        assert!(catalog.source("u1").is_some());
        assert!(catalog.source("u2").is_none());
    }

    #[test]
    fn expiry() {
        let mut catalog = Catalog::default();
        let now = Utc::now();
        assert!(!catalog.is_expired(now));
        catalog.expires_at = Some(now - chrono::Duration::seconds(1));
        assert!(catalog.is_expired(now));
    }

    #[test]
    fn content_ref_display() {
        assert_eq!(ContentRef::movie(550).to_string(), "movie 550");
        assert_eq!(ContentRef::episode(1399, 1, 2).to_string(), "tv 1399 S01E02");
    }

    #[test]
    fn only_hls_is_segmented() {
        assert!(ContainerType::Hls.is_segmented());
        assert!(!ContainerType::Mp4.is_segmented());
        assert!(!ContainerType::Mkv.is_segmented());
    }
}
