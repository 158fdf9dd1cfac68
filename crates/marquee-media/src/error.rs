//! Error types for marquee-media.

use thiserror::Error;

/// Result type for marquee-media operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for manifest parsing.
#[derive(Debug, Error)]
pub enum Error {
    /// `hls_m3u8` rejected the document.
    #[error("Invalid playlist: {0}")]
    Invalid(String),

    /// Some `#EXT-X-STREAM-INF` tags were not followed by a URI line.
    #[error("Master playlist declares {declared} variants but only {parsed} have a URI")]
    MissingVariantUri { declared: usize, parsed: usize },
}

impl From<hls_m3u8::Error> for Error {
    fn from(e: hls_m3u8::Error) -> Self {
        Self::Invalid(e.to_string())
    }
}
