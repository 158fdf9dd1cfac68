//! Unified error type for the marquee playback core.
//!
//! Only [`Error::EmptyCatalog`] and [`Error::ReattachWithoutDetach`] are hard
//! failures of the session API. Per-source playback failures never appear
//! here; the session controller turns them into state (see
//! [`FailureKind`](crate::playback::FailureKind)).

use crate::ids::{HandleId, SurfaceId};

/// Unified error type covering all failure modes in marquee.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A catalog arrived with no sources; a session cannot be created from it.
    #[error("Catalog contains no playable sources")]
    EmptyCatalog,

    /// `attach` was called on a surface that still holds a live handle.
    #[error("Surface {surface} is still bound to handle {handle}; detach it first")]
    ReattachWithoutDetach {
        /// The surface that was already bound.
        surface: SurfaceId,
        /// The handle currently holding the surface.
        handle: HandleId,
    },

    /// The requested source is not part of the current catalog.
    #[error("Source not in current catalog: {0}")]
    UnknownSource(String),

    /// The requested subtitle is not part of the current catalog.
    #[error("Subtitle not in current catalog: {0}")]
    UnknownSubtitle(String),

    /// The session has been torn down and accepts no further operations.
    #[error("Session has been torn down")]
    SessionClosed,

    /// Fetching or decoding a catalog failed.
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// An adaptive-streaming manifest could not be loaded or parsed.
    #[error("Manifest error: {0}")]
    Manifest(String),

    /// Reading or writing the preference store failed.
    #[error("Preference store error: {0}")]
    Store(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {source}")]
    Json {
        /// The underlying serde_json error.
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether this error is one of the two hard failures signalled at the
    /// session API boundary.
    pub fn is_hard_failure(&self) -> bool {
        matches!(self, Error::EmptyCatalog | Error::ReattachWithoutDetach { .. })
    }

    /// Convenience constructor for [`Error::Catalog`].
    pub fn catalog(msg: impl Into<String>) -> Self {
        Error::Catalog(msg.into())
    }

    /// Convenience constructor for [`Error::Manifest`].
    pub fn manifest(msg: impl Into<String>) -> Self {
        Error::Manifest(msg.into())
    }

    /// Convenience constructor for [`Error::Store`].
    pub fn store(msg: impl Into<String>) -> Self {
        Error::Store(msg.into())
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_display() {
        let err = Error::EmptyCatalog;
        assert_eq!(err.to_string(), "Catalog contains no playable sources");
        assert!(err.is_hard_failure());
    }

    #[test]
    fn reattach_is_hard_failure() {
        let err = Error::ReattachWithoutDetach {
            surface: SurfaceId::new(),
            handle: HandleId::new(),
        };
        assert!(err.is_hard_failure());
        assert!(err.to_string().contains("detach it first"));
    }

    #[test]
    fn rejections_are_not_hard_failures() {
        assert!(!Error::UnknownSource("u9".into()).is_hard_failure());
        assert!(!Error::UnknownSubtitle("French".into()).is_hard_failure());
        assert!(!Error::SessionClosed.is_hard_failure());
    }

    #[test]
    fn constructors() {
        assert_eq!(
            Error::catalog("502 Bad Gateway").to_string(),
            "Catalog error: 502 Bad Gateway"
        );
        assert_eq!(
            Error::manifest("missing #EXTM3U").to_string(),
            "Manifest error: missing #EXTM3U"
        );
        assert!(matches!(Error::store("locked"), Error::Store(_)));
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
    }
}
