//! HTTP catalog client.
//!
//! Fetches a [`Catalog`] for a movie or an episode from the catalog backend:
//!
//! - `GET {base}/movies/{tmdb_id}`
//! - `GET {base}/tv/{tmdb_id}/seasons/{season}/episodes/{episode}`
//!
//! The playback session never fetches on its own; callers hand the result to
//! [`SessionController::initialize_from_catalog`](crate::session::SessionController::initialize_from_catalog).

use std::time::Duration;

use async_trait::async_trait;
use marquee_core::{Catalog, ContentKind, ContentRef, Error, Result};
use tracing::{debug, warn};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Anything that can produce a catalog for a piece of content.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self, content: &ContentRef) -> Result<Catalog>;
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// `reqwest`-backed catalog client.
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::catalog(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Full request URL for a content reference.
    pub fn url(&self, content: &ContentRef) -> String {
        match content.kind {
            ContentKind::Movie => format!("{}/movies/{}", self.base_url, content.tmdb_id),
            ContentKind::Episode { season, episode } => format!(
                "{}/tv/{}/seasons/{}/episodes/{}",
                self.base_url, content.tmdb_id, season, episode
            ),
        }
    }
}

#[async_trait]
impl CatalogSource for CatalogClient {
    async fn fetch(&self, content: &ContentRef) -> Result<Catalog> {
        let url = self.url(content);
        debug!(%content, %url, "Fetching catalog");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::catalog(format!("request failed: {url}: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%content, status = status.as_u16(), "Catalog request returned error");
            return Err(Error::catalog(format!("{url} returned {status}")));
        }

        let catalog: Catalog = resp
            .json()
            .await
            .map_err(|e| Error::catalog(format!("invalid catalog body from {url}: {e}")))?;

        debug!(
            %content,
            sources = catalog.sources.len(),
            subtitles = catalog.subtitles.len(),
            "Catalog fetched"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_shapes() {
        let client = CatalogClient::new("https://api.example/v1/", DEFAULT_TIMEOUT).unwrap();
        assert_eq!(
            client.url(&ContentRef::movie(550)),
            "https://api.example/v1/movies/550"
        );
        assert_eq!(
            client.url(&ContentRef::episode(1399, 1, 2)),
            "https://api.example/v1/tv/1399/seasons/1/episodes/2"
        );
    }
}
