//! HTTP adaptive loader for HLS sources.
//!
//! Fetches the master playlist, parses it with `marquee-media`, picks the best
//! variant that fits the surface height, and reports the resolved variant url
//! back through the engine sink as [`EngineEvent::ManifestLoaded`].

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{Error, Result};
use marquee_media::{parse_playlist, Playlist, Variant};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::adapter::{AdaptiveLoader, LoadRequest, LoaderFactory};
use super::{EngineEvent, EngineMessage};

pub const MANIFEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Creates [`HttpManifestLoader`]s sharing one HTTP client.
pub struct HttpLoaderFactory {
    client: reqwest::Client,
}

impl HttpLoaderFactory {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::manifest(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

impl LoaderFactory for HttpLoaderFactory {
    fn create(&self) -> Box<dyn AdaptiveLoader> {
        Box::new(HttpManifestLoader::new(self.client.clone()))
    }
}

/// One manifest fetch for one handle.
pub struct HttpManifestLoader {
    client: reqwest::Client,
    task: Option<JoinHandle<()>>,
    levels: Arc<Mutex<Vec<Variant>>>,
}

impl HttpManifestLoader {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            task: None,
            levels: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Variants parsed from the last master playlist. Empty after destroy.
    pub fn levels(&self) -> Vec<Variant> {
        self.levels.lock().clone()
    }
}

impl AdaptiveLoader for HttpManifestLoader {
    fn start(&mut self, request: LoadRequest) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(handle_id = %request.handle, "No async runtime for manifest fetch");
            let _ = request.sink.send(EngineMessage::new(
                request.handle,
                EngineEvent::Error {
                    message: "manifest loader requires an async runtime".into(),
                },
            ));
            return;
        };

        let client = self.client.clone();
        let levels = self.levels.clone();
        self.task = Some(runtime.spawn(async move {
            let event = match resolve(&client, &request, &levels).await {
                Ok((variant_url, height)) => EngineEvent::ManifestLoaded {
                    variant_url,
                    height,
                },
                Err(e) => {
                    warn!(handle_id = %request.handle, error = %e, "Manifest load failed");
                    EngineEvent::Error {
                        message: e.to_string(),
                    }
                }
            };
            let _ = request.sink.send(EngineMessage::new(request.handle, event));
        }));
    }

    fn destroy(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        self.levels.lock().clear();
    }
}

async fn resolve(
    client: &reqwest::Client,
    request: &LoadRequest,
    levels: &Mutex<Vec<Variant>>,
) -> Result<(String, Option<u32>)> {
    let url = &request.manifest_url;
    debug!(handle_id = %request.handle, %url, "Fetching manifest");

    let body = client
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::manifest(format!("fetch {url}: {e}")))?
        .text()
        .await
        .map_err(|e| Error::manifest(format!("read {url}: {e}")))?;

    let master = match parse_playlist(&body).map_err(|e| Error::manifest(e.to_string()))? {
        Playlist::Media(media) => {
            debug!(
                handle_id = %request.handle,
                segments = media.segments.len(),
                duration = media.total_duration(),
                "Manifest is a media playlist"
            );
            return Ok((url.clone(), None));
        }
        Playlist::Master(master) => master,
    };

    let variant = master
        .select_variant(request.max_height)
        .cloned()
        .ok_or_else(|| Error::manifest(format!("{url} lists no variants")))?;
    *levels.lock() = master.variants;

    let base = reqwest::Url::parse(url).map_err(|e| Error::manifest(format!("{url}: {e}")))?;
    let resolved = base
        .join(&variant.uri)
        .map_err(|e| Error::manifest(format!("variant uri {}: {e}", variant.uri)))?;

    debug!(
        handle_id = %request.handle,
        bandwidth = variant.bandwidth,
        height = ?variant.height(),
        "Selected variant"
    );
    Ok((resolved.to_string(), variant.height()))
}
