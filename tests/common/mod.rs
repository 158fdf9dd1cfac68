//! Shared test harness for session integration tests.
//!
//! Provides a [`RecordingElement`] and [`RecordingLoaderFactory`] that append
//! every engine-side call to one shared [`Trace`], and [`Harness`], which
//! wires them into a [`SessionController`] with an in-memory store.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Arc;

use marquee::engine::{
    event_channel, AdaptiveLoader, EngineAdapter, EngineEventStream, LoadRequest, LoaderFactory,
    MediaElement,
};
use marquee::session::{SessionController, SessionOptions};
use marquee::store::{MemoryStore, PreferenceStore};
use marquee_core::{Catalog, ContainerType, HandleId, Result, Source, Subtitle, SubtitleFormat};
use parking_lot::Mutex;

// ---------------------------------------------------------------------------
// Trace
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Load { handle: HandleId, url: String },
    Unload { handle: HandleId },
    Play,
    Pause,
    Seek(f64),
    Volume(f64),
    TextTrack(Option<String>),
    LoaderStart { handle: HandleId, url: String },
    LoaderDestroy { handle: HandleId },
}

pub type Trace = Arc<Mutex<Vec<Call>>>;

/// Handles bound (loaded or loading a manifest) at the end of the trace.
///
/// Panics if a handle is bound while another one is still live.
pub fn assert_single_live_handle(trace: &[Call]) -> HashSet<HandleId> {
    let mut live: HashSet<HandleId> = HashSet::new();
    for call in trace {
        match call {
            Call::Load { handle, .. } | Call::LoaderStart { handle, .. } => {
                live.insert(*handle);
            }
            Call::Unload { handle } => {
                live.remove(handle);
            }
            _ => {}
        }
        assert!(live.len() <= 1, "two live handles in trace: {trace:#?}");
    }
    live
}

/// Number of engine calls of any kind.
pub fn adapter_calls(trace: &[Call]) -> usize {
    trace.len()
}

// ---------------------------------------------------------------------------
// RecordingElement
// ---------------------------------------------------------------------------

pub struct RecordingElement {
    pub trace: Trace,
    pub native_hls: bool,
    pub viewport_height: Option<u32>,
}

impl MediaElement for RecordingElement {
    fn supports_native_hls(&self) -> bool {
        self.native_hls
    }

    fn can_play(&self, container: ContainerType) -> bool {
        // Matroska is the container browsers commonly refuse.
        container != ContainerType::Mkv && (!container.is_segmented() || self.native_hls)
    }

    fn viewport_height(&self) -> Option<u32> {
        self.viewport_height
    }

    fn load(&mut self, handle: HandleId, url: &str) {
        self.trace.lock().push(Call::Load {
            handle,
            url: url.to_string(),
        });
    }

    fn unload(&mut self, handle: HandleId) {
        self.trace.lock().push(Call::Unload { handle });
    }

    fn play(&mut self) {
        self.trace.lock().push(Call::Play);
    }

    fn pause(&mut self) {
        self.trace.lock().push(Call::Pause);
    }

    fn seek(&mut self, position: f64) {
        self.trace.lock().push(Call::Seek(position));
    }

    fn set_volume(&mut self, volume: f64) {
        self.trace.lock().push(Call::Volume(volume));
    }

    fn set_text_track(&mut self, track: Option<&Subtitle>) {
        self.trace
            .lock()
            .push(Call::TextTrack(track.map(|t| t.label.clone())));
    }
}

// ---------------------------------------------------------------------------
// RecordingLoader
// ---------------------------------------------------------------------------

pub struct RecordingLoaderFactory {
    pub trace: Trace,
}

struct RecordingLoader {
    trace: Trace,
    handle: Option<HandleId>,
}

impl AdaptiveLoader for RecordingLoader {
    fn start(&mut self, request: LoadRequest) {
        self.handle = Some(request.handle);
        self.trace.lock().push(Call::LoaderStart {
            handle: request.handle,
            url: request.manifest_url,
        });
    }

    fn destroy(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.trace.lock().push(Call::LoaderDestroy { handle });
        }
    }
}

impl LoaderFactory for RecordingLoaderFactory {
    fn create(&self) -> Box<dyn AdaptiveLoader> {
        Box::new(RecordingLoader {
            trace: self.trace.clone(),
            handle: None,
        })
    }
}

// ---------------------------------------------------------------------------
// Stores
// ---------------------------------------------------------------------------

/// A store whose writes always fail.
#[derive(Default)]
pub struct BrokenStore;

impl PreferenceStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(marquee_core::Error::store("disk full"))
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub session: SessionController<RecordingElement>,
    pub trace: Trace,
    pub store: Arc<dyn PreferenceStore>,
    pub engine: EngineEventStream,
}

impl Harness {
    pub fn new() -> Self {
        Self::with(SessionOptions::default(), Arc::new(MemoryStore::new()))
    }

    pub fn with_options(options: SessionOptions) -> Self {
        Self::with(options, Arc::new(MemoryStore::new()))
    }

    pub fn with(options: SessionOptions, store: Arc<dyn PreferenceStore>) -> Self {
        Self::build(options, store, true)
    }

    /// A surface without native HLS, so segmented sources use the loader.
    pub fn adaptive() -> Self {
        Self::build(SessionOptions::default(), Arc::new(MemoryStore::new()), false)
    }

    fn build(options: SessionOptions, store: Arc<dyn PreferenceStore>, native_hls: bool) -> Self {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let (sink, engine) = event_channel();
        let adapter = EngineAdapter::new(
            Arc::new(RecordingLoaderFactory {
                trace: trace.clone(),
            }),
            sink,
        );
        let element = RecordingElement {
            trace: trace.clone(),
            native_hls,
            viewport_height: Some(1080),
        };
        let session = SessionController::new(adapter, element, store.clone(), options);
        Self {
            session,
            trace,
            store,
            engine,
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.trace.lock().clone()
    }

    pub fn clear_trace(&self) {
        self.trace.lock().clear();
    }

    /// Deliver `event` from the live handle.
    pub fn emit(&mut self, event: marquee::engine::EngineEvent) {
        let handle = self.session.handle_id().expect("no live handle");
        self.session.handle_engine_event(handle, event);
    }

    /// Feed queued adapter and loader messages back into the session.
    pub fn pump(&mut self) {
        while let Ok(msg) = self.engine.try_recv() {
            self.session.handle_engine_event(msg.handle, msg.event);
        }
    }

    /// Report duration then readiness for the live handle.
    pub fn make_ready(&mut self, duration: f64) {
        use marquee::engine::EngineEvent;
        self.emit(EngineEvent::DurationChange { duration });
        self.emit(EngineEvent::CanPlay);
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn source(url: &str, quality: &str, provider: &str) -> Source {
    Source::new(url, ContainerType::Mp4, quality, provider)
}

/// u1 (1080, X), u2 (1080, A), u3 (4k, B).
pub fn three_source_catalog() -> Catalog {
    Catalog::new(
        vec![
            source("u1", "1080", "X"),
            source("u2", "1080", "A"),
            source("u3", "4k", "B"),
        ],
        vec![],
    )
}

pub fn subtitle(url: &str, label: &str) -> Subtitle {
    Subtitle::new(url, SubtitleFormat::Vtt, label)
}

// ---------------------------------------------------------------------------
// Manifests
// ---------------------------------------------------------------------------

/// A 360p/720p/1080p ladder with relative variant URIs.
pub const MASTER_MANIFEST: &str = "#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=800000,RESOLUTION=640x360
360p/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=2800000,RESOLUTION=1280x720
720p/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=5000000,RESOLUTION=1920x1080
1080p/index.m3u8
";

pub const MEDIA_MANIFEST: &str = "#EXTM3U
#EXT-X-TARGETDURATION:6
#EXTINF:6.0,
seg0.ts
#EXT-X-ENDLIST
";

/// Master playlist text for `(bandwidth, height)` rungs, in the given order.
/// Each rung's URI is `{height}p/index.m3u8`.
pub fn master_manifest(ladder: &[(u64, u32)]) -> String {
    let mut text = String::from("#EXTM3U\n");
    for (bandwidth, height) in ladder {
        text.push_str(&format!(
            "#EXT-X-STREAM-INF:BANDWIDTH={bandwidth},RESOLUTION={}x{height}\n{height}p/index.m3u8\n",
            height * 16 / 9
        ));
    }
    text
}
