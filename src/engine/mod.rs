//! Playback engine boundary.
//!
//! The engine is whatever actually decodes video: a browser `<video>` element,
//! a native player, or the [`headless`] simulator used by the CLI. Marquee
//! drives it through [`MediaElement`] and hears back through
//! [`EngineMessage`]s tagged with the [`HandleId`] that produced them.

pub mod adapter;
pub mod headless;
pub mod hls;

pub use adapter::{
    AdapterHandle, AdaptiveLoader, AttachStrategy, DetachGuard, EngineAdapter, LoadRequest,
    LoaderFactory, Surface,
};

use marquee_core::{ContainerType, HandleId, Subtitle};
use tokio::sync::mpsc;

/// Something the engine reported about one attached source.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Playback was requested.
    Play,
    /// Playback was paused.
    Pause,
    /// Playback stalled waiting for data.
    Waiting,
    /// Enough data is available to start or resume.
    CanPlay,
    /// Frames are being rendered.
    Playing,
    TimeUpdate { position: f64 },
    DurationChange { duration: f64 },
    /// The adaptive loader resolved a variant playlist for the surface.
    ManifestLoaded {
        variant_url: String,
        height: Option<u32>,
    },
    /// The source cannot be played (network, decode, or unsupported format).
    Error { message: String },
}

/// An [`EngineEvent`] tagged with the handle it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineMessage {
    pub handle: HandleId,
    pub event: EngineEvent,
}

impl EngineMessage {
    pub fn new(handle: HandleId, event: EngineEvent) -> Self {
        Self { handle, event }
    }
}

pub type EngineEventSink = mpsc::UnboundedSender<EngineMessage>;
pub type EngineEventStream = mpsc::UnboundedReceiver<EngineMessage>;

/// Create the channel engine events flow through.
pub fn event_channel() -> (EngineEventSink, EngineEventStream) {
    mpsc::unbounded_channel()
}

/// A display surface's playback element.
pub trait MediaElement {
    /// Whether the element plays segmented (HLS) manifests on its own.
    fn supports_native_hls(&self) -> bool;

    /// Whether the element can play a progressive container directly.
    fn can_play(&self, container: ContainerType) -> bool {
        !container.is_segmented() || self.supports_native_hls()
    }

    /// Rendered height in pixels, used to cap adaptive variant selection.
    fn viewport_height(&self) -> Option<u32>;

    /// Point the element at `url`. Events for this load are tagged `handle`.
    fn load(&mut self, handle: HandleId, url: &str);

    /// Stop playback and release the current media.
    fn unload(&mut self, handle: HandleId);

    /// Start or resume playback. The element reports [`EngineEvent::Play`].
    fn play(&mut self);

    /// Pause playback. The element reports [`EngineEvent::Pause`] if it was
    /// playing.
    fn pause(&mut self);

    fn seek(&mut self, position: f64);

    /// Output volume in `0.0..=1.0`.
    fn set_volume(&mut self, volume: f64);

    /// Show `track`, or hide captions when `None`.
    fn set_text_track(&mut self, track: Option<&Subtitle>);
}
