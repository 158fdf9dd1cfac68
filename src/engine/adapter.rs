//! Binding sources to surfaces.
//!
//! [`EngineAdapter::attach`] picks a strategy for the source's container and
//! returns an [`AdapterHandle`]. The handle is the only way to release what
//! was attached: it cannot be cloned, and [`EngineAdapter::detach`] consumes
//! it. A surface holds at most one handle at a time.

use std::fmt;
use std::sync::Arc;

use marquee_core::{ContainerType, Error, HandleId, Result, Source, SurfaceId};
use tracing::{debug, info, warn};

use super::{EngineEvent, EngineEventSink, EngineMessage, MediaElement};

// ---------------------------------------------------------------------------
// Surface
// ---------------------------------------------------------------------------

/// A media element plus the handle currently bound to it.
pub struct Surface<E> {
    id: SurfaceId,
    element: E,
    bound: Option<HandleId>,
}

impl<E: MediaElement> Surface<E> {
    pub fn new(element: E) -> Self {
        Self {
            id: SurfaceId::new(),
            element,
            bound: None,
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// The handle currently bound, if any.
    pub fn bound(&self) -> Option<HandleId> {
        self.bound
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// How a source gets onto a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachStrategy {
    /// Hand the url straight to the element.
    Direct,
    /// Fetch the manifest, pick a variant, then load it.
    Adaptive,
    /// The element cannot play this container at all.
    Unsupported,
}

impl AttachStrategy {
    pub fn select<E: MediaElement>(container: ContainerType, element: &E) -> Self {
        match (container.is_segmented(), element.supports_native_hls()) {
            (true, false) => Self::Adaptive,
            _ if element.can_play(container) => Self::Direct,
            _ => Self::Unsupported,
        }
    }
}

impl fmt::Display for AttachStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::Adaptive => write!(f, "adaptive"),
            Self::Unsupported => write!(f, "unsupported"),
        }
    }
}

// ---------------------------------------------------------------------------
// Adaptive loading
// ---------------------------------------------------------------------------

/// What an adaptive loader needs to start.
#[derive(Debug, Clone)]
pub struct LoadRequest {
    pub handle: HandleId,
    pub manifest_url: String,
    /// Surface height; variants taller than this are skipped.
    pub max_height: Option<u32>,
    /// Where to report [`EngineEvent::ManifestLoaded`] or errors.
    pub sink: EngineEventSink,
}

/// Manifest-based loader for segmented sources.
pub trait AdaptiveLoader: Send {
    fn start(&mut self, request: LoadRequest);

    /// Abort in-flight work and drop any parsed manifest.
    fn destroy(&mut self);
}

/// Creates one loader per adaptive attach.
pub trait LoaderFactory: Send + Sync {
    fn create(&self) -> Box<dyn AdaptiveLoader>;
}

// ---------------------------------------------------------------------------
// AdapterHandle
// ---------------------------------------------------------------------------

/// A live binding of one source to one surface.
#[must_use = "a dropped handle leaks its surface binding; pass it to EngineAdapter::detach"]
pub struct AdapterHandle {
    id: HandleId,
    surface: SurfaceId,
    source_url: String,
    strategy: AttachStrategy,
    loader: Option<Box<dyn AdaptiveLoader>>,
}

impl AdapterHandle {
    pub fn id(&self) -> HandleId {
        self.id
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn strategy(&self) -> AttachStrategy {
        self.strategy
    }
}

impl fmt::Debug for AdapterHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterHandle")
            .field("id", &self.id)
            .field("surface", &self.surface)
            .field("source_url", &self.source_url)
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl Drop for AdapterHandle {
    fn drop(&mut self) {
        if let Some(mut loader) = self.loader.take() {
            warn!(handle_id = %self.id, "Adapter handle dropped without detach");
            loader.destroy();
        }
    }
}

// ---------------------------------------------------------------------------
// EngineAdapter
// ---------------------------------------------------------------------------

/// Attaches and detaches sources on surfaces.
pub struct EngineAdapter {
    loaders: Arc<dyn LoaderFactory>,
    sink: EngineEventSink,
}

impl EngineAdapter {
    pub fn new(loaders: Arc<dyn LoaderFactory>, sink: EngineEventSink) -> Self {
        Self { loaders, sink }
    }

    /// Bind `source` to `surface`.
    ///
    /// Fails only when the surface is still bound. Unsupported containers and
    /// manifest failures arrive later as [`EngineEvent::Error`].
    pub fn attach<E: MediaElement>(
        &self,
        source: &Source,
        surface: &mut Surface<E>,
    ) -> Result<AdapterHandle> {
        if let Some(handle) = surface.bound {
            return Err(Error::ReattachWithoutDetach {
                surface: surface.id,
                handle,
            });
        }

        let id = HandleId::new();
        let strategy = AttachStrategy::select(source.container, &surface.element);
        let mut handle = AdapterHandle {
            id,
            surface: surface.id,
            source_url: source.url.clone(),
            strategy,
            loader: None,
        };

        match strategy {
            AttachStrategy::Direct => {
                surface.element.load(id, &source.url);
            }
            AttachStrategy::Adaptive => {
                let mut loader = self.loaders.create();
                loader.start(LoadRequest {
                    handle: id,
                    manifest_url: source.url.clone(),
                    max_height: surface.element.viewport_height(),
                    sink: self.sink.clone(),
                });
                handle.loader = Some(loader);
            }
            AttachStrategy::Unsupported => {
                let message = format!("{} sources are not supported on this surface", source.container);
                let _ = self
                    .sink
                    .send(EngineMessage::new(id, EngineEvent::Error { message }));
            }
        }

        surface.bound = Some(id);
        info!(
            handle_id = %id,
            surface_id = %surface.id,
            %strategy,
            url = %source.url,
            "Attached source"
        );
        Ok(handle)
    }

    /// Load the variant an adaptive loader resolved for `handle`.
    ///
    /// Ignored if the surface has moved on to another handle.
    pub fn load_variant<E: MediaElement>(
        &self,
        handle: &AdapterHandle,
        surface: &mut Surface<E>,
        variant_url: &str,
    ) {
        if surface.bound != Some(handle.id) {
            debug!(handle_id = %handle.id, "Variant for unbound handle ignored");
            return;
        }
        surface.element.load(handle.id, variant_url);
    }

    /// Release everything `handle` holds and clear the surface binding.
    pub fn detach<E: MediaElement>(&self, mut handle: AdapterHandle, surface: &mut Surface<E>) {
        if let Some(mut loader) = handle.loader.take() {
            loader.destroy();
        }
        if surface.bound == Some(handle.id) {
            surface.element.unload(handle.id);
            surface.bound = None;
        }
        info!(handle_id = %handle.id, surface_id = %surface.id, "Detached source");
    }
}

// ---------------------------------------------------------------------------
// DetachGuard
// ---------------------------------------------------------------------------

/// Holder for the current handle. Releasing an empty guard is a no-op, so
/// a handle is detached at most once.
#[derive(Debug, Default)]
pub struct DetachGuard {
    handle: Option<AdapterHandle>,
}

impl DetachGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, handle: AdapterHandle) {
        debug_assert!(self.handle.is_none(), "previous handle was not released");
        self.handle = Some(handle);
    }

    pub fn get(&self) -> Option<&AdapterHandle> {
        self.handle.as_ref()
    }

    pub fn id(&self) -> Option<HandleId> {
        self.handle.as_ref().map(AdapterHandle::id)
    }

    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// Detach the held handle, returning its id if there was one.
    pub fn release<E: MediaElement>(
        &mut self,
        adapter: &EngineAdapter,
        surface: &mut Surface<E>,
    ) -> Option<HandleId> {
        let handle = self.handle.take()?;
        let id = handle.id();
        adapter.detach(handle, surface);
        Some(id)
    }
}
