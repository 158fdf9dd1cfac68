//! The session state machine.
//!
//! ```text
//! idle ──first attach──▶ loading ──can-play──▶ ready
//!                          ▲                     │ select_source
//!                          └──attach── switching ◀┘
//! any ──failure──▶ errored ──retry / explicit select──▶ loading
//! ```
//!
//! The controller is the single writer of [`SessionState`]. It is synchronous;
//! [`SessionDriver`](crate::driver::SessionDriver) feeds it commands and
//! engine events from one task.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::events::{EventBus, EventPayload};
use marquee_core::{
    Catalog, Error, FailureKind, HandleId, PlaybackState, RecoveryOffer, Result, SessionId,
    SessionPhase, SessionSnapshot, Source, Subtitle,
};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::catalog::rank::{self, SourceGroup};
use crate::catalog::{dedupe, label_of};
use crate::config::PlayerConfig;
use crate::engine::{
    AttachStrategy, DetachGuard, EngineAdapter, EngineEvent, MediaElement, Surface,
};
use crate::store::{PreferenceStore, PREFERRED_QUALITY_KEY};

use super::controls::{ControlsVisibility, DEFAULT_HIDE_AFTER};
use super::fallback::{FailureController, FailureDecision};
use super::tracker::{PlaybackFields, PlaybackTracker};

/// Volume a new session starts at.
pub const DEFAULT_VOLUME: f64 = 1.0;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// External embed player offered once every source has failed.
    pub fallback_embed: Option<String>,
    /// Switch to a same-quality sibling on failure instead of offering it.
    pub auto_promote_siblings: bool,
    pub autoplay: bool,
    pub controls_hide: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            fallback_embed: None,
            auto_promote_siblings: false,
            autoplay: true,
            controls_hide: DEFAULT_HIDE_AFTER,
        }
    }
}

impl From<&PlayerConfig> for SessionOptions {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            fallback_embed: None,
            auto_promote_siblings: config.auto_promote_siblings,
            autoplay: config.autoplay,
            controls_hide: Duration::from_millis(config.controls_hide_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Subtitle selection. `Off` is an explicit choice, unlike `Undecided`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubtitleChoice {
    #[default]
    Undecided,
    Off,
    Track(Subtitle),
}

impl SubtitleChoice {
    pub fn track(&self) -> Option<&Subtitle> {
        match self {
            Self::Track(t) => Some(t),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub active_source: Option<Source>,
    pub active_subtitle: SubtitleChoice,
    pub playback: PlaybackFields,
    pub error_message: Option<String>,
    pub failure: Option<FailureKind>,
    pub recovery: Option<RecoveryOffer>,
}

/// The retained catalog and everything derived from it.
struct CatalogView {
    catalog: Catalog,
    groups: Vec<SourceGroup>,
    subtitles: Vec<Subtitle>,
}

/// Position to seek to once the handle of `generation` is ready.
#[derive(Debug, Clone, Copy)]
struct PendingRestore {
    generation: u64,
    position: f64,
}

// ---------------------------------------------------------------------------
// SessionController
// ---------------------------------------------------------------------------

pub struct SessionController<E> {
    id: SessionId,
    options: SessionOptions,
    adapter: EngineAdapter,
    surface: Surface<E>,
    store: Arc<dyn PreferenceStore>,
    bus: Arc<EventBus>,
    view: Option<CatalogView>,
    state: SessionState,
    phase: SessionPhase,
    handle: DetachGuard,
    generation: u64,
    pending_restore: Option<PendingRestore>,
    tracker: PlaybackTracker,
    failures: FailureController,
    controls: ControlsVisibility,
    volume: f64,
    closed: bool,
}

impl<E: MediaElement> SessionController<E> {
    pub fn new(
        adapter: EngineAdapter,
        element: E,
        store: Arc<dyn PreferenceStore>,
        options: SessionOptions,
    ) -> Self {
        Self {
            id: SessionId::new(),
            tracker: PlaybackTracker::new(options.autoplay),
            failures: FailureController::new(options.fallback_embed.clone()),
            controls: ControlsVisibility::new(options.controls_hide),
            options,
            adapter,
            surface: Surface::new(element),
            store,
            bus: Arc::new(EventBus::default()),
            view: None,
            state: SessionState::default(),
            phase: SessionPhase::Idle,
            handle: DetachGuard::new(),
            generation: 0,
            pending_restore: None,
            volume: DEFAULT_VOLUME,
            closed: false,
        }
    }

    // -- Accessors -----------------------------------------------------------

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn bus(&self) -> Arc<EventBus> {
        self.bus.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn surface(&self) -> &Surface<E> {
        &self.surface
    }

    /// Id of the live adapter handle, if any.
    pub fn handle_id(&self) -> Option<HandleId> {
        self.handle.id()
    }

    /// Switch generation; bumped on every attach and on teardown.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    /// Whether the viewer last asked to play rather than pause.
    pub fn wants_play(&self) -> bool {
        self.tracker.wants_play()
    }

    /// Ranked quality groups for the quality menu.
    pub fn alternatives(&self) -> &[SourceGroup] {
        self.view.as_ref().map_or(&[], |v| v.groups.as_slice())
    }

    /// Deduplicated subtitles for the captions menu.
    pub fn subtitles(&self) -> &[Subtitle] {
        self.view.as_ref().map_or(&[], |v| v.subtitles.as_slice())
    }

    /// One source per quality label, best first.
    pub fn unique_qualities(&self) -> Vec<Source> {
        self.view
            .as_ref()
            .map(|v| rank::unique_qualities(&v.catalog.sources))
            .unwrap_or_default()
    }

    // -- Lifecycle -----------------------------------------------------------

    /// Initialize using the persisted quality preference, if any.
    pub fn start(&mut self, catalog: Catalog) -> Result<()> {
        let preferred = self.store.get(PREFERRED_QUALITY_KEY).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read quality preference");
            None
        });
        self.initialize_from_catalog(catalog, preferred.as_deref())
    }

    /// Build the session from `catalog` and attach the default source.
    ///
    /// The default is the first member of the group named by `preferred`,
    /// falling back to the first member of the highest-ranked group.
    pub fn initialize_from_catalog(
        &mut self,
        catalog: Catalog,
        preferred: Option<&str>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.release_handle();
        self.pending_restore = None;
        self.state = SessionState::default();
        self.tracker = PlaybackTracker::new(self.options.autoplay);
        self.failures.reset();

        let groups = rank::rank(&catalog.sources);
        let subtitles = dedupe(&catalog.subtitles);
        let default = preferred
            .and_then(|label| rank::preferred(&groups, label))
            .or_else(|| rank::highest_ranked(&groups))
            .and_then(SourceGroup::first)
            .cloned();
        self.view = Some(CatalogView {
            catalog,
            groups,
            subtitles,
        });

        let Some(source) = default else {
            warn!(session_id = %self.id, "Catalog has no sources");
            self.set_phase(SessionPhase::Idle);
            self.fail(
                "No playable sources found for this title".into(),
                FailureKind::TotalFailure,
                self.failures.terminal_offer(),
            );
            return Err(Error::EmptyCatalog);
        };

        info!(
            session_id = %self.id,
            url = %source.url,
            label = %label_of(&source),
            preferred = ?preferred,
            "Starting session"
        );
        self.bus.broadcast(
            self.id,
            EventPayload::SessionStarted {
                source_url: source.url.clone(),
                label: label_of(&source).to_string(),
            },
        );
        self.attach(source, None)
    }

    /// Re-run initialization against the retained catalog.
    pub fn retry(&mut self) -> Result<()> {
        self.ensure_open()?;
        let catalog = self
            .view
            .as_ref()
            .map(|v| v.catalog.clone())
            .ok_or(Error::EmptyCatalog)?;
        info!(session_id = %self.id, "Retrying session");
        self.start(catalog)
    }

    /// Detach the engine and cancel everything pending. Idempotent.
    pub fn teardown(&mut self) {
        if self.closed {
            return;
        }
        self.release_handle();
        self.generation += 1;
        self.pending_restore = None;
        self.controls.cancel();
        self.set_phase(SessionPhase::Idle);
        self.closed = true;
        info!(session_id = %self.id, "Session torn down");
        self.bus.broadcast(self.id, EventPayload::SessionClosed);
    }

    // -- Selection -----------------------------------------------------------

    /// Switch to `source`, keeping the viewer's position.
    pub fn select_source(&mut self, source: &Source) -> Result<()> {
        self.select_source_by_url(&source.url)
    }

    pub fn select_source_by_url(&mut self, url: &str) -> Result<()> {
        self.ensure_open()?;
        let source = self
            .view
            .as_ref()
            .and_then(|v| v.catalog.source(url))
            .cloned()
            .ok_or_else(|| Error::UnknownSource(url.to_string()))?;

        let is_active = self
            .state
            .active_source
            .as_ref()
            .is_some_and(|a| a.url == source.url);
        if is_active && self.handle.is_live() {
            debug!(session_id = %self.id, %url, "Source already active");
            return Ok(());
        }

        let label = label_of(&source).to_string();
        if let Err(e) = self.store.set(PREFERRED_QUALITY_KEY, &label) {
            warn!(error = %e, %label, "Failed to persist quality preference");
        }

        let position = self
            .pending_restore
            .map(|p| p.position)
            .unwrap_or(self.state.playback.position_secs);
        if self.phase == SessionPhase::Ready {
            self.set_phase(SessionPhase::Switching);
            self.bus
                .broadcast(self.id, EventPayload::Snapshot(self.snapshot()));
        }
        self.release_handle();
        self.attach(source, Some(position))
    }

    /// Show a subtitle track, or turn captions off with `None`.
    pub fn select_subtitle(&mut self, subtitle: Option<&Subtitle>) -> Result<()> {
        self.ensure_open()?;
        let choice = match subtitle {
            None => SubtitleChoice::Off,
            Some(sub) => {
                let known = self.subtitles().iter().any(|s| s == sub);
                if !known {
                    return Err(Error::UnknownSubtitle(sub.label.clone()));
                }
                SubtitleChoice::Track(sub.clone())
            }
        };
        self.apply_subtitle(choice);
        Ok(())
    }

    pub fn select_subtitle_by_label(&mut self, label: Option<&str>) -> Result<()> {
        let subtitle = match label {
            None => None,
            Some(label) => Some(
                self.subtitles()
                    .iter()
                    .find(|s| s.label == label)
                    .cloned()
                    .ok_or_else(|| Error::UnknownSubtitle(label.to_string()))?,
            ),
        };
        self.select_subtitle(subtitle.as_ref())
    }

    fn apply_subtitle(&mut self, choice: SubtitleChoice) {
        if self.handle.is_live() {
            self.surface.element_mut().set_text_track(choice.track());
        }
        let label = choice.track().map(|t| t.label.clone());
        debug!(session_id = %self.id, label = ?label, "Subtitle changed");
        self.state.active_subtitle = choice;
        self.bus
            .broadcast(self.id, EventPayload::SubtitleChanged { label });
    }

    // -- Transport -----------------------------------------------------------

    /// Start or resume playback. The intent carries over to later sources.
    pub fn play(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.tracker.set_wants_play(true);
        if self.handle.is_live() {
            self.surface.element_mut().play();
        }
        Ok(())
    }

    /// Pause playback. A source attached while paused stays paused.
    pub fn pause(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.tracker.set_wants_play(false);
        if self.handle.is_live() {
            self.surface.element_mut().pause();
        }
        Ok(())
    }

    pub fn toggle_play(&mut self) -> Result<()> {
        if self.tracker.wants_play() {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Set output volume, clamped to `0.0..=1.0`. Non-finite input is ignored.
    pub fn set_volume(&mut self, volume: f64) -> Result<()> {
        self.ensure_open()?;
        if !volume.is_finite() {
            return Ok(());
        }
        self.volume = volume.clamp(0.0, 1.0);
        if self.handle.is_live() {
            self.surface.element_mut().set_volume(self.volume);
        }
        Ok(())
    }

    /// Seek to `secs`, clamped to the known duration.
    pub fn seek(&mut self, secs: f64) -> Result<()> {
        self.ensure_open()?;
        if !secs.is_finite() {
            return Ok(());
        }
        let duration = self.state.playback.duration_secs;
        let target = if duration > 0.0 {
            secs.clamp(0.0, duration)
        } else {
            secs.max(0.0)
        };

        if let Some(pending) = self.pending_restore.as_mut() {
            pending.position = target;
        } else if self.handle.is_live() {
            self.surface.element_mut().seek(target);
        }
        self.state.playback.set_position(target);
        Ok(())
    }

    /// Seek relative to the current position.
    pub fn skip(&mut self, delta_secs: f64) -> Result<()> {
        let current = self
            .pending_restore
            .map(|p| p.position)
            .unwrap_or(self.state.playback.position_secs);
        self.seek(current + delta_secs)
    }

    // -- Controls ------------------------------------------------------------

    pub fn note_activity(&mut self, now: Instant) {
        if !self.closed {
            self.controls.touch(now);
        }
    }

    pub fn controls_deadline(&self) -> Option<Instant> {
        self.controls.deadline()
    }

    /// Returns `true` if control visibility changed.
    pub fn poll_controls(&mut self, now: Instant) -> bool {
        let playing = self.state.playback.state == PlaybackState::Playing;
        self.controls.poll(now, playing)
    }

    // -- Engine events -------------------------------------------------------

    /// Route an engine event. Events from any handle but the live one are
    /// dropped.
    pub fn handle_engine_event(&mut self, handle: HandleId, event: EngineEvent) {
        if self.closed || self.handle.id() != Some(handle) {
            debug!(handle_id = %handle, ?event, "Ignoring event from stale handle");
            return;
        }

        match event {
            EngineEvent::ManifestLoaded {
                variant_url,
                height,
            } => {
                debug!(handle_id = %handle, %variant_url, ?height, "Manifest resolved");
                if let Some(live) = self.handle.get() {
                    self.adapter
                        .load_variant(live, &mut self.surface, &variant_url);
                    self.apply_transport();
                }
            }
            EngineEvent::Error { message } => self.on_source_failed(message),
            other => {
                self.tracker.apply(&mut self.state.playback, &other);
                if other == EngineEvent::CanPlay {
                    self.on_ready();
                }
            }
        }
    }

    fn on_ready(&mut self) {
        if self.phase == SessionPhase::Loading {
            self.set_phase(SessionPhase::Ready);
        }

        let Some(pending) = self.pending_restore.take() else {
            return;
        };
        if pending.generation != self.generation {
            debug!(
                stale = pending.generation,
                current = self.generation,
                "Dropping stale position restore"
            );
            return;
        }

        self.surface.element_mut().seek(pending.position);
        self.state.playback.set_position(pending.position);
        debug!(position = pending.position, generation = pending.generation, "Position restored");
        self.bus.broadcast(
            self.id,
            EventPayload::PositionRestored {
                position_secs: pending.position,
                generation: pending.generation,
            },
        );
    }

    fn on_source_failed(&mut self, message: String) {
        let Some(failed) = self.state.active_source.clone() else {
            return;
        };
        warn!(session_id = %self.id, url = %failed.url, %message, "Source failed");
        self.release_handle();

        let decision = self.failures.classify(&failed.url, self.alternatives());
        match decision {
            FailureDecision::Sibling(next) if self.options.auto_promote_siblings => {
                info!(from = %failed.url, to = %next.url, "Promoting sibling source");
                let position = self
                    .pending_restore
                    .map(|p| p.position)
                    .unwrap_or(self.state.playback.position_secs);
                if let Err(e) = self.attach(next, Some(position)) {
                    warn!(error = %e, "Sibling promotion failed");
                    self.fail(e.to_string(), FailureKind::TotalFailure, self.failures.terminal_offer());
                }
            }
            decision => self.fail(message, decision.kind(), decision.offer()),
        }
    }

    // -- Internals -----------------------------------------------------------

    fn attach(&mut self, source: Source, restore: Option<f64>) -> Result<()> {
        self.generation += 1;
        let position = restore.filter(|p| *p > 0.0);
        self.pending_restore = position.map(|position| PendingRestore {
            generation: self.generation,
            position,
        });

        let handle = self.adapter.attach(&source, &mut self.surface)?;
        let handle_id = handle.id();
        self.surface
            .element_mut()
            .set_text_track(self.state.active_subtitle.track());
        if handle.strategy() == AttachStrategy::Direct {
            self.apply_transport();
        }
        self.handle.set(handle);
        self.failures.mark_attempted(&source.url);

        self.tracker
            .begin_load(&mut self.state.playback, position.unwrap_or(0.0));
        self.state.error_message = None;
        self.state.failure = None;
        self.state.recovery = None;
        self.set_phase(SessionPhase::Loading);

        self.bus.broadcast(
            self.id,
            EventPayload::SourceAttached {
                handle_id,
                source_url: source.url.clone(),
                generation: self.generation,
            },
        );
        self.state.active_source = Some(source);
        Ok(())
    }

    /// Carry volume and a pause over to media the element just loaded.
    fn apply_transport(&mut self) {
        let element = self.surface.element_mut();
        element.set_volume(self.volume);
        if !self.tracker.wants_play() {
            element.pause();
        }
    }

    fn release_handle(&mut self) {
        if let Some(handle_id) = self.handle.release(&self.adapter, &mut self.surface) {
            self.bus
                .broadcast(self.id, EventPayload::SourceDetached { handle_id });
        }
    }

    fn fail(&mut self, message: String, kind: FailureKind, recovery: RecoveryOffer) {
        self.state.playback.state = PlaybackState::Errored;
        self.state.error_message = Some(message.clone());
        self.state.failure = Some(kind);
        self.state.recovery = Some(recovery.clone());
        self.set_phase(SessionPhase::Errored);
        self.bus.broadcast(
            self.id,
            EventPayload::PlaybackFailed {
                kind,
                message,
                recovery,
            },
        );
    }

    fn set_phase(&mut self, phase: SessionPhase) {
        if self.phase != phase {
            debug!(session_id = %self.id, from = %self.phase, to = %phase, "Phase change");
            self.phase = phase;
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// The UI contract, derived from session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        let source = self.state.active_source.as_ref();
        let playback = &self.state.playback;
        SessionSnapshot {
            phase: self.phase,
            playback_state: playback.state,
            position_secs: playback.position_secs,
            duration_secs: playback.duration_secs,
            progress_percent: playback.progress_percent,
            active_source_url: source.map(|s| s.url.clone()),
            active_source_label: source.map(|s| label_of(s).to_string()),
            active_provider: source.map(|s| s.provider.name.clone()),
            active_subtitle_label: self.state.active_subtitle.track().map(|t| t.label.clone()),
            error_message: self.state.error_message.clone(),
            failure: self.state.failure,
            recovery: self.state.recovery.clone(),
            controls_visible: self.controls.visible(),
            volume: self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{event_channel, AdaptiveLoader, LoadRequest, LoaderFactory};
    use crate::store::MemoryStore;
    use marquee_core::{ContainerType, SubtitleFormat};

    #[derive(Default)]
    struct NullElement {
        seeks: Vec<f64>,
    }

    impl MediaElement for NullElement {
        fn supports_native_hls(&self) -> bool {
            true
        }
        fn viewport_height(&self) -> Option<u32> {
            None
        }
        fn load(&mut self, _handle: HandleId, _url: &str) {}
        fn unload(&mut self, _handle: HandleId) {}
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn seek(&mut self, position: f64) {
            self.seeks.push(position);
        }
        fn set_volume(&mut self, _volume: f64) {}
        fn set_text_track(&mut self, _track: Option<&Subtitle>) {}
    }

    struct NoLoaders;

    impl LoaderFactory for NoLoaders {
        fn create(&self) -> Box<dyn AdaptiveLoader> {
            struct Noop;
            impl AdaptiveLoader for Noop {
                fn start(&mut self, _request: LoadRequest) {}
                fn destroy(&mut self) {}
            }
            Box::new(Noop)
        }
    }

    fn controller() -> SessionController<NullElement> {
        let (sink, _stream) = event_channel();
        SessionController::new(
            EngineAdapter::new(Arc::new(NoLoaders), sink),
            NullElement::default(),
            Arc::new(MemoryStore::new()),
            SessionOptions::default(),
        )
    }

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Source::new("u1", ContainerType::Mp4, "720", "A"),
                Source::new("u2", ContainerType::Mp4, "1080", "B"),
            ],
            vec![Subtitle::new("en.vtt", SubtitleFormat::Vtt, "English")],
        )
    }

    fn ready(session: &mut SessionController<NullElement>) {
        let id = session.handle_id().unwrap();
        session.handle_engine_event(id, EngineEvent::DurationChange { duration: 100.0 });
        session.handle_engine_event(id, EngineEvent::CanPlay);
    }

    #[test]
    fn loading_then_ready() {
        let mut session = controller();
        session.initialize_from_catalog(catalog(), None).unwrap();
        assert_eq!(session.phase(), SessionPhase::Loading);
        assert_eq!(session.snapshot().active_source_url.as_deref(), Some("u2"));

        ready(&mut session);
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert_eq!(session.snapshot().playback_state, PlaybackState::Playing);
    }

    #[test]
    fn seek_clamps_to_duration() {
        let mut session = controller();
        session.initialize_from_catalog(catalog(), None).unwrap();
        ready(&mut session);

        session.seek(250.0).unwrap();
        assert_eq!(session.snapshot().position_secs, 100.0);
        session.skip(-500.0).unwrap();
        assert_eq!(session.snapshot().position_secs, 0.0);
        assert_eq!(session.surface().element().seeks, [100.0, 0.0]);
    }

    #[test]
    fn seek_while_switching_moves_restore_target() {
        let mut session = controller();
        session.initialize_from_catalog(catalog(), None).unwrap();
        ready(&mut session);
        session.seek(30.0).unwrap();

        session.select_source_by_url("u1").unwrap();
        session.skip(10.0).unwrap();
        ready(&mut session);

        assert_eq!(session.snapshot().position_secs, 40.0);
        assert_eq!(session.surface().element().seeks.last(), Some(&40.0));
    }

    #[test]
    fn subtitle_off_is_explicit() {
        let mut session = controller();
        session.initialize_from_catalog(catalog(), None).unwrap();
        assert_eq!(session.state().active_subtitle, SubtitleChoice::Undecided);
        session.select_subtitle(None).unwrap();
        assert_eq!(session.state().active_subtitle, SubtitleChoice::Off);
        session.select_subtitle_by_label(Some("English")).unwrap();
        assert_eq!(
            session.snapshot().active_subtitle_label.as_deref(),
            Some("English")
        );
    }

    #[test]
    fn closed_session_rejects_operations() {
        let mut session = controller();
        session.initialize_from_catalog(catalog(), None).unwrap();
        session.teardown();
        session.teardown();
        assert!(session.is_closed());
        assert!(session.handle_id().is_none());
        assert!(matches!(session.select_source_by_url("u1"), Err(Error::SessionClosed)));
        assert!(matches!(session.retry(), Err(Error::SessionClosed)));
    }

    #[test]
    fn options_from_player_config() {
        let config = PlayerConfig {
            controls_hide_ms: 1500,
            auto_promote_siblings: true,
            ..Default::default()
        };
        let options = SessionOptions::from(&config);
        assert_eq!(options.controls_hide, Duration::from_millis(1500));
        assert!(options.auto_promote_siblings);
    }
}
