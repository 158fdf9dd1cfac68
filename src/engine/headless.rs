//! A simulated media element for running sessions without a display.
//!
//! Every `load` starts a ticker task that reports duration, readiness, and
//! time updates through the engine sink, as a real element would. Time only
//! advances while playing. Used by `marquee play`.

use std::sync::Arc;
use std::time::Duration;

use marquee_core::{HandleId, Subtitle};
use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::{EngineEvent, EngineEventSink, EngineMessage, MediaElement};

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    pub native_hls: bool,
    pub viewport_height: Option<u32>,
    /// Reported media duration in seconds.
    pub duration: f64,
    /// Interval between time updates.
    pub tick: Duration,
    /// Start playing as soon as a load can play.
    pub autoplay: bool,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            native_hls: false,
            viewport_height: Some(1080),
            duration: 5400.0,
            tick: Duration::from_millis(250),
            autoplay: true,
        }
    }
}

/// State shared between the element and its ticker.
#[derive(Debug, Default)]
struct Playhead {
    position: f64,
    playing: bool,
    /// `CanPlay` has been reported for the current load.
    ready: bool,
}

pub struct HeadlessElement {
    sink: EngineEventSink,
    options: HeadlessOptions,
    playhead: Arc<Mutex<Playhead>>,
    current: Option<HandleId>,
    ticker: Option<JoinHandle<()>>,
    text_track: Option<String>,
    volume: f64,
}

impl HeadlessElement {
    pub fn new(sink: EngineEventSink, options: HeadlessOptions) -> Self {
        Self {
            sink,
            options,
            playhead: Arc::new(Mutex::new(Playhead::default())),
            current: None,
            ticker: None,
            text_track: None,
            volume: 1.0,
        }
    }

    pub fn position(&self) -> f64 {
        self.playhead.lock().position
    }

    pub fn is_playing(&self) -> bool {
        self.playhead.lock().playing
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn text_track(&self) -> Option<&str> {
        self.text_track.as_deref()
    }

    fn emit(&self, handle: HandleId, event: EngineEvent) {
        let _ = self.sink.send(EngineMessage::new(handle, event));
    }

    fn stop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl MediaElement for HeadlessElement {
    fn supports_native_hls(&self) -> bool {
        self.options.native_hls
    }

    fn viewport_height(&self) -> Option<u32> {
        self.options.viewport_height
    }

    fn load(&mut self, handle: HandleId, url: &str) {
        self.stop();
        self.current = Some(handle);
        *self.playhead.lock() = Playhead {
            playing: self.options.autoplay,
            ..Default::default()
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(%url, "Headless element needs an async runtime; nothing will play");
            return;
        };

        info!(handle_id = %handle, %url, autoplay = self.options.autoplay, "Headless load");
        let sink = self.sink.clone();
        let playhead = self.playhead.clone();
        let duration = self.options.duration;
        let tick = self.options.tick;

        self.ticker = Some(runtime.spawn(async move {
            let send = |event| sink.send(EngineMessage::new(handle, event)).is_ok();
            if !send(EngineEvent::DurationChange { duration }) || !send(EngineEvent::CanPlay) {
                return;
            }
            let playing = {
                let mut head = playhead.lock();
                head.ready = true;
                head.playing
            };
            if playing && !send(EngineEvent::Playing) {
                return;
            }

            let mut interval = tokio::time::interval(tick);
            interval.tick().await;
            loop {
                interval.tick().await;
                let advanced = {
                    let mut head = playhead.lock();
                    if head.playing {
                        head.position = (head.position + tick.as_secs_f64()).min(duration);
                        let ended = head.position >= duration;
                        head.playing = !ended;
                        Some((head.position, ended))
                    } else {
                        None
                    }
                };
                let Some((now, ended)) = advanced else {
                    continue;
                };
                if !send(EngineEvent::TimeUpdate { position: now }) {
                    return;
                }
                if ended && !send(EngineEvent::Pause) {
                    return;
                }
            }
        }));
    }

    fn unload(&mut self, handle: HandleId) {
        debug!(handle_id = %handle, "Headless unload");
        self.stop();
        self.current = None;
        self.playhead.lock().playing = false;
    }

    fn play(&mut self) {
        let Some(handle) = self.current else {
            return;
        };
        let ready = {
            let mut head = self.playhead.lock();
            if head.playing {
                return;
            }
            if head.position >= self.options.duration {
                head.position = 0.0;
            }
            head.playing = true;
            head.ready
        };
        self.emit(handle, EngineEvent::Play);
        // Before readiness the ticker reports Playing itself.
        if ready {
            self.emit(handle, EngineEvent::Playing);
        }
    }

    fn pause(&mut self) {
        let Some(handle) = self.current else {
            return;
        };
        let was_playing = std::mem::replace(&mut self.playhead.lock().playing, false);
        if was_playing {
            self.emit(handle, EngineEvent::Pause);
        }
    }

    fn seek(&mut self, position: f64) {
        self.playhead.lock().position = position.clamp(0.0, self.options.duration);
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn set_text_track(&mut self, track: Option<&Subtitle>) {
        self.text_track = track.map(|t| t.label.clone());
    }
}

impl Drop for HeadlessElement {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{event_channel, EngineEventStream};

    fn element(options: HeadlessOptions) -> (HeadlessElement, EngineEventStream) {
        let (sink, stream) = event_channel();
        (HeadlessElement::new(sink, options), stream)
    }

    fn drain(stream: &mut EngineEventStream) -> Vec<EngineEvent> {
        std::iter::from_fn(|| stream.try_recv().ok())
            .map(|msg| msg.event)
            .collect()
    }

    #[tokio::test(start_paused = true)]
    async fn load_reports_ready_then_ticks() {
        let (mut element, mut stream) = element(HeadlessOptions {
            duration: 1.0,
            tick: Duration::from_millis(500),
            ..Default::default()
        });
        let handle = HandleId::new();
        element.load(handle, "https://cdn/a.mp4");

        let mut events = Vec::new();
        while let Some(msg) = stream.recv().await {
            assert_eq!(msg.handle, handle);
            let done = msg.event == EngineEvent::Pause;
            events.push(msg.event);
            if done {
                break;
            }
        }

        assert_eq!(events[0], EngineEvent::DurationChange { duration: 1.0 });
        assert_eq!(events[1], EngineEvent::CanPlay);
        assert_eq!(events[2], EngineEvent::Playing);
        assert!(events.contains(&EngineEvent::TimeUpdate { position: 1.0 }));
        assert!((element.position() - 1.0).abs() < f64::EPSILON);
        assert!(!element.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn unload_stops_ticking() {
        let (mut element, mut stream) = element(HeadlessOptions::default());
        let handle = HandleId::new();
        element.load(handle, "https://cdn/a.mp4");
        element.unload(handle);
        tokio::time::sleep(Duration::from_secs(2)).await;

        // At most the events sent before the abort was observed.
        assert!(drain(&mut stream).len() <= 3);
    }

    #[tokio::test(start_paused = true)]
    async fn without_autoplay_waits_for_play() {
        let (mut element, mut stream) = element(HeadlessOptions {
            tick: Duration::from_secs(1),
            autoplay: false,
            ..Default::default()
        });
        let handle = HandleId::new();
        element.load(handle, "https://cdn/a.mp4");
        tokio::time::sleep(Duration::from_millis(2500)).await;

        let events = drain(&mut stream);
        assert!(events.contains(&EngineEvent::CanPlay));
        assert!(!events.contains(&EngineEvent::Playing));
        assert_eq!(element.position(), 0.0);

        element.play();
        assert_eq!(drain(&mut stream), [EngineEvent::Play, EngineEvent::Playing]);
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert!(element.position() >= 2.0);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_freezes_position() {
        let (mut element, mut stream) = element(HeadlessOptions {
            tick: Duration::from_secs(1),
            ..Default::default()
        });
        element.load(HandleId::new(), "https://cdn/a.mp4");
        tokio::time::sleep(Duration::from_millis(3500)).await;
        drain(&mut stream);

        element.pause();
        element.pause();
        let frozen = element.position();
        assert_eq!(drain(&mut stream), [EngineEvent::Pause]);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(element.position(), frozen);
        assert!(drain(&mut stream).is_empty());
    }

    #[test]
    fn volume_is_clamped() {
        let (mut element, _stream) = element(HeadlessOptions::default());
        element.set_volume(1.7);
        assert_eq!(element.volume(), 1.0);
        element.set_volume(-0.2);
        assert_eq!(element.volume(), 0.0);
    }
}
