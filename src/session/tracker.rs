//! Mirrors engine events into normalized playback fields.
//!
//! The tracker only ever sees [`PlaybackFields`]; source and subtitle state
//! live elsewhere in the session and are out of its reach.

use marquee_core::PlaybackState;

use crate::engine::EngineEvent;

/// The part of session state the tracker owns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaybackFields {
    pub state: PlaybackState,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub progress_percent: f64,
}

impl PlaybackFields {
    /// Set the position and recompute progress.
    pub fn set_position(&mut self, position: f64) {
        self.position_secs = position;
        self.progress_percent = progress(position, self.duration_secs);
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackTracker {
    /// Whether the viewer last asked to play (as opposed to pause).
    wants_play: bool,
}

impl PlaybackTracker {
    pub fn new(autoplay: bool) -> Self {
        Self {
            wants_play: autoplay,
        }
    }

    pub fn wants_play(&self) -> bool {
        self.wants_play
    }

    /// Record a viewer play or pause request before the engine confirms it.
    pub fn set_wants_play(&mut self, play: bool) {
        self.wants_play = play;
    }

    /// Reset fields for a fresh load starting at `position`.
    pub fn begin_load(&self, fields: &mut PlaybackFields, position: f64) {
        fields.state = PlaybackState::Loading;
        fields.duration_secs = 0.0;
        fields.set_position(position);
    }

    pub fn apply(&mut self, fields: &mut PlaybackFields, event: &EngineEvent) {
        match event {
            EngineEvent::Play | EngineEvent::Playing => {
                self.wants_play = true;
                fields.state = PlaybackState::Playing;
            }
            EngineEvent::Pause => {
                self.wants_play = false;
                fields.state = PlaybackState::Paused;
            }
            EngineEvent::Waiting => fields.state = PlaybackState::Buffering,
            EngineEvent::CanPlay => {
                if matches!(
                    fields.state,
                    PlaybackState::Idle | PlaybackState::Loading | PlaybackState::Buffering
                ) {
                    fields.state = if self.wants_play {
                        PlaybackState::Playing
                    } else {
                        PlaybackState::Paused
                    };
                }
            }
            EngineEvent::TimeUpdate { position } => {
                if position.is_finite() {
                    fields.set_position(position.max(0.0));
                }
            }
            EngineEvent::DurationChange { duration } => {
                fields.duration_secs = if duration.is_finite() && *duration > 0.0 {
                    *duration
                } else {
                    0.0
                };
                fields.progress_percent = progress(fields.position_secs, fields.duration_secs);
            }
            EngineEvent::ManifestLoaded { .. } | EngineEvent::Error { .. } => {}
        }
    }
}

/// Percent of `duration` reached at `position`; 0 when duration is unknown.
pub fn progress(position: f64, duration: f64) -> f64 {
    if !duration.is_finite() || duration <= 0.0 || !position.is_finite() {
        return 0.0;
    }
    (position / duration * 100.0).clamp(0.0, 100.0)
}

/// `mm:ss`, or `h:mm:ss` from one hour up. Non-finite input renders `00:00`.
pub fn format_timestamp(secs: f64) -> String {
    if !secs.is_finite() || secs < 0.0 {
        return "00:00".to_string();
    }
    let total = secs.floor() as u64;
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}
