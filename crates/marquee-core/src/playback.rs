//! Normalized playback state and the snapshot emitted to the UI.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Playback state as seen by the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Loading,
    Playing,
    Paused,
    Buffering,
    Errored,
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
            Self::Buffering => write!(f, "buffering"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Lifecycle phase of the session controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Switching,
    Errored,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
            Self::Ready => write!(f, "ready"),
            Self::Switching => write!(f, "switching"),
            Self::Errored => write!(f, "errored"),
        }
    }
}

/// Classification of a playback failure held in session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The active source failed; a sibling of the same quality may still play.
    SourceUnplayable,
    /// No alternative remains; only the fallback embed or a full retry helps.
    TotalFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceUnplayable => write!(f, "source_unplayable"),
            Self::TotalFailure => write!(f, "total_failure"),
        }
    }
}

/// The next action the UI should offer after a failure.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum RecoveryOffer {
    /// Switch to another member of the failed source's quality group.
    Sibling { url: String },
    /// Hand the viewer to the external embed player.
    FallbackEmbed { url: String },
    /// Nothing left to try except re-running the catalog.
    RetryOnly,
}

/// Everything the UI needs to render player controls.
///
/// Derived purely from session state; never carries engine handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub playback_state: PlaybackState,
    pub position_secs: f64,
    pub duration_secs: f64,
    pub progress_percent: f64,
    pub active_source_url: Option<String>,
    pub active_source_label: Option<String>,
    pub active_provider: Option<String>,
    pub active_subtitle_label: Option<String>,
    pub error_message: Option<String>,
    pub failure: Option<FailureKind>,
    pub recovery: Option<RecoveryOffer>,
    pub controls_visible: bool,
    /// Output volume in `0.0..=1.0`.
    pub volume: f64,
}

impl SessionSnapshot {
    /// Whether the UI should show its loading indicator.
    pub fn show_spinner(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading | SessionPhase::Switching)
            || matches!(
                self.playback_state,
                PlaybackState::Loading | PlaybackState::Buffering
            )
    }

    /// Whether the UI should show the error panel with a retry action.
    pub fn show_error_panel(&self) -> bool {
        self.phase == SessionPhase::Errored
    }
}
