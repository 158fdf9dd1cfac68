//! Auto-hiding player controls.
//!
//! Each bit of viewer activity pushes the hide deadline out again. The driver
//! sleeps until [`ControlsVisibility::deadline`] and then calls
//! [`ControlsVisibility::poll`].

use std::time::Duration;

use tokio::time::Instant;

pub const DEFAULT_HIDE_AFTER: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone)]
pub struct ControlsVisibility {
    hide_after: Duration,
    deadline: Option<Instant>,
    visible: bool,
}

impl ControlsVisibility {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            hide_after,
            deadline: None,
            visible: true,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Show controls and restart the hide countdown.
    pub fn touch(&mut self, now: Instant) {
        self.visible = true;
        self.deadline = Some(now + self.hide_after);
    }

    /// Hide controls if the deadline passed. Controls stay up while not
    /// playing; the countdown restarts on the next activity.
    ///
    /// Returns `true` if visibility changed.
    pub fn poll(&mut self, now: Instant, playing: bool) -> bool {
        match self.deadline {
            Some(deadline) if deadline <= now => {
                self.deadline = None;
                if playing && self.visible {
                    self.visible = false;
                    return true;
                }
                false
            }
            _ => false,
        }
    }

    /// Drop any pending countdown.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

impl Default for ControlsVisibility {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_AFTER)
    }
}
