//! Async driver for a [`SessionController`].
//!
//! One task owns the controller and serializes three inputs through a
//! `tokio::select!` loop: UI commands, engine events, and the controls
//! auto-hide deadline. After every step the current snapshot is published on
//! the session's [`EventBus`] if it changed.

use std::sync::Arc;

use marquee_core::events::{EventBus, EventPayload};
use marquee_core::{Error, Result, SessionSnapshot};
use tokio::sync::{mpsc, oneshot};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::engine::{EngineEventStream, MediaElement};
use crate::session::SessionController;

const COMMAND_BUFFER: usize = 32;

/// A request from the UI.
#[derive(Debug)]
pub enum SessionCommand {
    SelectSource(String),
    /// Subtitle label, or `None` for captions off.
    SelectSubtitle(Option<String>),
    Play,
    Pause,
    TogglePlay,
    Seek(f64),
    Skip(f64),
    SetVolume(f64),
    /// Pointer or key activity; resets the controls auto-hide timer.
    Activity,
    Retry,
    Snapshot(oneshot::Sender<SessionSnapshot>),
    Shutdown,
}

// ---------------------------------------------------------------------------
// SessionHandle
// ---------------------------------------------------------------------------

/// Cloneable sender side of a running driver.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    async fn send(&self, command: SessionCommand) -> Result<()> {
        self.tx.send(command).await.map_err(|_| Error::SessionClosed)
    }

    pub async fn select_source(&self, url: impl Into<String>) -> Result<()> {
        self.send(SessionCommand::SelectSource(url.into())).await
    }

    pub async fn select_subtitle(&self, label: Option<String>) -> Result<()> {
        self.send(SessionCommand::SelectSubtitle(label)).await
    }

    pub async fn play(&self) -> Result<()> {
        self.send(SessionCommand::Play).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.send(SessionCommand::Pause).await
    }

    pub async fn toggle_play(&self) -> Result<()> {
        self.send(SessionCommand::TogglePlay).await
    }

    pub async fn set_volume(&self, volume: f64) -> Result<()> {
        self.send(SessionCommand::SetVolume(volume)).await
    }

    pub async fn seek(&self, secs: f64) -> Result<()> {
        self.send(SessionCommand::Seek(secs)).await
    }

    pub async fn skip(&self, delta_secs: f64) -> Result<()> {
        self.send(SessionCommand::Skip(delta_secs)).await
    }

    pub async fn activity(&self) -> Result<()> {
        self.send(SessionCommand::Activity).await
    }

    pub async fn retry(&self) -> Result<()> {
        self.send(SessionCommand::Retry).await
    }

    /// Current snapshot, after every command sent before this one.
    pub async fn snapshot(&self) -> Result<SessionSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.send(SessionCommand::Snapshot(tx)).await?;
        rx.await.map_err(|_| Error::SessionClosed)
    }

    pub async fn shutdown(&self) -> Result<()> {
        self.send(SessionCommand::Shutdown).await
    }
}

// ---------------------------------------------------------------------------
// SessionDriver
// ---------------------------------------------------------------------------

pub struct SessionDriver<E> {
    controller: SessionController<E>,
    commands: mpsc::Receiver<SessionCommand>,
    engine: EngineEventStream,
    bus: Arc<EventBus>,
    last_published: Option<SessionSnapshot>,
}

impl<E: MediaElement> SessionDriver<E> {
    /// Wrap a controller. `engine` must be the stream whose sink the
    /// controller's adapter and element report to.
    pub fn new(controller: SessionController<E>, engine: EngineEventStream) -> (Self, SessionHandle) {
        let (tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let bus = controller.bus();
        let driver = Self {
            controller,
            commands,
            engine,
            bus,
            last_published: None,
        };
        (driver, SessionHandle { tx })
    }

    pub fn bus(&self) -> Arc<EventBus> {
        self.bus.clone()
    }

    /// Run until shutdown or until every handle is dropped. The controller is
    /// torn down before it is returned.
    pub async fn run(mut self) -> SessionController<E> {
        info!(session_id = %self.controller.id(), "Session driver started");
        self.publish();

        loop {
            let deadline = self.controller.controls_deadline();

            tokio::select! {
                command = self.commands.recv() => match command {
                    None | Some(SessionCommand::Shutdown) => break,
                    Some(command) => self.dispatch(command),
                },
                Some(msg) = self.engine.recv() => {
                    self.controller.handle_engine_event(msg.handle, msg.event);
                }
                _ = sleep_until(deadline) => {
                    self.controller.poll_controls(Instant::now());
                }
            }

            self.publish();
        }

        self.controller.teardown();
        self.publish();
        info!(session_id = %self.controller.id(), "Session driver stopped");
        self.controller
    }

    fn dispatch(&mut self, command: SessionCommand) {
        debug!(?command, "Session command");
        let result = match command {
            SessionCommand::SelectSource(url) => self.controller.select_source_by_url(&url),
            SessionCommand::SelectSubtitle(label) => {
                self.controller.select_subtitle_by_label(label.as_deref())
            }
            SessionCommand::Play => self.controller.play(),
            SessionCommand::Pause => self.controller.pause(),
            SessionCommand::TogglePlay => self.controller.toggle_play(),
            SessionCommand::Seek(secs) => self.controller.seek(secs),
            SessionCommand::Skip(delta) => self.controller.skip(delta),
            SessionCommand::SetVolume(volume) => self.controller.set_volume(volume),
            SessionCommand::Activity => {
                self.controller.note_activity(Instant::now());
                Ok(())
            }
            SessionCommand::Retry => self.controller.retry(),
            SessionCommand::Snapshot(reply) => {
                let _ = reply.send(self.controller.snapshot());
                Ok(())
            }
            SessionCommand::Shutdown => Ok(()),
        };

        if let Err(e) = result {
            warn!(error = %e, "Session command rejected");
        }
    }

    fn publish(&mut self) {
        let snapshot = self.controller.snapshot();
        if self.last_published.as_ref() == Some(&snapshot) {
            return;
        }
        self.bus.broadcast(
            self.controller.id(),
            EventPayload::Snapshot(snapshot.clone()),
        );
        self.last_published = Some(snapshot);
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
