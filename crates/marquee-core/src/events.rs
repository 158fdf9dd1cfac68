//! Session events for UI subscribers.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::ids::{HandleId, SessionId};
use crate::playback::{FailureKind, RecoveryOffer, SessionSnapshot};

/// Events kept for views that subscribe late.
const BACKLOG_LEN: usize = 100;

// ---------------------------------------------------------------------------
// EventPayload
// ---------------------------------------------------------------------------

/// Payload describing what happened.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    // -- Session lifecycle ---------------------------------------------------
    SessionStarted {
        source_url: String,
        label: String,
    },
    SessionClosed,

    // -- Source switching ----------------------------------------------------
    SourceAttached {
        handle_id: HandleId,
        source_url: String,
        generation: u64,
    },
    SourceDetached {
        handle_id: HandleId,
    },
    PositionRestored {
        position_secs: f64,
        generation: u64,
    },

    // -- Tracks --------------------------------------------------------------
    SubtitleChanged {
        label: Option<String>,
    },

    // -- Failures ------------------------------------------------------------
    PlaybackFailed {
        kind: FailureKind,
        message: String,
        recovery: RecoveryOffer,
    },

    // -- State mirror --------------------------------------------------------
    Snapshot(SessionSnapshot),
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// A payload stamped with its session, a sequence number, and a wall-clock
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    /// Position in the bus's publication order, starting at 1.
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub session_id: SessionId,
    pub payload: EventPayload,
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Fan-out of session events to UI subscribers.
///
/// A view that mounts after the session started reads [`EventBus::backlog`]
/// and [`EventBus::latest_snapshot`] before subscribing, so it never renders
/// from an empty state.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
    history: Mutex<History>,
}

#[derive(Debug, Default)]
struct History {
    next_seq: u64,
    events: VecDeque<Event>,
    snapshot: Option<SessionSnapshot>,
}

impl EventBus {
    /// `capacity` bounds how far a slow subscriber may lag before it starts
    /// missing events.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            history: Mutex::new(History {
                next_seq: 1,
                events: VecDeque::with_capacity(BACKLOG_LEN),
                snapshot: None,
            }),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Publish `payload`. Having no subscribers is not an error.
    pub fn broadcast(&self, session_id: SessionId, payload: EventPayload) {
        let event = {
            let mut history = self.history.lock();
            let event = Event {
                id: Uuid::new_v4(),
                seq: history.next_seq,
                timestamp: Utc::now(),
                session_id,
                payload,
            };
            history.next_seq += 1;
            if let EventPayload::Snapshot(snap) = &event.payload {
                history.snapshot = Some(snap.clone());
            }
            if history.events.len() == BACKLOG_LEN {
                history.events.pop_front();
            }
            history.events.push_back(event.clone());
            event
        };
        let _ = self.tx.send(event);
    }

    /// Up to `n` of the most recent events, oldest first.
    pub fn backlog(&self, n: usize) -> Vec<Event> {
        let history = self.history.lock();
        let skip = history.events.len().saturating_sub(n);
        history.events.iter().skip(skip).cloned().collect()
    }

    /// The last snapshot published, if any.
    pub fn latest_snapshot(&self) -> Option<SessionSnapshot> {
        self.history.lock().snapshot.clone()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_receive_in_order() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let session_id = SessionId::new();
        let handle_id = HandleId::new();

        bus.broadcast(session_id, EventPayload::SourceDetached { handle_id });
        bus.broadcast(session_id, EventPayload::SessionClosed);

        let first = rx.try_recv().unwrap();
        let second = rx.try_recv().unwrap();
        assert_eq!(first.session_id, session_id);
        assert!(first.seq < second.seq);
        assert!(matches!(
            first.payload,
            EventPayload::SourceDetached { handle_id: h } if h == handle_id
        ));
    }

    #[test]
    fn backlog_is_bounded_and_chronological() {
        let bus = EventBus::new(256);
        let session_id = SessionId::new();
        for _ in 0..(BACKLOG_LEN + 20) {
            bus.broadcast(session_id, EventPayload::SessionClosed);
        }

        let all = bus.backlog(usize::MAX);
        assert_eq!(all.len(), BACKLOG_LEN);
        assert_eq!(all[0].seq, 21);
        assert!(all.windows(2).all(|w| w[0].seq < w[1].seq));
        assert_eq!(bus.backlog(3).last().unwrap().seq, (BACKLOG_LEN + 20) as u64);
    }

    #[test]
    fn latest_snapshot_tracks_last_published() {
        let bus = EventBus::default();
        let session_id = SessionId::new();
        assert!(bus.latest_snapshot().is_none());

        let snap = SessionSnapshot {
            position_secs: 12.0,
            ..Default::default()
        };
        bus.broadcast(session_id, EventPayload::Snapshot(snap.clone()));
        bus.broadcast(session_id, EventPayload::SessionClosed);
        assert_eq!(bus.latest_snapshot(), Some(snap));
    }

    #[test]
    fn publishing_without_subscribers_is_fine() {
        let bus = EventBus::new(4);
        bus.broadcast(
            SessionId::new(),
            EventPayload::PlaybackFailed {
                kind: FailureKind::TotalFailure,
                message: "network".into(),
                recovery: RecoveryOffer::RetryOnly,
            },
        );
        assert_eq!(bus.backlog(10).len(), 1);
    }

    #[test]
    fn payload_serializes_with_type_tag() {
        let payload = EventPayload::PositionRestored {
            position_secs: 42.0,
            generation: 3,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["type"], "position_restored");
        assert_eq!(json["generation"], 3);
    }
}
