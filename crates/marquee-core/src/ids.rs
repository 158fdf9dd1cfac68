//! Identifiers for handles, surfaces, and sessions.
//!
//! All three are random UUIDs underneath. They are distinct types so a
//! stale [`HandleId`] can never be compared against a [`SurfaceId`] by
//! mistake, and they log with a short kind prefix (`handle-1f0c9a2e`) that is
//! easy to follow across a switch.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let simple = self.0.simple().to_string();
                write!(f, concat!($prefix, "-{}"), &simple[..8])
            }
        }
    };
}

id_type! {
    /// One live binding between a source and a display surface. A new one is
    /// minted on every attach.
    HandleId => "handle"
}

id_type! {
    /// A display surface (one video element).
    SurfaceId => "surface"
}

id_type! {
    /// A playback session, stable across source switches.
    SessionId => "session"
}
