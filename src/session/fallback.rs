//! Classifying playback failures and choosing what to offer next.

use std::collections::HashSet;

use marquee_core::{FailureKind, RecoveryOffer, Source};

use crate::catalog::rank::{group_of, SourceGroup};

/// What to do about a failed source.
#[derive(Debug, Clone, PartialEq)]
pub enum FailureDecision {
    /// Another member of the same quality group has not been tried yet.
    Sibling(Source),
    /// Nothing left in the catalog to try.
    Exhausted(RecoveryOffer),
}

impl FailureDecision {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Sibling(_) => FailureKind::SourceUnplayable,
            Self::Exhausted(_) => FailureKind::TotalFailure,
        }
    }

    /// The offer shown to the viewer.
    pub fn offer(&self) -> RecoveryOffer {
        match self {
            Self::Sibling(source) => RecoveryOffer::Sibling {
                url: source.url.clone(),
            },
            Self::Exhausted(offer) => offer.clone(),
        }
    }
}

/// Remembers which sources were attempted since the last (re)initialization.
#[derive(Debug, Clone, Default)]
pub struct FailureController {
    fallback_embed: Option<String>,
    attempted: HashSet<String>,
}

impl FailureController {
    pub fn new(fallback_embed: Option<String>) -> Self {
        Self {
            fallback_embed,
            attempted: HashSet::new(),
        }
    }

    pub fn mark_attempted(&mut self, url: &str) {
        self.attempted.insert(url.to_string());
    }

    pub fn was_attempted(&self, url: &str) -> bool {
        self.attempted.contains(url)
    }

    pub fn reset(&mut self) {
        self.attempted.clear();
    }

    /// Offer made when the whole catalog is exhausted.
    pub fn terminal_offer(&self) -> RecoveryOffer {
        match &self.fallback_embed {
            Some(url) => RecoveryOffer::FallbackEmbed { url: url.clone() },
            None => RecoveryOffer::RetryOnly,
        }
    }

    /// Decide what follows a failure of `failed_url`.
    pub fn classify(&self, failed_url: &str, groups: &[SourceGroup]) -> FailureDecision {
        let sibling = group_of(groups, failed_url).and_then(|group| {
            group
                .members
                .iter()
                .find(|s| s.url != failed_url && !self.was_attempted(&s.url))
        });

        match sibling {
            Some(source) => FailureDecision::Sibling(source.clone()),
            None => FailureDecision::Exhausted(self.terminal_offer()),
        }
    }
}
