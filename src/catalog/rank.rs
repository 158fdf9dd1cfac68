//! Source ranking and grouping.

use std::cmp::Ordering;
use std::collections::HashMap;

use marquee_core::Source;
use serde::Serialize;

use super::quality::QualityLabel;

/// Sources sharing one display quality label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceGroup {
    pub label: QualityLabel,
    pub members: Vec<Source>,
}

impl SourceGroup {
    /// Numeric rank shared by every member.
    pub fn rank(&self) -> u32 {
        self.label.rank()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.iter().any(|s| s.url == url)
    }

    /// Default member of the group. Groups are never empty.
    pub fn first(&self) -> Option<&Source> {
        self.members.first()
    }
}

/// Display label of a single source.
pub fn label_of(source: &Source) -> QualityLabel {
    QualityLabel::parse(&source.quality)
}

/// Member order inside a group: provider name, then url.
fn member_cmp(a: &Source, b: &Source) -> Ordering {
    a.provider
        .name
        .to_ascii_lowercase()
        .cmp(&b.provider.name.to_ascii_lowercase())
        .then_with(|| a.url.cmp(&b.url))
}

/// Partition sources into quality groups.
///
/// Every source lands in exactly one group. The result depends only on the
/// multiset of inputs, never on their order.
pub fn rank(sources: &[Source]) -> Vec<SourceGroup> {
    let mut buckets: HashMap<QualityLabel, Vec<Source>> = HashMap::new();
    for source in sources {
        buckets
            .entry(label_of(source))
            .or_default()
            .push(source.clone());
    }

    let mut groups: Vec<SourceGroup> = buckets
        .into_iter()
        .map(|(label, mut members)| {
            members.sort_by(member_cmp);
            SourceGroup { label, members }
        })
        .collect();
    groups.sort_by(|a, b| a.label.display_cmp(&b.label));
    groups
}

/// The group holding `url`, if any.
pub fn group_of<'a>(groups: &'a [SourceGroup], url: &str) -> Option<&'a SourceGroup> {
    groups.iter().find(|g| g.contains(url))
}

/// The group with the highest numeric rank. Ties keep display order.
pub fn highest_ranked(groups: &[SourceGroup]) -> Option<&SourceGroup> {
    groups.iter().fold(None, |best: Option<&SourceGroup>, g| match best {
        Some(b) if b.rank() >= g.rank() => Some(b),
        _ => Some(g),
    })
}

/// The group whose label matches a persisted preference.
pub fn preferred<'a>(groups: &'a [SourceGroup], label: &str) -> Option<&'a SourceGroup> {
    groups.iter().find(|g| g.label.matches(label))
}

/// One representative per quality label, highest rank first.
///
/// This backs the compact quality menu; the representative is the member
/// that sorts first by provider name.
pub fn unique_qualities(sources: &[Source]) -> Vec<Source> {
    let mut groups = rank(sources);
    groups.sort_by(|a, b| {
        b.rank()
            .cmp(&a.rank())
            .then_with(|| a.label.display_cmp(&b.label))
    });
    groups
        .into_iter()
        .filter_map(|g| g.members.into_iter().next())
        .collect()
}
