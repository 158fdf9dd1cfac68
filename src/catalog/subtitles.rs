use std::collections::HashSet;

use marquee_core::Subtitle;

/// Drop subtitles whose label was already seen. First occurrence wins and
/// the surviving order matches the input.
pub fn dedupe(subs: &[Subtitle]) -> Vec<Subtitle> {
    let mut seen = HashSet::new();
    subs.iter()
        .filter(|s| seen.insert(s.label.as_str()))
        .cloned()
        .collect()
}
