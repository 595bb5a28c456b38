//! Wildcard field-path matching.

use regex::Regex;
use std::collections::HashSet;

/// Match wildcard field patterns against an entity's known field paths.
///
/// Each pattern is a segment list: the literal pieces of a glob split
/// at every wildcard marker. A pattern matches a path when the
/// anchored regex `^seg0 .* seg1 .* … segN$` matches the whole path,
/// so a single-segment pattern is plain string equality. Matches are
/// unioned across patterns in pattern-then-path order and
/// deduplicated; `exclude_id` strips the `_id` path even when a
/// pattern matches it.
pub fn match_fields(
    known_paths: &[String],
    patterns: &[Vec<String>],
    exclude_id: bool,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut matched = Vec::new();
    for pattern in patterns {
        let matcher = pattern_matcher(pattern);
        for path in known_paths {
            if matcher.is_match(path) && seen.insert(path.as_str()) {
                matched.push(path.clone());
            }
        }
    }
    if exclude_id {
        matched.retain(|path| path != "_id");
    }
    matched
}

fn pattern_matcher(segments: &[String]) -> Regex {
    let escaped: Vec<String> = segments.iter().map(|s| regex::escape(s)).collect();
    // (?s:.*) crosses newlines, matching the backend's any-sequence
    // semantics for the wildcard marker.
    let pattern = format!("^{}$", escaped.join("(?s:.*)"));
    Regex::new(&pattern).expect("escaped segments form a valid pattern")
}
