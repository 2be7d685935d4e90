//! Stable match identifier synthesis.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use crate::flatten::access;

// Characters that routinely appear in dates, event names and team names but
// are awkward in an identifier.
static SANITIZE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ /.-]").unwrap());

/// Derive the match identifier from a document's `info` block.
///
/// Concatenates the feed's version tag, the first match date and the event
/// name, underscore-joined, falling back to the team names when those three
/// alone carry too few segments to tell matches apart. Spaces, slashes,
/// periods and hyphens become underscores.
///
/// The id is a heuristic, not a globally-unique key: two distinct matches
/// sharing the same version tag, date, event name and teams synthesize the
/// same id. The aggregation step collapses such duplicates keep-first.
pub fn synthesize(info: &Map<String, Value>) -> String {
    let version = access::str_or(info, &["match_data_version"], "v0");
    let date = access::first_str_or(info, &["dates"], "1970-01-01");
    let event = access::str_or(info, &["event", "name"], "UnknownEvent");

    let mut id = format!("{}_{}_{}", version, date, event);

    // Short ids (date still holds its hyphens here) get the teams appended
    // to reduce collision risk.
    let teams = access::str_list(info, &["teams"]);
    if id.matches('_').count() < 3 && !teams.is_empty() {
        id.push('_');
        id.push_str(&teams.join("_vs_"));
    }

    SANITIZE.replace_all(&id, "_").into_owned()
}
