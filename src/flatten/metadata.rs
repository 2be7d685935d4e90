//! Match-level metadata extraction.

use serde_json::{Map, Value};

use crate::flatten::access;
use crate::flatten::error::FlattenError;
use crate::flatten::match_id;
use crate::flatten::types::{Format, MatchRecord};

/// Extract the one metadata row for a match document.
///
/// Pure transform: the returned record's `match_id` is what the delivery
/// flattener keys its rows on. Every optional field degrades to its
/// documented default, so this fails only when the document itself is not a
/// JSON object.
pub fn extract_match(doc: &Value, format: Format) -> Result<MatchRecord, FlattenError> {
    let root = access::document_object(doc)?;
    let empty = Map::new();
    let info = access::get_path(root, &["info"])
        .and_then(Value::as_object)
        .unwrap_or(&empty);

    let date = access::first_str_or(info, &["dates"], "1970-01-01");

    Ok(MatchRecord {
        match_id: match_id::synthesize(info),
        format,
        season: date.chars().take(4).collect(),
        date: date.to_owned(),
        venue: access::str_or(info, &["venue"], "Unknown Venue").to_owned(),
        gender: access::str_or(info, &["gender"], "male").to_owned(),
        teams: access::str_list(info, &["teams"]).join(", "),
        toss_winner: access::opt_str(info, &["toss", "winner"]),
        toss_decision: access::opt_str(info, &["toss", "decision"]),
        winner: access::str_or(info, &["outcome", "winner"], "No Result").to_owned(),
        by_runs: access::u64_or(info, &["outcome", "by", "runs"], 0),
        by_wickets: access::u64_or(info, &["outcome", "by", "wickets"], 0),
        player_of_match: access::str_list(info, &["player_of_match"]).join(", "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_document() {
        let doc = json!({
            "info": {
                "match_data_version": "v1",
                "dates": ["2022-10-23", "2022-10-24"],
                "event": {"name": "Big Bash"},
                "venue": "MCG",
                "gender": "female",
                "teams": ["Stars", "Renegades"],
                "toss": {"winner": "Stars", "decision": "field"},
                "outcome": {"winner": "Renegades", "by": {"runs": 12}},
                "player_of_match": ["J. Doe", "A. Roe"]
            }
        });

        let record = extract_match(&doc, Format::League).unwrap();
        assert_eq!(record.format, Format::League);
        assert_eq!(record.season, "2022");
        assert_eq!(record.date, "2022-10-23");
        assert_eq!(record.venue, "MCG");
        assert_eq!(record.gender, "female");
        assert_eq!(record.teams, "Stars, Renegades");
        assert_eq!(record.toss_winner.as_deref(), Some("Stars"));
        assert_eq!(record.toss_decision.as_deref(), Some("field"));
        assert_eq!(record.winner, "Renegades");
        assert_eq!(record.by_runs, 12);
        assert_eq!(record.by_wickets, 0);
        assert_eq!(record.player_of_match, "J. Doe, A. Roe");
    }

    #[test]
    fn test_defaults() {
        // A document with nothing but teams: everything else falls back.
        let doc = json!({"info": {"teams": ["A", "B"]}});

        let record = extract_match(&doc, Format::Test).unwrap();
        assert_eq!(record.season, "1970");
        assert_eq!(record.date, "1970-01-01");
        assert_eq!(record.venue, "Unknown Venue");
        assert_eq!(record.gender, "male");
        assert_eq!(record.winner, "No Result");
        assert_eq!(record.toss_winner, None);
        assert_eq!(record.by_runs, 0);
        assert_eq!(record.by_wickets, 0);
        assert_eq!(record.player_of_match, "");
    }

    #[test]
    fn test_missing_info_block() {
        let doc = json!({"innings": []});
        let record = extract_match(&doc, Format::Odi).unwrap();
        assert_eq!(record.match_id, "v0_1970_01_01_UnknownEvent");
        assert_eq!(record.teams, "");
    }

    #[test]
    fn test_non_object_document() {
        assert!(extract_match(&json!([]), Format::Odi).is_err());
    }

    #[test]
    fn test_drawn_match_is_no_result() {
        let doc = json!({
            "info": {
                "dates": ["2021-08-12"],
                "teams": ["England", "India"],
                "outcome": {"result": "draw"}
            }
        });
        let record = extract_match(&doc, Format::Test).unwrap();
        assert_eq!(record.winner, "No Result");
    }
}
