//! Ball-by-ball flattening: innings → overs → deliveries, one row per ball.

use serde_json::{Map, Value};

use crate::flatten::access;
use crate::flatten::types::DeliveryRecord;

/// Flatten every ball in a match document into delivery rows.
///
/// Innings, overs and deliveries are walked in document order; innings are
/// numbered by 1-based position. An innings or over with no deliveries
/// contributes nothing, and a document without an `innings` list yields an
/// empty vector — neither is an error. Output order is not a contract beyond
/// the `inning`/`over`/`ball` columns themselves.
pub fn flatten_deliveries(doc: &Value, match_id: &str) -> Vec<DeliveryRecord> {
    let mut rows = Vec::new();

    let innings = match doc.get("innings").and_then(Value::as_array) {
        Some(innings) => innings.as_slice(),
        None => &[],
    };

    for (idx, entry) in innings.iter().enumerate() {
        let inning = match entry.as_object() {
            Some(inning) => inning,
            None => continue,
        };
        let inning_number = (idx + 1) as u64;
        let batting_team = inning.get("team").and_then(Value::as_str);

        let overs = match inning.get("overs").and_then(Value::as_array) {
            Some(overs) => overs.as_slice(),
            None => continue,
        };

        for over_entry in overs {
            let over = match over_entry.as_object() {
                Some(over) => over,
                None => continue,
            };
            let over_number = access::u64_or(over, &["over"], 0);

            let deliveries = match over.get("deliveries").and_then(Value::as_array) {
                Some(deliveries) => deliveries.as_slice(),
                None => continue,
            };

            for delivery in deliveries {
                if let Some(ball) = delivery.as_object() {
                    rows.push(flatten_ball(ball, match_id, inning_number, batting_team, over_number));
                }
            }
        }
    }

    rows
}

/// Build one delivery row. Wicket fields come from the first dismissal only
/// and `extras_type` from the first extras key only; both truncations match
/// the source feed's lossy single-column shape.
fn flatten_ball(
    ball: &Map<String, Value>,
    match_id: &str,
    inning: u64,
    batting_team: Option<&str>,
    over: u64,
) -> DeliveryRecord {
    let ball_number = access::u64_or(ball, &["ball"], 0);

    let wickets = access::get_path(ball, &["wickets"]).and_then(Value::as_array);
    let is_wicket = wickets.is_some_and(|w| !w.is_empty());
    let first_wicket = wickets
        .and_then(|w| w.first())
        .and_then(Value::as_object);

    DeliveryRecord {
        delivery_id: format!("{}_{}.{}.{}", match_id, inning, over, ball_number),
        match_id: match_id.to_owned(),
        inning,
        batting_team: batting_team.map(str::to_owned),
        bowling_team: access::opt_str(ball, &["bowler_team"]),
        over,
        ball: ball_number,
        batter: access::opt_str(ball, &["batter"]),
        bowler: access::opt_str(ball, &["bowler"]),
        runs_batter: access::u64_or(ball, &["runs", "batter"], 0),
        runs_extras: access::u64_or(ball, &["runs", "extras"], 0),
        runs_total: access::u64_or(ball, &["runs", "total"], 0),
        extras_type: access::get_path(ball, &["extras"])
            .and_then(Value::as_object)
            .and_then(|extras| extras.keys().next())
            .cloned(),
        is_wicket,
        wicket_kind: first_wicket
            .and_then(|w| w.get("kind"))
            .and_then(Value::as_str)
            .map(str::to_owned),
        player_out: first_wicket
            .and_then(|w| w.get("player_out"))
            .and_then(Value::as_str)
            .map(str::to_owned),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashSet;

    #[test]
    fn test_single_delivery() {
        let doc = json!({
            "innings": [{
                "team": "A",
                "overs": [{
                    "over": 0,
                    "deliveries": [{
                        "batter": "X",
                        "bowler": "Y",
                        "bowler_team": "B",
                        "ball": 1,
                        "runs": {"batter": 4, "extras": 0, "total": 4}
                    }]
                }]
            }]
        });

        let rows = flatten_deliveries(&doc, "m1");
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.delivery_id, "m1_1.0.1");
        assert_eq!(row.match_id, "m1");
        assert_eq!(row.inning, 1);
        assert_eq!(row.batting_team.as_deref(), Some("A"));
        assert_eq!(row.bowling_team.as_deref(), Some("B"));
        assert_eq!(row.batter.as_deref(), Some("X"));
        assert_eq!(row.bowler.as_deref(), Some("Y"));
        assert_eq!(row.runs_batter, 4);
        assert_eq!(row.runs_extras, 0);
        assert_eq!(row.runs_total, 4);
        assert_eq!(row.extras_type, None);
        assert!(!row.is_wicket);
        assert_eq!(row.wicket_kind, None);
        assert_eq!(row.player_out, None);
    }

    #[test]
    fn test_no_innings() {
        assert!(flatten_deliveries(&json!({"info": {}}), "m1").is_empty());
        assert!(flatten_deliveries(&json!({"innings": []}), "m1").is_empty());
    }

    #[test]
    fn test_empty_over_and_empty_innings_yield_nothing() {
        let doc = json!({
            "innings": [
                {"team": "A", "overs": []},
                {"team": "B", "overs": [{"over": 0, "deliveries": []}]}
            ]
        });
        assert!(flatten_deliveries(&doc, "m1").is_empty());
    }

    #[test]
    fn test_first_dismissal_only() {
        // Run-out chaos: two batters out on one ball. Only the first
        // dismissal makes it into the row.
        let doc = json!({
            "innings": [{
                "team": "A",
                "overs": [{
                    "over": 12,
                    "deliveries": [{
                        "batter": "X",
                        "bowler": "Y",
                        "ball": 3,
                        "runs": {"batter": 1, "extras": 0, "total": 1},
                        "wickets": [
                            {"kind": "run out", "player_out": "X"},
                            {"kind": "retired out", "player_out": "Z"}
                        ]
                    }]
                }]
            }]
        });

        let rows = flatten_deliveries(&doc, "m1");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].is_wicket);
        assert_eq!(rows[0].wicket_kind.as_deref(), Some("run out"));
        assert_eq!(rows[0].player_out.as_deref(), Some("X"));
    }

    #[test]
    fn test_first_extras_key_only() {
        let doc = json!({
            "innings": [{
                "team": "A",
                "overs": [{
                    "over": 4,
                    "deliveries": [{
                        "batter": "X",
                        "bowler": "Y",
                        "ball": 2,
                        "runs": {"batter": 0, "extras": 5, "total": 5},
                        "extras": {"wides": 1, "penalty": 4}
                    }]
                }]
            }]
        });

        let rows = flatten_deliveries(&doc, "m1");
        assert_eq!(rows[0].extras_type.as_deref(), Some("wides"));
        assert_eq!(rows[0].runs_extras, 5);
    }

    #[test]
    fn test_inning_numbering_and_id_uniqueness() {
        let ball = |n: u64| {
            json!({
                "batter": "X",
                "bowler": "Y",
                "ball": n,
                "runs": {"batter": 0, "extras": 0, "total": 0}
            })
        };
        let doc = json!({
            "innings": [
                {"team": "A", "overs": [
                    {"over": 0, "deliveries": [ball(1), ball(2)]},
                    {"over": 1, "deliveries": [ball(1)]}
                ]},
                {"team": "B", "overs": [
                    {"over": 0, "deliveries": [ball(1)]}
                ]}
            ]
        });

        let rows = flatten_deliveries(&doc, "m1");
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].inning, 1);
        assert_eq!(rows[3].inning, 2);
        assert_eq!(rows[3].batting_team.as_deref(), Some("B"));

        let ids: HashSet<&str> = rows.iter().map(|r| r.delivery_id.as_str()).collect();
        assert_eq!(ids.len(), rows.len());
    }

    #[test]
    fn test_missing_ball_number_defaults_to_zero() {
        let doc = json!({
            "innings": [{
                "team": "A",
                "overs": [{
                    "over": 7,
                    "deliveries": [{"batter": "X", "bowler": "Y"}]
                }]
            }]
        });

        let rows = flatten_deliveries(&doc, "m1");
        assert_eq!(rows[0].ball, 0);
        assert_eq!(rows[0].delivery_id, "m1_1.7.0");
        assert_eq!(rows[0].runs_total, 0);
    }
}
