use serde::{Deserialize, Serialize};

/// The four match formats the pipeline knows about.
///
/// Formats partition the storage layer: each format owns one
/// `{format}_matches` and one `{format}_deliveries` table, and the names are
/// fixed here so the schema stays statically knowable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Test,
    Odi,
    T20,
    League,
}

impl Format {
    pub const ALL: [Format; 4] = [Format::Test, Format::Odi, Format::T20, Format::League];

    /// Canonical lowercase name, used as the table-name prefix.
    pub fn name(&self) -> &'static str {
        match self {
            Format::Test => "test",
            Format::Odi => "odi",
            Format::T20 => "t20",
            Format::League => "league",
        }
    }

    /// Directory names this format answers to under the data root.
    ///
    /// The upstream fetcher writes the franchise-league feed into an `ipl`
    /// directory.
    pub fn dir_names(&self) -> &'static [&'static str] {
        match self {
            Format::Test => &["test"],
            Format::Odi => &["odi"],
            Format::T20 => &["t20"],
            Format::League => &["league", "ipl"],
        }
    }

    pub fn matches_table(&self) -> &'static str {
        match self {
            Format::Test => "test_matches",
            Format::Odi => "odi_matches",
            Format::T20 => "t20_matches",
            Format::League => "league_matches",
        }
    }

    pub fn deliveries_table(&self) -> &'static str {
        match self {
            Format::Test => "test_deliveries",
            Format::Odi => "odi_deliveries",
            Format::T20 => "t20_deliveries",
            Format::League => "league_deliveries",
        }
    }

    /// Parse a user-supplied format name. Accepts the canonical names plus
    /// `ipl` as an alias for the league format.
    pub fn parse(name: &str) -> Option<Format> {
        match name.to_ascii_lowercase().as_str() {
            "test" => Some(Format::Test),
            "odi" => Some(Format::Odi),
            "t20" => Some(Format::T20),
            "league" | "ipl" => Some(Format::League),
            _ => None,
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a `{format}_matches` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: String,
    pub format: Format,
    pub season: String,
    pub date: String,
    pub venue: String,
    pub gender: String,
    /// The two team names, comma-joined in document order.
    pub teams: String,
    pub toss_winner: Option<String>,
    pub toss_decision: Option<String>,
    pub winner: String,
    pub by_runs: u64,
    pub by_wickets: u64,
    /// Comma-joined player names; empty when the award is absent.
    pub player_of_match: String,
}

/// One row of a `{format}_deliveries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    pub delivery_id: String,
    pub match_id: String,
    /// 1-based innings position within the match.
    pub inning: u64,
    pub batting_team: Option<String>,
    pub bowling_team: Option<String>,
    /// 0-based over number.
    pub over: u64,
    /// Ball number within the over, as carried by the source feed.
    pub ball: u64,
    pub batter: Option<String>,
    pub bowler: Option<String>,
    pub runs_batter: u64,
    pub runs_extras: u64,
    pub runs_total: u64,
    /// First extras type on the ball, when any extras were conceded.
    pub extras_type: Option<String>,
    pub is_wicket: bool,
    /// Kind of the first dismissal on the ball, when one occurred.
    pub wicket_kind: Option<String>,
    pub player_out: Option<String>,
}
