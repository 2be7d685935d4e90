//! SQLite materialization of the per-format tables.
//!
//! Table names come from the closed [`Format`] enum, so the full set of
//! tables the store can ever hold is knowable without running anything.

use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;

use crate::flatten::types::{DeliveryRecord, Format, MatchRecord};

/// Handle on the destination database.
///
/// Opened once per pipeline run and passed down explicitly. The connection
/// closes when the handle drops, on success and failure paths alike.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open sqlite db at {}", path.display()))?;
        Ok(Store { conn })
    }

    /// In-memory database, used by tests.
    pub fn memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory sqlite db")?;
        Ok(Store { conn })
    }

    /// Read-only access for consumers issuing their own SQL.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Replace both of a format's tables with the given rows.
    ///
    /// Runs inside a single transaction: a reader sees either the previous
    /// run's pair of tables or this run's, never a mix. On error the
    /// transaction rolls back and the format's tables keep their pre-run
    /// state.
    pub fn replace_format(
        &mut self,
        format: Format,
        matches: &[MatchRecord],
        deliveries: &[DeliveryRecord],
    ) -> Result<()> {
        let matches_table = format.matches_table();
        let deliveries_table = format.deliveries_table();

        let tx = self.conn.transaction()?;

        // "over" is quoted: SQL keyword.
        tx.execute_batch(&format!(
            "DROP TABLE IF EXISTS {matches};
             CREATE TABLE {matches} (
                 match_id        TEXT PRIMARY KEY,
                 format          TEXT NOT NULL,
                 season          TEXT NOT NULL,
                 date            TEXT NOT NULL,
                 venue           TEXT NOT NULL,
                 gender          TEXT NOT NULL,
                 teams           TEXT NOT NULL,
                 toss_winner     TEXT,
                 toss_decision   TEXT,
                 winner          TEXT NOT NULL,
                 by_runs         INTEGER NOT NULL,
                 by_wickets      INTEGER NOT NULL,
                 player_of_match TEXT NOT NULL
             );
             DROP TABLE IF EXISTS {deliveries};
             CREATE TABLE {deliveries} (
                 delivery_id  TEXT NOT NULL,
                 match_id     TEXT NOT NULL,
                 inning       INTEGER NOT NULL,
                 batting_team TEXT,
                 bowling_team TEXT,
                 \"over\"       INTEGER NOT NULL,
                 ball         INTEGER NOT NULL,
                 batter       TEXT,
                 bowler       TEXT,
                 runs_batter  INTEGER NOT NULL,
                 runs_extras  INTEGER NOT NULL,
                 runs_total   INTEGER NOT NULL,
                 extras_type  TEXT,
                 is_wicket    INTEGER NOT NULL,
                 wicket_kind  TEXT,
                 player_out   TEXT
             );
             CREATE INDEX idx_{deliveries}_match_id ON {deliveries}(match_id);",
            matches = matches_table,
            deliveries = deliveries_table,
        ))
        .with_context(|| format!("failed to create {} tables", format))?;

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (match_id, format, season, date, venue, gender, teams,
                     toss_winner, toss_decision, winner, by_runs, by_wickets, player_of_match)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                matches_table
            ))?;
            for m in matches {
                stmt.execute(params![
                    m.match_id,
                    m.format.name(),
                    m.season,
                    m.date,
                    m.venue,
                    m.gender,
                    m.teams,
                    m.toss_winner,
                    m.toss_decision,
                    m.winner,
                    m.by_runs,
                    m.by_wickets,
                    m.player_of_match,
                ])?;
            }
        }

        {
            let mut stmt = tx.prepare(&format!(
                "INSERT INTO {} (delivery_id, match_id, inning, batting_team, bowling_team,
                     \"over\", ball, batter, bowler, runs_batter, runs_extras, runs_total,
                     extras_type, is_wicket, wicket_kind, player_out)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                deliveries_table
            ))?;
            for d in deliveries {
                stmt.execute(params![
                    d.delivery_id,
                    d.match_id,
                    d.inning,
                    d.batting_team,
                    d.bowling_team,
                    d.over,
                    d.ball,
                    d.batter,
                    d.bowler,
                    d.runs_batter,
                    d.runs_extras,
                    d.runs_total,
                    d.extras_type,
                    d.is_wicket,
                    d.wicket_kind,
                    d.player_out,
                ])?;
            }
        }

        tx.commit()
            .with_context(|| format!("failed to commit {} load", format))?;
        Ok(())
    }
}
