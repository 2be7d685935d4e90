//! # Crease - ball-by-ball match flattening
//!
//! A pipeline for flattening nested ball-by-ball cricket match documents
//! (one JSON file per match, grouped into per-format directories) into
//! relational match and delivery tables, one pair per format.
//!
//! ## Modules
//!
//! - **flatten**: pure JSON-to-row transforms (id synthesis, match metadata,
//!   delivery flattening)
//! - **store**: SQLite materialization of the per-format tables
//! - **pipeline**: directory scanning and per-format aggregation
//!
//! ## Quick Start
//!
//! ```rust
//! use crease::{flatten_document, Format};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({
//!     "info": {
//!         "dates": ["2021-05-01"],
//!         "teams": ["A", "B"]
//!     },
//!     "innings": [{
//!         "team": "A",
//!         "overs": [{
//!             "over": 0,
//!             "deliveries": [
//!                 {"batter": "X", "bowler": "Y", "ball": 1,
//!                  "runs": {"batter": 4, "extras": 0, "total": 4}}
//!             ]
//!         }]
//!     }]
//! });
//!
//! let (record, deliveries) = flatten_document(&doc, Format::Odi)?;
//!
//! assert_eq!(record.season, "2021");
//! assert_eq!(deliveries.len(), 1);
//! assert_eq!(deliveries[0].match_id, record.match_id);
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

pub mod flatten;
pub mod pipeline;
pub mod store;

// Re-export commonly used types for convenience
pub use flatten::{extract_match, flatten_deliveries, DeliveryRecord, FlattenError, Format, MatchRecord};
pub use pipeline::{run, RunSummary};
pub use store::Store;

/// Flatten one parsed match document into its metadata row and delivery
/// rows. The delivery rows reference the record's synthesized `match_id`.
pub fn flatten_document(
    doc: &Value,
    format: Format,
) -> Result<(MatchRecord, Vec<DeliveryRecord>), FlattenError> {
    let record = extract_match(doc, format)?;
    let deliveries = flatten_deliveries(doc, &record.match_id);
    Ok((record, deliveries))
}
