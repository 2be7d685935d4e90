//! JSON-to-row transforms.
//!
//! Everything in this module is a pure function over a parsed match
//! document: no I/O and no storage concerns, so the flattening semantics are
//! testable in isolation. The pipeline module feeds documents in and carries
//! the rows to the store.

pub mod access;
pub mod deliveries;
pub mod error;
pub mod match_id;
pub mod metadata;
pub mod types;

pub use deliveries::flatten_deliveries;
pub use error::FlattenError;
pub use metadata::extract_match;
pub use types::{DeliveryRecord, Format, MatchRecord};
