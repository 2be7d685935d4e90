//! Per-format aggregation: scan a data directory, flatten every match
//! document, and replace each format's tables in the destination store.
//!
//! Documents are independent of one another, so failures stay local: a file
//! that will not read or parse is logged and skipped, and a format whose
//! load fails leaves its tables at their pre-run state while the remaining
//! formats still run.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::Value;

use crate::flatten::types::{DeliveryRecord, Format, MatchRecord};
use crate::flatten_document;
use crate::store::Store;

/// Totals for one pipeline run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Formats whose tables were committed this run.
    pub formats_loaded: usize,
    /// Formats whose load failed and rolled back.
    pub formats_failed: usize,
    pub matches: usize,
    pub deliveries: usize,
    /// Documents dropped for document-level failures.
    pub documents_skipped: usize,
}

/// Run the whole pipeline over `data_dir` for the given formats.
///
/// `data_dir` holds one subdirectory per format (see [`Format::dir_names`]);
/// formats with no directory or no `.json` files are skipped with a log
/// line. Formats whose documents all fail to parse produce no tables.
pub fn run(store: &mut Store, data_dir: &Path, formats: &[Format]) -> RunSummary {
    let mut summary = RunSummary::default();

    for &format in formats {
        let dir = match format_dir(data_dir, format) {
            Some(dir) => dir,
            None => {
                log::info!("no {format} directory under {}, skipping", data_dir.display());
                continue;
            }
        };

        let files = match list_json_files(&dir) {
            Ok(files) => files,
            Err(e) => {
                log::error!("cannot scan {}: {e:#}", dir.display());
                continue;
            }
        };
        if files.is_empty() {
            log::info!("no JSON files in {}, skipping {format}", dir.display());
            continue;
        }

        log::info!("processing {} {format} files from {}", files.len(), dir.display());

        let (matches, deliveries, skipped) = flatten_format(format, &files);
        summary.documents_skipped += skipped;

        if matches.is_empty() {
            log::warn!("no {format} documents parsed, producing no tables");
            continue;
        }

        match store.replace_format(format, &matches, &deliveries) {
            Ok(()) => {
                log::info!(
                    "loaded {} rows into {} and {} rows into {}",
                    matches.len(),
                    format.matches_table(),
                    deliveries.len(),
                    format.deliveries_table(),
                );
                summary.formats_loaded += 1;
                summary.matches += matches.len();
                summary.deliveries += deliveries.len();
            }
            Err(e) => {
                log::error!("failed to load {format} tables: {e:#}");
                summary.formats_failed += 1;
            }
        }
    }

    log::info!(
        "run complete: {} matches and {} deliveries across {} formats ({} documents skipped)",
        summary.matches,
        summary.deliveries,
        summary.formats_loaded,
        summary.documents_skipped,
    );

    summary
}

/// Flatten every document for one format, accumulating match and delivery
/// rows. Duplicate match ids are collapsed keep-first; their delivery rows
/// are kept and end up attributed to the surviving match row.
fn flatten_format(
    format: Format,
    files: &[PathBuf],
) -> (Vec<MatchRecord>, Vec<DeliveryRecord>, usize) {
    let mut matches = Vec::new();
    let mut deliveries = Vec::new();
    let mut seen_ids = HashSet::new();
    let mut skipped = 0;

    for path in files {
        let doc = match read_document(path) {
            Ok(doc) => doc,
            Err(e) => {
                log::warn!("skipping {}: {e:#}", path.display());
                skipped += 1;
                continue;
            }
        };

        let (record, rows) = match flatten_document(&doc, format) {
            Ok(flattened) => flattened,
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                skipped += 1;
                continue;
            }
        };

        deliveries.extend(rows);

        if seen_ids.insert(record.match_id.clone()) {
            matches.push(record);
        } else {
            log::warn!(
                "duplicate match id {} from {}, keeping first row",
                record.match_id,
                path.display(),
            );
        }
    }

    (matches, deliveries, skipped)
}

/// Parse one match document. simd-json first for throughput; a failed fast
/// path is retried with serde_json so the reported error for a genuinely
/// malformed file comes from the reference parser.
fn read_document(path: &Path) -> Result<Value> {
    let bytes = fs::read(path).context("failed to read file")?;

    let mut fast = bytes.clone();
    if let Ok(value) = simd_json::serde::from_slice::<Value>(&mut fast) {
        return Ok(value);
    }

    serde_json::from_slice(&bytes).context("failed to parse JSON")
}

fn format_dir(data_dir: &Path, format: Format) -> Option<PathBuf> {
    format
        .dir_names()
        .iter()
        .map(|name| data_dir.join(name))
        .find(|path| path.is_dir())
}

/// `.json` files in `dir`, sorted by name so repeated runs insert rows in
/// the same order.
fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}
