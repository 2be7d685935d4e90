//! crease-load: flatten ball-by-ball match JSON into relational tables.
//!
//! Usage:
//!   # Load everything under data/raw_json into cricket_data.db
//!   crease-load
//!
//!   # Custom locations
//!   crease-load path/to/raw_json --database stats.db
//!
//!   # Only the one-day and T20 feeds
//!   crease-load --format odi --format t20

// Use MiMalloc allocator for better performance (recommended by simd-json)
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{bail, Result};
use clap::Parser;
use crease::flatten::types::Format;
use crease::pipeline;
use crease::store::Store;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crease-load")]
#[command(about = "Flatten ball-by-ball match JSON into relational tables", long_about = None)]
struct Args {
    /// Root directory containing one subdirectory per format
    #[arg(value_name = "DATA_DIR", default_value = "data/raw_json")]
    data_dir: PathBuf,

    /// SQLite database file to load
    #[arg(long, short = 'd', default_value = "cricket_data.db")]
    database: PathBuf,

    /// Restrict the run to these formats: test, odi, t20, league (default: all)
    #[arg(long = "format", value_name = "FORMAT")]
    formats: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info")).init();

    let args = Args::parse();

    let formats = if args.formats.is_empty() {
        Format::ALL.to_vec()
    } else {
        let mut formats = Vec::new();
        for name in &args.formats {
            match Format::parse(name) {
                Some(format) => formats.push(format),
                None => bail!("unknown format '{}' (expected test, odi, t20 or league)", name),
            }
        }
        formats
    };

    let mut store = Store::open(&args.database)?;
    let summary = pipeline::run(&mut store, &args.data_dir, &formats);

    if summary.formats_failed > 0 {
        bail!("{} format(s) failed to load", summary.formats_failed);
    }

    Ok(())
}
