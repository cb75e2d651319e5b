use std::path::PathBuf;

use clap::Parser;
use rootcause::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use xwdata::catalog::{CatalogSource, DEFAULT_API_BASE, FileSource, HttpSource};
use xwdata::text::KeywordTable;
use xwdata::{ConvertOptions, convert};

/// Converts the FFG squad builder catalog into xwing-data pilot files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Root of the xwing-data checkout. Ship files are merged into
    /// `<data-root>/pilots/<faction>/<ship>.json`, which must already exist.
    #[clap(long, default_value = "data")]
    data_root: PathBuf,

    /// Base URL of the squad builder API
    #[clap(long, default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Read the app metadata from a local dump instead of the API
    #[clap(long, requires = "cards_file")]
    metadata_file: Option<PathBuf>,

    /// Read the cards from a local dump instead of the API
    #[clap(long, requires = "metadata_file")]
    cards_file: Option<PathBuf>,

    /// Keyword table (JSON) used instead of the builtin one
    #[clap(long)]
    keywords: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed JSON
    #[clap(long)]
    compact: bool,

    /// Log per-card details
    #[clap(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<(), Report> {
    let args = Args::parse();
    init_logging(args.verbose);

    let keywords = match &args.keywords {
        Some(path) => KeywordTable::from_json_file(path).map_err(|e| {
            rootcause::report!("Failed to load keyword table {}: {e}", path.display())
        })?,
        None => KeywordTable::builtin()
            .map_err(|e| rootcause::report!("Failed to build keyword table: {e}"))?,
    };

    let source: Box<dyn CatalogSource> = match (args.metadata_file, args.cards_file) {
        (Some(metadata_file), Some(cards_file)) => {
            Box::new(FileSource::new(metadata_file, cards_file))
        }
        _ => Box::new(HttpSource::new(args.api_base)),
    };

    let options = ConvertOptions::builder()
        .data_root(args.data_root)
        .pretty_print(!args.compact)
        .build();
    let store = options.store();
    info!("Merging into {}", store.root().display());

    convert(source.as_ref(), &keywords, &store)
        .map_err(|e| rootcause::report!("Conversion failed: {e}"))?;

    Ok(())
}
