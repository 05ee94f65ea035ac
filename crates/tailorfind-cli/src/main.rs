//! tailorfind: command-line interface for tailorfind-core
//!
//! Loads the tailor directory once, takes the current position from flags,
//! and prints the filtered list the same way the directory screen derives
//! it: name substring match plus an optional distance filter that fails
//! closed when no position is available.
//!
//! Usage examples
//! --------------
//!
//! - Show record statistics
//!   $ tailorfind --input tailors.json stats
//!
//! - List the distance filters
//!   $ tailorfind filters
//!
//! - Search by name
//!   $ tailorfind --input tailors.json search "ace"
//!
//! - Search within 5 km of a position
//!   $ tailorfind --input tailors.json search --filter within-5km --lat 51.5 --lon -0.1
//!
//! Data source
//! -----------
//!
//! `--input <path>` reads a `.json` or `.json.gz` array of records. Without
//! it, and when built with the `remote` feature, records are fetched from
//! `--api-url` / `--api-key` (or `TAILORFIND_API_URL` / `TAILORFIND_API_KEY`,
//! also read from a `.env` file).
mod args;

use crate::args::{CliArgs, Commands, SearchArgs};
use anyhow::{bail, Context};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tailorfind_core::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    tracing::debug!(command = ?args.command, "Starting");

    let catalog = match &args.filters_file {
        Some(path) => load_catalog(path)?,
        None => FilterCatalog::default(),
    };

    match &args.command {
        Commands::Filters => {
            for f in catalog.filters() {
                println!("{:<14} {} (≤ {} km)", f.id, f.label, f.radius_km);
            }
        }

        Commands::Stats => {
            let provider = record_provider(&args)?;
            let state = load_records(provider.as_ref()).await;
            if let Some(err) = state.error() {
                bail!("{err}");
            }
            let stats = DirectoryStats::from_records(state.records());
            println!("Directory statistics:");
            println!("  Tailors: {}", stats.records);
            println!("  With coordinates: {}", stats.with_coordinates);
            println!(
                "  Flagged with location but no coordinates: {}",
                stats.claims_without_coordinates
            );
        }

        Commands::Search(search) => {
            let records = record_provider(&args)?;
            let location = location_provider(search);

            let mut screen = DirectoryScreen::activate(records, location).with_catalog(catalog);
            screen.set_query(search.query.clone());
            if let Some(id) = &search.filter {
                if !screen.toggle_filter(id) {
                    bail!("Unknown filter '{id}'. Run `tailorfind filters` to list them.");
                }
            }

            let outcome = screen.settled().await;
            print_outcome(&outcome, search.json)?;
        }
    }

    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<FilterCatalog> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open filter catalog {}", path.display()))?;
    let catalog: FilterCatalog = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse filter catalog {}", path.display()))?;
    Ok(catalog.validated()?)
}

fn record_provider(args: &CliArgs) -> anyhow::Result<Arc<dyn RecordProvider>> {
    if let Some(path) = &args.input {
        #[cfg(feature = "json")]
        {
            return Ok(Arc::new(JsonFileRecordProvider::new(path)));
        }
        #[cfg(not(feature = "json"))]
        {
            bail!("Reading {} needs the `json` feature", path.display());
        }
    }

    match (&args.api_url, &args.api_key) {
        #[cfg(feature = "remote")]
        (Some(url), Some(key)) => {
            let config = RemoteConfig::new(url, key).with_table(&args.table);
            Ok(Arc::new(RestRecordProvider::new(config)?))
        }
        #[cfg(not(feature = "remote"))]
        (Some(_), Some(_)) => bail!("Fetching from the REST backend needs the `remote` feature"),
        _ => bail!("No record source: pass --input, or --api-url together with --api-key"),
    }
}

fn location_provider(search: &SearchArgs) -> Arc<dyn LocationProvider> {
    if search.deny_location {
        return Arc::new(StaticLocationProvider::denied());
    }
    if let Some(reason) = &search.fail_location {
        return Arc::new(StaticLocationProvider::failing(reason.clone()));
    }
    match (search.lat, search.lon) {
        (Some(lat), Some(lon)) => {
            Arc::new(StaticLocationProvider::granted(LocationSnapshot::new(lat, lon)))
        }
        _ => Arc::new(StaticLocationProvider::failing("no position given, pass --lat and --lon")),
    }
}

fn print_outcome(outcome: &FilterOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if let Some(msg) = outcome.message() {
        println!("{msg}");
        return Ok(());
    }

    for row in &outcome.rows {
        let r = &row.record;
        match row.distance_km {
            Some(d) => println!("{}, {:.1} km", r.name, d),
            None => println!("{}", r.name),
        }
        if let Some(addr) = r.address() {
            println!("    {addr}");
        }
        if let Some(phone) = &r.phone {
            println!("    {phone}");
        }
    }
    Ok(())
}
