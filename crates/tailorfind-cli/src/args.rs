use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for tailorfind
#[derive(Debug, Parser)]
#[command(
    name = "tailorfind",
    version,
    about = "Search a tailor directory by name and distance"
)]
pub struct CliArgs {
    /// Path to a JSON or JSON.gz file with the tailor records
    #[arg(short = 'i', long = "input", global = true, env = "TAILORFIND_INPUT")]
    pub input: Option<PathBuf>,

    /// Base URL of the hosted REST backend (used when no --input is given)
    #[arg(long = "api-url", global = true, env = "TAILORFIND_API_URL")]
    pub api_url: Option<String>,

    /// Public API key for the REST backend
    #[arg(long = "api-key", global = true, env = "TAILORFIND_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Table holding the tailor records
    #[arg(long = "table", global = true, env = "TAILORFIND_TABLE", default_value = "tailors")]
    pub table: String,

    /// JSON file with a replacement filter catalog: [{"id", "label", "radius_km"}]
    #[arg(long = "filters-file", global = true)]
    pub filters_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the loaded records
    Stats,

    /// List the selectable distance filters
    Filters,

    /// Search tailors by name, optionally within a distance of a position
    Search(SearchArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Substring to match against tailor names (case-insensitive)
    #[arg(default_value = "")]
    pub query: String,

    /// Id of the distance filter to apply (see `filters`)
    #[arg(short = 'f', long = "filter")]
    pub filter: Option<String>,

    /// Latitude of the current position
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Behave as if location permission was declined
    #[arg(long, conflicts_with_all = ["lat", "lon", "fail_location"])]
    pub deny_location: bool,

    /// Behave as if the position fix failed with this reason
    #[arg(long, value_name = "REASON", conflicts_with_all = ["lat", "lon"])]
    pub fail_location: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
