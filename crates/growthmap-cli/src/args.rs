use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for growthmap
#[derive(Debug, Parser)]
#[command(
    name = "growthmap",
    version,
    about = "Inspect customer growth per province, city and district, and walk the drill-down"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the sources live. Unset paths default to files inside `--data-dir`.
#[derive(Debug, Args)]
pub struct DataArgs {
    /// Directory holding customers.csv and the three boundary files
    #[arg(short = 'd', long, env = "GROWTHMAP_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Customer table (CSV, optionally .gz)
    #[arg(long, env = "GROWTHMAP_CUSTOMERS", global = true)]
    pub customers: Option<PathBuf>,

    /// Province boundaries (GeoJSON)
    #[arg(long, env = "GROWTHMAP_PROVINCES", global = true)]
    pub provinces: Option<PathBuf>,

    /// City boundaries (GeoJSON)
    #[arg(long, env = "GROWTHMAP_CITIES", global = true)]
    pub cities: Option<PathBuf>,

    /// District boundaries (GeoJSON)
    #[arg(long, env = "GROWTHMAP_DISTRICTS", global = true)]
    pub districts: Option<PathBuf>,

    /// Binary cache file of the built database
    #[arg(long, env = "GROWTHMAP_CACHE", global = true)]
    pub cache: Option<PathBuf>,

    /// Always build from the sources and never touch the cache
    #[arg(long, global = true)]
    pub no_cache: bool,
}

/// A drill-down state given on the command line.
#[derive(Debug, Args)]
pub struct SelectionArgs {
    /// Selected province (WADMPR)
    #[arg(long)]
    pub province: Option<String>,

    /// Selected city (WADMKK); needs --province
    #[arg(long, requires = "province")]
    pub city: Option<String>,

    /// Selected district (WADMKC); needs --city
    #[arg(long, requires = "city")]
    pub district: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a summary of the database contents
    Stats,

    /// Print the active subset, totals and viewport for a selection
    View {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Cap for the computed zoom level
        #[arg(long)]
        max_zoom: Option<f64>,
    },

    /// Write the rendered GeoJSON layers for a selection
    Export {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Apply a script of user actions, printing the view after each
    ///
    /// One action per line: `click <json properties>`, `back-province`,
    /// `back-city` or `show`. Blank lines and `#` comments are skipped.
    Replay {
        /// Script file (default: stdin)
        script: Option<PathBuf>,
    },

    /// Rebuild the binary cache from the sources
    BuildCache,
}
