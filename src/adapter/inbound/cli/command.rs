//! Command-line interface definitions.
//!
//! Each invocation is one dashboard interaction: pick a dashboard, a view,
//! and a facet selection, and the page is printed.

use chrono::Month;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::paths;
use crate::application::dashboard::{InventoryView, SalesView};
use crate::domain::facet::{is_wildcard, ALL_MONTHS};
use crate::domain::sales::month_abbrev;

/// Retail inventory and sales dashboards for the terminal
#[derive(Parser, Debug)]
#[command(name = "retaildash")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.retaildash/config.toml]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the inventory dashboard
    Inventory(InventoryArgs),

    /// Show the sales dashboard
    Sales(SalesArgs),

    /// List the choices of every facet on a dashboard
    Facets(FacetsArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Views of the inventory dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum InventoryViewArg {
    #[default]
    Overview,
    Stores,
    Products,
}

impl From<InventoryViewArg> for InventoryView {
    fn from(view: InventoryViewArg) -> Self {
        match view {
            InventoryViewArg::Overview => Self::Overview,
            InventoryViewArg::Stores => Self::Stores,
            InventoryViewArg::Products => Self::Products,
        }
    }
}

/// Views of the sales dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SalesViewArg {
    #[default]
    Overview,
    Stores,
    Products,
    Trends,
}

impl From<SalesViewArg> for SalesView {
    fn from(view: SalesViewArg) -> Self {
        match view {
            SalesViewArg::Overview => Self::Overview,
            SalesViewArg::Stores => Self::Stores,
            SalesViewArg::Products => Self::Products,
            SalesViewArg::Trends => Self::Trends,
        }
    }
}

/// Arguments for `retaildash inventory`.
#[derive(Args, Debug, Default)]
pub struct InventoryArgs {
    /// Page to show
    #[arg(value_enum, default_value_t)]
    pub view: InventoryViewArg,

    /// Store facet ("All Stores" or omitted for every store)
    #[arg(long)]
    pub store: Option<String>,

    /// Category facet
    #[arg(long)]
    pub category: Option<String>,

    /// Collection facet
    #[arg(long)]
    pub collection: Option<String>,

    /// Gender facet
    #[arg(long)]
    pub gender: Option<String>,

    /// Store to drill into on the stores page when no store facet is set
    #[arg(long)]
    pub focus_store: Option<String>,

    /// Category to drill into on the products page
    #[arg(long)]
    pub focus_category: Option<String>,

    /// Collection to drill into on the products page
    #[arg(long)]
    pub focus_collection: Option<String>,
}

/// Arguments for `retaildash sales`.
#[derive(Args, Debug, Default)]
pub struct SalesArgs {
    /// Page to show
    #[arg(value_enum, default_value_t)]
    pub view: SalesViewArg,

    /// Year facet; defaults to the latest year in the data, `all` for every year
    #[arg(long, value_parser = parse_year)]
    pub year: Option<YearArg>,

    /// Month facet (Jan..Dec or `all`)
    #[arg(long, value_parser = parse_month)]
    pub month: Option<String>,

    /// Store facet
    #[arg(long)]
    pub store: Option<String>,

    /// Product category facet
    #[arg(long)]
    pub category: Option<String>,
}

/// A `--year` value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YearArg {
    All,
    Year(i32),
}

/// Parse `--year`: a four-digit year, `all`, or "All Years".
pub fn parse_year(raw: &str) -> Result<YearArg, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("all") || raw.eq_ignore_ascii_case("all years") {
        return Ok(YearArg::All);
    }
    raw.parse::<i32>()
        .map(YearArg::Year)
        .map_err(|_| format!("expected a year like 2025 or 'all', got '{raw}'"))
}

/// Parse `--month` into its calendar abbreviation; full names and any
/// letter case are accepted. Wildcards pass through unchanged.
pub fn parse_month(raw: &str) -> Result<String, String> {
    let raw = raw.trim();
    if is_wildcard(raw, ALL_MONTHS) {
        return Ok(raw.to_string());
    }
    raw.parse::<Month>()
        .map(|month| month_abbrev(month).to_string())
        .map_err(|_| format!("expected a month like Jan or 'all', got '{raw}'"))
}

/// Dashboards whose facets can be listed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DashboardArg {
    Inventory,
    Sales,
}

/// Arguments for `retaildash facets`.
#[derive(Args, Debug)]
pub struct FacetsArgs {
    /// Dashboard to list facets for
    #[arg(value_enum)]
    pub dashboard: DashboardArg,
}

/// Subcommands for `retaildash config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Write a configuration file with every default spelled out.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show,
    /// Validate the configuration file.
    Validate,
}

/// Arguments for `config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,
    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
