//! Clap derive structures for the `mistly` CLI.
//!
//! Region, token and MSP id come from the selected config profile; the
//! command line only picks the profile and the files to read or write.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Default worksheet holding the deployment template.
pub const DEFAULT_SHEET: &str = "Org Details";

/// Default inventory report path.
pub const DEFAULT_INVENTORY_FILE: &str = "msp_inventory.csv";

// ── Top-Level CLI ────────────────────────────────────────────────────

/// mistly -- provision and inventory Juniper Mist cloud tenants
#[derive(Debug, Parser)]
#[command(
    name = "mistly",
    version,
    about = "Provision and inventory Juniper Mist cloud tenants",
    long_about = "Provision a new Mist organization from a deployment workbook \
        (clone org, create sites, set site variables), or crawl an MSP \
        account into a flat per-device CSV inventory.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "MISTLY_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "MISTLY_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Clone an org and create its sites from a deployment workbook
    #[command(alias = "prov")]
    Provision(ProvisionArgs),

    /// Crawl the profile's MSP and write a per-device CSV report
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// List known Mist cloud regions
    Regions,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Provision ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ProvisionArgs {
    /// Deployment workbook (.xlsx)
    pub workbook: PathBuf,

    /// Worksheet holding the deployment template
    #[arg(long, short = 's', default_value = DEFAULT_SHEET)]
    pub sheet: String,
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InventoryArgs {
    /// CSV file to write
    #[arg(long, short = 'f', default_value = DEFAULT_INVENTORY_FILE)]
    pub output_file: PathBuf,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file location
    Path,

    /// Show the loaded configuration (tokens masked)
    Show,

    /// Store the active profile's API token in the system keyring (read from stdin)
    SetToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
