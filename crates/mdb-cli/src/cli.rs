use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "mdbdiff",
    about = "Diff, patch and deduplicate mdb editorial records",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with differ settings (ignored fields, tolerance, ...)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what changed between two records
    Diff(DiffArgs),
    /// Apply the changes between two records onto the first one
    Patch(PatchArgs),
    /// Collapse duplicate contributors and locations in a record
    Dedup(DedupArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub original: PathBuf,
    pub modified: PathBuf,
    /// Only report these fields
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
    /// Ignore references of this type
    #[arg(long = "drop-reference-type")]
    pub drop_reference_types: Vec<String>,
    /// Ignore contributors with this role resId
    #[arg(long = "drop-role")]
    pub drop_roles: Vec<String>,
    /// Run the dedup fixup on both records first
    #[arg(long)]
    pub dedup: bool,
    /// One line per changed item
    #[arg(long)]
    pub long: bool,
}

#[derive(Args)]
pub struct PatchArgs {
    pub original: PathBuf,
    pub modified: PathBuf,
}

#[derive(Args)]
pub struct DedupArgs {
    pub record: PathBuf,
}
