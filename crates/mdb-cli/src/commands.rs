use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use mdb_diff::{ChangeKind, Diff, Differ, DifferConfig};
use mdb_fixup::remove_duplicates;
use mdb_types::{as_record, Record, Value};
use tracing::debug;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Diff(args) => cmd_diff(args, config, cli.format),
        Command::Patch(args) => cmd_patch(args, config),
        Command::Dedup(args) => cmd_dedup(args, cli.format),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DifferConfig> {
    let Some(path) = path else {
        return Ok(DifferConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: DifferConfig =
        toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))?;
    debug!(?config, "loaded differ config");
    Ok(config)
}

fn load_record(path: &Path) -> anyhow::Result<Record> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(as_record(&value, &path.display().to_string())?.clone())
}

fn cmd_diff(args: DiffArgs, config: DifferConfig, format: OutputFormat) -> anyhow::Result<()> {
    let mut original = load_record(&args.original)?;
    let mut modified = load_record(&args.modified)?;
    if args.dedup {
        remove_duplicates(&mut original).context("dedup of original failed")?;
        remove_duplicates(&mut modified).context("dedup of modified failed")?;
    }

    let mut diff = Differ::new(config).calculate(&original, &modified);
    for reference_type in &args.drop_reference_types {
        diff.remove_references_of_type(reference_type);
    }
    for role in &args.drop_roles {
        diff.eliminate_contributors_with_role(role);
    }
    if !args.only.is_empty() {
        diff.retain_only(&args.only);
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&diff)?),
        OutputFormat::Text => print_diff(&diff, args.long),
    }
    Ok(())
}

fn print_diff(diff: &Diff, long: bool) {
    if !diff.has_diff() {
        println!("{} No changes.", "✓".green().bold());
        return;
    }

    if long {
        for line in diff.explain_long().lines() {
            let styled = if line.contains(" added: ") {
                line.green()
            } else if line.contains(" removed: ") {
                line.red()
            } else {
                line.yellow()
            };
            println!("{styled}");
        }
    } else {
        print!("{}", diff.explain_contributor_changes());
        for kind in ChangeKind::ALL {
            let fields: Vec<&str> = diff.mapping(kind).keys().map(String::as_str).collect();
            if fields.is_empty() {
                continue;
            }
            let label = match kind {
                ChangeKind::Added => "Added:".green(),
                ChangeKind::Modified => "Modified:".yellow(),
                ChangeKind::Removed => "Removed:".red(),
            };
            println!("{} {}", label.bold(), fields.join(", "));
        }
    }

    println!(
        "{} added, {} modified, {} removed",
        diff.additions().to_string().bold(),
        diff.modifications().to_string().bold(),
        diff.removals().to_string().bold()
    );
}

fn cmd_patch(args: PatchArgs, config: DifferConfig) -> anyhow::Result<()> {
    let original = load_record(&args.original)?;
    let modified = load_record(&args.modified)?;
    let diff = Differ::new(config).calculate(&original, &modified);
    let patched = diff.applied_to(&original);
    println!("{}", serde_json::to_string_pretty(&patched)?);
    Ok(())
}

fn cmd_dedup(args: DedupArgs, format: OutputFormat) -> anyhow::Result<()> {
    let mut record = load_record(&args.record)?;
    let dropped = remove_duplicates(&mut record)
        .with_context(|| format!("cannot dedup {}", args.record.display()))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    if format == OutputFormat::Text {
        eprintln!("{} Removed {} duplicate(s).", "✓".green(), dropped.to_string().bold());
    }
    Ok(())
}
