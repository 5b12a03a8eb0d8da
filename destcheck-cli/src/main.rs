mod config;
mod explain;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use config::{CliOverrides, ConfigMerger};
use destcheck_core::adapters::{FsDatasetSource, FsWritePort};
use destcheck_core::{run_validation, RunOutcome, ValidationSettings};
use destcheck_render::render_console_summary;
use destcheck_types::report::ReportToolInfo;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "destcheck",
    version,
    about = "Validation and auto-remediation for travel-destination datasets."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate a dataset and write the report (optionally repairing records).
    Validate(ValidateArgs),
    /// Explain what a rule checks and how to remediate its findings.
    Explain(ExplainArgs),
    /// List all rules with their scope, severity and fixability.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct ValidateArgs {
    /// Dataset directory of `*.json` city files, or a single dataset file.
    #[arg(default_value = ".")]
    path: Utf8PathBuf,

    /// Apply automatic repairs and write repaired records back.
    #[arg(long, default_value_t = false)]
    fix: bool,

    /// In fix mode, report the repairs without touching dataset files.
    #[arg(long, default_value_t = false, requires = "fix")]
    no_write: bool,

    /// Skip backup copies of rewritten dataset files.
    #[arg(long, default_value_t = false)]
    no_backup: bool,

    /// Output directory for report artifacts (default: the dataset directory).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Base name for `<name>.json` and `<name>.md` (default: validation_report).
    #[arg(long)]
    report_name: Option<String>,

    /// Allowlist patterns for rule ids.
    #[arg(long)]
    allow: Vec<String>,

    /// Denylist patterns for rule ids.
    #[arg(long)]
    deny: Vec<String>,

    /// Check cities on a thread pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Console output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Config file (default: destcheck.toml next to the dataset).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Rule id to explain (e.g., "poi.fields", "capitalization").
    rule_id: String,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match real_main(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

fn real_main(cli: Cli) -> anyhow::Result<u8> {
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args),
        Command::Explain(args) => cmd_explain(args).map(|_| 0),
        Command::ListRules(args) => cmd_list_rules(args).map(|_| 0),
    }
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<u8> {
    let file_config = config::load_or_default(args.config.as_deref(), &args.path)
        .context("load destcheck.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_validate_args(&CliOverrides {
        allow: &args.allow,
        deny: &args.deny,
        parallel: args.parallel,
        report_name: args.report_name.as_deref(),
        out_dir: args.out_dir.as_deref(),
        no_backup: args.no_backup,
    });
    debug!(
        "merged config: allow={:?}, deny={:?}, parallel={}, report_name={}",
        merged.allow, merged.deny, merged.parallel, merged.report_name
    );

    let settings = ValidationSettings {
        input: args.path.clone(),
        out_dir: merged.out_dir,
        report_name: merged.report_name,
        fix_mode: args.fix,
        parallel: merged.parallel,
        allow: merged.allow,
        deny: merged.deny,
        poi_prefixes: merged.poi_prefixes,
        persist: !args.no_write,
        backup_enabled: merged.backups.enabled,
        backup_suffix: merged.backups.suffix,
    };

    let source = FsDatasetSource::new(settings.input.clone(), settings.load_options());
    let outcome = run_validation(&settings, &source, &FsWritePort, tool_info())
        .with_context(|| format!("validate {}", args.path))?;

    print_outcome(&outcome, args.format)?;
    info!(
        status = %outcome.status(),
        report = %outcome.report_json,
        "validation finished"
    );

    u8::try_from(outcome.exit_code()).context("exit code out of range")
}

fn print_outcome(outcome: &RunOutcome, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            print!("{}", render_console_summary(&outcome.report));
            println!();
            println!("report: {}", outcome.report_json);
            println!("report: {}", outcome.report_md);
            for path in &outcome.persisted {
                println!("updated: {}", path);
            }
            for path in &outcome.backups {
                println!("backup: {}", path);
            }
        }
        OutputFormat::Json => {
            let s = serde_json::to_string_pretty(&outcome.report).context("serialize report")?;
            println!("{}", s);
        }
    }
    Ok(())
}

fn tool_info() -> ReportToolInfo {
    ReportToolInfo {
        name: "destcheck".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<()> {
    let Some(meta) = explain::lookup_rule_query(&args.rule_id) else {
        let available = explain::list_rule_ids().join(", ");
        anyhow::bail!(
            "unknown rule '{}'\n\nAvailable rules: {}\n\nUse 'destcheck list-rules' for more details.",
            args.rule_id,
            available
        );
    };
    print!("{}", explain::render_explanation(meta));
    Ok(())
}

fn cmd_list_rules(args: ListRulesArgs) -> anyhow::Result<()> {
    match args.format {
        OutputFormat::Text => print!("{}", explain::render_rule_table()),
        OutputFormat::Json => {
            let rules: Vec<_> = destcheck_domain::builtin_rule_metas()
                .into_iter()
                .map(explain::rule_json)
                .collect();
            println!("{}", serde_json::to_string_pretty(&rules)?);
        }
    }
    Ok(())
}
