// file: src/main.rs
// description: commandline application entry point
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use notes_digest::utils::logging::{
    format_error, format_info, format_step, format_success, format_warning, init_logger,
};
use notes_digest::{Config, PipelineOrchestrator, RunReport};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "notes_digest")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Builds a JSON index and README listing from a tree of markdown notes", long_about = None)]
struct Cli {
    /// Notes root. Falls back to `source.root` from the configuration.
    #[arg(value_name = "ROOT", env = "NOTES_DIGEST_ROOT")]
    root: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    /// Directory for posts.json and the listing page.
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Also write the run report as JSON.
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[arg(long, action = ArgAction::SetTrue)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logger(cli.color, cli.verbose);
    colored::control::set_override(cli.color);

    info!("Notes Digest");
    info!("Loading configuration from: {}", cli.config.display());

    let mut config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    if let Some(output) = cli.output {
        config.output.dir = Some(output);
    }
    if cli.no_progress {
        config.pipeline.show_progress = false;
    }

    let root = cli.root.unwrap_or_else(|| config.source.root.clone());

    let orchestrator = PipelineOrchestrator::new(config).context("Invalid configuration")?;
    let report = match orchestrator.run(&root).await {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{}", format_error(&format!("Digest failed: {}", e)));
            return Err(e).with_context(|| format!("Failed to digest {}", root.display()));
        }
    };

    print_summary(&report);

    if let Some(path) = cli.report {
        write_report(&path, &report)?;
        println!("{}", format_info(&format!("Report written to {}", path.display())));
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    println!();
    println!(
        "{}",
        format_step(1, 3, &format!("Discovered {} notes", report.documents_discovered))
    );
    println!(
        "{}",
        format_step(
            2,
            3,
            &format!(
                "Extracted {} records across {} categories",
                report.records_extracted,
                report.categories.len()
            )
        )
    );
    println!(
        "{}",
        format_step(3, 3, &format!("Finished in {} ms", report.duration_ms))
    );

    for failure in &report.failures {
        println!("{}", format_warning(&format!("Skipped {}", failure)));
    }
    for warning in &report.date_warnings {
        println!(
            "{}",
            format_warning(&format!(
                "{}: unrecognized date \"{}\"",
                warning.path, warning.value
            ))
        );
    }
    for warning in &report.discovery_warnings {
        println!(
            "{}",
            format_warning(&format!("{}: {}", warning.path.display(), warning.message))
        );
    }

    let wrote = format!(
        "Wrote {} and {}",
        report.index_path.display(),
        report.page_path.display()
    );
    if report.has_issues() {
        println!(
            "{}",
            format_warning(&format!("{} ({:.1}% extracted)", wrote, report.success_rate()))
        );
    } else {
        println!("{}", format_success(&wrote));
    }
}

fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write run report to {}", path.display()))?;
    Ok(())
}
