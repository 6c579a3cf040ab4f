mod config;
mod guidance;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use std::process::ExitCode;
use suitefix_domain::{Pipeline, StatusExpectationRewrite};
use suitefix_edit::{FileEvent, RewriteOptions, replace_in_file, rewrite_files};
use suitefix_types::ToolInfo;
use suitefix_types::outcome::FileStatus;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "suitefix",
    version,
    about = "One-shot rewrites for migrating the Java test suite."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Turn setter-built request fixtures into constructor calls.
    Constructors(ConstructorsArgs),
    /// Swap an expected HTTP status in the injection tests (401 -> 400 by default).
    StatusCodes(StatusCodesArgs),
    /// Print the cheat sheet for adapting service tests to a mocked validator.
    Guidance(GuidanceArgs),
}

#[derive(Debug, Parser)]
struct ConstructorsArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Directory of the test files (default: the security test package).
    #[arg(long)]
    dir: Option<Utf8PathBuf>,

    /// Test file names inside the directory; repeat to list several.
    #[arg(long = "file")]
    files: Vec<String>,

    /// Print the patch instead of writing files.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct StatusCodesArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// File to update (default: SqlInjectionTest.java in the security test package).
    #[arg(long)]
    file: Option<Utf8PathBuf>,

    /// Print the patch instead of writing the file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Parser)]
struct GuidanceArgs {
    /// Test class to scan for tests that still need a validator mock. Read-only.
    #[arg(long = "suggest")]
    suggest: Vec<Utf8PathBuf>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Constructors(args) => cmd_constructors(args),
        Command::StatusCodes(args) => cmd_status_codes(args),
        Command::Guidance(args) => cmd_guidance(args),
    }
}

fn cmd_constructors(args: ConstructorsArgs) -> anyhow::Result<()> {
    let file_config =
        config::load_or_default(&args.repo_root).context("load suitefix.toml config")?;
    let targets = ConfigMerger::new(file_config, &args.repo_root)
        .merge_constructor_args(args.dir.as_deref(), &args.files);
    debug!("constructor targets: {:?}", targets);

    let pipeline = Pipeline::constructors();
    let opts = RewriteOptions {
        dry_run: args.dry_run,
    };
    let text = matches!(args.format, OutputFormat::Text);

    let (report, patch) = rewrite_files(
        &targets.dir,
        &targets.files,
        &pipeline,
        tool_info(),
        &opts,
        |event| {
            if text {
                print_progress(event);
            }
        },
    )
    .context("rewrite constructors")?;

    match args.format {
        OutputFormat::Text => {
            if args.dry_run {
                print!("{}", patch);
                println!(
                    "\nDone! Would fix {} files (dry run, nothing written).",
                    report.summary.files_changed
                );
            } else {
                println!("\nDone! Fixed {} files.", report.summary.files_changed);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    info!(
        changed = report.summary.files_changed,
        missing = report.summary.files_missing,
        "constructor rewrite finished"
    );
    Ok(())
}

fn print_progress(event: FileEvent<'_>) {
    match event {
        FileEvent::Started(path) => println!("Processing {}...", path),
        FileEvent::Finished(outcome) => match outcome.status {
            FileStatus::Changed => println!("  ✓ Fixed {}", outcome.path),
            FileStatus::Unchanged => println!("  - No changes needed for {}", outcome.path),
            FileStatus::Missing => println!("WARNING: File not found: {}", outcome.path),
        },
    }
}

fn cmd_status_codes(args: StatusCodesArgs) -> anyhow::Result<()> {
    let file_config =
        config::load_or_default(&args.repo_root).context("load suitefix.toml config")?;
    let target =
        ConfigMerger::new(file_config, &args.repo_root).merge_status_args(args.file.as_deref());
    debug!("status target: {:?}", target);

    let rewrite = StatusExpectationRewrite::new(target.from, target.to);
    let opts = RewriteOptions {
        dry_run: args.dry_run,
    };
    let (outcome, patch) = replace_in_file(&target.file, &rewrite, &opts)
        .with_context(|| format!("update status expectations in {}", target.file))?;

    match args.format {
        OutputFormat::Text => {
            if args.dry_run {
                print!("{}", patch);
            } else {
                println!("✓ Updated {}", display_name(&outcome.path));
            }
            if rewrite == StatusExpectationRewrite::default() {
                println!("\n✅ All SQL Injection tests updated to expect 400 Bad Request");
                println!("   (This is correct - validation layer prevents SQL injection)");
            } else {
                println!(
                    "\n✅ {} expectation(s) changed to {}",
                    outcome.occurrences_before, outcome.to
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }
    Ok(())
}

fn cmd_guidance(args: GuidanceArgs) -> anyhow::Result<()> {
    print!("{}", guidance::render_guidance());

    for path in &args.suggest {
        let source = fs::read_to_string(path).with_context(|| format!("read {}", path))?;
        let suggestions = suitefix_domain::mock::suggest(&source);
        print!("{}", guidance::render_suggestions(path.as_str(), &suggestions));
    }
    Ok(())
}

fn display_name(path: &Utf8Path) -> &str {
    path.file_name().unwrap_or(path.as_str())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "suitefix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
