use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use cmdline_rewrite::{RewriteReport, Rewriter};
use cmdline_rewrite_catalog::{
    ProjectConfig, ToolRegistry, bundle_tool_files, collect_catalog_paths,
    load_and_validate_tools,
};
use cmdline_rewrite_core::{RewriteConfig, validate_catalog};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

const PACKAGE_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(name = "cmdline-rewrite")]
#[command(about = "Rewrite legacy NAME=value command examples in documentation")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Rewrite documentation files.
    Rewrite(RewriteArgs),
    /// Rewrite a document read from stdin and print it to stdout.
    RewriteStdin(RewriteStdinArgs),
    /// Exit with status 1 when files still contain legacy invocations.
    Check(CheckArgs),
    /// Validate tool catalog files.
    Validate(ValidateArgs),
    /// Bundle tool catalog files into one catalog file.
    Bundle(BundleArgs),
}

#[derive(Debug, Args)]
struct SourceArgs {
    /// Tool catalog directories or bundle files, tried in order.
    #[arg(long = "catalog")]
    catalogs: Vec<PathBuf>,
    /// YAML project configuration (rewrite settings and catalog sources).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RewriteArgs {
    /// Documentation files to rewrite.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    #[command(flatten)]
    sources: SourceArgs,
    /// Overwrite each file with its rewritten text.
    #[arg(long, conflicts_with = "output")]
    in_place: bool,
    /// Directory receiving rewritten copies (same file names).
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of parallel jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
    /// Print a JSON report instead of the rewritten text.
    #[arg(long)]
    report: bool,
}

#[derive(Debug, Args)]
struct RewriteStdinArgs {
    #[command(flatten)]
    sources: SourceArgs,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Documentation files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,
    #[command(flatten)]
    sources: SourceArgs,
    /// Number of parallel jobs (default: number of CPUs).
    #[arg(long)]
    jobs: Option<usize>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Tool files and/or directories containing tool files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
}

#[derive(Debug, Args)]
struct BundleArgs {
    /// Tool files and/or directories containing tool files.
    #[arg(required = true)]
    inputs: Vec<PathBuf>,
    /// Output JSON bundle path.
    #[arg(long)]
    output: PathBuf,
    /// Optional catalog name metadata.
    #[arg(long)]
    name: Option<String>,
    /// Optional catalog description metadata.
    #[arg(long)]
    description: Option<String>,
}

/// Result of rewriting one file.
#[derive(Debug, Serialize)]
struct FileOutcome {
    path: PathBuf,
    #[serde(skip)]
    text: String,
    report: RewriteReport,
}

#[derive(Debug, Serialize)]
struct RunReport {
    files: Vec<FileOutcome>,
    total: RewriteReport,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Rewrite(args) => run_rewrite(args),
        Command::RewriteStdin(args) => run_rewrite_stdin(args),
        Command::Check(args) => run_check(args),
        Command::Validate(args) => run_validate(args),
        Command::Bundle(args) => run_bundle(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn run_rewrite(args: RewriteArgs) -> Result<(), String> {
    let (registry, config) = load_sources(&args.sources)?;
    let outcomes = rewrite_files(&args.files, &registry, &config, args.jobs)?;

    if let Some(dir) = &args.output {
        fs::create_dir_all(dir)
            .map_err(|err| format!("Failed to create output directory '{}': {err}", dir.display()))?;
    }

    for outcome in &outcomes {
        if args.in_place {
            if outcome.report.changed {
                write_file(&outcome.path, &outcome.text)?;
            }
        } else if let Some(dir) = &args.output {
            let name = outcome
                .path
                .file_name()
                .ok_or_else(|| format!("'{}' has no file name", outcome.path.display()))?;
            write_file(&dir.join(name), &outcome.text)?;
        } else if !args.report {
            print!("{}", outcome.text);
        }
    }

    let mut total = RewriteReport::default();
    for outcome in &outcomes {
        total.merge(&outcome.report);
    }

    if args.report {
        let report = RunReport {
            files: outcomes,
            total,
        };
        let raw = serde_json::to_string_pretty(&report)
            .map_err(|err| format!("Failed to serialize report: {err}"))?;
        println!("{raw}");
    } else if args.in_place || args.output.is_some() {
        println!(
            "Rewrote {} invocation(s) in {} file(s).",
            total.invocations,
            outcomes.iter().filter(|o| o.report.changed).count()
        );
    }

    Ok(())
}

fn run_rewrite_stdin(args: RewriteStdinArgs) -> Result<(), String> {
    let (registry, config) = load_sources(&args.sources)?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|err| format!("Failed to read stdin: {err}"))?;

    let output = Rewriter::new(&registry).with_config(config).rewrite(&input);
    std::io::stdout()
        .write_all(output.as_bytes())
        .map_err(|err| format!("Failed to write stdout: {err}"))
}

fn run_check(args: CheckArgs) -> Result<(), String> {
    let (registry, config) = load_sources(&args.sources)?;
    let outcomes = rewrite_files(&args.files, &registry, &config, args.jobs)?;

    let stale: Vec<&FileOutcome> = outcomes.iter().filter(|o| o.report.changed).collect();
    for outcome in &stale {
        println!(
            "{}: {} legacy invocation(s)",
            outcome.path.display(),
            outcome.report.invocations
        );
    }

    if stale.is_empty() {
        println!("All {} file(s) are up to date.", outcomes.len());
        Ok(())
    } else {
        Err(format!("{} file(s) need rewriting", stale.len()))
    }
}

fn run_validate(args: ValidateArgs) -> Result<(), String> {
    let paths = collect_catalog_paths(&args.inputs).map_err(|e| e.to_string())?;
    let tools = load_and_validate_tools(&paths).map_err(|e| e.to_string())?;

    let mut combined = cmdline_rewrite_core::ToolCatalog::new(PACKAGE_VERSION, "");
    combined.tools = tools;
    if let Some(err) = validate_catalog(&combined).into_iter().next() {
        return Err(err.to_string());
    }

    println!(
        "Validated {} catalog file(s) for {} tool(s).",
        paths.len(),
        combined.tool_count()
    );
    Ok(())
}

fn run_bundle(args: BundleArgs) -> Result<(), String> {
    let paths = collect_catalog_paths(&args.inputs).map_err(|e| e.to_string())?;
    let catalog = bundle_tool_files(&paths, PACKAGE_VERSION, args.name, args.description)
        .map_err(|e| e.to_string())?;

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }

    let raw = serde_json::to_string_pretty(&catalog)
        .map_err(|err| format!("Failed to serialize catalog bundle: {err}"))?;
    write_file(&args.output, &raw)?;

    println!(
        "Bundled {} tool(s) into '{}'.",
        catalog.tool_count(),
        args.output.display()
    );

    Ok(())
}

/// Loads the registry and rewrite settings from `--config` and `--catalog`.
///
/// Explicit `--catalog` paths replace the configuration's catalog list.
/// With no sources at all, every tool is treated as unknown.
fn load_sources(args: &SourceArgs) -> Result<(ToolRegistry, RewriteConfig), String> {
    let project = match &args.config {
        Some(path) => ProjectConfig::load(path).map_err(|e| e.to_string())?,
        None => ProjectConfig::default(),
    };

    if args.catalogs.is_empty() && project.catalogs.is_empty() {
        tracing::warn!("No catalog sources given; argument prefixes will be guessed");
        return Ok((ToolRegistry::from_tools(std::iter::empty()), project.rewrite));
    }

    let builder = if args.catalogs.is_empty() {
        project.registry_builder()
    } else {
        args.catalogs
            .iter()
            .fold(ToolRegistry::builder(), |builder, path| {
                builder.from_path(path.clone())
            })
    };
    let registry = builder.build().map_err(|e| e.to_string())?;
    tracing::debug!(tools = registry.len(), source = ?registry.source(), "Loaded registry");

    Ok((registry, project.rewrite))
}

fn rewrite_files(
    files: &[PathBuf],
    registry: &ToolRegistry,
    config: &RewriteConfig,
    jobs: Option<usize>,
) -> Result<Vec<FileOutcome>, String> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.unwrap_or_else(|| default_parallel_jobs(files.len())))
        .build()
        .map_err(|e| format!("Failed to create thread pool: {e}"))?;

    let rewriter = Rewriter::new(registry).with_config(config.clone());

    pool.install(|| {
        files
            .par_iter()
            .map(|path| {
                let input = fs::read_to_string(path)
                    .map_err(|err| format!("Failed to read '{}': {err}", path.display()))?;
                let (text, report) = rewriter.rewrite_with_report(&input);
                tracing::debug!(
                    path = %path.display(),
                    invocations = report.invocations,
                    "Rewrote file"
                );
                Ok(FileOutcome {
                    path: path.clone(),
                    text,
                    report,
                })
            })
            .collect()
    })
}

fn default_parallel_jobs(file_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    cpu_count.max(1).min(file_count.max(1))
}

fn write_file(path: &Path, text: &str) -> Result<(), String> {
    fs::write(path, text).map_err(|err| format!("Failed to write '{}': {err}", path.display()))
}
