use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process;

use clap::builder::RangedU64ValueParser;
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::{debug, info};

use plotjson_core::parser::{DEFAULT_MAX_DEPTH, MAX_DEPTH_CEILING};
use plotjson_core::{Chart, Document, Job, ParseOptions, Registry, Value};

mod logging;

const EXIT_OK: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_IO: i32 = 2;

/// plotjson - render chart jobs described in JSON
///
/// Reads one job object or a list of job objects, resolves each job's
/// `Config` with the renderer its `Type` names, and writes the chart to
/// its `Path`.
#[derive(Parser)]
#[command(name = "plotjson", version, about, long_about = None)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Deepest list/object nesting accepted in the input
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_DEPTH,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..=MAX_DEPTH_CEILING as u64)
    )]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render every job in a document
    Render {
        /// Path to the job document, `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a document in canonical form
    Fmt {
        /// Path to a JSON document, `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Check that a document parses
    Check {
        /// Path to a JSON document, `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet);

    let options = ParseOptions {
        max_depth: cli.max_depth,
    };

    let exit_code = match cli.command {
        Commands::Render { input, json } => cmd_render(&input, &options, json),
        Commands::Fmt { input } => cmd_fmt(&input, &options),
        Commands::Check { input, json } => cmd_check(&input, &options, json),
        Commands::Version => {
            let registry = Registry::with_defaults();
            println!("plotjson {}", env!("CARGO_PKG_VERSION"));
            println!("renderers: {}", registry.names().collect::<Vec<_>>().join(", "));
            EXIT_OK
        }
    };

    process::exit(exit_code);
}

// ── Input ─────────────────────────────────────────────────

fn is_stdin(input: &Path) -> bool {
    input.as_os_str() == "-"
}

fn display_input(input: &Path) -> String {
    if is_stdin(input) {
        "<stdin>".to_string()
    } else {
        input.display().to_string()
    }
}

fn read_input(input: &Path) -> io::Result<Vec<u8>> {
    if is_stdin(input) {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(input)
    }
}

/// Read and parse, reporting failures. `Err` holds the exit code.
fn load(input: &Path, options: &ParseOptions) -> Result<Value, i32> {
    let bytes = read_input(input).map_err(|e| {
        eprintln!(
            "{} cannot read input {}: {}",
            "error:".red().bold(),
            display_input(input),
            e
        );
        EXIT_IO
    })?;
    debug!(input = %display_input(input), bytes = bytes.len(), "read input");

    plotjson_core::parse_bytes_with(&bytes, options).map_err(|e| {
        eprintln!("{} {}: {}", "error:".red().bold(), display_input(input), e);
        EXIT_FAILURE
    })
}

// ── render ────────────────────────────────────────────────

/// Why a single job failed
#[derive(Debug)]
enum JobError {
    Job(plotjson_core::Error),
    Render {
        renderer: String,
        source: plotjson_core::Error,
    },
    Encode(serde_json::Error),
    Write { path: String, source: io::Error },
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            JobError::Job(e) => write!(f, "{}", e),
            JobError::Render { renderer, source } => write!(f, "{}: {}", renderer, source),
            JobError::Encode(e) => write!(f, "cannot encode chart: {}", e),
            JobError::Write { path, source } => {
                write!(f, "cannot write chart to {}: {}", path, source)
            }
        }
    }
}

#[derive(Serialize)]
struct JobReport {
    index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(Serialize)]
struct RunSummary {
    total: usize,
    succeeded: usize,
    failed: usize,
    jobs: Vec<JobReport>,
}

fn run_job(registry: &Registry, index: usize, value: &Value) -> Result<String, JobError> {
    let job = Job::from_value(index, value).map_err(JobError::Job)?;
    let chart = registry.render(&job).map_err(|source| JobError::Render {
        renderer: job.renderer.to_string(),
        source,
    })?;
    write_chart(job.path, &chart)?;
    Ok(job.path.to_string())
}

fn write_chart(path: &str, chart: &Chart) -> Result<(), JobError> {
    let mut text = serde_json::to_string_pretty(chart).map_err(JobError::Encode)?;
    text.push('\n');

    let write_err = |source| JobError::Write {
        path: path.to_string(),
        source,
    };
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(path, text).map_err(write_err)?;
    info!(path, "wrote chart");
    Ok(())
}

fn cmd_render(input: &Path, options: &ParseOptions, json: bool) -> i32 {
    let root = match load(input, options) {
        Ok(root) => root,
        Err(code) => return code,
    };
    let document = match Document::from_root(&root) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("{} {}: {}", "error:".red().bold(), display_input(input), e);
            return EXIT_FAILURE;
        }
    };

    let registry = Registry::with_defaults();
    let mut reports = Vec::new();

    for (index, value) in document.jobs().into_iter().enumerate() {
        match run_job(&registry, index, value) {
            Ok(path) => {
                if !json {
                    println!("{} index {} plot succeeded", "✓".green(), index);
                }
                reports.push(JobReport {
                    index,
                    path: Some(path),
                    error: None,
                });
            }
            Err(e) => {
                eprintln!("{} index {}: {}", "error:".red().bold(), index, e);
                reports.push(JobReport {
                    index,
                    path: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }

    let total = reports.len();
    let succeeded = reports.iter().filter(|r| r.error.is_none()).count();
    let failed = total - succeeded;

    if json {
        let summary = RunSummary {
            total,
            succeeded,
            failed,
            jobs: reports,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("{} cannot encode summary: {}", "error:".red().bold(), e);
                return EXIT_FAILURE;
            }
        }
    } else {
        println!(
            "Total Job {}; Successful {}; Failed {}",
            total, succeeded, failed
        );
    }

    // A lone job's failure fails the run; batch failures are only counted
    if !document.is_batch() && failed > 0 {
        EXIT_FAILURE
    } else {
        EXIT_OK
    }
}

// ── fmt ───────────────────────────────────────────────────

fn cmd_fmt(input: &Path, options: &ParseOptions) -> i32 {
    match load(input, options) {
        Ok(root) => {
            println!("{}", root.to_pretty());
            EXIT_OK
        }
        Err(code) => code,
    }
}

// ── check ─────────────────────────────────────────────────

fn cmd_check(input: &Path, options: &ParseOptions, json: bool) -> i32 {
    let bytes = match read_input(input) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!(
                "{} cannot read input {}: {}",
                "error:".red().bold(),
                display_input(input),
                e
            );
            return EXIT_IO;
        }
    };

    let result = plotjson_core::parse_bytes_with(&bytes, options);

    if json {
        let report = match &result {
            Ok(root) => serde_json::json!({
                "valid": true,
                "root": root.kind().name(),
                "entries": entry_count(root),
            }),
            Err(e) => serde_json::json!({
                "valid": false,
                "error": e.to_string(),
                "line": e.span().map(|s| s.line),
                "column": e.span().map(|s| s.column),
            }),
        };
        println!("{}", report);
    } else {
        match &result {
            Ok(root) => println!(
                "{} {} is valid ({} with {} entries)",
                "✓".green(),
                display_input(input),
                root.kind(),
                entry_count(root)
            ),
            Err(e) => eprintln!("{} {}: {}", "error:".red().bold(), display_input(input), e),
        }
    }

    if result.is_ok() {
        EXIT_OK
    } else {
        EXIT_FAILURE
    }
}

fn entry_count(root: &Value) -> usize {
    match root {
        Value::List(items) => items.len(),
        Value::Object(map) => map.len(),
        _ => 1,
    }
}
