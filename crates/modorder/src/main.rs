//! modorder - checks that Java modifiers follow the order suggested by the JLS.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use modorder_checkstyle::{ConfigError, ConfigLoader};
use modorder_diagnostics::Severity;
use modorder_linter::{LintResult, Linter, Message, RuleRegistry};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::prelude::*;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "modorder")]
#[command(about = "Checks that Java modifiers follow the order suggested by the JLS", long_about = None)]
struct Cli {
    /// Log level when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check files for violations
    Check {
        /// Paths to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Path to checkstyle.xml config
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Number of worker threads (defaults to one per core)
        #[arg(short = 'j', long)]
        threads: Option<usize>,
    },
    /// List the built-in rules
    Rules,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_tracing(&cli.log_level)?;

    match cli.command {
        Commands::Check {
            paths,
            config,
            threads,
        } => run_check(&paths, config.as_deref(), threads),
        Commands::Rules => {
            for name in RuleRegistry::builtin().module_names() {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn setup_tracing(log_level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(log_level))
        .with_context(|| format!("Invalid log level '{log_level}'"))?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

/// Run the check command.
fn run_check(paths: &[PathBuf], config_path: Option<&Path>, threads: Option<usize>) -> Result<()> {
    if let Some(threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let linter = load_linter(config_path)?;

    if linter.is_empty() {
        eprintln!("{}", "Warning: No rules configured".yellow());
    } else {
        let rule_names: Vec<_> = linter.rule_names().collect();
        eprintln!(
            "Checking with {} rule(s): {}",
            rule_names.len(),
            rule_names.join(", ")
        );
    }

    let files = collect_java_files(paths);
    info!(files = files.len(), "collected java files");

    let results: Vec<_> = files.par_iter().map(|path| linter.check_file(path)).collect();

    let mut summary = Summary::default();
    for (path, result) in files.iter().zip(results) {
        match result {
            Ok(result) => {
                for message in &result.messages {
                    print_message(path, message);
                }
                summary.add(&result);
            }
            Err(err) => {
                eprintln!("{}: {err}", "error".red());
                summary.failed += 1;
            }
        }
    }

    summary.print(files.len());

    if summary.errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// Build the linter from configuration, or the built-in defaults when none exists.
fn load_linter(config_path: Option<&Path>) -> Result<Linter> {
    let mut loader = ConfigLoader::new();
    if let Some(path) = config_path {
        loader = loader.checkstyle(path);
    }

    match loader.load() {
        Ok(config) => {
            if let Some(path) = &config.checkstyle_path {
                eprintln!("Loaded config from: {}", path.display());
            }
            Ok(Linter::from_config(&config, &RuleRegistry::builtin()))
        }
        Err(ConfigError::NoConfig) => {
            eprintln!(
                "{}",
                "No checkstyle.xml found, using default ModifierOrder rule".yellow()
            );
            Ok(Linter::with_defaults())
        }
        Err(err) => Err(err).context("Failed to load configuration"),
    }
}

/// Totals across all checked files.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    violations: usize,
    errors: usize,
    warnings: usize,
    failed: usize,
}

impl Summary {
    fn add(&mut self, result: &LintResult) {
        self.violations += result.len();
        self.errors += result
            .messages
            .iter()
            .filter(|m| m.severity.is_error())
            .count();
        self.warnings += result
            .messages
            .iter()
            .filter(|m| m.severity.is_warning())
            .count();
    }

    fn print(&self, files: usize) {
        if self.failed > 0 {
            eprintln!(
                "{} file(s) could not be checked",
                self.failed.to_string().yellow()
            );
        }

        if self.violations > 0 {
            println!(
                "\nFound {} violation(s) ({} error(s), {} warning(s)) in {} file(s)",
                self.violations,
                self.errors.to_string().red(),
                self.warnings.to_string().yellow(),
                files
            );
        } else {
            println!("{}", "No violations found".green());
        }
    }
}

fn severity_tag(rule: &str, severity: Severity) -> ColoredString {
    let tag = format!("[{rule}]");
    match severity {
        Severity::Error => tag.red(),
        Severity::Warning => tag.yellow(),
        Severity::Info => tag.blue(),
        Severity::Ignore => tag.normal(),
    }
}

fn print_message(path: &Path, message: &Message) {
    println!(
        "{}:{}: {} {}",
        path.display(),
        message.location,
        severity_tag(message.rule, message.severity),
        message.body()
    );
}

fn collect_java_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() && path.extension().is_some_and(|e| e == "java") {
            files.push(path.clone());
        } else if path.is_dir() {
            for entry in WalkDir::new(path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| e.path().extension().is_some_and(|ext| ext == "java"))
            {
                files.push(entry.path().to_path_buf());
            }
        } else if !path.exists() {
            // Kept so the failed read is reported.
            files.push(path.clone());
        } else {
            debug!(path = %path.display(), "skipping non-java path");
        }
    }
    files
}
