use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm};
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use ngsweep::config::Config;
use ngsweep::discovery::ArtifactFinder;
use ngsweep::pruner::Pruner;
use ngsweep::registry::RegistryIndex;
use ngsweep::remover::Remover;
use ngsweep::report::{JsonReporter, TerminalReporter};
use ngsweep::verify::{ProcessOracle, Verdict, Verifier};

/// ngsweep - Transactional dead code removal for Angular projects
#[derive(Parser, Debug)]
#[command(name = "ngsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Remove unused artifacts, one build-verified deletion at a time
    Artifacts {
        /// Project directory to process
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Build command override
        #[arg(long)]
        build_command: Option<String>,

        /// Report file override
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show candidates without touching the tree
        #[arg(long)]
        dry_run: bool,

        /// Confirm each artifact before processing
        #[arg(long)]
        interactive: bool,
    },

    /// Prune unused methods inside component classes
    Methods {
        /// Project directory to process
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Path to configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Build command override (only used with --verify)
        #[arg(long)]
        build_command: Option<String>,

        /// Gate each pruned unit behind a build-commit-or-revert cycle
        #[arg(long)]
        verify: bool,

        /// Show what would be removed without making changes
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("ngsweep v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Artifacts {
            path,
            config,
            build_command,
            output,
            dry_run,
            interactive,
        } => {
            let config = load_config(&path, config.as_deref(), build_command, output)?;
            run_artifacts(&path, &config, dry_run, interactive)
        }
        Command::Methods {
            path,
            config,
            build_command,
            verify,
            dry_run,
        } => {
            let config = load_config(&path, config.as_deref(), build_command, None)?;
            run_methods(&path, &config, verify, dry_run)
        }
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();
}

fn load_config(
    root: &Path,
    config_path: Option<&Path>,
    build_command: Option<String>,
    output: Option<PathBuf>,
) -> Result<Config> {
    let mut config = if let Some(config_path) = config_path {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(root)?
    };

    // CLI arguments win over file values
    if let Some(command) = build_command {
        config.build.command = command;
    }
    if let Some(output) = output {
        config.report.path = output;
    }

    Ok(config)
}

fn run_artifacts(root: &Path, config: &Config, dry_run: bool, interactive: bool) -> Result<()> {
    println!("{}", "Starting Angular cleanup...".cyan().bold());

    // Registry paths are gathered once; contents are re-read per removal
    let registries = RegistryIndex::discover(root, config)?;
    println!("Found {} module file(s).", registries.len());

    let finder = ArtifactFinder::new(config);
    let artifacts = finder.find_artifacts(root)?;

    if artifacts.is_empty() {
        println!("{}", "No artifact candidates found.".yellow());
        return Ok(());
    }

    println!("Found {} artifact candidate(s).", artifacts.len());

    if dry_run {
        println!();
        println!("{}", "Dry run - would process:".yellow().bold());
        for artifact in &artifacts {
            println!("  {} ({})", artifact.path.display(), artifact.kind);
        }
        return Ok(());
    }

    let oracle = ProcessOracle::new(root, &config.build.command);
    let mut remover = Remover::new(config, root, registries, oracle);

    let pb = ProgressBar::new(artifacts.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .into_diagnostic()?
            .progress_chars("#>-"),
    );

    for artifact in &artifacts {
        pb.set_message(artifact.kind.to_string());

        if interactive {
            let prompt = format!(
                "Process {} '{}'?",
                artifact.kind,
                artifact.path.display()
            );
            let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(&prompt)
                .default(false)
                .interact()
                .into_diagnostic()?;
            if !confirmed {
                pb.inc(1);
                continue;
            }
        }

        remover.process(artifact);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let results = remover.into_results();

    let reporter = TerminalReporter::new();
    reporter.removal_summary(&results);

    let report_path = if config.report.path.is_absolute() {
        config.report.path.clone()
    } else {
        root.join(&config.report.path)
    };
    JsonReporter::new(report_path).write(&results)?;

    Ok(())
}

fn run_methods(root: &Path, config: &Config, verify: bool, dry_run: bool) -> Result<()> {
    let finder = ArtifactFinder::new(config);
    let components = finder.find_components(root)?;

    println!("Found {} component file(s).", components.len());

    if components.is_empty() {
        return Ok(());
    }

    let pruner = Pruner::new(dry_run);
    let verifier = if verify && !dry_run {
        Some(Verifier::new(ProcessOracle::new(root, &config.build.command)))
    } else {
        None
    };

    let reporter = TerminalReporter::new();
    let mut reports = Vec::new();

    for component in &components {
        println!();
        println!("Processing: {}", component.path.display());

        let report = match pruner.prune_unit(&component.path) {
            Ok(report) => report,
            Err(e) => {
                eprintln!("  {} {}", "✗".red(), e);
                continue;
            }
        };

        reporter.prune_report(&report);

        if let Some(verifier) = &verifier {
            if !report.removed.is_empty() {
                let shown = component
                    .path
                    .strip_prefix(root)
                    .unwrap_or(&component.path);
                let message = format!(
                    "chore: Removed unused component methods ({}) at {}",
                    report.removed.join(", "),
                    shown.display()
                );
                match verifier.verify(&message) {
                    Ok(Verdict::Committed) => {
                        println!("  {} Build passed, committed", "✓".green());
                    }
                    Ok(Verdict::RolledBack) => {
                        println!(
                            "  {} Build failed, unit restored",
                            "↩".yellow()
                        );
                    }
                    Err(e) => {
                        eprintln!(
                            "  {} Error reverting {}: {}",
                            "‼".red().bold(),
                            component.path.display(),
                            e
                        );
                    }
                }
            }
        }

        reports.push(report);
    }

    reporter.prune_summary(&reports);

    Ok(())
}
