use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use dtsconform::{
    build_oracle, run_batch, run_compare, BatchOptions, CompareOptions, Config, OutputFormat,
    ReferenceSource,
};
use dtsconform_core::{MatchPolicy, RoleLabels};

#[derive(Parser)]
#[command(name = "dtsconform")]
#[command(about = "Compare the exported surfaces of TypeScript declaration modules", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Config file (defaults to ./dtsconform.toml when present)
    #[arg(long, global = true, env = "DTSCONFORM_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a candidate declaration module against a reference
    Compare {
        /// Candidate module (generated or predicted declarations)
        candidate: PathBuf,

        /// Reference module (manual or expected declarations)
        reference: PathBuf,

        /// Witness policy (first, all)
        #[arg(short, long)]
        policy: Option<MatchPolicy>,

        /// Role labels (predicted-expected, generated-manual, candidate-reference or a:b)
        #[arg(short, long)]
        labels: Option<RoleLabels>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        /// Output file path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare every declaration below a directory against one reference
    Batch {
        /// Directory of candidate declarations, one sub-directory per mode
        #[arg(long)]
        candidates: PathBuf,

        /// Reference declaration file
        #[arg(long, conflicts_with_all = ["types_root", "package"], required_unless_present = "package")]
        reference: Option<PathBuf>,

        /// Root of a DefinitelyTyped-style `types` directory
        #[arg(long, requires = "package")]
        types_root: Option<PathBuf>,

        /// Package whose reference declaration lives under --types-root
        #[arg(long, requires = "types_root")]
        package: Option<String>,

        /// Output directory for reports
        #[arg(short, long)]
        output: PathBuf,

        /// Witness policy (first, all)
        #[arg(short, long)]
        policy: Option<MatchPolicy>,

        /// Role labels (predicted-expected, generated-manual, candidate-reference or a:b)
        #[arg(short, long)]
        labels: Option<RoleLabels>,

        /// Report format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = if cli.debug {
        tracing::Level::TRACE
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(cli.debug) // Show target module in debug mode
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().context("Failed to determine working directory")?;
    let config = Config::discover(cli.config.as_deref(), &cwd)?;
    debug!("Effective config: {:?}", config);

    let oracle = build_oracle(&config.oracle)?;

    match cli.command {
        Commands::Compare {
            candidate,
            reference,
            policy,
            labels,
            format,
            output,
        } => {
            let (policy, labels) = config.comparison_settings(policy, labels)?;
            let options = CompareOptions {
                candidate,
                reference,
                policy,
                labels,
                format,
                output,
            };
            run_compare(&options, oracle.as_ref())?;
            Ok(())
        }
        Commands::Batch {
            candidates,
            reference,
            types_root,
            package,
            output,
            policy,
            labels,
            format,
        } => {
            let reference = match (reference, types_root, package) {
                (Some(path), _, _) => ReferenceSource::File(path),
                (None, Some(types_root), Some(package)) => ReferenceSource::Package {
                    types_root,
                    package,
                },
                _ => anyhow::bail!("Either --reference or --types-root with --package is required"),
            };
            let (policy, labels) = config.comparison_settings(policy, labels)?;
            let options = BatchOptions {
                candidates,
                reference,
                output,
                policy,
                labels,
                format,
            };
            run_batch(&options, oracle.as_ref())?;
            Ok(())
        }
    }
}
