//! protoreg CLI - Descriptor merge and known-type tooling
//!
//! Commands:
//! - `protoreg merge` - Merge classpath descriptor sets for each source set
//! - `protoreg types` - List the known types of a merged descriptor set
//! - `protoreg check` - Validate a protoreg.toml project config

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod merge;
mod types;

#[derive(Parser)]
#[command(name = "protoreg")]
#[command(author, version, about = "Descriptor merge tool for Protobuf builds", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge descriptor sets from the classpath and the local build
    Merge {
        /// Path to protoreg.toml (default: ./protoreg.toml)
        #[arg(short, long)]
        config: Option<String>,

        /// Merge only this source set (default: all configured source sets)
        #[arg(short, long)]
        source_set: Option<String>,

        /// Classpath element; repeatable. Bypasses the config file
        #[arg(long, requires = "descriptor", conflicts_with_all = ["config", "source_set"])]
        classpath: Vec<PathBuf>,

        /// Local descriptor file (direct mode, required with --classpath)
        #[arg(long, requires = "out", conflicts_with_all = ["config", "source_set"])]
        descriptor: Option<PathBuf>,

        /// Output path for the merged descriptor set (required with --descriptor)
        #[arg(long, requires = "descriptor", conflicts_with_all = ["config", "source_set"])]
        out: Option<PathBuf>,

        /// Duplicate-path policy: overwrite | error-on-conflict
        #[arg(long, default_value = "overwrite")]
        policy: String,
    },

    /// List the fully-qualified types of a merged descriptor set
    Types {
        /// Path to a binary descriptor-set file
        set: PathBuf,

        /// Emit machine-readable JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Validate a protoreg.toml project config
    Check {
        /// Path to protoreg.toml (default: ./protoreg.toml)
        #[arg(short, long)]
        config: Option<String>,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}


fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Merge {
            config,
            source_set,
            classpath,
            descriptor,
            out,
            policy,
        } => {
            if let (Some(descriptor), Some(out)) = (descriptor, out) {
                merge::run_direct(&classpath, &descriptor, &out, &policy)?;
            } else {
                merge::run(config, source_set)?;
            }
        }
        Commands::Types { set, json } => {
            types::run(&set, json)?;
        }
        Commands::Check { config } => {
            config::check(config)?;
        }
    }

    Ok(())
}
