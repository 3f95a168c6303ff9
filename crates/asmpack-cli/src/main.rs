//! asmpack CLI - Export an assembly definition together with everything it references

mod commands;
mod logging;

use anyhow::{Context, Result};
use asmpack_module::AsmpackConfig;
use clap::{Parser, Subcommand};
use commands::{export, info, list, resolve, Session};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "asmpack")]
#[command(about = "Resolve module references and collect their assets for export", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root directory
    #[arg(long, global = true, default_value = ".")]
    project: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every module in the project catalog
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show a module's descriptor and how each reference resolves
    Info {
        /// Descriptor path, GUID:<id>, or module name
        selector: String,
    },

    /// Print the modules a module transitively references
    Resolve {
        /// Descriptor path, GUID:<id>, or module name
        selector: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Collect a module's assets and those of its references
    Export {
        /// Descriptor path, GUID:<id>, or module name
        selector: String,

        /// Manifest output path (defaults to the configured export output)
        #[arg(short, long)]
        output: Option<String>,

        /// Output format (toml, json, or paths)
        #[arg(long, default_value = "toml")]
        format: String,

        /// Drop repeated asset paths
        #[arg(long)]
        dedup: bool,

        /// Include .meta sidecar files
        #[arg(long)]
        include_meta: bool,

        /// Ask the packaging step to add per-file asset dependencies
        #[arg(long)]
        include_dependencies: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AsmpackConfig::load(&cli.project).context("Failed to load configuration")?;
    logging::init_logging(config.log_filter.as_deref());

    let session = Session::load(cli.project, config)?;

    match cli.command {
        Commands::List { format } => list::run(&session, &format),
        Commands::Info { selector } => info::run(&session, &selector),
        Commands::Resolve { selector, format } => resolve::run(&session, &selector, &format),
        Commands::Export {
            selector,
            output,
            format,
            dedup,
            include_meta,
            include_dependencies,
        } => export::run(
            &session,
            export::ExportArgs {
                selector,
                output,
                format,
                dedup,
                include_meta,
                include_dependencies,
            },
        ),
    }
}
