//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::{check, query, render};
use crate::model::Kind;

#[derive(Parser)]
#[command(name = "blueprint")]
#[command(author, version, about = "Typed product/journey model tooling")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a model document
    Check {
        /// Path to the model document (.json, .yaml or .yml)
        file: PathBuf,
    },

    /// List elements in a model document
    Show {
        /// Path to the model document
        file: PathBuf,

        /// Only show elements of this kind (label or two-letter code)
        #[arg(long)]
        kind: Option<Kind>,
    },

    /// Print the strategy-rooted hierarchy as a tree
    Tree {
        /// Path to the model document
        file: PathBuf,
    },

    /// Render the model outline as markdown
    Render {
        /// Path to the model document
        file: PathBuf,

        /// Write markdown to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Show per-kind element counts and reference totals
    Stats {
        /// Path to the model document
        file: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Blueprint CLI starting");

    match cli.command {
        Commands::Check { file } => check::run(&output, &file)?,
        Commands::Show { file, kind } => query::show(&output, &file, kind)?,
        Commands::Tree { file } => query::tree(&output, &file)?,
        Commands::Render { file, out } => render::run(&output, &file, out.as_deref())?,
        Commands::Stats { file } => query::stats(&output, &file)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
