use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "assert-license")]
#[command(about = "Collect dependency licenses of a build element and enforce a license blacklist")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full element lifecycle and write the license report
    Assemble {
        /// Project file describing the element graph
        #[arg(short, long)]
        project: PathBuf,

        /// Element declaration (kind and configuration)
        #[arg(short, long)]
        element: PathBuf,

        /// Name of the element being built in the project graph
        #[arg(short, long)]
        target: String,

        /// Sandbox directory the report is written into
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Collect and check licenses without writing the report
    Check {
        #[arg(short, long)]
        project: PathBuf,

        #[arg(short, long)]
        element: PathBuf,

        #[arg(short, long)]
        target: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,

        /// Exit with code 0 even on violations
        #[arg(long)]
        exit_zero: bool,
    },
    /// List the dependencies a scope would report on, in walk order
    Deps {
        #[arg(short, long)]
        project: PathBuf,

        #[arg(short, long)]
        target: String,

        /// Secondary traversal scope (run, build, all, none)
        #[arg(short, long, default_value = "none")]
        scope: String,
    },
    /// Print the cache key of an element declaration
    Key {
        #[arg(short, long)]
        element: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
