use bench_summarizer::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "bench-summarizer",
    version,
    about = "Summarizes per-node compliance benchmark results into one report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize a directory of per-node benchmark result files
    Summarize {
        /// Directory holding one <node>.json result file per node
        #[arg(long, short)]
        input_dir: PathBuf,

        /// Output format
        #[arg(long, short, default_value = "pretty", value_enum)]
        format: OutputFormat,

        /// Write output to file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Keep only failing checks in the results tree
        #[arg(long)]
        failures_only: bool,

        /// Mark a check id as skipped, in addition to the config file (repeatable)
        #[arg(long, value_name = "CHECK_ID")]
        skip: Vec<String>,

        /// Custom config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Decode the actual-value data embedded in a summarized report
    Decode {
        /// Path to a report written by `summarize --format json`
        report: PathBuf,
    },
}
