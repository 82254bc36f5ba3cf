//! Command-line interface argument parsing.

use clap::Parser;
use std::path::PathBuf;

/// CiteScope - explore a publication citation dataset
///
/// Opens a dashboard with publications per year, the most cited papers,
/// and the most frequent index keywords for a chosen year range.
///
/// Examples:
///   citescope
///   citescope --datasets ./datasets --from 2000 --to 2015
///   citescope --dataset nilm.csv --headless --export-dir ./figures
///   citescope --init-config
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Configuration file (defaults to ./citescope.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory scanned for .csv, .json and .parquet datasets
    #[arg(long, value_name = "DIR", env = "CITESCOPE_DATASETS")]
    pub datasets: Option<PathBuf>,

    /// Dataset to open at startup (otherwise the first one discovered)
    #[arg(short, long, value_name = "FILE")]
    pub dataset: Option<PathBuf>,

    /// Directory chart images are exported to
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// First year of the range (inclusive)
    #[arg(long, value_name = "YEAR")]
    pub from: Option<i32>,

    /// Last year of the range (inclusive)
    #[arg(long, value_name = "YEAR")]
    pub to: Option<i32>,

    /// Number of papers shown on the most-cited chart
    #[arg(long, value_name = "N")]
    pub top_papers: Option<usize>,

    /// Number of keywords shown on the keyword chart
    #[arg(long, value_name = "N")]
    pub top_keywords: Option<usize>,

    /// Export the three charts without opening a window, then exit
    #[arg(long)]
    pub headless: bool,

    /// Write a default citescope.toml to the current directory and exit
    #[arg(long)]
    pub init_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
