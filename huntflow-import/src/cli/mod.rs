//! Command-line interface

pub mod handler;

use std::path::PathBuf;

use clap::Parser;

pub use handler::handle_import;

#[derive(Parser, Debug)]
#[command(
    name = "huntflow-import",
    about = "Import candidates from a spreadsheet into Huntflow",
    version
)]
pub struct Cli {
    /// Huntflow API token (prompted for when omitted)
    #[arg(short, long)]
    pub token: Option<String>,

    /// Path to the candidates workbook (prompted for when omitted)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Config file (defaults to ./huntflow-import.toml, then the user config dir)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Override the checkpoint file location
    #[arg(long)]
    pub checkpoint: Option<PathBuf>,

    /// Directory containing one sub-directory of resumes per opening
    #[arg(long)]
    pub resume_root: Option<PathBuf>,

    /// Retry a failed row on the next run instead of skipping past it
    #[arg(long)]
    pub retry_failed: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
