//! Command-line surface: flags mirror spec.md §6's client CLI table,
//! translated from the original's Go `flag` package into `clap` derive.

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "custody-client")]
#[command(about = "Upload, update and verified-download files against a custody server")]
pub struct Cli {
    /// Operation to perform.
    #[arg(long, value_enum, default_value = "upload")]
    pub operation: Operation,

    /// Directory of files (recursed) to submit.
    #[arg(long)]
    pub dir: Option<String>,

    /// Comma-separated explicit file paths.
    #[arg(long)]
    pub files: Option<String>,

    /// Server base URL.
    #[arg(long, default_value = "http://localhost:5000")]
    pub host: String,

    /// File index to download.
    #[arg(long, default_value_t = -1)]
    pub index: i64,

    /// Delete local files after a successful upload/update audit.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub delete: bool,

    /// Directory where the root hash and downloaded files live.
    #[arg(long)]
    pub config_dir: Option<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Upload,
    Update,
    Download,
}
