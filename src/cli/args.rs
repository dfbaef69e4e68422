//! Command-line interface definitions.

use clap::{ColorChoice, Parser};
use std::path::PathBuf;

/// Live glTF preview host bridge
///
/// Reads editor/surface events as JSON lines on stdin and writes host
/// requests as JSON lines on stdout.
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Documents to preview on startup
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub files: Vec<PathBuf>,

    /// Config file path (default: gltf-preview.toml)
    #[arg(
        short = 'C',
        long,
        default_value = crate::config::CONFIG_FILE,
        value_hint = clap::ValueHint::FilePath
    )]
    pub config: PathBuf,

    /// Directory rendered preview pages are written to (default: system temp)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub out_dir: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Control colored output (auto, always, never)
    #[arg(long, default_value = "auto")]
    pub color: ColorChoice,
}
