//! gltf-preview - live glTF preview host bridge.

use anyhow::Result;
use clap::{ColorChoice, Parser};
use gltf_preview::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    gltf_preview::logger::set_verbose(cli.verbose);

    cli::run(&cli)
}
