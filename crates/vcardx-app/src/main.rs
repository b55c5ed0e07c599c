use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use vcardx_core::config::load_config;

use crate::{export::Export, import::Import};

mod export;
mod import;
mod options;

/// vcardx, a version-aware vCard transcoder.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Debug)]
enum Command {
    Import(Import),
    Export(Export),
}

fn main() -> Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    // stdout carries card or JSON output
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let cli = Cli::parse();
    let settings = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(settings.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %settings.logging.level, "Invalid log level in config, keeping info");
    }

    match cli.command {
        Command::Import(import) => import.run(&settings),
        Command::Export(export) => export.run(&settings),
    }
}
