use std::fs;
use std::io::{Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vcardx_core::config::Settings;
use vcardx_service::transcoder::Transcoder;

use crate::options::SessionOptions;

/// Read vCard text and write the contacts as JSON.
#[derive(Args, Clone, Debug)]
pub struct Import {
    /// Input vCard file.
    input: PathBuf,

    /// Output file name (if omitted, output is written to stdout).
    output: Option<PathBuf>,

    #[command(flatten)]
    options: SessionOptions,
}

impl Import {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let resolved = self.options.resolve(settings)?;
        let transcoder = Transcoder::new(
            &resolved.registry,
            &resolved.table,
            resolved.session,
            resolved.ctx,
        )?;

        let input = fs::read(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;
        let contacts = transcoder.import(&input)?;
        let json = serde_json::to_string_pretty(&contacts)?;

        match &self.output {
            Some(path) => fs::write(path, json + "\n")
                .with_context(|| format!("writing {}", path.display()))?,
            None => writeln!(stdout().lock(), "{json}")?,
        }

        tracing::info!(contacts = contacts.len(), "Import finished");
        Ok(())
    }
}
