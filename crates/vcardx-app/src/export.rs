use std::fs;
use std::io::{Write, stdout};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vcardx_core::config::Settings;
use vcardx_service::contact::Contact;
use vcardx_service::transcoder::Transcoder;

use crate::options::SessionOptions;

/// Read contacts as JSON and write them as vCard text.
#[derive(Args, Clone, Debug)]
pub struct Export {
    /// Input JSON file: an array of `{ "name": ..., "fields": [...] }`.
    input: PathBuf,

    /// Output file name (if omitted, output is written to stdout).
    output: Option<PathBuf>,

    #[command(flatten)]
    options: SessionOptions,
}

impl Export {
    pub fn run(self, settings: &Settings) -> Result<()> {
        let resolved = self.options.resolve(settings)?;
        let transcoder = Transcoder::new(
            &resolved.registry,
            &resolved.table,
            resolved.session,
            resolved.ctx,
        )?;

        let text = fs::read_to_string(&self.input)
            .with_context(|| format!("reading {}", self.input.display()))?;
        let contacts: Vec<Contact> = serde_json::from_str(&text)
            .with_context(|| format!("parsing contacts {}", self.input.display()))?;
        let bytes = transcoder.export(&contacts)?;

        match &self.output {
            Some(path) => {
                fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
            }
            None => stdout().lock().write_all(&bytes)?,
        }

        tracing::info!(contacts = contacts.len(), bytes = bytes.len(), "Export finished");
        Ok(())
    }
}
