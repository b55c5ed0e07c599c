//! Options shared by both directions, layered over the loaded settings.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vcardx_core::config::Settings;
use vcardx_rfc::rfc::vcard::{Charset, CodecContext, CodecError, VCardVersion};
use vcardx_service::mapping::MappingTable;
use vcardx_service::session::{Session, codec_context};
use vcardx_service::style::StyleRegistry;

#[derive(Args, Clone, Debug, Default)]
pub struct SessionOptions {
    /// vCard version: 2.1, 3.0 or 4.0 (overrides `codec.version`).
    #[arg(short = 'c', long = "card-version", value_parser = parse_version)]
    pub card_version: Option<VCardVersion>,

    /// Style name (overrides `session.style`).
    #[arg(short, long)]
    pub style: Option<String>,

    /// Mapping language (overrides `session.language`).
    #[arg(short, long)]
    pub language: Option<String>,

    /// Charset for 2.1 output values (overrides `codec.v21_charset`).
    #[arg(short = 'e', long, value_parser = parse_charset)]
    pub charset: Option<Charset>,

    /// Fold 3.0/4.0 output lines at 75 octets.
    #[arg(long)]
    pub fold: bool,

    /// JSON mapping table to use instead of the built-in one.
    #[arg(short, long)]
    pub mapping: Option<PathBuf>,
}

/// Everything a transcoder borrows, resolved from settings and options.
#[derive(Debug)]
pub struct Resolved {
    pub registry: StyleRegistry,
    pub table: MappingTable,
    pub session: Session,
    pub ctx: CodecContext,
}

impl SessionOptions {
    pub fn resolve(&self, settings: &Settings) -> Result<Resolved> {
        let mut session = Session::from_settings(settings)?;
        let mut ctx = codec_context(&settings.codec)?;

        if let Some(version) = self.card_version {
            session.version = version;
            ctx.version = version;
        }
        if let Some(style) = &self.style {
            session.style.clone_from(style);
        }
        if let Some(language) = &self.language {
            session.language.clone_from(language);
        }
        if let Some(charset) = self.charset {
            ctx.v21_charset = charset;
        }
        ctx.fold_lines |= self.fold;

        let table: MappingTable = match &self.mapping {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing mapping table {}", path.display()))?
            }
            None => MappingTable::builtin(),
        };

        tracing::debug!(?session, ?ctx, "Resolved session");
        Ok(Resolved {
            registry: StyleRegistry::with_builtin(settings.import.include_unmapped),
            table,
            session,
            ctx,
        })
    }
}

fn parse_version(arg: &str) -> Result<VCardVersion, CodecError> {
    arg.parse()
}

fn parse_charset(arg: &str) -> Result<Charset, String> {
    Charset::lookup(arg).ok_or_else(|| format!("{arg}: unknown charset"))
}
