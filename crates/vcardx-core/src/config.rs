use anyhow::Result;
use config::Config;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub codec: CodecConfig,
    pub session: SessionConfig,
    pub import: ImportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodecConfig {
    /// Active vCard version ("2.1", "3.0" or "4.0").
    pub version: String,
    /// Charset name used for 2.1 output values.
    pub v21_charset: String,
    pub fold_lines: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    pub style: String,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportConfig {
    /// Keep properties with no field mapping as fields named after the property.
    pub include_unmapped: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from defaults, `vcardx.toml` and `VCARDX_*`
    /// environment variables, in increasing order of precedence.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::with_name("vcardx.toml").required(false))
            .add_source(
                // e.g. VCARDX_CODEC__V21_CHARSET
                config::Environment::with_prefix("VCARDX")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from defaults overlaid with an in-memory TOML document.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not deserialize.
    pub fn from_toml(document: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(document, config::FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("codec.version", "4.0")?
            .set_default("codec.v21_charset", "US-ASCII")?
            .set_default("codec.fold_lines", false)?
            .set_default("session.style", "flat")?
            .set_default("session.language", "en")?
            .set_default("import.include_unmapped", true)?
            .set_default("logging.level", "info")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(?settings, "Configuration loaded");
    Ok(settings)
}
