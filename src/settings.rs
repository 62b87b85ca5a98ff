use anyhow::{bail, Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

const ENV_PREFIX: &str = "ARTICLE_CLEAN";

/// Runtime knobs, overridable through `ARTICLE_CLEAN_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Downloader executable, looked up on `PATH` unless absolute.
    pub ytdlp_bin: String,
    /// Fragments fetched in parallel for a single video.
    pub concurrent_fragments: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ytdlp_bin: "yt-dlp".to_string(),
            concurrent_fragments: 8,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let defaults = Settings::default();
        let settings: Settings = Config::builder()
            .set_default("ytdlp_bin", defaults.ytdlp_bin)?
            .set_default(
                "concurrent_fragments",
                i64::from(defaults.concurrent_fragments),
            )?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .and_then(Config::try_deserialize)
            .context("Failed to load settings")?;
        settings.validate()
    }

    fn validate(self) -> Result<Self> {
        if self.concurrent_fragments == 0 {
            bail!("{}_CONCURRENT_FRAGMENTS must be at least 1", ENV_PREFIX);
        }
        Ok(self)
    }
}
