//! Player configuration

use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use sworn_metadata::ImportConfig;
use sworn_playback::PlaybackConfig;

/// Environment variable prefix (`SWORN_PLAYBACK__VOLUME=0.5`)
pub const ENV_PREFIX: &str = "SWORN";

/// File read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "sworn.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SwornConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub import: ImportConfig,
}

impl SwornConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; the default `sworn.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Load with an explicit set of environment variables instead of the
    /// process environment
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self> {
        let mut settings = config::Config::builder();

        settings = match path {
            Some(path) => settings.add_source(config::File::from(path).required(true)),
            None => settings
                .add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false)),
        };

        // Override with environment variables (SWORN_<SECTION>__<KEY>)
        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("import.extensions")
                .source(env),
        );

        let config: SwornConfig = settings.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !(0.0..=1.0).contains(&volume) {
            return Err(CliError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {}",
                volume
            )));
        }

        if self.import.extensions.is_empty() {
            return Err(CliError::Config(
                "import.extensions must list at least one extension".to_string(),
            ));
        }

        Ok(())
    }
}
