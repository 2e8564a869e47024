//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use track_store::DEFAULT_FILE_NAME;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the entry log. Relative paths resolve against the working directory.
    pub data_file: PathBuf,
    /// Default refresh interval for `--watch`, in seconds.
    pub watch_interval_secs: f64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("data_file", &self.data_file)
            .field("watch_interval_secs", &self.watch_interval_secs)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_FILE_NAME),
            watch_interval_secs: 1.0,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (TRACK_*)
        figment = figment.merge(Env::prefixed("TRACK_"));

        figment.extract()
    }

    /// Resolves the watch interval, preferring an explicit override in seconds.
    pub fn watch_interval(&self, override_secs: Option<f64>) -> Result<Duration> {
        let secs = override_secs.unwrap_or(self.watch_interval_secs);
        if !secs.is_finite() || secs <= 0.0 {
            bail!("watch interval must be a positive number of seconds, got {secs}");
        }
        match Duration::try_from_secs_f64(secs) {
            Ok(interval) => Ok(interval),
            Err(e) => bail!("watch interval of {secs} seconds is out of range: {e}"),
        }
    }
}

/// Returns the platform-specific config directory for track.
///
/// On Linux: `~/.config/track`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("track"))
}
