use crate::error::{AppError, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Columns taken by the chart's y-axis labels.
pub const X_AXIS_WIDTH: u16 = 15;

const MIN_HISTORY_WIDTH: usize = 10;
const FALLBACK_HISTORY_WIDTH: usize = 80;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(
        default = "default_summary_interval",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub summary_interval: Duration,

    #[serde(
        default = "default_render_interval",
        deserialize_with = "deserialize_duration",
        serialize_with = "serialize_duration"
    )]
    pub render_interval: Duration,

    /// Number of points kept per heap chart. Derived from the terminal
    /// width when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_width: Option<usize>,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            summary_interval: default_summary_interval(),
            render_interval: default_render_interval(),
            history_width: None,
            channel_capacity: default_channel_capacity(),
            export_dir: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let path = PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string());
        let contents = std::fs::read_to_string(&path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// `config.toml` in the platform config directory, if there is one.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "gctrace", "gctrace-tui")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.exists())
    }

    pub fn validate(&self) -> Result<()> {
        if self.summary_interval.is_zero() {
            return Err(AppError::Config(
                "summary_interval must be greater than zero".to_string(),
            ));
        }
        if self.render_interval.is_zero() {
            return Err(AppError::Config(
                "render_interval must be greater than zero".to_string(),
            ));
        }
        if self.history_width == Some(0) {
            return Err(AppError::Config(
                "history_width must be greater than zero".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(AppError::Config(
                "channel_capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// History width for a terminal `columns` wide.
    pub fn resolve_width(&self, columns: Option<u16>) -> usize {
        if let Some(width) = self.history_width {
            return width;
        }

        match columns {
            Some(columns) => {
                (columns.saturating_sub(X_AXIS_WIDTH) as usize).max(MIN_HISTORY_WIDTH)
            }
            None => FALLBACK_HISTORY_WIDTH,
        }
    }
}

fn default_summary_interval() -> Duration {
    Duration::from_secs(5)
}

fn default_render_interval() -> Duration {
    Duration::from_millis(250)
}

fn default_channel_capacity() -> usize {
    1024
}

fn deserialize_duration<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    humantime::parse_duration(&raw).map_err(serde::de::Error::custom)
}

fn serialize_duration<S>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&humantime::format_duration(*duration).to_string())
}
