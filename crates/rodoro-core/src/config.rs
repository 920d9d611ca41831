//! TOML-based application configuration.
//!
//! Stores the session intervals, the media-player target, and the optional
//! chat-presence credentials. Configuration is read once at startup from
//! `~/.config/rodoro/config.toml`; a missing file means defaults with
//! presence control disabled, which the caller reports to the user.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::session::Durations;

/// Session interval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default = "default_work_minutes")]
    pub work_minutes: u64,
    #[serde(default = "default_pause_minutes")]
    pub pause_minutes: u64,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    #[serde(default = "default_announce_minutes")]
    pub announce_minutes: u64,
}

/// Media-player configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaConfig {
    /// MPRIS bus-name suffix of the player to control.
    #[serde(default = "default_player")]
    pub player: String,
}

/// Chat-presence credentials. Presence control stays disabled without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Base URL of the Rocket.Chat server.
    pub server: String,
    pub user_id: String,
    pub auth_token: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/rodoro/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub media: MediaConfig,
    #[serde(default)]
    pub presence: Option<PresenceConfig>,
}

impl TimerConfig {
    /// Convert to validated engine intervals.
    pub fn durations(&self) -> Result<Durations, ConfigError> {
        let durations = Durations {
            work: Duration::from_secs(self.work_minutes * 60),
            pause: Duration::from_secs(self.pause_minutes * 60),
            tick: Duration::from_secs(self.tick_seconds),
            announce: Duration::from_secs(self.announce_minutes * 60),
        };
        durations.validate()?;
        Ok(durations)
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            work_minutes: default_work_minutes(),
            pause_minutes: default_pause_minutes(),
            tick_seconds: default_tick_seconds(),
            announce_minutes: default_announce_minutes(),
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            player: default_player(),
        }
    }
}

impl Config {
    /// Returns `~/.config/rodoro[-dev]/` based on RODORO_ENV.
    ///
    /// Set RODORO_ENV=dev to use a development config directory.
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let base_dir = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config");

        let env = std::env::var("RODORO_ENV").unwrap_or_else(|_| "production".to_string());

        let dir = if env == "dev" {
            base_dir.join("rodoro-dev")
        } else {
            base_dir.join("rodoro")
        };

        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::LoadFailed {
            path: dir.clone(),
            message: e.to_string(),
        })?;
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }
}

fn default_work_minutes() -> u64 {
    50
}

fn default_pause_minutes() -> u64 {
    10
}

fn default_tick_seconds() -> u64 {
    1
}

fn default_announce_minutes() -> u64 {
    5
}

fn default_player() -> String {
    "spotify".to_string()
}
