use crate::lyrics::{MatchTuning, ScalePolicy};
use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod defaults;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub player: PlayerConfig,
    pub lrclib: LrclibConfig,
    pub paths: PathsConfig,
    pub timing: TimingConfig,
    pub matching: MatchTuning,
    pub scaling: ScalePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// MPRIS player names handed to playerctl, in order of preference.
    pub players: Vec<String>,
    /// Upper bound for a single playerctl call.
    pub command_timeout_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LrclibConfig {
    pub base_url: String,
    /// Per request; a slow response counts as no result.
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Holds the active lyrics document and the log file.
    pub cache_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Cadence while waiting for a track with lyrics.
    pub track_poll_ms: u64,
    /// Cadence while following playback position.
    pub position_poll_ms: u64,
}

impl TimingConfig {
    pub fn track_poll(&self) -> Duration {
        Duration::from_millis(self.track_poll_ms)
    }

    pub fn position_poll(&self) -> Duration {
        Duration::from_millis(self.position_poll_ms)
    }
}

impl PathsConfig {
    pub fn log_file(&self) -> PathBuf {
        self.cache_dir.join("debug.log")
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            players: defaults::PLAYERS.iter().map(|p| p.to_string()).collect(),
            command_timeout_ms: 2000,
        }
    }
}

impl Default for LrclibConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::LRCLIB_BASE_URL.to_string(),
            timeout_secs: 5,
            user_agent: defaults::USER_AGENT.to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let cache_dir = project_dirs()
            .map(|p| p.cache_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("slowsync"));
        Self { cache_dir }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            track_poll_ms: 1000,
            position_poll_ms: 100,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "slowsync", "slowsync")
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = project_dirs().context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
        }
        let cfg = defaults::defaults();
        let raw = toml::to_string_pretty(&cfg).context("serialize default config")?;
        fs::write(&path, raw).with_context(|| format!("write {}", path.display()))?;
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
