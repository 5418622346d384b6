//! Player bridge over the `playerctl` MPRIS command line utility.

use super::{PlayerSource, TrackMetadata};
use crate::config::PlayerConfig;
use anyhow::Context;
use std::time::Duration;
use tokio::process::Command;

/// Fields are tab separated; titles practically never contain tabs.
const METADATA_FORMAT: &str = "{{xesam:title}}\t{{xesam:artist}}\t{{mpris:length}}";

#[derive(Debug, Clone)]
pub struct Playerctl {
    players: String,
    timeout: Duration,
}

impl Playerctl {
    pub fn new(cfg: &PlayerConfig) -> Self {
        Self {
            players: cfg.players.join(","),
            timeout: Duration::from_millis(cfg.command_timeout_ms),
        }
    }

    async fn run(&self, args: &[&str]) -> anyhow::Result<String> {
        let mut cmd = Command::new("playerctl");
        cmd.arg(format!("--player={}", self.players))
            .args(args)
            .stdin(std::process::Stdio::null())
            .kill_on_drop(true);

        let out = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .context("playerctl timed out")?
            .context("run playerctl")?;

        if !out.status.success() {
            anyhow::bail!("playerctl exited with {}", out.status);
        }
        Ok(String::from_utf8_lossy(&out.stdout).into_owned())
    }
}

impl PlayerSource for Playerctl {
    async fn metadata(&self) -> Option<TrackMetadata> {
        match self.run(&["metadata", "--format", METADATA_FORMAT]).await {
            Ok(raw) => parse_metadata(&raw),
            Err(e) => {
                tracing::debug!(error = %format!("{e:#}"), "no player metadata");
                None
            }
        }
    }

    async fn position_ms(&self) -> Option<u64> {
        match self.run(&["position"]).await {
            Ok(raw) => parse_position(&raw),
            Err(e) => {
                tracing::debug!(error = %format!("{e:#}"), "no player position");
                None
            }
        }
    }
}

fn parse_metadata(raw: &str) -> Option<TrackMetadata> {
    let mut fields = raw.trim_end_matches(['\r', '\n']).splitn(3, '\t');
    let title = fields.next()?.trim();
    if title.is_empty() {
        return None;
    }
    let artist = fields.next().unwrap_or_default().trim();
    // mpris:length is in microseconds.
    let duration_ms = fields
        .next()
        .and_then(|l| l.trim().parse::<u64>().ok())
        .filter(|us| *us > 0)
        .map(|us| us / 1000);

    Some(TrackMetadata {
        title: title.to_string(),
        artist: artist.to_string(),
        duration_ms,
    })
}

/// `playerctl position` prints fractional seconds.
fn parse_position(raw: &str) -> Option<u64> {
    let secs: f64 = raw.trim().parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some((secs * 1000.0) as u64)
}
