use super::Config;

/// Browsers whose media sessions carry the uploads we care about.
pub const PLAYERS: [&str; 4] = ["edge", "chromium", "chrome", "firefox"];

pub const LRCLIB_BASE_URL: &str = "https://lrclib.net/api";

pub const USER_AGENT: &str = concat!("slowsync/", env!("CARGO_PKG_VERSION"));

/// Config written on first run.
pub fn defaults() -> Config {
    Config::default()
}
