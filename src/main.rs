mod app;
mod config;
mod lyrics;
mod player;
mod storage;
mod sync;
#[cfg(test)]
mod testing;
mod title;
mod tui;

use anyhow::Context;
use clap::{Parser, Subcommand};
use lyrics::LrclibClient;
use player::{PlayerSource, TrackMetadata, playerctl::Playerctl};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use storage::{FileLyricStore, LyricStore};
use tracing::{Level, info};

#[derive(Debug, Parser)]
#[command(
    name = "slowsync",
    version,
    about = "Synced lyrics for slowed and sped-up uploads"
)]
struct Cli {
    /// Override config file path.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Follow the active player and show its lyrics (default).
    Run,
    /// Run the lyrics lookup for a title and print what was found (headless).
    Lookup {
        title: String,
        /// Artist as the player would report it.
        #[arg(long)]
        artist: Option<String>,
        /// Observed track duration in seconds.
        #[arg(long)]
        duration: Option<f64>,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print an LRC file with every timestamp multiplied by FACTOR (headless).
    Scale { file: PathBuf, factor: f64 },
    /// Print what the player currently reports (headless).
    Status,
    /// Remove stored lyrics documents.
    ClearCache,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref()).context("load config")?;
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };

    match cli.command.unwrap_or(Command::Run) {
        Command::Run => {
            init_file_logging(&cfg.paths.log_file(), level)?;
            run(cfg).await?;
        }
        Command::Lookup {
            title,
            artist,
            duration,
            json,
        } => {
            init_stderr_logging(level);
            let track = TrackMetadata {
                title,
                artist: artist.unwrap_or_default(),
                duration_ms: duration
                    .filter(|d| d.is_finite() && *d > 0.0)
                    .map(|d| (d * 1000.0) as u64),
            };
            let client = LrclibClient::new(&cfg.lrclib)?;
            let report = app::lookup::resolve(&client, &track, cfg.matching, &cfg.scaling).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
        }
        Command::Scale { file, factor } => {
            init_stderr_logging(level);
            if !factor.is_finite() || factor <= 0.0 {
                anyhow::bail!("factor must be a positive number, got {factor}");
            }
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("read {}", file.display()))?;
            print!("{}", lyrics::scale::scale_document(&raw, factor));
        }
        Command::Status => {
            init_stderr_logging(level);
            let player = Playerctl::new(&cfg.player);
            match player.metadata().await {
                Some(track) => {
                    println!("title:    {}", track.title);
                    println!("artist:   {}", track.artist);
                    match track.duration_secs() {
                        Some(secs) => println!("duration: {secs:.1}s"),
                        None => println!("duration: unknown"),
                    }
                    match player.position_ms().await {
                        Some(ms) => println!("position: {:.1}s", ms as f64 / 1000.0),
                        None => println!("position: unknown"),
                    }
                }
                None => println!("No music playing"),
            }
        }
        Command::ClearCache => {
            init_stderr_logging(level);
            let store = FileLyricStore::new(&cfg.paths.cache_dir);
            let removed = store.clear_all()?;
            println!(
                "Removed {removed} lyrics file(s) from {}",
                cfg.paths.cache_dir.display()
            );
        }
    }

    Ok(())
}

async fn run(cfg: config::Config) -> anyhow::Result<()> {
    let player = Playerctl::new(&cfg.player);
    let provider = LrclibClient::new(&cfg.lrclib)?;
    let store = FileLyricStore::new(&cfg.paths.cache_dir);

    let guard = tui::TerminalGuard::enter().context("init terminal")?;
    let screen = tui::Screen::stdout()?;
    let mut app = app::App::new(cfg, player, provider, store, screen);

    tokio::select! {
        _ = app.run() => {}
        res = shutdown_signal() => {
            res?;
            info!("shutting down");
        }
    }

    drop(app);
    drop(guard);
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() -> anyhow::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut term = signal(SignalKind::terminate()).context("install SIGTERM handler")?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res.context("wait for SIGINT")?,
        _ = term.recv() => {}
    }
    Ok(())
}

#[cfg(not(unix))]
async fn shutdown_signal() -> anyhow::Result<()> {
    tokio::signal::ctrl_c().await.context("wait for ctrl-c")
}

/// The terminal belongs to the lyrics view, so logs go to a file.
fn init_file_logging(path: &Path, level: Level) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn init_stderr_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(level)
        .init();
}

fn print_report(report: &app::lookup::LookupReport) {
    println!("title:      {}", report.raw_title);
    println!("normalized: {}", report.normalized);
    match &report.parsed.part_a {
        Some(a) => println!("parts:      '{a}' / '{}'", report.parsed.part_b),
        None => println!("parts:      '{}'", report.parsed.part_b),
    }
    println!("altered:    {}", report.altered);
    println!("attempts:");
    for (i, attempt) in report.attempts.iter().enumerate() {
        println!("  {:02}. {attempt}", i + 1);
    }

    let Some(m) = &report.matched else {
        println!("match:      none");
        return;
    };
    let duration = m
        .candidate
        .duration_secs
        .map(|d| format!("{d:.0}s"))
        .unwrap_or_else(|| "unknown".to_string());
    println!(
        "match:      {} by {} ({duration}) via {}",
        m.candidate.track_name, m.candidate.artist_name, m.attempt
    );
    match m.scale.factor() {
        Some(factor) => println!("scale:      x{factor:.3}"),
        None => println!("scale:      {:?}", m.scale),
    }
}
