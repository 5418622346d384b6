use crate::lyrics::LrcLine;
use anyhow::Context;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::Backend, backend::CrosstermBackend};
use std::io::{self, Stdout};

pub mod theme;
pub mod widgets;

pub type TuiTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Where the orchestrator sends what should be on screen.
pub trait DisplaySink {
    /// Show `lines` with `current` highlighted (`None`: nothing sung yet).
    fn render_lines(&mut self, lines: &[LrcLine], current: Option<usize>, header: &str);
    /// Show the idle icon with a status message.
    fn render_idle(&mut self, message: &str);
}

/// Alternate screen with a hidden cursor, restored on drop.
///
/// Raw mode stays off so the interrupt key still raises SIGINT.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn enter() -> anyhow::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide).context("enter alt screen + hide cursor")?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort cleanup; don't panic in Drop.
        let mut stdout = io::stdout();
        let _ = execute!(stdout, Show, LeaveAlternateScreen);
    }
}

/// A ratatui terminal used as the display sink.
pub struct Screen<B: Backend> {
    terminal: Terminal<B>,
}

impl Screen<CrosstermBackend<Stdout>> {
    pub fn stdout() -> anyhow::Result<Self> {
        let terminal: TuiTerminal =
            Terminal::new(CrosstermBackend::new(io::stdout())).context("create terminal")?;
        Ok(Self::new(terminal))
    }
}

impl<B: Backend> Screen<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    #[cfg(test)]
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> DisplaySink for Screen<B> {
    fn render_lines(&mut self, lines: &[LrcLine], current: Option<usize>, header: &str) {
        if let Err(e) = self
            .terminal
            .draw(|f| widgets::lyrics::render(f, lines, current, header))
        {
            tracing::warn!(error = %e, "terminal draw failed");
        }
    }

    fn render_idle(&mut self, message: &str) {
        if let Err(e) = self.terminal.draw(|f| widgets::idle::render(f, message)) {
            tracing::warn!(error = %e, "terminal draw failed");
        }
    }
}
