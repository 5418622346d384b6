//! Theme configuration - Monochrome grayscale

pub mod palette;

pub use palette::Palette;

/// Active theme configuration
#[derive(Debug, Clone)]
pub struct Theme {
    pub palette: Palette,
    /// Shown in the middle of the screen when there is nothing to sing along to.
    pub idle_icon: &'static str,
}

impl Theme {
    pub fn new() -> Self {
        Self {
            palette: Palette::MONO,
            idle_icon: "♫",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the theme (always Mono)
pub fn get_theme() -> Theme {
    Theme::new()
}
