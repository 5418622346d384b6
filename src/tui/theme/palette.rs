//! Color palette - grayscale, brightest on the line being sung

use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub header: Color,
    pub current: Color,
    pub past: Color,
    pub upcoming: Color,
    pub icon: Color,
    pub message: Color,
}

impl Palette {
    /// 256-color grays so the view looks the same on any terminal theme
    pub const MONO: Self = Self {
        header: Color::Indexed(250),
        current: Color::White,
        past: Color::Indexed(245),
        upcoming: Color::Indexed(240),
        icon: Color::White,
        message: Color::DarkGray,
    };
}

impl Default for Palette {
    fn default() -> Self {
        Self::MONO
    }
}
