//! Idle view - a music icon with a short status message below it

use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

pub fn render(frame: &mut Frame, message: &str) {
    let theme = get_theme();
    let area = frame.area();
    if area.height == 0 {
        return;
    }

    let center = area.y + area.height / 2;
    let icon = Line::from(Span::styled(
        theme.idle_icon,
        Style::default()
            .fg(theme.palette.icon)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(icon).alignment(Alignment::Center),
        Rect::new(area.x, center, area.width, 1),
    );

    let message_row = center + 2;
    if !message.is_empty() && message_row < area.bottom() {
        let text = Line::from(Span::styled(
            super::truncate_str(message, area.width as usize),
            Style::default().fg(theme.palette.message),
        ));
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center),
            Rect::new(area.x, message_row, area.width, 1),
        );
    }
}
