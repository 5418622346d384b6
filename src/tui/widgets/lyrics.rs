//! Full-screen lyrics view - header on top, current line centered

use super::truncate_str;
use crate::lyrics::LrcLine;
use crate::tui::theme::get_theme;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Layout:
/// ┌────────────────────────────────────┐
/// │          Song - Artist             │
/// │                                    │
/// │          an earlier line           │
/// │        the line being sung         │
/// │           an upcoming line         │
/// └────────────────────────────────────┘
pub fn render(frame: &mut Frame, lines: &[LrcLine], current: Option<usize>, header: &str) {
    let theme = get_theme();
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(1), // Spacing
            Constraint::Min(0),    // Lyrics
            Constraint::Length(1), // Bottom padding
        ])
        .split(area);

    let max_width = area.width.saturating_sub(4) as usize;

    let header_line = Line::from(Span::styled(
        truncate_str(header, max_width),
        Style::default()
            .fg(theme.palette.header)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(
        Paragraph::new(header_line).alignment(Alignment::Center),
        rows[0],
    );

    let (start, end) = window(lines.len(), current, rows[2].height as usize);
    let display_lines: Vec<Line> = (start..end)
        .map(|i| {
            let style = match current {
                Some(c) if i == c => Style::default()
                    .fg(theme.palette.current)
                    .add_modifier(Modifier::BOLD),
                Some(c) if i < c => Style::default().fg(theme.palette.past),
                _ => Style::default().fg(theme.palette.upcoming),
            };
            Line::from(Span::styled(truncate_str(&lines[i].text, max_width), style))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(display_lines).alignment(Alignment::Center),
        rows[2],
    );
}

/// Index range of lines that fit in `height` rows, keeping the current line
/// in the middle once there are enough lines above it.
fn window(len: usize, current: Option<usize>, height: usize) -> (usize, usize) {
    if len == 0 || height == 0 {
        return (0, 0);
    }
    let Some(current) = current else {
        return (0, len.min(height));
    };

    let lines_before = height / 2;
    let lines_after = height - lines_before - 1;

    let start = current.saturating_sub(lines_before);
    let end = (current + lines_after + 1).min(len);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{Terminal, backend::TestBackend};

    fn lines(n: usize) -> Vec<LrcLine> {
        (0..n)
            .map(|i| LrcLine::new(i as u64 * 1000, format!("line {i}")))
            .collect()
    }

    fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect()
    }

    #[test]
    fn test_window() {
        assert_eq!(window(0, Some(0), 10), (0, 0));
        assert_eq!(window(5, None, 3), (0, 3));
        assert_eq!(window(20, Some(0), 5), (0, 3));
        assert_eq!(window(20, Some(10), 5), (8, 13));
        assert_eq!(window(20, Some(19), 5), (17, 20));
        assert_eq!(window(20, Some(4), 1), (4, 5));
    }

    #[test]
    fn test_render_centers_current_line() {
        let mut terminal = Terminal::new(TestBackend::new(30, 8)).unwrap();
        let lyrics = lines(10);
        terminal
            .draw(|f| render(f, &lyrics, Some(5), "Song - Artist"))
            .unwrap();

        let rows = screen_rows(&terminal);
        assert!(rows[0].contains("Song - Artist"));
        // Five lyric rows: two before, the current one, two after.
        assert!(rows[2].contains("line 3"));
        assert!(rows[4].contains("line 5"));
        assert!(rows[5].contains("line 6"));
        assert!(rows[7].trim().is_empty());
    }

    #[test]
    fn test_render_truncates_long_header() {
        let mut terminal = Terminal::new(TestBackend::new(20, 6)).unwrap();
        terminal
            .draw(|f| render(f, &lines(1), None, "A very long song title - Someone"))
            .unwrap();
        assert!(screen_rows(&terminal)[0].contains("A very long s..."));
    }
}
