// ABOUTME: Help overlay listing key bindings

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::theme::*;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup = Self::centered_rect(60, 70, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Help ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        let bindings: &[(&str, &str)] = &[
            ("Up/Down, j/k", "Move within option lists"),
            ("Enter", "Select / continue / submit"),
            ("Esc", "Previous step"),
            ("Tab", "Switch field focus"),
            ("←/→", "Move between dates on the booking step"),
            ("r", "Retry loading availability"),
            ("w", "Request a callback within 24 hours instead"),
            ("?", "Toggle this help"),
            ("q, Ctrl+C", "Quit"),
        ];

        let lines: Vec<Line> = bindings
            .iter()
            .map(|(keys, desc)| {
                Line::from(vec![
                    Span::styled(format!("  {keys:<16}"), Style::default().fg(GOLD)),
                    Span::styled((*desc).to_string(), Style::default().fg(SOFT_WHITE)),
                ])
            })
            .collect();

        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
    }

    fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ])
            .split(area);

        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ])
            .split(vertical[1])[1]
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
