// ABOUTME: Booking step component: date strip, grouped availability, contact
// fields, and submit feedback

use chrono::NaiveDate;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::{AppState, BookingFocus};
use crate::scheduling::BookingStage;

use super::theme::*;

pub struct BookingComponent;

impl BookingComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Book a Consultation ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        if state.booking.stage == BookingStage::SubmittedSuccess {
            self.render_success(frame, inner, state);
            return;
        }

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(7),
                Constraint::Length(4),
                Constraint::Length(2),
            ])
            .split(inner);

        self.render_dates(frame, layout[0], state);
        self.render_slots(frame, layout[1], state);
        self.render_contact(frame, layout[2], state);
        self.render_status_line(frame, layout[3], state);
    }

    fn render_success(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let when = state
            .booking
            .selected_date
            .map(|d| d.format("%A, %B %-d").to_string())
            .unwrap_or_default();
        let time = state.booking.selected_time.clone().unwrap_or_default();

        let content = vec![
            Line::from(""),
            Line::from(Span::styled(
                "🎉 Consultation booked!",
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                format!("{when} at {time} (broker local time)"),
                Style::default().fg(SOFT_WHITE),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "A specialist will call you at the booked time.",
                Style::default().fg(MUTED_GRAY),
            )),
            Line::from(Span::styled(
                "Press q to exit.",
                Style::default().fg(MUTED_GRAY),
            )),
        ];
        frame.render_widget(
            Paragraph::new(content).alignment(Alignment::Center),
            area,
        );
    }

    /// A scrolling strip of offerable dates (Sunday-Thursday, next 30 days).
    fn render_dates(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.booking_focus == BookingFocus::Dates;
        let dates = state.offered_dates();

        let heading_style = if focused {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(MUTED_GRAY)
        };

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Length(2)])
            .split(area);

        frame.render_widget(
            Paragraph::new(Span::styled("Date (←/→, Enter to load times)", heading_style)),
            layout[0],
        );

        // Window of five dates centered near the highlight.
        let window = 5usize;
        let start = state.date_index.saturating_sub(window / 2).min(
            dates.len().saturating_sub(window),
        );
        let mut spans: Vec<Span> = vec![Span::styled("  ", Style::default())];
        for (idx, date) in dates.iter().enumerate().skip(start).take(window) {
            spans.push(self.date_chip(*date, idx, state));
            spans.push(Span::styled("  ", Style::default()));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), layout[1]);
    }

    fn date_chip(&self, date: NaiveDate, idx: usize, state: &AppState) -> Span<'static> {
        let highlighted = idx == state.date_index;
        let selected = state.booking.selected_date == Some(date);
        let label = date.format("%a %b %-d").to_string();

        let style = if selected {
            Style::default().fg(SELECTION_GREEN).add_modifier(Modifier::BOLD)
        } else if highlighted {
            Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(SOFT_WHITE)
        };

        let marker = if selected { "◉ " } else { "" };
        Span::styled(format!("{marker}{label}"), style)
    }

    fn render_slots(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let focused = state.booking_focus == BookingFocus::Slots;

        if state.booking.selected_date.is_none() {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Pick a date to see available times",
                    Style::default().fg(MUTED_GRAY),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(msg, area);
            return;
        }

        if state.booking.fetch_in_flight {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "🔄 Checking availability...",
                    Style::default().fg(GOLD),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(msg, area);
            return;
        }

        if let Some(error) = &state.booking.fetch_error {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("✗ {error}"),
                    Style::default().fg(ERROR_RED),
                )),
                Line::from(Span::styled(
                    "Press r to retry",
                    Style::default().fg(WARNING_YELLOW),
                )),
            ])
            .alignment(Alignment::Center);
            frame.render_widget(msg, area);
            return;
        }

        // Flattened index walks groups in display order, matching
        // AppState::visible_slots.
        let mut items: Vec<ListItem> = Vec::new();
        let mut flat_idx = 0usize;
        for group in state.slot_groups() {
            items.push(ListItem::new(Line::from(vec![
                Span::styled("─── ", Style::default().fg(SUBDUED_BORDER)),
                Span::styled(
                    group.title.clone(),
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" ───", Style::default().fg(SUBDUED_BORDER)),
            ])));

            for slot in &group.slots {
                let highlighted = focused && flat_idx == state.slot_index;
                let chosen = state.booking.selected_time.as_deref()
                    == Some(slot.broker_label.as_str());

                let (icon, icon_color) = if chosen {
                    ("◉", SELECTION_GREEN)
                } else if !slot.available {
                    ("✗", ERROR_RED)
                } else if highlighted {
                    ("▶", SELECTION_GREEN)
                } else {
                    ("○", MUTED_GRAY)
                };

                let label_style = if !slot.available {
                    Style::default().fg(MUTED_GRAY)
                } else if highlighted || chosen {
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };

                let broker_hint = if state.config.ui_preferences.show_broker_time {
                    format!("  ({} broker time)", slot.broker_label)
                } else {
                    String::new()
                };
                let booked_hint = if slot.available { "" } else { "  booked" };

                items.push(ListItem::new(Line::from(vec![
                    Span::styled("  ", Style::default()),
                    Span::styled(icon, Style::default().fg(icon_color)),
                    Span::styled(" ", Style::default()),
                    Span::styled(slot.viewer_label.clone(), label_style),
                    Span::styled(broker_hint, Style::default().fg(MUTED_GRAY)),
                    Span::styled(booked_hint, Style::default().fg(ERROR_RED)),
                ])));
                flat_idx += 1;
            }
        }

        frame.render_widget(List::new(items).style(Style::default().bg(PANEL_BG)), area);
    }

    fn render_contact(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.render_input(
            frame,
            layout[0],
            "Name",
            &state.name_input.value,
            state.name_input.cursor,
            state.booking_focus == BookingFocus::Name,
        );
        self.render_input(
            frame,
            layout[1],
            "Email",
            &state.email_input.value,
            state.email_input.cursor,
            state.booking_focus == BookingFocus::Email,
        );
    }

    fn render_input(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        value: &str,
        cursor: usize,
        focused: bool,
    ) {
        let border_color = if focused { GOLD } else { SUBDUED_BORDER };
        let text = if focused {
            let (before, after) = value.split_at(cursor);
            format!("{before}│{after}")
        } else {
            value.to_string()
        };

        let input = Paragraph::new(text)
            .style(Style::default().fg(SOFT_WHITE))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(border_color))
                    .style(Style::default().bg(DARK_BG))
                    .title(format!(" {label} ")),
            );
        frame.render_widget(input, area);
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let line = if state.booking.stage == BookingStage::Submitting {
            Line::from(Span::styled(
                "Submitting booking...",
                Style::default().fg(GOLD),
            ))
        } else if let Some(error) = &state.booking.inline_error {
            Line::from(Span::styled(
                format!("✗ {error}"),
                Style::default().fg(ERROR_RED),
            ))
        } else {
            Line::from(Span::styled(
                "Tab cycles focus • Enter on Email submits • w requests a callback within 24h",
                Style::default().fg(MUTED_GRAY),
            ))
        };

        frame.render_widget(
            Paragraph::new(line).alignment(Alignment::Center),
            area,
        );
    }
}

impl Default for BookingComponent {
    fn default() -> Self {
        Self::new()
    }
}
