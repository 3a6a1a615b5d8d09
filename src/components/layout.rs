// ABOUTME: Top-level layout: dispatches views, draws notifications and the
// help overlay

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::state::{AppState, NotificationKind, View};

use super::theme::*;
use super::{HelpComponent, WizardComponent};

pub struct LayoutComponent {
    wizard: WizardComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            wizard: WizardComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&self, frame: &mut Frame, state: &AppState) {
        let area = frame.size();

        let (main_area, notification_area) = if state.notifications.is_empty() {
            (area, None)
        } else {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(10), Constraint::Length(1)])
                .split(area);
            (layout[0], Some(layout[1]))
        };

        match state.current_view {
            View::FlowSelect => self.wizard.render_flow_select(frame, main_area, state),
            View::Wizard => self.wizard.render(frame, main_area, state),
        }

        if let Some(notification_area) = notification_area {
            self.render_notifications(frame, notification_area, state);
        }

        if state.help_visible {
            self.help.render(frame, area);
        }
    }

    fn render_notifications(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        // Only the most recent notification fits the single status line.
        let Some(notification) = state.notifications.last() else {
            return;
        };
        let (icon, color) = match notification.kind {
            NotificationKind::Success => ("✓", SELECTION_GREEN),
            NotificationKind::Error => ("✗", ERROR_RED),
        };
        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(color)),
            Span::styled(
                notification.message.clone(),
                Style::default().fg(SOFT_WHITE),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
