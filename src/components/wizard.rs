// ABOUTME: Wizard component: flow selection, step progress header, option
// lists, text steps, and the navigation footer

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};

use crate::app::state::{AppState, LocationField, ServiceField, TextField};
use crate::models::flow::{
    ContainerKind, FlowAnswers, FlowKind, FreightMode, HandlingKind, PackagingPreference,
    ReadinessWindow, ServiceTerms, ShippingType,
};
use crate::wizard::{CarStep, FreightStep, WizardStep};

use super::booking::BookingComponent;
use super::theme::*;

pub struct WizardComponent {
    booking: BookingComponent,
}

impl WizardComponent {
    pub fn new() -> Self {
        Self {
            booking: BookingComponent::new(),
        }
    }

    /// Render the flow-selection screen shown before a wizard starts.
    pub fn render_flow_select(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(" Freightbook ")
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(2),
            ])
            .split(inner);

        let intro = Paragraph::new(vec![
            Line::from(Span::styled(
                "What are we moving for you?",
                Style::default().fg(SOFT_WHITE),
            )),
            Line::from(Span::styled(
                "Use Up/Down to choose, Enter to start",
                Style::default().fg(MUTED_GRAY),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(intro, layout[0]);

        let items: Vec<ListItem> = FlowKind::all()
            .iter()
            .enumerate()
            .map(|(idx, kind)| {
                let selected = idx == state.flow_choice;
                let (icon, style) = if selected {
                    (
                        "▶",
                        Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("●", Style::default().fg(SOFT_WHITE))
                };
                ListItem::new(Line::from(vec![
                    Span::styled("  ", Style::default()),
                    Span::styled(icon, Style::default().fg(SELECTION_GREEN)),
                    Span::styled(" ", Style::default()),
                    Span::styled(kind.label(), style),
                ]))
            })
            .collect();
        frame.render_widget(
            List::new(items).style(Style::default().bg(PANEL_BG)),
            layout[1],
        );

        let footer = Paragraph::new(Span::styled(
            "[Enter] Start  |  [?] Help  |  [q] Quit",
            Style::default().fg(MUTED_GRAY),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(footer, layout[2]);
    }

    /// Render the active wizard step.
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(DARK_BG)), area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Min(15),
                Constraint::Length(3),
            ])
            .split(area);

        self.render_header(frame, layout[0], state);
        self.render_step_content(frame, layout[1], state);
        self.render_navigation(frame, layout[2], state);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .style(Style::default().bg(PANEL_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(1), Constraint::Length(1)])
            .split(inner);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                state.step.title(&state.answers),
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({}/{})", state.step.number(), state.step.total()),
                Style::default().fg(MUTED_GRAY),
            ),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(title, header_layout[0]);

        self.render_progress(frame, header_layout[1], state);
    }

    /// Step progress dots.
    fn render_progress(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let total = state.step.total();
        let current_idx = state.step.number() - 1;

        let mut spans = vec![Span::styled("  ", Style::default())];
        for idx in 0..total {
            let (icon, style) = if idx < current_idx {
                ("●", Style::default().fg(SELECTION_GREEN))
            } else if idx == current_idx {
                ("◉", Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
            } else {
                ("○", Style::default().fg(MUTED_GRAY))
            };
            spans.push(Span::styled(icon, style));
            if idx < total - 1 {
                spans.push(Span::styled(" → ", Style::default().fg(SUBDUED_BORDER)));
            }
        }

        let progress = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(progress, area);
    }

    fn render_step_content(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        if state.step.is_booking() {
            self.booking.render(frame, area, state);
            return;
        }

        match state.step {
            WizardStep::Freight(FreightStep::Service) => self.render_service(frame, area, state),
            WizardStep::Freight(FreightStep::Handling) => self.render_select(
                frame,
                area,
                state,
                &Self::labels(HandlingKind::all().iter().map(|o| o.label())),
            ),
            WizardStep::Freight(FreightStep::Packaging) => self.render_select(
                frame,
                area,
                state,
                &Self::labels(PackagingPreference::all().iter().map(|o| o.label())),
            ),
            WizardStep::Freight(FreightStep::CargoSpecs) => self.render_select(
                frame,
                area,
                state,
                &Self::labels(ContainerKind::all().iter().map(|o| o.label())),
            ),
            WizardStep::Freight(FreightStep::Timeline) => self.render_select(
                frame,
                area,
                state,
                &Self::labels(ReadinessWindow::all().iter().map(|o| o.label())),
            ),
            WizardStep::Freight(FreightStep::Locations)
            | WizardStep::Car(CarStep::Locations) => self.render_locations(frame, area, state),
            WizardStep::Car(CarStep::Vehicle) => self.render_vehicle(frame, area, state),
            _ => {}
        }
    }

    fn labels(iter: impl Iterator<Item = &'static str>) -> Vec<&'static str> {
        iter.collect()
    }

    fn step_block(&self, state: &AppState) -> Block<'static> {
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(ACCENT_BLUE))
            .style(Style::default().bg(PANEL_BG))
            .title(format!(" {} ", state.step.title(&state.answers)))
            .title_style(Style::default().fg(GOLD).add_modifier(Modifier::BOLD))
    }

    fn description_widget(&self, state: &AppState) -> Paragraph<'static> {
        Paragraph::new(Span::styled(
            state.step.description(&state.answers),
            Style::default().fg(SOFT_WHITE),
        ))
        .alignment(Alignment::Center)
    }

    /// Generic single-select option list used by most steps.
    fn render_select(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        options: &[&'static str],
    ) {
        let block = self.step_block(state);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(2), Constraint::Min(5)])
            .split(inner);

        frame.render_widget(self.description_widget(state), layout[0]);
        self.render_option_list(frame, layout[1], options, state.option_index, None);
    }

    fn render_option_list(
        &self,
        frame: &mut Frame,
        area: Rect,
        options: &[&'static str],
        highlighted: usize,
        committed: Option<usize>,
    ) {
        let items: Vec<ListItem> = options
            .iter()
            .enumerate()
            .map(|(idx, label)| {
                let selected = idx == highlighted;
                let (icon, icon_color) = if committed == Some(idx) {
                    ("✓", SELECTION_GREEN)
                } else if selected {
                    ("▶", SELECTION_GREEN)
                } else {
                    ("○", MUTED_GRAY)
                };
                let style = if selected {
                    Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(SOFT_WHITE)
                };
                ListItem::new(Line::from(vec![
                    Span::styled("  ", Style::default()),
                    Span::styled(icon, Style::default().fg(icon_color)),
                    Span::styled(" ", Style::default()),
                    Span::styled(*label, style),
                ]))
            })
            .collect();

        frame.render_widget(List::new(items).style(Style::default().bg(PANEL_BG)), area);
    }

    /// The service step stacks three selects: shipping type, freight mode,
    /// service terms.
    fn render_service(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = self.step_block(state);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(4),
                Constraint::Length(5),
                Constraint::Length(5),
            ])
            .split(inner);

        frame.render_widget(self.description_widget(state), layout[0]);

        let FlowAnswers::Freight(answers) = &state.answers else {
            return;
        };

        let sections: [(&str, Vec<&'static str>, Option<usize>, ServiceField); 3] = [
            (
                "Shipping type",
                ShippingType::all().iter().map(|o| o.label()).collect(),
                answers
                    .shipping_type
                    .and_then(|v| ShippingType::all().iter().position(|o| *o == v)),
                ServiceField::ShippingType,
            ),
            (
                "Freight mode",
                FreightMode::all().iter().map(|o| o.label()).collect(),
                answers
                    .freight_mode
                    .and_then(|v| FreightMode::all().iter().position(|o| *o == v)),
                ServiceField::FreightMode,
            ),
            (
                "Service terms",
                ServiceTerms::all().iter().map(|o| o.label()).collect(),
                answers
                    .service_terms
                    .and_then(|v| ServiceTerms::all().iter().position(|o| *o == v)),
                ServiceField::ServiceTerms,
            ),
        ];

        for (i, (heading, options, committed, field)) in sections.into_iter().enumerate() {
            let active = state.service_field == field;
            let section_area = layout[i + 1];
            let section_layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(section_area);

            let heading_style = if active {
                Style::default().fg(GOLD).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            };
            frame.render_widget(
                Paragraph::new(Span::styled(heading, heading_style)),
                section_layout[0],
            );

            let highlighted = if active { state.option_index } else { usize::MAX };
            self.render_option_list(frame, section_layout[1], &options, highlighted, committed);
        }
    }

    fn render_text_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        label: &str,
        field: &TextField,
        focused: bool,
    ) {
        let border_color = if focused { GOLD } else { SUBDUED_BORDER };
        let text = if focused {
            let (before, after) = field.value.split_at(field.cursor);
            format!("{before}│{after}")
        } else {
            field.value.clone()
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

    fn render_locations(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = self.step_block(state);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(inner);

        frame.render_widget(self.description_widget(state), layout[0]);

        self.render_text_field(
            frame,
            layout[1],
            "From",
            &state.origin_input,
            state.location_field == LocationField::Origin,
        );
        self.render_text_field(
            frame,
            layout[2],
            "To",
            &state.destination_input,
            state.location_field == LocationField::Destination,
        );

        let hint = Paragraph::new(Span::styled(
            "Tab switches fields • Enter continues",
            Style::default().fg(MUTED_GRAY),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, layout[3]);
    }

    fn render_vehicle(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = self.step_block(state);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(3),
                Constraint::Length(2),
            ])
            .split(inner);

        frame.render_widget(self.description_widget(state), layout[0]);
        self.render_text_field(frame, layout[1], "Vehicle", &state.vehicle_input, true);

        let hint = Paragraph::new(Span::styled(
            "e.g. 2021 Toyota Land Cruiser • Enter continues",
            Style::default().fg(MUTED_GRAY),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, layout[2]);
    }

    fn render_navigation(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SUBDUED_BORDER))
            .style(Style::default().bg(DARK_BG));

        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut spans = vec![Span::styled("  ", Style::default())];

        spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled("Esc", Style::default().fg(GOLD)));
        spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled(" Back", Style::default().fg(MUTED_GRAY)));
        spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));

        let can_advance = state.step.can_advance(&state.answers) || state.step.is_booking();
        spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled(
            "Enter",
            if can_advance {
                Style::default().fg(GOLD)
            } else {
                Style::default().fg(MUTED_GRAY)
            },
        ));
        spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled(
            if state.step.is_booking() {
                " Select / Submit"
            } else {
                " Continue"
            },
            Style::default().fg(MUTED_GRAY),
        ));

        spans.push(Span::styled("  |  ", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled("[", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled("?", Style::default().fg(GOLD)));
        spans.push(Span::styled("]", Style::default().fg(SUBDUED_BORDER)));
        spans.push(Span::styled(" Help", Style::default().fg(MUTED_GRAY)));

        let nav = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
        frame.render_widget(nav, inner);
    }
}

impl Default for WizardComponent {
    fn default() -> Self {
        Self::new()
    }
}
