// ABOUTME: Event handling for keyboard input and app actions

#![allow(dead_code)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::app::state::{AppState, BookingFocus, LocationField, ServiceField, View};
use crate::models::booking::BookingIntent;
use crate::models::flow::{
    ContainerKind, FlowAnswers, FlowKind, FreightMode, HandlingKind, PackagingPreference,
    ReadinessWindow, ServiceTerms, ShippingType,
};
use crate::wizard::{CarStep, FreightStep, WizardStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    // Flow selection screen
    FlowNext,
    FlowPrevious,
    // Wizard navigation
    NextOption,
    PreviousOption,
    Confirm,
    GoBack,
    FocusNext,
    // Text editing
    InputChar(char),
    Backspace,
    CursorLeft,
    CursorRight,
    // Booking step
    NextDate,
    PreviousDate,
    NextSlot,
    PreviousSlot,
    RetryFetch,
    SubmitWaitLead,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        // Ctrl+C always quits.
        if key_event.modifiers.contains(KeyModifiers::CONTROL)
            && key_event.code == KeyCode::Char('c')
        {
            return Some(AppEvent::Quit);
        }

        // While help is open only help/escape keys respond.
        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
                    Some(AppEvent::ToggleHelp)
                }
                _ => None,
            };
        }

        let text_context = state.in_text_context();

        if !text_context {
            match key_event.code {
                KeyCode::Char('q') => return Some(AppEvent::Quit),
                KeyCode::Char('?') => return Some(AppEvent::ToggleHelp),
                _ => {}
            }
        }

        match state.current_view {
            View::FlowSelect => match key_event.code {
                KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::FlowNext),
                KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::FlowPrevious),
                KeyCode::Enter => Some(AppEvent::Confirm),
                KeyCode::Esc => Some(AppEvent::Quit),
                _ => None,
            },
            View::Wizard if state.step.is_booking() => {
                Self::handle_booking_key(key_event, state, text_context)
            }
            View::Wizard => Self::handle_wizard_key(key_event, text_context),
        }
    }

    fn handle_wizard_key(key_event: KeyEvent, text_context: bool) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::GoBack),
            KeyCode::Enter => Some(AppEvent::Confirm),
            KeyCode::Tab => Some(AppEvent::FocusNext),
            KeyCode::Backspace if text_context => Some(AppEvent::Backspace),
            KeyCode::Left => {
                if text_context {
                    Some(AppEvent::CursorLeft)
                } else {
                    Some(AppEvent::GoBack)
                }
            }
            KeyCode::Right if text_context => Some(AppEvent::CursorRight),
            KeyCode::Char(c) if text_context => Some(AppEvent::InputChar(c)),
            KeyCode::Down | KeyCode::Char('j') => Some(AppEvent::NextOption),
            KeyCode::Up | KeyCode::Char('k') => Some(AppEvent::PreviousOption),
            _ => None,
        }
    }

    fn handle_booking_key(
        key_event: KeyEvent,
        state: &AppState,
        text_context: bool,
    ) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::GoBack),
            KeyCode::Enter => Some(AppEvent::Confirm),
            KeyCode::Tab => Some(AppEvent::FocusNext),
            KeyCode::Backspace if text_context => Some(AppEvent::Backspace),
            KeyCode::Char(c) if text_context => Some(AppEvent::InputChar(c)),
            KeyCode::Left | KeyCode::Char('h') if state.booking_focus == BookingFocus::Dates => {
                Some(AppEvent::PreviousDate)
            }
            KeyCode::Right | KeyCode::Char('l') if state.booking_focus == BookingFocus::Dates => {
                Some(AppEvent::NextDate)
            }
            KeyCode::Left if text_context => Some(AppEvent::CursorLeft),
            KeyCode::Right if text_context => Some(AppEvent::CursorRight),
            KeyCode::Down | KeyCode::Char('j') if state.booking_focus == BookingFocus::Slots => {
                Some(AppEvent::NextSlot)
            }
            KeyCode::Up | KeyCode::Char('k') if state.booking_focus == BookingFocus::Slots => {
                Some(AppEvent::PreviousSlot)
            }
            KeyCode::Char('r') if !text_context => Some(AppEvent::RetryFetch),
            KeyCode::Char('w') if !text_context => Some(AppEvent::SubmitWaitLead),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        match event {
            AppEvent::Quit => state.should_quit = true,
            AppEvent::ToggleHelp => state.help_visible = !state.help_visible,
            AppEvent::FlowNext => {
                state.flow_choice = (state.flow_choice + 1) % FlowKind::all().len();
            }
            AppEvent::FlowPrevious => {
                let len = FlowKind::all().len();
                state.flow_choice = (state.flow_choice + len - 1) % len;
            }
            AppEvent::NextOption => {
                let count = Self::option_count(state);
                if count > 0 {
                    state.option_index = (state.option_index + 1) % count;
                }
            }
            AppEvent::PreviousOption => {
                let count = Self::option_count(state);
                if count > 0 {
                    state.option_index = (state.option_index + count - 1) % count;
                }
            }
            AppEvent::Confirm => Self::confirm(state),
            AppEvent::GoBack => Self::go_back(state),
            AppEvent::FocusNext => Self::focus_next(state),
            AppEvent::InputChar(c) => {
                if let Some(field) = Self::active_text_field(state) {
                    field.input_char(c);
                    state.sync_contact();
                }
            }
            AppEvent::Backspace => {
                if let Some(field) = Self::active_text_field(state) {
                    field.backspace();
                    state.sync_contact();
                }
            }
            AppEvent::CursorLeft => {
                if let Some(field) = Self::active_text_field(state) {
                    field.cursor_left();
                }
            }
            AppEvent::CursorRight => {
                if let Some(field) = Self::active_text_field(state) {
                    field.cursor_right();
                }
            }
            AppEvent::NextDate => {
                let len = state.offered_dates().len();
                if len > 0 && state.date_index + 1 < len {
                    state.date_index += 1;
                }
            }
            AppEvent::PreviousDate => {
                state.date_index = state.date_index.saturating_sub(1);
            }
            AppEvent::NextSlot => {
                let len = state.visible_slots().len();
                if len > 0 && state.slot_index + 1 < len {
                    state.slot_index += 1;
                }
            }
            AppEvent::PreviousSlot => {
                state.slot_index = state.slot_index.saturating_sub(1);
            }
            AppEvent::RetryFetch => state.retry_fetch(),
            AppEvent::SubmitWaitLead => state.begin_submit(BookingIntent::Wait24Hours),
        }
    }

    /// Number of options in the currently focused select list.
    fn option_count(state: &AppState) -> usize {
        match state.step {
            WizardStep::Freight(FreightStep::Service) => match state.service_field {
                ServiceField::ShippingType => ShippingType::all().len(),
                ServiceField::FreightMode => FreightMode::all().len(),
                ServiceField::ServiceTerms => ServiceTerms::all().len(),
            },
            WizardStep::Freight(FreightStep::Handling) => HandlingKind::all().len(),
            WizardStep::Freight(FreightStep::Packaging) => PackagingPreference::all().len(),
            WizardStep::Freight(FreightStep::CargoSpecs) => ContainerKind::all().len(),
            WizardStep::Freight(FreightStep::Timeline) => ReadinessWindow::all().len(),
            _ => 0,
        }
    }

    fn active_text_field(
        state: &mut AppState,
    ) -> Option<&mut crate::app::state::TextField> {
        match state.step {
            WizardStep::Freight(FreightStep::Locations)
            | WizardStep::Car(CarStep::Locations) => Some(match state.location_field {
                LocationField::Origin => &mut state.origin_input,
                LocationField::Destination => &mut state.destination_input,
            }),
            WizardStep::Car(CarStep::Vehicle) => Some(&mut state.vehicle_input),
            step if step.is_booking() => match state.booking_focus {
                BookingFocus::Name => Some(&mut state.name_input),
                BookingFocus::Email => Some(&mut state.email_input),
                _ => None,
            },
            _ => None,
        }
    }

    fn focus_next(state: &mut AppState) {
        match state.step {
            WizardStep::Freight(FreightStep::Locations)
            | WizardStep::Car(CarStep::Locations) => {
                state.location_field = match state.location_field {
                    LocationField::Origin => LocationField::Destination,
                    LocationField::Destination => LocationField::Origin,
                };
            }
            step if step.is_booking() => {
                state.booking_focus = state.booking_focus.next();
            }
            _ => {}
        }
    }

    fn confirm(state: &mut AppState) {
        if state.current_view == View::FlowSelect {
            let kind = FlowKind::all()[state.flow_choice % FlowKind::all().len()];
            state.start_flow(kind);
            return;
        }

        match state.step {
            WizardStep::Freight(FreightStep::Service) => Self::confirm_service(state),
            WizardStep::Freight(FreightStep::Handling) => {
                if let FlowAnswers::Freight(a) = &mut state.answers {
                    a.handling = Some(HandlingKind::all()[state.option_index]);
                }
                Self::advance_step(state);
            }
            WizardStep::Freight(FreightStep::Packaging) => {
                if let FlowAnswers::Freight(a) = &mut state.answers {
                    a.packaging = Some(PackagingPreference::all()[state.option_index]);
                }
                Self::advance_step(state);
            }
            WizardStep::Freight(FreightStep::CargoSpecs) => {
                if let FlowAnswers::Freight(a) = &mut state.answers {
                    a.container = Some(ContainerKind::all()[state.option_index]);
                }
                Self::advance_step(state);
            }
            WizardStep::Freight(FreightStep::Timeline) => {
                if let FlowAnswers::Freight(a) = &mut state.answers {
                    a.readiness = Some(ReadinessWindow::all()[state.option_index]);
                }
                Self::advance_step(state);
            }
            WizardStep::Freight(FreightStep::Locations)
            | WizardStep::Car(CarStep::Locations) => Self::confirm_locations(state),
            WizardStep::Car(CarStep::Vehicle) => {
                if let FlowAnswers::Car(a) = &mut state.answers {
                    a.vehicle = Some(state.vehicle_input.value.trim().to_string());
                }
                Self::advance_step(state);
            }
            step if step.is_booking() => Self::confirm_booking(state),
            _ => {}
        }
    }

    fn confirm_service(state: &mut AppState) {
        let FlowAnswers::Freight(a) = &mut state.answers else {
            return;
        };
        match state.service_field {
            ServiceField::ShippingType => {
                a.shipping_type = Some(ShippingType::all()[state.option_index]);
            }
            ServiceField::FreightMode => {
                a.freight_mode = Some(FreightMode::all()[state.option_index]);
            }
            ServiceField::ServiceTerms => {
                a.service_terms = Some(ServiceTerms::all()[state.option_index]);
            }
        }
        if let Some(next) = state.service_field.next() {
            state.service_field = next;
            state.option_index = 0;
        } else {
            Self::advance_step(state);
        }
    }

    fn confirm_locations(state: &mut AppState) {
        if state.location_field == LocationField::Origin {
            state.location_field = LocationField::Destination;
            return;
        }

        let origin = state.origin_input.value.trim().to_string();
        let destination = state.destination_input.value.trim().to_string();
        match &mut state.answers {
            FlowAnswers::Freight(a) => {
                a.origin = Some(origin);
                a.destination = Some(destination);
            }
            FlowAnswers::Car(a) => {
                a.origin = Some(origin);
                a.destination = Some(destination);
            }
        }

        if state.step.can_advance(&state.answers) {
            Self::advance_step(state);
        } else {
            // Send focus back to whichever field is still blank.
            state.location_field = if state.origin_input.value.trim().is_empty() {
                LocationField::Origin
            } else {
                LocationField::Destination
            };
        }
    }

    fn confirm_booking(state: &mut AppState) {
        match state.booking_focus {
            BookingFocus::Dates => {
                state.select_highlighted_date();
            }
            BookingFocus::Slots => {
                let slots = state.visible_slots();
                if let Some(slot) = slots.get(state.slot_index) {
                    if slot.available {
                        state.booking.select_time(&slot.broker_label);
                    }
                }
            }
            BookingFocus::Name => {
                state.booking_focus = BookingFocus::Email;
            }
            BookingFocus::Email => {
                state.begin_submit(BookingIntent::BookNow);
            }
        }
    }

    fn advance_step(state: &mut AppState) {
        if !state.step.can_advance(&state.answers) {
            debug!("step not complete, staying put");
            return;
        }
        if let Some(next) = state.step.next() {
            state.step = next;
            state.option_index = 0;
        }
    }

    fn go_back(state: &mut AppState) {
        if let Some(prev) = state.step.previous() {
            state.step = prev;
            state.option_index = 0;
        } else {
            state.current_view = View::FlowSelect;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_flow_select_keys() {
        let mut state = AppState::default();

        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('j')), &mut state),
            Some(AppEvent::FlowNext)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Enter), &mut state),
            Some(AppEvent::Confirm)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('q')), &mut state),
            Some(AppEvent::Quit)
        );
    }

    #[test]
    fn test_confirm_on_flow_select_enters_wizard() {
        let mut state = AppState::default();
        state.flow_choice = 1;
        EventHandler::process_event(AppEvent::Confirm, &mut state);

        assert_eq!(state.current_view, View::Wizard);
        assert_eq!(state.answers.kind(), FlowKind::Car);
        assert_eq!(state.step, WizardStep::Car(CarStep::Vehicle));
    }

    #[test]
    fn test_service_step_commits_three_fields_then_advances() {
        let mut state = AppState::default();
        state.start_flow(FlowKind::Freight);

        // Shipping type, freight mode, then terms, each via Enter.
        EventHandler::process_event(AppEvent::Confirm, &mut state);
        assert_eq!(state.service_field, ServiceField::FreightMode);
        EventHandler::process_event(AppEvent::NextOption, &mut state);
        EventHandler::process_event(AppEvent::Confirm, &mut state);
        assert_eq!(state.service_field, ServiceField::ServiceTerms);
        EventHandler::process_event(AppEvent::Confirm, &mut state);

        let FlowAnswers::Freight(a) = &state.answers else {
            panic!("freight answers expected")
        };
        assert_eq!(a.shipping_type, Some(ShippingType::CommercialCargo));
        assert_eq!(a.freight_mode, Some(FreightMode::Air));
        assert_eq!(a.service_terms, Some(ServiceTerms::DoorToDoor));
        assert_eq!(state.step, WizardStep::Freight(FreightStep::Handling));
    }

    #[test]
    fn test_text_context_swallows_q() {
        let mut state = AppState::default();
        state.start_flow(FlowKind::Car);
        assert!(state.in_text_context());

        let event = EventHandler::handle_key_event(key(KeyCode::Char('q')), &mut state);
        assert_eq!(event, Some(AppEvent::InputChar('q')));
        EventHandler::process_event(AppEvent::InputChar('q'), &mut state);
        assert_eq!(state.vehicle_input.value, "q");
        assert!(!state.should_quit);
    }

    #[test]
    fn test_help_overlay_blocks_other_keys() {
        let mut state = AppState::default();
        state.help_visible = true;

        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('j')), &mut state),
            None
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Esc), &mut state),
            Some(AppEvent::ToggleHelp)
        );
    }

    #[test]
    fn test_booking_step_key_routing() {
        let mut state = AppState::default();
        state.start_flow(FlowKind::Freight);
        state.step = WizardStep::Freight(FreightStep::Booking);

        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Right), &mut state),
            Some(AppEvent::NextDate)
        );
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('r')), &mut state),
            Some(AppEvent::RetryFetch)
        );

        state.booking_focus = BookingFocus::Slots;
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('j')), &mut state),
            Some(AppEvent::NextSlot)
        );

        state.booking_focus = BookingFocus::Email;
        assert_eq!(
            EventHandler::handle_key_event(key(KeyCode::Char('r')), &mut state),
            Some(AppEvent::InputChar('r'))
        );
    }

    #[test]
    fn test_escape_walks_back_to_flow_select() {
        let mut state = AppState::default();
        state.start_flow(FlowKind::Car);
        EventHandler::process_event(AppEvent::GoBack, &mut state);
        assert_eq!(state.step, WizardStep::Car(CarStep::Vehicle));
        assert_eq!(state.current_view, View::FlowSelect);
    }
}
