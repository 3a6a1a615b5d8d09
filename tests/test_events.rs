// ABOUTME: Unit tests for event handling to ensure keyboard inputs map to
// correct app actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use freightbook::app::state::BookingFocus;
use freightbook::app::{AppEvent, AppState, EventHandler};
use freightbook::models::flow::FlowKind;
use freightbook::wizard::{FreightStep, WizardStep};

const fn create_key_event(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

#[test]
fn test_quit_key_events() {
    let mut state = AppState::default();

    let quit_event =
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('q')), &mut state);
    assert_eq!(quit_event, Some(AppEvent::Quit));

    let ctrl_c = EventHandler::handle_key_event(
        KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        &mut state,
    );
    assert_eq!(ctrl_c, Some(AppEvent::Quit));
}

#[test]
fn test_process_quit_event() {
    let mut state = AppState::default();
    assert!(!state.should_quit);

    EventHandler::process_event(AppEvent::Quit, &mut state);
    assert!(state.should_quit);
}

#[test]
fn test_help_toggle() {
    let mut state = AppState::default();
    assert!(!state.help_visible);

    if let Some(event) =
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('?')), &mut state)
    {
        EventHandler::process_event(event, &mut state);
    }
    assert!(state.help_visible);

    // With help open, navigation keys are swallowed.
    let other =
        EventHandler::handle_key_event(create_key_event(KeyCode::Char('j')), &mut state);
    assert_eq!(other, None);
}

#[test]
fn test_option_navigation_wraps() {
    let mut state = AppState::default();
    state.start_flow(FlowKind::Freight);
    state.step = WizardStep::Freight(FreightStep::Handling);

    EventHandler::process_event(AppEvent::PreviousOption, &mut state);
    assert_eq!(state.option_index, 1);
    EventHandler::process_event(AppEvent::NextOption, &mut state);
    assert_eq!(state.option_index, 0);
}

#[test]
fn test_booking_date_keys_do_not_run_past_the_horizon() {
    let mut state = AppState::default();
    state.start_flow(FlowKind::Freight);
    state.step = WizardStep::Freight(FreightStep::Booking);

    let count = state.offered_dates().len();
    for _ in 0..count + 10 {
        EventHandler::process_event(AppEvent::NextDate, &mut state);
    }
    assert_eq!(state.date_index, count - 1);

    for _ in 0..count + 10 {
        EventHandler::process_event(AppEvent::PreviousDate, &mut state);
    }
    assert_eq!(state.date_index, 0);
}

#[test]
fn test_contact_fields_capture_printable_keys() {
    let mut state = AppState::default();
    state.start_flow(FlowKind::Freight);
    state.step = WizardStep::Freight(FreightStep::Booking);
    state.booking_focus = BookingFocus::Email;

    for c in "jane@example.com".chars() {
        let event =
            EventHandler::handle_key_event(create_key_event(KeyCode::Char(c)), &mut state);
        assert_eq!(event, Some(AppEvent::InputChar(c)));
        EventHandler::process_event(AppEvent::InputChar(c), &mut state);
    }
    assert_eq!(state.email_input.value, "jane@example.com");
    assert_eq!(state.booking.contact_email, "jane@example.com");
}

#[test]
fn test_tab_cycles_booking_focus() {
    let mut state = AppState::default();
    state.start_flow(FlowKind::Freight);
    state.step = WizardStep::Freight(FreightStep::Booking);

    assert_eq!(state.booking_focus, BookingFocus::Dates);
    for expected in [
        BookingFocus::Slots,
        BookingFocus::Name,
        BookingFocus::Email,
        BookingFocus::Dates,
    ] {
        EventHandler::process_event(AppEvent::FocusNext, &mut state);
        assert_eq!(state.booking_focus, expected);
    }
}

#[test]
fn test_unknown_key_returns_none() {
    let mut state = AppState::default();

    let unknown =
        EventHandler::handle_key_event(create_key_event(KeyCode::F(1)), &mut state);
    assert_eq!(unknown, None);
}
