// ABOUTME: Application state for the booking wizard TUI
// Owns the answer set, wizard position, booking state, notifications, and
// the pending async action drained by the main loop.

#![allow(dead_code)]

use chrono::{Local, NaiveDate};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::booking::{BookingIntent, BookingSubmission};
use crate::models::flow::{FlowAnswers, FlowKind};
use crate::models::slot::{BookedSlot, SlotCatalog, CAR_CATALOG, FREIGHT_CATALOG};
use crate::scheduling::{
    availability, booking::selectable_dates, BookingState, BrokerTimezone, ScheduleError,
    SchedulingClient, SlotGroup, TimeSlot,
};
use crate::wizard::WizardStep;

/// Which screen is on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    FlowSelect,
    Wizard,
}

/// Async work queued by event processing and drained by the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncAction {
    FetchSlots { date: NaiveDate, generation: u64 },
    SubmitBooking { submission: Box<BookingSubmission> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: Instant,
}

const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

/// Single-line text input with a cursor.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    pub value: String,
    pub cursor: usize,
}

impl TextField {
    pub fn input_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor -= prev;
            self.value.remove(self.cursor);
        }
    }

    pub fn cursor_left(&mut self) {
        if self.cursor > 0 {
            let prev = self.value[..self.cursor]
                .chars()
                .next_back()
                .map_or(1, char::len_utf8);
            self.cursor -= prev;
        }
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.value.len() {
            let next = self.value[self.cursor..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
            self.cursor += next;
        }
    }
}

/// Sub-focus within the three-part service selection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceField {
    ShippingType,
    FreightMode,
    ServiceTerms,
}

impl ServiceField {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::ShippingType => Some(Self::FreightMode),
            Self::FreightMode => Some(Self::ServiceTerms),
            Self::ServiceTerms => None,
        }
    }
}

/// Sub-focus within the two-field locations step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    Origin,
    Destination,
}

/// Focusable areas of the booking step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingFocus {
    Dates,
    Slots,
    Name,
    Email,
}

impl BookingFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Dates => Self::Slots,
            Self::Slots => Self::Name,
            Self::Name => Self::Email,
            Self::Email => Self::Dates,
        }
    }
}

pub struct AppState {
    pub config: AppConfig,
    pub broker: BrokerTimezone,
    pub current_view: View,
    /// Highlighted row on the flow-select screen.
    pub flow_choice: usize,
    pub answers: FlowAnswers,
    pub step: WizardStep,
    /// Highlighted option within the current step's list.
    pub option_index: usize,
    pub service_field: ServiceField,
    pub location_field: LocationField,
    pub origin_input: TextField,
    pub destination_input: TextField,
    pub vehicle_input: TextField,
    pub name_input: TextField,
    pub email_input: TextField,
    pub booking: BookingState,
    pub booking_focus: BookingFocus,
    pub date_index: usize,
    pub slot_index: usize,
    pub today: NaiveDate,
    /// Monotonic token guarding against out-of-order fetch responses.
    pub fetch_generation: u64,
    pub pending_async_action: Option<AsyncAction>,
    pub notifications: Vec<Notification>,
    pub should_quit: bool,
    pub help_visible: bool,
    pub ui_needs_refresh: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let broker = BrokerTimezone::from_hours(config.broker_utc_offset_hours)
            .unwrap_or_else(|| {
                warn!(
                    "broker_utc_offset_hours {} out of range, using default",
                    config.broker_utc_offset_hours
                );
                BrokerTimezone::default()
            });

        Self {
            config,
            broker,
            current_view: View::FlowSelect,
            flow_choice: 0,
            answers: FlowAnswers::new(FlowKind::Freight),
            step: WizardStep::first(FlowKind::Freight),
            option_index: 0,
            service_field: ServiceField::ShippingType,
            location_field: LocationField::Origin,
            origin_input: TextField::default(),
            destination_input: TextField::default(),
            vehicle_input: TextField::default(),
            name_input: TextField::default(),
            email_input: TextField::default(),
            booking: BookingState::new(),
            booking_focus: BookingFocus::Dates,
            date_index: 0,
            slot_index: 0,
            today: Local::now().date_naive(),
            fetch_generation: 0,
            pending_async_action: None,
            notifications: Vec::new(),
            should_quit: false,
            help_visible: false,
            ui_needs_refresh: false,
        }
    }

    /// Begin the chosen flow with a fresh answer set.
    pub fn start_flow(&mut self, kind: FlowKind) {
        self.answers = FlowAnswers::new(kind);
        self.step = WizardStep::first(kind);
        self.current_view = View::Wizard;
        self.option_index = 0;
        self.service_field = ServiceField::ShippingType;
        self.location_field = LocationField::Origin;
        self.origin_input = TextField::default();
        self.destination_input = TextField::default();
        self.vehicle_input = TextField::default();
        self.name_input = TextField::default();
        self.email_input = TextField::default();
        self.booking = BookingState::new();
        self.booking_focus = BookingFocus::Dates;
        self.date_index = 0;
        self.slot_index = 0;
    }

    pub fn catalog(&self) -> &'static SlotCatalog {
        match self.answers.kind() {
            FlowKind::Freight => &FREIGHT_CATALOG,
            FlowKind::Car => &CAR_CATALOG,
        }
    }

    /// Dates offerable from today, in order.
    pub fn offered_dates(&self) -> Vec<NaiveDate> {
        selectable_dates(self.today)
    }

    /// Resolved slot groups for the selected date in the viewer's timezone.
    /// Empty until a date is chosen.
    pub fn slot_groups(&self) -> Vec<SlotGroup> {
        let Some(date) = self.booking.selected_date else {
            return Vec::new();
        };
        match availability::compute_slots(
            self.catalog(),
            &self.booking.booked,
            date,
            self.broker,
            &Local,
        ) {
            Ok(slots) => availability::group_slots(self.catalog(), slots),
            Err(e) => {
                // Catalog labels are fixed constants; this cannot happen
                // outside a broken catalog edit.
                warn!("slot computation failed: {e}");
                Vec::new()
            }
        }
    }

    /// Slots flattened in display order, for keyboard navigation.
    pub fn visible_slots(&self) -> Vec<TimeSlot> {
        self.slot_groups().into_iter().flat_map(|g| g.slots).collect()
    }

    /// Move the date highlight and select that date, queueing a fetch when
    /// the selection actually changed.
    pub fn select_highlighted_date(&mut self) {
        let dates = self.offered_dates();
        let Some(date) = dates.get(self.date_index).copied() else {
            return;
        };
        if self.booking.select_date(date, self.today) {
            self.slot_index = 0;
            self.queue_fetch(date);
        }
    }

    /// Queue a booked-set fetch for `date` under a fresh generation,
    /// superseding any in-flight request.
    pub fn queue_fetch(&mut self, date: NaiveDate) {
        self.fetch_generation += 1;
        self.booking.fetch_in_flight = true;
        self.booking.fetch_error = None;
        self.pending_async_action = Some(AsyncAction::FetchSlots {
            date,
            generation: self.fetch_generation,
        });
    }

    /// Re-fetch the current date after a fetch error.
    pub fn retry_fetch(&mut self) {
        if let Some(date) = self.booking.selected_date {
            self.queue_fetch(date);
        }
    }

    /// Apply a completed fetch. Results from a superseded generation or a
    /// date that is no longer selected are discarded so a late response
    /// never overwrites a newer one.
    pub fn apply_fetch_result(
        &mut self,
        date: NaiveDate,
        generation: u64,
        result: Result<Vec<BookedSlot>, ScheduleError>,
    ) {
        if generation != self.fetch_generation || self.booking.selected_date != Some(date) {
            debug!("discarding stale slot fetch for {date} (generation {generation})");
            return;
        }
        match result {
            Ok(booked) => self.booking.booked_loaded(booked),
            Err(e) => {
                self.booking.fetch_failed(e.to_string());
                self.add_error_notification(format!("{e} - press r to retry"));
            }
        }
        self.ui_needs_refresh = true;
    }

    /// Gate and queue the final submission. Validation and conflict errors
    /// land in the booking state's inline error.
    pub fn begin_submit(&mut self, intent: BookingIntent) {
        match self.booking.try_begin_submit(intent) {
            Ok(true) => {
                match self
                    .booking
                    .build_submission(&self.answers, intent, self.broker, &Local)
                {
                    Ok(submission) => {
                        self.pending_async_action = Some(AsyncAction::SubmitBooking {
                            submission: Box::new(submission),
                        });
                    }
                    Err(e) => self.booking.submit_failed(e.to_string()),
                }
            }
            Ok(false) => debug!("submit ignored, already in flight or done"),
            Err(e) => debug!("submit blocked: {e}"),
        }
    }

    pub fn apply_submit_result(&mut self, result: Result<(), ScheduleError>) {
        match result {
            Ok(()) => {
                self.booking.submit_succeeded();
                self.add_success_notification("Consultation booked, see you then!".to_string());
            }
            Err(e) => {
                self.booking.submit_failed(e.to_string());
                self.add_error_notification(e.to_string());
            }
        }
        self.ui_needs_refresh = true;
    }

    pub fn add_success_notification(&mut self, message: String) {
        self.notifications.push(Notification {
            message,
            kind: NotificationKind::Success,
            created_at: Instant::now(),
        });
    }

    pub fn add_error_notification(&mut self, message: String) {
        self.notifications.push(Notification {
            message,
            kind: NotificationKind::Error,
            created_at: Instant::now(),
        });
    }

    pub fn prune_notifications(&mut self) {
        self.notifications
            .retain(|n| n.created_at.elapsed() < NOTIFICATION_TTL);
    }

    /// Mirror the contact inputs into the booking state after each edit.
    pub fn sync_contact(&mut self) {
        self.booking.contact_name = self.name_input.value.clone();
        self.booking.contact_email = self.email_input.value.clone();
    }

    /// Whether the current focus routes printable keys into a text field.
    pub fn in_text_context(&self) -> bool {
        if self.current_view != View::Wizard {
            return false;
        }
        match self.step {
            WizardStep::Freight(crate::wizard::FreightStep::Locations)
            | WizardStep::Car(crate::wizard::CarStep::Locations)
            | WizardStep::Car(crate::wizard::CarStep::Vehicle) => true,
            step if step.is_booking() => {
                matches!(self.booking_focus, BookingFocus::Name | BookingFocus::Email)
            }
            _ => false,
        }
    }
}

/// The application: state plus the scheduling backend client.
pub struct App {
    pub state: AppState,
    client: SchedulingClient,
}

impl App {
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::load()?;
        Self::with_config(config)
    }

    pub fn with_config(config: AppConfig) -> anyhow::Result<Self> {
        let client = SchedulingClient::new(&config)?;
        Ok(Self {
            state: AppState::new(config),
            client,
        })
    }

    pub fn needs_ui_refresh(&mut self) -> bool {
        std::mem::take(&mut self.state.ui_needs_refresh)
    }

    /// Drain the pending async action, if any, and expire notifications.
    pub async fn tick(&mut self) -> anyhow::Result<()> {
        if let Some(action) = self.state.pending_async_action.take() {
            match action {
                AsyncAction::FetchSlots { date, generation } => {
                    let result = self.client.fetch_booked(date).await;
                    self.state.apply_fetch_result(date, generation, result);
                }
                AsyncAction::SubmitBooking { submission } => {
                    let result = self.client.submit(&submission).await;
                    self.state.apply_submit_result(result);
                }
            }
        }
        self.state.prune_notifications();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn state_on_booking() -> AppState {
        let mut state = AppState::default();
        state.today = monday();
        state.start_flow(FlowKind::Freight);
        state.step = WizardStep::Freight(crate::wizard::FreightStep::Booking);
        state
    }

    #[test]
    fn test_select_highlighted_date_queues_one_fetch() {
        let mut state = state_on_booking();
        state.select_highlighted_date();

        assert_eq!(state.booking.selected_date, Some(monday()));
        assert_eq!(state.fetch_generation, 1);
        assert!(matches!(
            state.pending_async_action,
            Some(AsyncAction::FetchSlots { generation: 1, .. })
        ));

        // Re-selecting the same date does not fetch again.
        state.pending_async_action = None;
        state.select_highlighted_date();
        assert_eq!(state.fetch_generation, 1);
        assert!(state.pending_async_action.is_none());
    }

    #[test]
    fn test_stale_fetch_result_is_discarded() {
        let mut state = state_on_booking();
        state.select_highlighted_date();
        let d1 = monday();

        // A second date selection supersedes the first request.
        state.date_index = 1;
        state.select_highlighted_date();
        let d2 = monday() + Duration::days(1);
        assert_eq!(state.booking.selected_date, Some(d2));
        assert_eq!(state.fetch_generation, 2);

        // The late D1 response arrives afterwards and must not land.
        state.apply_fetch_result(
            d1,
            1,
            Ok(vec![BookedSlot {
                selected_time: "7:00 PM".to_string(),
                user_name: "stale".to_string(),
            }]),
        );
        assert!(state.booking.booked.is_empty());

        // The current-generation response does land.
        state.apply_fetch_result(
            d2,
            2,
            Ok(vec![BookedSlot {
                selected_time: "5:00 PM".to_string(),
                user_name: "fresh".to_string(),
            }]),
        );
        assert_eq!(state.booking.booked.len(), 1);
        assert_eq!(state.booking.booked[0].user_name, "fresh");
    }

    #[test]
    fn test_fetch_error_sets_retryable_state() {
        let mut state = state_on_booking();
        state.select_highlighted_date();

        state.apply_fetch_result(
            monday(),
            1,
            Err(ScheduleError::SlotsFetch("connection refused".to_string())),
        );
        assert!(state.booking.fetch_error.is_some());
        assert!(state.booking.booked.is_empty());
        assert_eq!(state.notifications.len(), 1);

        state.retry_fetch();
        assert_eq!(state.fetch_generation, 2);
        assert!(state.pending_async_action.is_some());
    }

    #[test]
    fn test_begin_submit_requires_valid_state() {
        let mut state = state_on_booking();
        state.select_highlighted_date();
        // Drop the queued fetch; only the submit path is under test here.
        state.pending_async_action = None;
        state.booking.select_time("7:00 PM");
        state.booking.contact_name = "Jane Doe".to_string();
        state.booking.contact_email = "not-an-email".to_string();

        state.begin_submit(BookingIntent::BookNow);
        assert!(state.pending_async_action.is_none());
        assert!(state.booking.inline_error.is_some());

        state.booking.contact_email = "jane@example.com".to_string();
        state.begin_submit(BookingIntent::BookNow);
        assert!(matches!(
            state.pending_async_action,
            Some(AsyncAction::SubmitBooking { .. })
        ));
    }

    #[test]
    fn test_text_context_tracks_focus() {
        let mut state = state_on_booking();
        assert!(!state.in_text_context());

        state.booking_focus = BookingFocus::Name;
        assert!(state.in_text_context());

        state.step = WizardStep::Freight(crate::wizard::FreightStep::Handling);
        assert!(!state.in_text_context());
    }

    #[test]
    fn test_text_field_editing() {
        let mut field = TextField::default();
        field.input_char('a');
        field.input_char('b');
        assert_eq!(field.value, "ab");
        assert_eq!(field.cursor, 2);

        field.cursor_left();
        field.input_char('x');
        assert_eq!(field.value, "axb");

        field.backspace();
        assert_eq!(field.value, "ab");
        field.cursor_right();
        field.backspace();
        assert_eq!(field.value, "a");
    }
}
