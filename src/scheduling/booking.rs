// ABOUTME: Booking step state machine: date rules, validation, and submit gating
//
// Stage flow: Idle -> DateSelected -> TimeSelected -> ContactEntered ->
// Submitting -> SubmittedSuccess | SubmitFailed. Picking a new date from any
// non-terminal stage resets to DateSelected and clears the chosen time.
// SubmitFailed retains the selection; SubmittedSuccess is terminal.

use chrono::{Datelike, Duration, NaiveDate, TimeZone, Weekday};
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::booking::{BookingIntent, BookingSubmission};
use crate::models::flow::FlowAnswers;
use crate::models::slot::BookedSlot;

use super::error::ScheduleError;
use super::timezone::{broker_to_viewer, viewer_offset_label, BrokerTimezone};

/// Consultations are offered Sunday through Thursday, up to this many days
/// out.
pub const BOOKING_HORIZON_DAYS: i64 = 30;

lazy_static! {
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[A-Za-z]{2,}$").expect("email pattern compiles");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingStage {
    Idle,
    DateSelected,
    TimeSelected,
    ContactEntered,
    Submitting,
    SubmittedSuccess,
    SubmitFailed,
}

/// Friday and Saturday are the broker's weekend; dates in the past or past
/// the horizon are not offered.
pub fn is_date_selectable(date: NaiveDate, today: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Fri | Weekday::Sat)
        && date >= today
        && date <= today + Duration::days(BOOKING_HORIZON_DAYS)
}

/// All offerable dates from `today`, in order.
pub fn selectable_dates(today: NaiveDate) -> Vec<NaiveDate> {
    (0..=BOOKING_HORIZON_DAYS)
        .map(|d| today + Duration::days(d))
        .filter(|date| is_date_selectable(*date, today))
        .collect()
}

fn email_is_valid(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

#[derive(Debug, Clone)]
pub struct BookingState {
    pub stage: BookingStage,
    pub selected_date: Option<NaiveDate>,
    /// Broker-local label of the chosen slot.
    pub selected_time: Option<String>,
    pub contact_name: String,
    pub contact_email: String,
    /// Booked-set for the selected date, fully replaced on each fetch.
    pub booked: Vec<BookedSlot>,
    pub fetch_in_flight: bool,
    pub fetch_error: Option<String>,
    pub submit_in_flight: bool,
    /// Validation or conflict message shown inline on the booking step.
    pub inline_error: Option<String>,
}

impl Default for BookingState {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingState {
    pub fn new() -> Self {
        Self {
            stage: BookingStage::Idle,
            selected_date: None,
            selected_time: None,
            contact_name: String::new(),
            contact_email: String::new(),
            booked: Vec::new(),
            fetch_in_flight: false,
            fetch_error: None,
            submit_in_flight: false,
            inline_error: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.stage == BookingStage::SubmittedSuccess
    }

    /// Select a date. Returns true when the selection changed and a fresh
    /// booked-set fetch must be triggered. Disabled dates and re-selecting
    /// the current date are no-ops.
    pub fn select_date(&mut self, date: NaiveDate, today: NaiveDate) -> bool {
        if self.is_terminal() || !is_date_selectable(date, today) {
            return false;
        }
        if self.selected_date == Some(date) {
            return false;
        }

        self.selected_date = Some(date);
        // A slot selection never survives a date change, and neither does
        // the previous date's booked-set.
        self.selected_time = None;
        self.booked.clear();
        self.fetch_error = None;
        self.inline_error = None;
        self.stage = BookingStage::DateSelected;
        true
    }

    /// Choose a slot by its broker-local label. Requires a selected date;
    /// slots already in the booked-set are refused.
    pub fn select_time(&mut self, label: &str) -> bool {
        if self.is_terminal() || self.selected_date.is_none() {
            return false;
        }
        if self.booked.iter().any(|b| b.selected_time == label) {
            return false;
        }

        self.selected_time = Some(label.to_string());
        self.inline_error = None;
        self.stage = BookingStage::TimeSelected;
        true
    }

    /// Replace the booked-set after a successful fetch.
    pub fn booked_loaded(&mut self, booked: Vec<BookedSlot>) {
        self.booked = booked;
        self.fetch_in_flight = false;
        self.fetch_error = None;
    }

    pub fn fetch_failed(&mut self, message: String) {
        self.booked.clear();
        self.fetch_in_flight = false;
        self.fetch_error = Some(message);
    }

    /// Validate contact fields and advance to ContactEntered.
    pub fn commit_contact(&mut self) -> Result<(), ScheduleError> {
        self.validate_contact()?;
        if self.stage == BookingStage::TimeSelected {
            self.stage = BookingStage::ContactEntered;
        }
        Ok(())
    }

    fn validate_contact(&self) -> Result<(), ScheduleError> {
        if self.contact_name.trim().is_empty() {
            return Err(ScheduleError::Validation(
                "please enter your name".to_string(),
            ));
        }
        if !email_is_valid(&self.contact_email) {
            return Err(ScheduleError::Validation(
                "please enter a valid email address".to_string(),
            ));
        }
        Ok(())
    }

    fn validate(&self, intent: BookingIntent) -> Result<(), ScheduleError> {
        if intent == BookingIntent::BookNow {
            if self.selected_date.is_none() {
                return Err(ScheduleError::Validation(
                    "please pick a consultation date".to_string(),
                ));
            }
            if self.selected_time.is_none() {
                return Err(ScheduleError::Validation(
                    "please pick a time slot".to_string(),
                ));
            }
        }
        self.validate_contact()
    }

    /// Gate a submission attempt. Returns:
    /// - `Ok(true)` when the state moved to Submitting and the caller must
    ///   perform the POST,
    /// - `Ok(false)` when a submission is already in flight or done (a
    ///   second attempt is a no-op, never a double submit),
    /// - `Err` for validation failures and the submit-time conflict
    ///   re-check.
    pub fn try_begin_submit(&mut self, intent: BookingIntent) -> Result<bool, ScheduleError> {
        if self.submit_in_flight
            || self.stage == BookingStage::Submitting
            || self.stage == BookingStage::SubmittedSuccess
        {
            return Ok(false);
        }

        if let Err(e) = self.validate(intent) {
            self.inline_error = Some(e.to_string());
            return Err(e);
        }

        // Best-effort race mitigation: the booked-set may have refreshed
        // since the slot was chosen. No server-side lock is implied.
        if intent == BookingIntent::BookNow {
            if let Some(time) = &self.selected_time {
                if self.booked.iter().any(|b| &b.selected_time == time) {
                    self.selected_time = None;
                    self.stage = BookingStage::DateSelected;
                    self.inline_error = Some(ScheduleError::SlotConflict.to_string());
                    return Err(ScheduleError::SlotConflict);
                }
            }
        }

        self.stage = BookingStage::Submitting;
        self.submit_in_flight = true;
        self.inline_error = None;
        Ok(true)
    }

    pub fn submit_succeeded(&mut self) {
        self.submit_in_flight = false;
        self.stage = BookingStage::SubmittedSuccess;
    }

    /// Submit failure keeps the selection and contact fields so the user
    /// retries without re-entering anything.
    pub fn submit_failed(&mut self, message: String) {
        self.submit_in_flight = false;
        self.stage = BookingStage::SubmitFailed;
        self.inline_error = Some(message);
    }

    /// Freeze the current state into the wire payload. Call only after
    /// `try_begin_submit` returned `Ok(true)`.
    pub fn build_submission<Tz: TimeZone>(
        &self,
        answers: &FlowAnswers,
        intent: BookingIntent,
        broker: BrokerTimezone,
        viewer: &Tz,
    ) -> Result<BookingSubmission, ScheduleError> {
        let (selected_date, selected_time, viewer_timezone) = match intent {
            BookingIntent::Wait24Hours => (None, None, None),
            BookingIntent::BookNow => {
                let date = self.selected_date.ok_or_else(|| {
                    ScheduleError::Validation("please pick a consultation date".to_string())
                })?;
                let time = self.selected_time.clone().ok_or_else(|| {
                    ScheduleError::Validation("please pick a time slot".to_string())
                })?;
                let instant = broker_to_viewer(date, &time, broker, viewer)?;
                (
                    Some(date),
                    Some(time),
                    Some(viewer_offset_label(&instant)),
                )
            }
        };

        Ok(BookingSubmission {
            flow: answers.kind(),
            intent,
            selected_date,
            selected_time,
            viewer_timezone,
            user_name: self.contact_name.trim().to_string(),
            email: self.contact_email.trim().to_string(),
            answers: answers.clone(),
        })
    }
}
