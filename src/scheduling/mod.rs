// ABOUTME: Slot availability, timezone conversion, booking state machine, and backend client

pub mod availability;
pub mod booking;
pub mod client;
pub mod error;
pub mod timezone;

pub use availability::{compute_slots, group_slots, SlotGroup, TimeSlot};
pub use booking::{selectable_dates, BookingStage, BookingState};
pub use client::SchedulingClient;
pub use error::ScheduleError;
pub use timezone::{BrokerTimezone, DayPart};
