// ABOUTME: Computes per-date slot availability from the fixed catalog plus the live booked-set

use chrono::{NaiveDate, NaiveTime, TimeZone};
use serde::Serialize;

use crate::models::slot::{BookedSlot, SlotCatalog, SlotGrouping};

use super::error::ScheduleError;
use super::timezone::{
    broker_to_viewer, classify_viewer, viewer_slot_label, BrokerTimezone, DayPart,
};

/// One offerable slot resolved against a date, a booked-set, and the
/// viewer's timezone. Recomputed per render, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSlot {
    /// The catalog label in broker-local time, e.g. "7:00 PM".
    pub broker_label: String,
    /// The same slot rendered in the viewer's timezone.
    pub viewer_label: String,
    #[serde(skip)]
    pub viewer_time: NaiveTime,
    #[serde(skip)]
    pub day_part: DayPart,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<&'static str>,
    pub available: bool,
}

/// A display group of slots with its heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotGroup {
    pub title: String,
    pub slots: Vec<TimeSlot>,
}

/// Resolve the catalog against the booked-set for `date`, in catalog order.
///
/// A slot is unavailable exactly when its broker-local label string-matches
/// an entry of the booked-set. Backend labels that are not in the catalog
/// match nothing and are ignored.
pub fn compute_slots<Tz: TimeZone>(
    catalog: &SlotCatalog,
    booked: &[BookedSlot],
    date: NaiveDate,
    broker: BrokerTimezone,
    viewer: &Tz,
) -> Result<Vec<TimeSlot>, ScheduleError> {
    catalog
        .slots
        .iter()
        .map(|slot| {
            let instant = broker_to_viewer(date, slot.label, broker, viewer)?;
            let taken = booked.iter().any(|b| b.selected_time == slot.label);
            Ok(TimeSlot {
                broker_label: slot.label.to_string(),
                viewer_label: viewer_slot_label(&instant),
                viewer_time: instant.time(),
                day_part: classify_viewer(&instant),
                region: slot.region,
                available: !taken,
            })
        })
        .collect()
}

/// Partition resolved slots per the catalog's grouping strategy.
///
/// Day-part groups sort ascending by the converted local time-of-day. The
/// compare ignores the date, so a slot whose conversion crosses midnight
/// sorts by wall-clock only.
pub fn group_slots(catalog: &SlotCatalog, slots: Vec<TimeSlot>) -> Vec<SlotGroup> {
    match catalog.grouping {
        SlotGrouping::DayPart => {
            let (mut morning, mut evening): (Vec<TimeSlot>, Vec<TimeSlot>) = slots
                .into_iter()
                .partition(|s| s.day_part == DayPart::Morning);
            morning.sort_by_key(|s| s.viewer_time);
            evening.sort_by_key(|s| s.viewer_time);
            vec![
                SlotGroup {
                    title: DayPart::Morning.label().to_string(),
                    slots: morning,
                },
                SlotGroup {
                    title: DayPart::Evening.label().to_string(),
                    slots: evening,
                },
            ]
        }
        SlotGrouping::Region => catalog
            .regions()
            .into_iter()
            .map(|region| SlotGroup {
                title: region.to_string(),
                slots: slots
                    .iter()
                    .filter(|s| s.region == Some(region))
                    .cloned()
                    .collect(),
            })
            .collect(),
    }
}
