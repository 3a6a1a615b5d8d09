// ABOUTME: Conversion between broker-local slot labels and the viewer's timezone
//
// Slot labels are wall-clock times in the brokerage's timezone, Arabia
// Standard Time (UTC+3, no daylight saving). The offset lives in one place
// (`BrokerTimezone`) so a future tz-database correction touches no call
// sites. There is no DST handling anywhere: if the broker locale ever
// observes DST the labels will be off by an hour.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Offset, TimeZone, Timelike};

use super::error::ScheduleError;

const ARABIA_OFFSET_SECS: i32 = 3 * 3600;

/// The fixed offset the slot catalog is interpreted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerTimezone {
    offset: FixedOffset,
}

impl Default for BrokerTimezone {
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(ARABIA_OFFSET_SECS).expect("constant offset is in range"),
        }
    }
}

impl BrokerTimezone {
    /// Build from a whole-hour UTC offset; `None` if out of range.
    pub fn from_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(|offset| Self { offset })
    }

    pub fn fixed_offset(self) -> FixedOffset {
        self.offset
    }
}

/// Morning/evening classification of a slot, by the viewer's local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPart {
    Morning,
    Evening,
}

impl DayPart {
    pub fn classify(viewer_hour: u32) -> Self {
        if viewer_hour < 12 {
            Self::Morning
        } else {
            Self::Evening
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Morning => "Morning",
            Self::Evening => "Evening",
        }
    }
}

/// Parse a 12-hour slot label like "7:00 PM".
pub fn parse_slot_label(label: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(label.trim(), "%I:%M %p")
        .map_err(|_| ScheduleError::Validation(format!("unrecognized time label: {label}")))
}

/// Format a time as a 12-hour slot label, no zero padding on the hour.
pub fn format_slot_label(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// Resolve a broker-local label on a calendar date to an instant in the
/// viewer's timezone.
pub fn broker_to_viewer<Tz: TimeZone>(
    date: NaiveDate,
    label: &str,
    broker: BrokerTimezone,
    viewer: &Tz,
) -> Result<DateTime<Tz>, ScheduleError> {
    let time = parse_slot_label(label)?;
    let broker_dt = broker
        .fixed_offset()
        .from_local_datetime(&date.and_time(time))
        .single()
        .ok_or_else(|| {
            ScheduleError::Validation(format!("ambiguous broker-local time: {label}"))
        })?;
    Ok(broker_dt.with_timezone(viewer))
}

/// Inverse of [`broker_to_viewer`]: render an instant back as the broker's
/// wall-clock label.
pub fn viewer_to_broker_label<Tz: TimeZone>(instant: &DateTime<Tz>, broker: BrokerTimezone) -> String {
    format_slot_label(instant.with_timezone(&broker.fixed_offset()).time())
}

/// Display label for the converted slot in the viewer's zone.
pub fn viewer_slot_label<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    format_slot_label(instant.time())
}

/// Morning/evening classification of a converted instant.
pub fn classify_viewer<Tz: TimeZone>(instant: &DateTime<Tz>) -> DayPart {
    DayPart::classify(instant.time().hour())
}

/// The viewer's UTC offset rendered as "UTC+HH:MM", used in submissions.
pub fn viewer_offset_label<Tz: TimeZone>(instant: &DateTime<Tz>) -> String {
    let seconds = instant.offset().fix().local_minus_utc();
    let sign = if seconds < 0 { '-' } else { '+' };
    let abs = seconds.abs();
    format!("UTC{}{:02}:{:02}", sign, abs / 3600, (abs % 3600) / 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn zone(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn test_parse_and_format_labels() {
        let time = parse_slot_label("7:00 PM").unwrap();
        assert_eq!(time, NaiveTime::from_hms_opt(19, 0, 0).unwrap());
        assert_eq!(format_slot_label(time), "7:00 PM");

        let morning = parse_slot_label("10:30 AM").unwrap();
        assert_eq!(format_slot_label(morning), "10:30 AM");

        assert!(parse_slot_label("25:00 XX").is_err());
        assert!(parse_slot_label("").is_err());
    }

    #[test]
    fn test_broker_label_resolves_through_utc() {
        // 7:00 PM AST is 4:00 PM UTC.
        let utc = zone(0);
        let instant =
            broker_to_viewer(date(), "7:00 PM", BrokerTimezone::default(), &utc).unwrap();
        assert_eq!(viewer_slot_label(&instant), "4:00 PM");
    }

    #[test]
    fn test_round_trip_for_whole_hour_viewer_zones() {
        let broker = BrokerTimezone::default();
        for label in ["10:00 AM", "10:30 AM", "11:30 AM", "5:00 PM", "7:00 PM"] {
            for hours in -11..=12 {
                let viewer = zone(hours);
                let instant = broker_to_viewer(date(), label, broker, &viewer).unwrap();
                assert_eq!(
                    viewer_to_broker_label(&instant, broker),
                    label,
                    "round trip failed for {label} in UTC{hours:+}"
                );
            }
        }
    }

    #[test]
    fn test_classification_uses_viewer_hour_not_broker() {
        let broker = BrokerTimezone::default();
        // 7:00 PM AST is evening for the broker but 6:00 AM for UTC-10.
        let hawaii_ish = zone(-10);
        let instant = broker_to_viewer(date(), "7:00 PM", broker, &hawaii_ish).unwrap();
        assert_eq!(classify_viewer(&instant), DayPart::Morning);

        // 10:00 AM AST is 3:00 PM for UTC+8.
        let east = zone(8);
        let instant = broker_to_viewer(date(), "10:00 AM", broker, &east).unwrap();
        assert_eq!(classify_viewer(&instant), DayPart::Evening);
    }

    #[test]
    fn test_viewer_offset_label() {
        let broker = BrokerTimezone::default();
        let instant = broker_to_viewer(date(), "5:00 PM", broker, &zone(2)).unwrap();
        assert_eq!(viewer_offset_label(&instant), "UTC+02:00");

        let instant = broker_to_viewer(date(), "5:00 PM", broker, &zone(-5)).unwrap();
        assert_eq!(viewer_offset_label(&instant), "UTC-05:00");
    }

    #[test]
    fn test_custom_broker_offset_is_honored() {
        // If the broker offset is ever corrected, call sites stay unchanged.
        let broker = BrokerTimezone::from_hours(4).unwrap();
        let instant = broker_to_viewer(date(), "7:00 PM", broker, &zone(0)).unwrap();
        assert_eq!(viewer_slot_label(&instant), "3:00 PM");
    }
}
