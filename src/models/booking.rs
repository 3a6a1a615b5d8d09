// ABOUTME: Finalized booking submission payload sent once per completed wizard

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::flow::{FlowAnswers, FlowKind};

/// What the visitor wants the brokerage to do with the lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingIntent {
    #[serde(rename = "book-now")]
    BookNow,
    #[serde(rename = "wait-24-hours")]
    Wait24Hours,
}

/// The one submission contract both wizard flows post through.
///
/// `flow` discriminates freight vs car. The scheduling fields are only set
/// on the `BookNow` path; a `Wait24Hours` lead carries contact and answers
/// alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingSubmission {
    pub flow: FlowKind,
    pub intent: BookingIntent,
    #[serde(rename = "selectedDate", skip_serializing_if = "Option::is_none")]
    pub selected_date: Option<NaiveDate>,
    /// Broker-local slot label, e.g. "7:00 PM".
    #[serde(rename = "selectedTime", skip_serializing_if = "Option::is_none")]
    pub selected_time: Option<String>,
    /// The visitor's UTC offset at submit time, e.g. "UTC+02:00".
    #[serde(rename = "viewerTimezone", skip_serializing_if = "Option::is_none")]
    pub viewer_timezone: Option<String>,
    #[serde(rename = "userName")]
    pub user_name: String,
    pub email: String,
    pub answers: FlowAnswers,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::flow::FreightAnswers;

    #[test]
    fn test_submission_wire_shape() {
        let submission = BookingSubmission {
            flow: FlowKind::Freight,
            intent: BookingIntent::BookNow,
            selected_date: NaiveDate::from_ymd_opt(2025, 3, 10),
            selected_time: Some("7:00 PM".to_string()),
            viewer_timezone: Some("UTC+02:00".to_string()),
            user_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            answers: FlowAnswers::Freight(FreightAnswers::default()),
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["intent"], "book-now");
        assert_eq!(json["selectedDate"], "2025-03-10");
        assert_eq!(json["selectedTime"], "7:00 PM");
        assert_eq!(json["userName"], "Jane Doe");
        assert_eq!(json["answers"]["kind"], "freight");
    }

    #[test]
    fn test_wait_lead_omits_scheduling_fields() {
        let submission = BookingSubmission {
            flow: FlowKind::Freight,
            intent: BookingIntent::Wait24Hours,
            selected_date: None,
            selected_time: None,
            viewer_timezone: None,
            user_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            answers: FlowAnswers::Freight(FreightAnswers::default()),
        };

        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["intent"], "wait-24-hours");
        assert!(json.get("selectedDate").is_none());
        assert!(json.get("selectedTime").is_none());
    }
}
