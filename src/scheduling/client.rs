// ABOUTME: HTTP client for the remote scheduling backend

use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::models::booking::BookingSubmission;
use crate::models::slot::BookedSlot;

use super::error::ScheduleError;

/// The by-date endpoint has two wire shapes in the wild: a wrapped
/// `{success, data}` envelope and a bare array. Both are accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ByDateResponse {
    Wrapped {
        success: bool,
        #[serde(default)]
        data: Vec<BookedSlot>,
    },
    Bare(Vec<BookedSlot>),
}

#[derive(Debug, Clone)]
pub struct SchedulingClient {
    client: Client,
    base_url: String,
}

impl SchedulingClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("freightbook/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.backend_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the booked-set for one calendar date. Any network, status, or
    /// parse failure maps to `ScheduleError::SlotsFetch`.
    pub async fn fetch_booked(&self, date: NaiveDate) -> Result<Vec<BookedSlot>, ScheduleError> {
        let url = format!("{}/api/v1/submissions/by-date", self.base_url);
        debug!("Fetching booked slots for {date}");

        let response = self
            .client
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(|e| ScheduleError::SlotsFetch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScheduleError::SlotsFetch(format!(
                "backend returned {status}"
            )));
        }

        let body: ByDateResponse = response
            .json()
            .await
            .map_err(|e| ScheduleError::SlotsFetch(format!("malformed response: {e}")))?;

        match body {
            ByDateResponse::Wrapped { success: false, .. } => Err(ScheduleError::SlotsFetch(
                "backend reported failure".to_string(),
            )),
            ByDateResponse::Wrapped { data, .. } => Ok(data),
            ByDateResponse::Bare(data) => Ok(data),
        }
    }

    /// Post the finalized submission. Called at most once per completed
    /// wizard; the in-flight guard lives in the booking state, not here.
    pub async fn submit(&self, submission: &BookingSubmission) -> Result<(), ScheduleError> {
        let url = format!("{}/api/v1/submissions", self.base_url);
        debug!(
            "Submitting {:?} booking for {:?}",
            submission.flow, submission.selected_date
        );

        let response = self
            .client
            .post(&url)
            .json(submission)
            .send()
            .await
            .map_err(|e| ScheduleError::Submission(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!("Submission rejected with {status}: {detail}");
            return Err(ScheduleError::Submission(format!(
                "backend returned {status}"
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client_for(url: &str) -> SchedulingClient {
        let config = AppConfig {
            backend_url: url.to_string(),
            ..AppConfig::default()
        };
        SchedulingClient::new(&config).unwrap()
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_accepts_wrapped_envelope() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/submissions/by-date")
            .match_query(mockito::Matcher::UrlEncoded(
                "date".into(),
                "2025-03-10".into(),
            ))
            .with_status(200)
            .with_body(r#"{"success":true,"data":[{"selectedTime":"7:00 PM","userName":"X"}]}"#)
            .create_async()
            .await;

        let booked = client_for(&server.url()).fetch_booked(date()).await.unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].selected_time, "7:00 PM");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_accepts_bare_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/submissions/by-date")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"[{"selectedTime":"9:00 AM","userName":"Y"}]"#)
            .create_async()
            .await;

        let booked = client_for(&server.url()).fetch_booked(date()).await.unwrap();
        assert_eq!(booked.len(), 1);
        assert_eq!(booked[0].user_name, "Y");
    }

    #[tokio::test]
    async fn test_fetch_failures_map_to_slots_fetch() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/submissions/by-date")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let err = client_for(&server.url()).fetch_booked(date()).await.unwrap_err();
        assert!(matches!(err, ScheduleError::SlotsFetch(_)));

        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/submissions/by-date")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server.url()).fetch_booked(date()).await.unwrap_err();
        assert!(matches!(err, ScheduleError::SlotsFetch(_)));
    }

    #[tokio::test]
    async fn test_fetch_wrapped_failure_flag() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/submissions/by-date")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"success":false,"data":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server.url()).fetch_booked(date()).await.unwrap_err();
        assert!(matches!(err, ScheduleError::SlotsFetch(_)));
    }
}
