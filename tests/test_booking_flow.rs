// ABOUTME: End-to-end booking flow tests against a mock scheduling backend

use chrono::NaiveDate;
use freightbook::app::state::{AsyncAction, BookingFocus};
use freightbook::app::App;
use freightbook::config::AppConfig;
use freightbook::models::booking::BookingIntent;
use freightbook::models::flow::FlowKind;
use freightbook::scheduling::BookingStage;
use freightbook::wizard::{FreightStep, WizardStep};
use mockito::Matcher;
use serde_json::json;

fn monday() -> NaiveDate {
    // 2025-03-10 is a Monday, inside Sunday-Thursday availability.
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn app_against(server: &mockito::Server) -> App {
    let config = AppConfig {
        backend_url: server.url(),
        ..AppConfig::default()
    };
    let mut app = App::with_config(config).expect("app builds");
    app.state.today = monday();
    app.state.start_flow(FlowKind::Freight);
    app.state.step = WizardStep::Freight(FreightStep::Booking);
    app
}

#[tokio::test]
async fn test_jane_doe_books_the_seven_pm_slot_exactly_once() {
    let mut server = mockito::Server::new_async().await;

    let fetch_mock = server
        .mock("GET", "/api/v1/submissions/by-date")
        .match_query(Matcher::UrlEncoded("date".into(), "2025-03-10".into()))
        .with_status(200)
        .with_body(r#"{"success":true,"data":[]}"#)
        .create_async()
        .await;

    let submit_mock = server
        .mock("POST", "/api/v1/submissions")
        .match_body(Matcher::PartialJson(json!({
            "intent": "book-now",
            "selectedDate": "2025-03-10",
            "selectedTime": "7:00 PM",
            "userName": "Jane Doe",
            "email": "jane@example.com",
        })))
        .with_status(200)
        .with_body(r#"{"success":true}"#)
        .expect(1)
        .create_async()
        .await;

    let mut app = app_against(&server);

    // Select the date and let the fetch resolve.
    app.state.select_highlighted_date();
    assert!(app.state.booking.fetch_in_flight);
    app.tick().await.unwrap();
    fetch_mock.assert_async().await;
    assert!(app.state.booking.booked.is_empty());
    assert!(app.state.booking.fetch_error.is_none());

    // Pick the slot and enter contact details.
    assert!(app.state.booking.select_time("7:00 PM"));
    for c in "Jane Doe".chars() {
        app.state.name_input.input_char(c);
    }
    for c in "jane@example.com".chars() {
        app.state.email_input.input_char(c);
    }
    app.state.sync_contact();

    // Submit and let the POST resolve.
    app.state.begin_submit(BookingIntent::BookNow);
    assert!(matches!(
        app.state.pending_async_action,
        Some(AsyncAction::SubmitBooking { .. })
    ));
    app.tick().await.unwrap();

    submit_mock.assert_async().await;
    assert_eq!(app.state.booking.stage, BookingStage::SubmittedSuccess);
    assert!(app.state.booking.inline_error.is_none());

    // A second submit attempt never reaches the backend.
    app.state.begin_submit(BookingIntent::BookNow);
    assert!(app.state.pending_async_action.is_none());
}

#[tokio::test]
async fn test_slot_taken_between_display_and_submit_aborts() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v1/submissions/by-date")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"selectedTime":"7:00 PM","userName":"Rival"}]}"#)
        .create_async()
        .await;

    let submit_mock = server
        .mock("POST", "/api/v1/submissions")
        .expect(0)
        .create_async()
        .await;

    let mut app = app_against(&server);
    app.state.select_highlighted_date();

    // The slot is chosen while the fetch is still in flight, then the
    // refreshed booked-set reveals it was taken.
    assert!(app.state.booking.select_time("7:00 PM"));
    app.tick().await.unwrap();

    for c in "Jane Doe".chars() {
        app.state.name_input.input_char(c);
    }
    for c in "jane@example.com".chars() {
        app.state.email_input.input_char(c);
    }
    app.state.sync_contact();

    app.state.begin_submit(BookingIntent::BookNow);
    assert!(app.state.pending_async_action.is_none());
    assert_eq!(app.state.booking.selected_time, None);
    assert_eq!(app.state.booking.stage, BookingStage::DateSelected);
    assert!(app.state.booking.inline_error.is_some());

    submit_mock.assert_async().await;
}

#[tokio::test]
async fn test_invalid_email_never_reaches_the_backend() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", "/api/v1/submissions/by-date")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let submit_mock = server
        .mock("POST", "/api/v1/submissions")
        .expect(0)
        .create_async()
        .await;

    let mut app = app_against(&server);
    app.state.select_highlighted_date();
    app.tick().await.unwrap();
    app.state.booking.select_time("7:00 PM");

    for c in "Jane Doe".chars() {
        app.state.name_input.input_char(c);
    }
    for c in "jane-at-example.com".chars() {
        app.state.email_input.input_char(c);
    }
    app.state.sync_contact();

    app.state.begin_submit(BookingIntent::BookNow);
    assert!(app.state.pending_async_action.is_none());
    assert!(app.state.booking.inline_error.is_some());

    submit_mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_failure_shows_retry_and_recovers() {
    let mut server = mockito::Server::new_async().await;

    let failing = server
        .mock("GET", "/api/v1/submissions/by-date")
        .match_query(Matcher::Any)
        .with_status(503)
        .expect(1)
        .create_async()
        .await;

    let mut app = app_against(&server);
    app.state.select_highlighted_date();
    app.tick().await.unwrap();

    assert!(app.state.booking.fetch_error.is_some());
    assert!(app.state.booking.booked.is_empty());
    failing.assert_async().await;

    // Backend comes back; manual retry succeeds.
    server
        .mock("GET", "/api/v1/submissions/by-date")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"success":true,"data":[{"selectedTime":"5:00 PM","userName":"Z"}]}"#)
        .create_async()
        .await;

    app.state.retry_fetch();
    app.tick().await.unwrap();

    assert!(app.state.booking.fetch_error.is_none());
    assert_eq!(app.state.booking.booked.len(), 1);
}

#[tokio::test]
async fn test_wait_lead_submits_without_slot_fields() {
    let mut server = mockito::Server::new_async().await;

    let submit_mock = server
        .mock("POST", "/api/v1/submissions")
        .match_body(Matcher::PartialJson(json!({
            "intent": "wait-24-hours",
            "userName": "Jane Doe",
        })))
        .with_status(200)
        .expect(1)
        .create_async()
        .await;

    let mut app = app_against(&server);
    app.state.booking_focus = BookingFocus::Name;
    for c in "Jane Doe".chars() {
        app.state.name_input.input_char(c);
    }
    for c in "jane@example.com".chars() {
        app.state.email_input.input_char(c);
    }
    app.state.sync_contact();

    app.state.begin_submit(BookingIntent::Wait24Hours);
    app.tick().await.unwrap();

    submit_mock.assert_async().await;
    assert_eq!(app.state.booking.stage, BookingStage::SubmittedSuccess);
}
