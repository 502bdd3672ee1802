//! Route-level tests for the invoice page and JSON API.

use std::sync::Arc;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use chrono::NaiveDate;
use serde_json::{json, Value};

use lucknow_invoice_server::invoice::handlers;
use lucknow_invoice_server::{AppState, FixedClock};

fn fixed_state(y: i32, m: u32, d: u32) -> web::Data<AppState> {
    let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
    web::Data::new(AppState::with_clock(Arc::new(FixedClock(date))))
}

fn khan_form() -> Vec<(&'static str, &'static str)> {
    vec![
        ("name", "A. Khan"),
        ("address", "12 Park Lane"),
        ("contact", "0300-1234567"),
        ("plotNo", "H-12"),
        ("billMonth", "Sep 2025"),
        ("dues", "500"),
        ("currentPayment", "1500"),
    ]
}

fn body_text(bytes: &[u8]) -> String {
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[actix_web::test]
async fn test_page_without_invoice_shows_only_form() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state).configure(handlers::config)).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("Generate Invoice"));
    assert!(!body.contains("Total Payable"));
}

#[actix_web::test]
async fn test_submit_renders_two_copies() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    let req = test::TestRequest::post()
        .uri("/invoice")
        .set_form(khan_form())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/");

    let req = test::TestRequest::get().uri("/").to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);

    assert_eq!(body.matches("Society&#39;s Copy").count(), 2); // subtitle + pill
    assert_eq!(body.matches("Resident&#39;s Copy").count(), 2);
    assert_eq!(body.matches("Rs\u{a0}2,000.00").count(), 2);
    assert_eq!(body.matches("30/09/2025").count(), 2);
    assert_eq!(body.matches("20/10/2025").count(), 2);
    assert!(body.contains("window.print()"));
}

#[actix_web::test]
async fn test_blank_dues_is_zero() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    let mut form = khan_form();
    form[5] = ("dues", "");

    let req = test::TestRequest::post().uri("/invoice").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let record = state.current().unwrap();
    assert!(record.dues.is_zero());
    assert_eq!(record.total().to_string(), "1500");
}

#[actix_web::test]
async fn test_missing_field_keeps_previous_invoice() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    let req = test::TestRequest::post()
        .uri("/invoice")
        .set_form(khan_form())
        .to_request();
    test::call_service(&app, req).await;

    let mut form = khan_form();
    form[0] = ("name", "B. Ahmed");
    form[3] = ("plotNo", "  ");

    let req = test::TestRequest::post().uri("/invoice").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body = body_text(&test::read_body(resp).await);
    assert!(body.contains("House / Plot No. is required"));
    assert!(body.contains(r#"value="B. Ahmed""#));

    assert_eq!(state.current().unwrap().name, "A. Khan");
}

#[actix_web::test]
async fn test_second_submission_replaces_first() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    for name in ["A. Khan", "B. Ahmed"] {
        let mut form = khan_form();
        form[0] = ("name", name);
        let req = test::TestRequest::post().uri("/invoice").set_form(form).to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/").to_request();
    let body = body_text(&test::call_and_read_body(&app, req).await);
    assert!(body.contains("B. Ahmed"));
    assert!(!body.contains("A. Khan"));
}

#[actix_web::test]
async fn test_due_date_crosses_year_end() {
    let state = fixed_state(2025, 12, 31);
    let app = test::init_service(App::new().app_data(state).configure(handlers::config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({
            "name": "A. Khan",
            "address": "12 Park Lane",
            "contact": "0300-1234567",
            "plotNo": "H-12",
            "billMonth": "Dec 2025"
        }))
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp["summary"]["issueDate"], "2025-12-31");
    assert_eq!(resp["summary"]["dueDate"], "2026-01-20");
    assert_eq!(resp["summary"]["totalFormatted"], "Rs\u{a0}0.00");
}

#[actix_web::test]
async fn test_preview_does_not_touch_held_invoice() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({
            "name": "A. Khan",
            "address": "12 Park Lane",
            "contact": "0300-1234567",
            "plotNo": "H-12",
            "billMonth": "Sep 2025",
            "dues": 500,
            "currentPayment": "1500"
        }))
        .to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(resp["record"]["plotNo"], "H-12");
    assert_eq!(resp["summary"]["totalFormatted"], "Rs\u{a0}2,000.00");
    assert_eq!(resp["copies"][0]["label"], "Society");
    assert_eq!(resp["copies"][1]["label"], "Resident");
    assert!(state.current().is_none());
}

#[actix_web::test]
async fn test_preview_validation_error() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state).configure(handlers::config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({ "name": "A. Khan", "dues": -5 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "BadRequest");
    let message = body["message"].as_str().unwrap();
    assert!(message.contains("5 error(s)"));
    assert!(message.contains("[dues]"));
    assert!(message.contains("[plotNo]"));
    assert_eq!(body["details"].as_array().unwrap().len(), 5);
    assert_eq!(body["details"][0]["field"], "contact");
}

#[actix_web::test]
async fn test_extreme_amounts_are_rejected_and_page_still_renders() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    let mut form = khan_form();
    form[5] = ("dues", "79228162514264337593543950335");
    form[6] = ("currentPayment", "1e29");

    let req = test::TestRequest::post().uri("/invoice").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = body_text(&test::read_body(resp).await);
    assert_eq!(body.matches("cannot exceed").count(), 2);
    assert!(state.current().is_none());

    let mut form = khan_form();
    form[5] = ("dues", "1000000000000");
    form[6] = ("currentPayment", "1000000000000");

    let req = test::TestRequest::post().uri("/invoice").set_form(form).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(&test::read_body(resp).await);
    assert_eq!(body.matches("Rs\u{a0}2,000,000,000,000.00").count(), 2);
}

#[actix_web::test]
async fn test_preview_treats_non_numeric_json_amount_as_zero() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state).configure(handlers::config)).await;

    let req = test::TestRequest::post()
        .uri("/api/invoices/preview")
        .set_json(json!({
            "name": "A. Khan",
            "address": "12 Park Lane",
            "contact": "0300-1234567",
            "plotNo": "H-12",
            "billMonth": "Sep 2025",
            "dues": true,
            "currentPayment": 1500
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["record"]["dues"], "0");
    assert_eq!(body["summary"]["totalFormatted"], "Rs\u{a0}1,500.00");
}

#[actix_web::test]
async fn test_current_invoice_endpoint() {
    let state = fixed_state(2025, 9, 30);
    let app = test::init_service(App::new().app_data(state.clone()).configure(handlers::config)).await;

    let req = test::TestRequest::get().uri("/api/invoices/current").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/invoice")
        .set_form(khan_form())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/api/invoices/current").to_request();
    let resp: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(resp["record"]["name"], "A. Khan");
    assert_eq!(resp["record"]["dues"], "500");
    assert_eq!(resp["summary"]["dueDate"], "2025-10-20");
}
