mod common;

use actix_web::test;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use common::{booking_response_json, traveler_json, TestApp};

async fn open_form<S, B>(app: &S) -> serde_json::Value
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/booking-forms")
        .set_json(json!({
            "activityId": "act-1",
            "packageId": "p-dive",
            "date": "2026-11-02"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201);
    test::read_body_json(resp).await
}

#[actix_rt::test]
async fn test_open_form_runs_availability_check() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;

    assert_eq!(form["packageId"], "p-dive");
    assert_eq!(form["availability"]["availableSlots"], 5);
    assert!(form["availabilityWarning"].is_null());
    assert_eq!(form["sections"].as_array().unwrap().len(), 5);
    let id = form["id"].as_str().unwrap();
    assert_eq!(form["route"]["route"], "booking_form");
    assert_eq!(form["route"]["path"], format!("/booking-forms/{}", id));
    assert_eq!(form["routeHistory"].as_array().unwrap().len(), 1);
    // participants prefilled with the package minimum
    assert_eq!(form["priceSummary"]["formattedTotal"], "Rp1.000.000");
}

#[actix_rt::test]
async fn test_failed_availability_shows_zero_slots() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    Mock::given(method("GET"))
        .and(path("/availability"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.server)
        .await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;

    assert_eq!(form["availability"]["availableSlots"], 0);
    assert!(form["availabilityWarning"].is_string());
}

#[actix_rt::test]
async fn test_open_form_unknown_package() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/booking-forms")
        .set_json(json!({
            "activityId": "act-1",
            "packageId": "nope",
            "date": "2026-11-02"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_open_form_bad_date() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/booking-forms")
        .set_json(json!({
            "activityId": "act-1",
            "packageId": "p-dive",
            "date": "next tuesday"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
async fn test_unknown_form_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/booking-forms/not-a-form")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_rt::test]
async fn test_date_change_rechecks_availability() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    test_app.mount_availability("2026-11-03", 1).await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/booking-forms/{}/date", id))
        .set_json(json!({"date": "2026-11-03"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let form: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(form["date"], "2026-11-03");
    assert_eq!(form["availability"]["availableSlots"], 1);
    // two participants prefilled, one slot left
    assert!(form["availabilityWarning"]
        .as_str()
        .unwrap()
        .starts_with("Only 1 slots left"));
}

#[actix_rt::test]
async fn test_participants_update_reprices() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/booking-forms/{}/participants", id))
        .set_json(json!({"participants": "3"}))
        .to_request();
    let form: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(form["priceSummary"]["total"], 1500000.0);
    assert_eq!(form["priceSummary"]["formattedTotal"], "Rp1.500.000");
}

#[actix_rt::test]
async fn test_submit_without_login() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_response_json()))
        .expect(0)
        .mount(&test_app.server)
        .await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/booking-forms/{}/traveler", id))
        .set_json(traveler_json())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/booking-forms/{}/submit", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["outcome"], "login_required");
    assert_eq!(body["route"]["route"], "login");
    assert_eq!(body["route"]["path"], "/login");
    assert_eq!(test_app.booking_requests().await, 0);
}

#[actix_rt::test]
async fn test_submit_validation_message() {
    let test_app = TestApp::new().await;
    test_app.sign_in("u-1");
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/booking-forms/{}/participants", id))
        .set_json(json!({"participants": "12"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/booking-forms/{}/submit", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["outcome"], "invalid");
    assert_eq!(body["message"], "Maximum 8 participants for this package");
    assert_eq!(test_app.booking_requests().await, 0);
}

#[actix_rt::test]
async fn test_submit_books() {
    let test_app = TestApp::new().await;
    test_app.sign_in("u-1");
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 0).await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(booking_response_json()))
        .expect(1)
        .mount(&test_app.server)
        .await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();
    // zero slots only warns
    assert!(form["availabilityWarning"].is_string());

    let req = test::TestRequest::put()
        .uri(&format!("/api/booking-forms/{}/traveler", id))
        .set_json(traveler_json())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/booking-forms/{}/submit", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["outcome"], "booked");
    assert_eq!(body["booking"]["bookingDetails"]["bookingId"], 1001);
    assert_eq!(body["route"]["route"], "booking_confirmation");
    assert_eq!(body["route"]["bookingId"], 1001);
    assert_eq!(body["route"]["path"], "/bookings/1001");
}

#[actix_rt::test]
async fn test_submit_backend_failure_is_reported() {
    let test_app = TestApp::new().await;
    test_app.sign_in("u-1");
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    Mock::given(method("POST"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&test_app.server)
        .await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/booking-forms/{}/traveler", id))
        .set_json(traveler_json())
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/booking-forms/{}/submit", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 502);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["outcome"], "failed");
    // still on the form
    assert_eq!(body["route"]["route"], "booking_form");
}

#[actix_rt::test]
async fn test_close_form() {
    let test_app = TestApp::new().await;
    test_app.mount_activity().await;
    test_app.mount_availability("2026-11-02", 5).await;
    let app = test::init_service(test_app.create_app()).await;

    let form = open_form(&app).await;
    let id = form["id"].as_str().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/booking-forms/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["route"]["route"], "activity_detail");
    assert_eq!(body["route"]["activityId"], "act-1");
    assert_eq!(body["route"]["path"], "/activities/act-1");

    let req = test::TestRequest::get()
        .uri(&format!("/api/booking-forms/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}
