mod common;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::setup_app;

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, value)
}

async fn create_job_card(app: &Router) -> Value {
    let (status, client) = send(
        app,
        "POST",
        "/api/clients",
        Some(json!({"client_name": "Meera Nair", "company_name": "Nair Estates"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, rfq) = send(
        app,
        "POST",
        &format!("/api/clients/{}/rfqs", client["id"].as_str().unwrap()),
        Some(json!({
            "project_type": "Residential",
            "scope_of_work": "Villa",
            "quotation_number": "Q-1",
            "quotation_amount": "250000.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rfq["client_name"], "Meera Nair");

    let (status, job_card) = send(
        app,
        "POST",
        "/api/job-cards",
        Some(json!({
            "rfq_id": rfq["id"],
            "job_number": "JC-1",
            "scope_of_work": "Design and build",
            "delivery_timelines": "2026-06-30",
            "payment_terms": {
                "1": {"milestone": "Design", "percentage": 40},
                "2": {"milestone": "Build", "percentage": 60}
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    job_card
}

#[tokio::test]
async fn job_card_terms_are_returned_keyed() {
    let (app, _db) = setup_app().await;
    let job_card = create_job_card(&app).await;

    assert_eq!(job_card["payment_terms"]["1"]["milestone"], "Design");
    assert_eq!(job_card["payment_terms"]["2"]["milestone"], "Build");
    assert_eq!(job_card["payment_terms"]["1"]["description"], "");
    assert_eq!(job_card["color_status"], "gray");
    assert_eq!(job_card["client_name"], "Meera Nair");
}

#[tokio::test]
async fn rejected_terms_answer_with_field_errors() {
    let (app, _db) = setup_app().await;
    let job_card = create_job_card(&app).await;
    let uri = format!("/api/job-cards/{}", job_card["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({"payment_terms": [
            {"milestone": "Design", "percentage": 30},
            {"milestone": "Build", "percentage": 40}
        ]})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(
        body["details"]["payment_terms"][0],
        "Total percentage must equal 100%"
    );

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment_terms"]["1"]["percentage"], "40");
}

#[tokio::test]
async fn purple_payment_ball_gets_an_invoice() {
    let (app, _db) = setup_app().await;
    let job_card = create_job_card(&app).await;

    let (status, ball) = send(
        &app,
        "POST",
        "/api/payment-balls",
        Some(json!({
            "job_card_id": job_card["id"],
            "project_percentage": 40,
            "amount": "100000.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(ball["invoice_number"].is_null());

    let uri = format!("/api/payment-balls/{}", ball["id"].as_str().unwrap());
    let (status, ball) = send(&app, "PUT", &uri, Some(json!({"color_status": "purple"}))).await;
    assert_eq!(status, StatusCode::OK);
    let invoice = ball["invoice_number"].as_str().unwrap().to_string();
    assert!(invoice.starts_with("INV-"));

    let (status, ball) = send(&app, "POST", &format!("{}/generate-invoice", uri), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ball["invoice_number"], invoice.as_str());

    let (status, balls) = send(
        &app,
        "GET",
        &format!(
            "/api/payment-balls/by-job-card?job_card={}",
            job_card["id"].as_str().unwrap()
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(balls.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn missing_payment_ball_requirements() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(&app, "POST", "/api/payment-balls", Some(json!({}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["job_card_id"][0], "This field is required.");
    assert_eq!(body["details"]["amount"][0], "This field is required.");

    let (status, _) = send(&app, "GET", "/api/payment-balls/by-job-card", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/api/tasks/by-payment-ball", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_required_fields_are_field_errors() {
    let (app, _db) = setup_app().await;
    let job_card = create_job_card(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/job-cards",
        Some(json!({
            "rfq_id": job_card["rfq_id"],
            "job_number": "JC-2",
            "delivery_timelines": "2026-09-30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["status"], "error");
    assert_eq!(body["details"]["scope_of_work"][0], "This field is required.");
    assert!(body["details"]["job_number"].is_null());

    let (status, ball) = send(
        &app,
        "POST",
        "/api/payment-balls",
        Some(json!({
            "job_card_id": job_card["id"],
            "project_percentage": 40,
            "amount": "100000.00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({
            "payment_ball_id": ball["id"],
            "weightage": 30,
            "due_date": "2026-03-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["task_brief"][0], "This field is required.");

    let (status, body) = send(
        &app,
        "POST",
        "/api/tasks",
        Some(json!({
            "payment_ball_id": ball["id"],
            "task_brief": "Elevations",
            "weightage": 30,
            "due_date": "2026-03-15"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/tasks/{}/subcontracts", body["id"].as_str().unwrap()),
        Some(json!({"subcontract_brief": "Rendering"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["details"]["weightage"][0], "This field is required.");
    assert_eq!(body["details"]["due_date"][0], "This field is required.");
    assert!(body["details"]["task_id"].is_null());
}

#[tokio::test]
async fn duplicate_job_number_is_a_field_error() {
    let (app, _db) = setup_app().await;
    let job_card = create_job_card(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/job-cards",
        Some(json!({
            "rfq_id": job_card["rfq_id"],
            "job_number": "JC-1",
            "scope_of_work": "Second phase",
            "delivery_timelines": "2026-09-30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["job_number"].is_array());
}

#[tokio::test]
async fn unknown_records_and_routes_are_not_found() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(&app, "GET", "/api/job-cards/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");

    let (status, _) = send(&app, "DELETE", "/api/employees/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/api/nowhere", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _db) = setup_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/employees")
        .header("Content-Type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn services_come_from_the_catalogue() {
    let (app, _db) = setup_app().await;

    let (status, body) = send(&app, "GET", "/api/services", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["services"], json!(["Architecture", "Interior Design"]));

    let (status, body) = send(
        &app,
        "POST",
        "/api/clients",
        Some(json!({
            "client_name": "Kiran",
            "company_name": "Kiran & Co",
            "service": "Plumbing"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["details"]["service"].is_array());
}

#[tokio::test]
async fn employee_delete_answers_no_content() {
    let (app, _db) = setup_app().await;

    let (status, employee) =
        send(&app, "POST", "/api/employees", Some(json!({"name": "Ravi"}))).await;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/employees/{}", employee["id"].as_str().unwrap());
    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());
}
