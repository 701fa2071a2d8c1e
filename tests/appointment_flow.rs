mod common;

use actix_web::{http::StatusCode, test};
use serde_json::json;

use common::{client::{bearer, TestClient}, test_data, TestContext};

#[tokio::test]
async fn test_appointment_flow_requires_authentication() {
    println!("\n\n[+] Running test: test_appointment_flow_requires_authentication");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let doctor = client.create_test_doctor().await;

    let req = test::TestRequest::get().uri("/appointments/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/appointments/")
        .set_json(test_data::sample_appointment(doctor.id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    println!("[/] Test passed: Anonymous callers cannot touch appointments.");
}

#[tokio::test]
async fn test_appointment_flow_owner_is_caller() {
    println!("\n\n[+] Running test: test_appointment_flow_owner_is_caller");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let (pat, token) = client.create_test_user("pat").await.expect("Failed creating a test user");
    let (sam, _) = client.create_test_user("sam").await.expect("Failed creating a test user");
    let doctor = client.create_test_doctor().await;

    let mut body = test_data::sample_appointment(doctor.id);
    body["user"] = json!(sam.id);
    body["status"] = json!("confirmed");

    let req = test::TestRequest::post()
        .uri("/appointments/")
        .insert_header(bearer(&token))
        .set_json(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: serde_json::Value = test::read_body_json(resp).await;
    println!("[<] Response body: {}", created);
    assert_eq!(created["user"]["id"], json!(pat.id));
    assert_eq!(created["user"]["username"], "pat");
    assert_eq!(created["doctor"]["id"], json!(doctor.id));
    assert_eq!(created["doctor"]["name"], doctor.name);
    assert_eq!(created["status"], "confirmed");
    assert_eq!(created["time"], "10:15:00");

    let req = test::TestRequest::get()
        .uri(&format!("/appointments/?user={}", sam.id))
        .insert_header(bearer(&token))
        .to_request();
    let list: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
    assert!(list.is_empty());
    println!("[/] Test passed: Body user ignored, caller owns the appointment.");
}

#[tokio::test]
async fn test_appointment_flow_status_defaults_and_updates() {
    println!("\n\n[+] Running test: test_appointment_flow_status_defaults_and_updates");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let (_pat, token) = client.create_test_user("pat").await.expect("Failed creating a test user");
    let doctor = client.create_test_doctor().await;

    let req = test::TestRequest::post()
        .uri("/appointments/")
        .insert_header(bearer(&token))
        .set_json(test_data::sample_appointment(doctor.id))
        .to_request();
    let created: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["status"], "pending");
    let uri = format!("/appointments/{}/", created["id"].as_str().unwrap());

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&token))
        .set_json(json!({ "status": "rescheduled" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["fields"]["status"][0], "\"rescheduled\" is not a valid choice.");

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&token))
        .set_json(json!({ "status": "cancelled" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "cancelled");
    assert_eq!(body["date"], "2025-03-01");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    println!("[/] Test passed: Appointment status lifecycle.");
}

#[tokio::test]
async fn test_appointment_flow_missing_fields() {
    println!("\n\n[+] Running test: test_appointment_flow_missing_fields");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;
    let (_pat, token) = client.create_test_user("pat").await.expect("Failed creating a test user");

    let req = test::TestRequest::post()
        .uri("/appointments/")
        .insert_header(bearer(&token))
        .set_json(json!({ "date": "2025-13-45" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    println!("[<] Response body: {}", body);
    assert_eq!(body["fields"]["doctor"][0], "This field is required.");
    assert_eq!(body["fields"]["time"][0], "This field is required.");
    assert!(body["fields"]["date"].is_array());
    println!("[/] Test passed: Every bad field reported.");
}
