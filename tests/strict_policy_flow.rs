mod common;

use actix_web::{http::StatusCode, test};

use common::{client::{bearer, TestClient}, test_data, TestContext};
use gp_booking::policy::{PolicyProfile, PolicyTable};

#[tokio::test]
async fn test_strict_policy_gates_users_and_slots() {
    println!("\n\n[+] Running test: test_strict_policy_gates_users_and_slots");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(
        client.create_app_with_policy(PolicyTable::for_profile(PolicyProfile::Strict)),
    )
    .await;
    let (_pat, token) = client.create_test_user("pat").await.expect("Failed creating a test user");

    for uri in ["/users/", "/availabilities/"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let req = test::TestRequest::get().uri(uri).insert_header(bearer(&token)).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK, "{uri}");
    }

    // doctors stay readable but no longer anonymously writable
    let req = test::TestRequest::get().uri("/doctors/").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/doctors/")
        .set_json(test_data::sample_doctor())
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
    println!("[/] Test passed: Strict profile applied.");
}
