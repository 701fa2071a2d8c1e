mod common;

use actix_web::{http::StatusCode, ResponseError};

use common::{client::TestClient, TestContext};
use gp_booking::types::error::AppError;

#[tokio::test]
async fn test_group_duplicate_name_conflicts() {
    println!("\n\n[+] Running test: test_group_duplicate_name_conflicts");
    let ctx = TestContext::new().await;

    ctx.db.create_group("clinicians".to_string()).await.expect("Failed to create group");
    let err = ctx.db.create_group("clinicians".to_string()).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
    println!("[/] Test passed: Duplicate group name conflicts.");
}

#[tokio::test]
async fn test_group_membership_flow() {
    println!("\n\n[+] Running test: test_group_membership_flow");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let (pat, _) = client.create_test_user("pat").await.expect("Failed creating a test user");
    let (sam, _) = client.create_test_user("sam").await.expect("Failed creating a test user");

    let staff = ctx.db.create_group("staff".to_string()).await.expect("Failed to create group");
    let admins = ctx.db.create_group("admins".to_string()).await.expect("Failed to create group");

    ctx.db.add_user_to_group(pat.id, staff.id).await.expect("Failed to add member");
    ctx.db.add_user_to_group(pat.id, admins.id).await.expect("Failed to add member");
    ctx.db.add_user_to_group(sam.id, staff.id).await.expect("Failed to add member");

    // names come back alphabetical, not in insertion order
    let names = ctx.db.list_user_group_names(pat.id).await.expect("Failed to list groups");
    assert_eq!(names, vec!["admins".to_string(), "staff".to_string()]);

    let members = ctx.db.list_group_member_usernames(staff.id).await.expect("Failed to list members");
    assert_eq!(members, vec!["pat".to_string(), "sam".to_string()]);

    let err = ctx.db.add_user_to_group(pat.id, staff.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(err.status_code(), StatusCode::CONFLICT);
    println!("[/] Test passed: Membership listing and duplicate membership.");
}

#[tokio::test]
async fn test_user_delete_drops_memberships_and_grants() {
    println!("\n\n[+] Running test: test_user_delete_drops_memberships_and_grants");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let (pat, _) = client.create_test_user("pat").await.expect("Failed creating a test user");
    let (sam, _) = client.create_test_user("sam").await.expect("Failed creating a test user");

    let staff = ctx.db.create_group("staff".to_string()).await.expect("Failed to create group");
    ctx.db.add_user_to_group(pat.id, staff.id).await.expect("Failed to add member");
    ctx.db.add_user_to_group(sam.id, staff.id).await.expect("Failed to add member");

    let permission = ctx.db.ensure_permission("view_appointment", None).await.expect("Failed to create permission");
    ctx.db.grant_permission(pat.id, permission.id).await.expect("Failed to grant permission");

    ctx.db.delete_user(pat.id).await.expect("Failed to delete user");

    let members = ctx.db.list_group_member_usernames(staff.id).await.expect("Failed to list members");
    assert_eq!(members, vec!["sam".to_string()]);

    // the permission itself survives and can be granted again
    ctx.db.grant_permission(sam.id, permission.id).await.expect("Failed to grant permission");
    let codenames = ctx.db.list_user_permission_codenames(sam.id).await.expect("Failed to list permissions");
    assert_eq!(codenames, vec!["view_appointment".to_string()]);
    println!("[/] Test passed: Deleting a user cascades its join rows.");
}

#[tokio::test]
async fn test_permission_grant_flow() {
    println!("\n\n[+] Running test: test_permission_grant_flow");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let (pat, _) = client.create_test_user("pat").await.expect("Failed creating a test user");

    let change = ctx.db
        .ensure_permission("change_doctor", Some("Can change doctor".to_string()))
        .await
        .expect("Failed to create permission");
    assert_eq!(change.name, "Can change doctor");

    // an existing codename is reused, not duplicated
    let again = ctx.db.ensure_permission("change_doctor", None).await.expect("Failed to look up permission");
    assert_eq!(again.id, change.id);

    let err = ctx.db
        .create_permission("change_doctor".to_string(), "dupe".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let add = ctx.db.ensure_permission("add_review", None).await.expect("Failed to create permission");
    assert_eq!(add.name, "add_review");

    ctx.db.grant_permission(pat.id, change.id).await.expect("Failed to grant permission");
    ctx.db.grant_permission(pat.id, add.id).await.expect("Failed to grant permission");
    let err = ctx.db.grant_permission(pat.id, add.id).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let codenames = ctx.db.list_user_permission_codenames(pat.id).await.expect("Failed to list permissions");
    assert_eq!(codenames, vec!["add_review".to_string(), "change_doctor".to_string()]);
    println!("[/] Test passed: Permission grant flow.");
}
