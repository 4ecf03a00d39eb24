//! Authorization and input-validation paths over HTTP.
//!
//! Every request here is rejected before a query runs, so the app is built
//! on a pool that never connects.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_offline_app, delete_auth, get, get_auth, patch_json_auth, post_json,
    post_json_auth, put_json_auth, token_for,
};
use serde_json::json;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[tokio::test]
async fn lead_list_requires_a_token() {
    let response = get(build_offline_app(), "/api/v1/leads").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn garbage_token_is_rejected() {
    let response = get_auth(build_offline_app(), "/api/v1/leads", "not.a.jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_unknown_role_is_rejected() {
    let (_, token) = token_for("owner");
    let response = get_auth(build_offline_app(), "/api/v1/leads", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid or expired token");
}

// ---------------------------------------------------------------------------
// Lead writes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn salesman_cannot_delete_leads() {
    let (_, token) = token_for("salesman");
    let response = delete_auth(build_offline_app(), "/api/v1/leads/1", &token).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Only admins can delete leads");
}

#[tokio::test]
async fn manager_cannot_delete_leads() {
    let (_, token) = token_for("manager");
    let response = delete_auth(build_offline_app(), "/api/v1/leads/1", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn salesman_cannot_create_leads() {
    let (_, token) = token_for("salesman");
    let body = json!({ "full_name": "Walk-in" });
    let response = post_json_auth(build_offline_app(), "/api/v1/leads", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn create_with_legacy_status_is_invalid() {
    let (_, token) = token_for("admin");
    let body = json!({ "full_name": "Walk-in", "status": "hot" });
    let response = post_json_auth(build_offline_app(), "/api/v1/leads", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn patch_carrying_id_is_rejected() {
    let (_, token) = token_for("admin");
    let body = json!({ "id": 99, "status": "contacted" });
    let response = patch_json_auth(build_offline_app(), "/api/v1/leads/1", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Field 'id' cannot be changed");
}

#[tokio::test]
async fn patch_with_unknown_status_is_rejected() {
    let (_, token) = token_for("admin");
    let body = json!({ "status": "warm" });
    let response = patch_json_auth(build_offline_app(), "/api/v1/leads/1", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn patch_with_unknown_field_is_rejected() {
    let (_, token) = token_for("admin");
    let body = json!({ "colour": "red" });
    let response = patch_json_auth(build_offline_app(), "/api/v1/leads/1", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn salesman_cannot_bulk_assign() {
    let (_, token) = token_for("salesman");
    let body = json!({ "lead_ids": [1, 2], "assignee_id": Uuid::new_v4() });
    let response =
        post_json_auth(build_offline_app(), "/api/v1/leads/bulk-assign", body, &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn bulk_assign_with_no_leads_is_invalid() {
    let (_, token) = token_for("manager");
    let body = json!({ "lead_ids": [], "assignee_id": Uuid::new_v4() });
    let response =
        post_json_auth(build_offline_app(), "/api/v1/leads/bulk-assign", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Select at least one lead to assign");
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[tokio::test]
async fn activities_without_lead_are_empty() {
    let (_, token) = token_for("salesman");
    let response = get_auth(build_offline_app(), "/api/v1/activities", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn unknown_activity_type_is_invalid() {
    let (_, token) = token_for("admin");
    let body = json!({ "activity_type": "email_sent", "activity_text": "Sent brochure" });
    let response =
        post_json_auth(build_offline_app(), "/api/v1/leads/1/activities", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn blank_activity_text_is_invalid() {
    let (_, token) = token_for("admin");
    let body = json!({ "activity_type": "note_added", "activity_text": "   " });
    let response =
        post_json_auth(build_offline_app(), "/api/v1/leads/1/activities", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Activity text cannot be empty");
}

// ---------------------------------------------------------------------------
// Users and roles
// ---------------------------------------------------------------------------

fn new_user_body() -> serde_json::Value {
    json!({
        "email": "new.hire@example.com",
        "password": "secret1",
        "full_name": "New Hire",
        "role": "salesman",
    })
}

#[tokio::test]
async fn creating_a_user_requires_a_session() {
    let response = post_json(build_offline_app(), "/api/v1/users", new_user_body()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "You must be logged in to create users");
}

#[tokio::test]
async fn only_admins_create_users() {
    let (_, token) = token_for("manager");
    let response =
        post_json_auth(build_offline_app(), "/api/v1/users", new_user_body(), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn invalid_user_fields_are_reported_per_field() {
    let (_, token) = token_for("admin");
    let body = json!({
        "email": "not-an-email",
        "password": "123",
        "confirm_password": "1234",
        "full_name": "  ",
        "role": "salesman",
    });
    let response = post_json_auth(build_offline_app(), "/api/v1/users", body, &token).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["email"], "Please enter a valid email address");
    assert_eq!(json["fields"]["password"], "Password must be at least 6 characters");
    assert_eq!(json["fields"]["confirm_password"], "Passwords don't match");
    assert_eq!(json["fields"]["full_name"], "Full name is required");
}

#[tokio::test]
async fn user_list_is_admin_only() {
    let (_, token) = token_for("manager");
    let response = get_auth(build_offline_app(), "/api/v1/users", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn assignee_picker_is_closed_to_salesmen() {
    let (_, token) = token_for("salesman");
    let response = get_auth(build_offline_app(), "/api/v1/users/assignable", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn role_update_rejects_unknown_roles() {
    let (_, token) = token_for("admin");
    let uri = format!("/api/v1/users/{}/role", Uuid::new_v4());
    let response =
        put_json_auth(build_offline_app(), &uri, json!({ "role": "owner" }), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_update_is_admin_only() {
    let (_, token) = token_for("salesman");
    let uri = format!("/api/v1/users/{}/role", Uuid::new_v4());
    let response =
        put_json_auth(build_offline_app(), &uri, json!({ "role": "admin" }), &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn team_performance_is_admin_only() {
    for role in ["salesman", "manager", "user"] {
        let (_, token) = token_for(role);
        let response =
            get_auth(build_offline_app(), "/api/v1/dashboard/performance", &token).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN, "{role} must be refused");
    }
}
