//! Sign-in and account management against a real database.
//!
//! `#[sqlx::test]` creates a scratch database per test from `DATABASE_URL`.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, post_json, post_json_auth, put_json_auth, seed_user,
    TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_returns_tokens_and_landing_page(pool: PgPool) {
    seed_user(&pool, "s@example.com", "salesman").await;

    let app = build_test_app(pool);
    let response = post_json(
        app.clone(),
        "/api/v1/auth/login",
        json!({ "email": "S@Example.com", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "salesman");
    assert_eq!(json["user"]["default_path"], "/dashboard");
    let access = json["access_token"].as_str().unwrap().to_string();
    let refresh = json["refresh_token"].as_str().unwrap().to_string();

    let me = body_json(get_auth(app.clone(), "/api/v1/auth/me", &access).await).await;
    assert_eq!(me["data"]["email"], "s@example.com");

    let response = post_json(app, "/api/v1/auth/refresh", json!({ "refresh_token": refresh })).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_generic(pool: PgPool) {
    seed_user(&pool, "s@example.com", "salesman").await;

    let app = build_test_app(pool);
    for email in ["s@example.com", "ghost@example.com"] {
        let response = post_json(
            app.clone(),
            "/api/v1/auth/login",
            json!({ "email": email, "password": "wrong-password" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Invalid email or password");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn admin_provisions_a_salesman(pool: PgPool) {
    let (_, token) = seed_user(&pool, "admin@example.com", "admin").await;

    let app = build_test_app(pool);
    let body = json!({
        "email": "New.Hire@Example.com",
        "password": "secret1",
        "confirm_password": "secret1",
        "full_name": "New Hire",
        "role": "salesman",
    });
    let response = post_json_auth(app.clone(), "/api/v1/users", body.clone(), &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "User created successfully");
    assert_eq!(json["data"]["email"], "new.hire@example.com");
    assert_eq!(json["data"]["role"], "salesman");

    let assignable = body_json(get_auth(app.clone(), "/api/v1/users/assignable", &token).await).await;
    assert!(assignable["data"]
        .as_array()
        .unwrap()
        .iter()
        .any(|u| u["email"] == "new.hire@example.com"));

    let response = post_json_auth(app, "/api/v1/users", body, &token).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_change_takes_effect(pool: PgPool) {
    let (_, admin_token) = seed_user(&pool, "admin@example.com", "admin").await;
    let (user_id, _) = seed_user(&pool, "u@example.com", "user").await;

    let app = build_test_app(pool);
    let uri = format!("/api/v1/users/{user_id}/role");
    let response = put_json_auth(app.clone(), &uri, json!({ "role": "manager" }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Role updated successfully");

    let users = body_json(get_auth(app.clone(), "/api/v1/users", &admin_token).await).await;
    let changed = users["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|u| u["id"] == user_id.to_string())
        .cloned()
        .unwrap();
    assert_eq!(changed["role"], "manager");

    let missing = format!("/api/v1/users/{}/role", uuid::Uuid::new_v4());
    let response = put_json_auth(app, &missing, json!({ "role": "manager" }), &admin_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
