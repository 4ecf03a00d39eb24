//! Integration tests for profiles, roles, credentials, and sessions.
//!
//! `#[sqlx::test]` creates a scratch database per test from `DATABASE_URL`.

use assert_matches::assert_matches;
use leadtrack_db::models::profile::CreateProfile;
use leadtrack_db::models::session::CreateSession;
use leadtrack_db::repositories::{CredentialRepo, ProfileRepo, SessionRepo, UserRoleRepo};
use sqlx::PgPool;

fn new_profile(email: &str, role: &str) -> CreateProfile {
    CreateProfile {
        email: email.to_string(),
        full_name: Some("Test User".to_string()),
        password_hash: "not-a-real-hash".to_string(),
        role: role.to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn bootstrap_connects_and_migrates(pool: PgPool) {
    leadtrack_db::health_check(&pool).await.unwrap();

    for table in ["profiles", "user_roles", "user_credentials", "user_sessions", "leads", "lead_activities"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn provisioning_writes_profile_credentials_and_role(pool: PgPool) {
    let user = ProfileRepo::create_with_credentials(&pool, &new_profile("s@example.com", "salesman"))
        .await
        .unwrap();

    assert_eq!(user.effective_role(), "salesman");

    let login = CredentialRepo::find_by_email(&pool, "S@EXAMPLE.COM")
        .await
        .unwrap()
        .expect("credentials exist");
    assert_eq!(login.user_id, user.id);
    assert!(login.is_active);
    assert_eq!(login.role.as_deref(), Some("salesman"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_rolls_back(pool: PgPool) {
    ProfileRepo::create_with_credentials(&pool, &new_profile("dup@example.com", "salesman"))
        .await
        .unwrap();

    let err = ProfileRepo::create_with_credentials(&pool, &new_profile("dup@example.com", "admin"))
        .await
        .unwrap_err();
    assert_matches!(err, sqlx::Error::Database(ref e) if e.constraint() == Some("uq_profiles_email"));

    assert_eq!(UserRoleRepo::count_by_role(&pool, "admin").await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn profile_without_role_row_defaults_to_user(pool: PgPool) {
    sqlx::query("INSERT INTO profiles (email) VALUES ('plain@example.com')")
        .execute(&pool)
        .await
        .unwrap();

    let users = ProfileRepo::list_with_roles(&pool).await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].role.is_none());
    assert_eq!(users[0].effective_role(), "user");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn role_upsert_is_idempotent(pool: PgPool) {
    let user = ProfileRepo::create_with_credentials(&pool, &new_profile("m@example.com", "user"))
        .await
        .unwrap();

    UserRoleRepo::upsert(&pool, user.id, "manager").await.unwrap();
    UserRoleRepo::upsert(&pool, user.id, "manager").await.unwrap();

    let stored = ProfileRepo::find_with_role(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(stored.role.as_deref(), Some("manager"));
    assert_eq!(UserRoleRepo::count_by_role(&pool, "manager").await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn assignable_lists_salesmen_and_admins(pool: PgPool) {
    ProfileRepo::create_with_credentials(&pool, &new_profile("a@example.com", "admin")).await.unwrap();
    ProfileRepo::create_with_credentials(&pool, &new_profile("s@example.com", "salesman")).await.unwrap();
    ProfileRepo::create_with_credentials(&pool, &new_profile("m@example.com", "manager")).await.unwrap();

    let assignable = ProfileRepo::list_by_roles(&pool, &["salesman", "admin"]).await.unwrap();
    let emails: Vec<&str> = assignable.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["a@example.com", "s@example.com"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoked_sessions_are_not_found(pool: PgPool) {
    let user = ProfileRepo::create_with_credentials(&pool, &new_profile("t@example.com", "salesman"))
        .await
        .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "hash-1".to_string(),
            expires_at: chrono::Utc::now() + chrono::Duration::days(1),
            user_agent: None,
            ip_address: None,
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "hash-1").await.unwrap().is_some());
    assert_eq!(SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap(), 1);
    assert!(SessionRepo::find_active_by_hash(&pool, "hash-1").await.unwrap().is_none());
}
