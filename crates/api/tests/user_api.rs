//! HTTP-level integration tests for the `/users` resource: admin-managed
//! account creation and tenant-scoped listing.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.

mod common;

use axum::http::StatusCode;
use common::{assert_error, body_json, build_test_app, get_auth, post_json, post_json_auth, seed_user};
use callsheet_core::roles::Role;
use sqlx::PgPool;

fn user_body(email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "email": email,
        "password": "hunter2-hunter2",
        "name": "New Hire",
        "role": role,
    })
}

// ---------------------------------------------------------------------------
// Test: admin creates a user who can then log in
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_creates_user_who_can_login(pool: PgPool) {
    let admin = seed_user(&pool, Role::Admin).await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &admin.token,
        user_body("newhire@test.example", "producer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "newhire@test.example");
    assert_eq!(json["data"]["role"], "producer");
    assert_eq!(json["data"]["company_id"].as_i64().unwrap(), admin.company_id);
    // The hash never leaves the repository layer.
    assert!(json["data"]["password_hash"].is_null());

    let app = build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({
            "email": "newhire@test.example",
            "password": "hunter2-hunter2"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Test: only admins manage users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn producer_cannot_create_user(pool: PgPool) {
    let producer = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &producer.token,
        user_body("intruder@test.example", "viewer"),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

// ---------------------------------------------------------------------------
// Test: invalid input is rejected
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_user_input_rejected(pool: PgPool) {
    let admin = seed_user(&pool, Role::Admin).await;

    // Unknown role name.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &admin.token,
        user_body("someone@test.example", "superuser"),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    // Malformed email.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &admin.token,
        user_body("not-an-email", "viewer"),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    // Short password.
    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &admin.token,
        serde_json::json!({
            "email": "someone@test.example",
            "password": "short",
            "name": "New Hire",
        }),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

// ---------------------------------------------------------------------------
// Test: emails are unique across companies
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_email_across_companies_conflicts(pool: PgPool) {
    let admin_a = seed_user(&pool, Role::Admin).await;
    let admin_b = seed_user(&pool, Role::Admin).await;
    assert_ne!(admin_a.company_id, admin_b.company_id);

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &admin_a.token,
        user_body("shared@test.example", "viewer"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    // The same address in a second company would be unable to log in, so
    // the constraint rejects it outright.
    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/users",
        &admin_b.token,
        user_body("shared@test.example", "viewer"),
    )
    .await;
    assert_error(response, StatusCode::CONFLICT, "CONFLICT").await;
}

// ---------------------------------------------------------------------------
// Test: listing is tenant-scoped
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn list_users_is_tenant_scoped(pool: PgPool) {
    let admin = seed_user(&pool, Role::Admin).await;
    let outsider = seed_user(&pool, Role::Admin).await;

    let app = build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/users",
        &admin.token,
        user_body("colleague@test.example", "viewer"),
    )
    .await;

    let app = build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/api/v1/users", &admin.token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);

    // The other company sees only its own seeded admin.
    let app = build_test_app(pool);
    let json = body_json(get_auth(app, "/api/v1/users", &outsider.token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
