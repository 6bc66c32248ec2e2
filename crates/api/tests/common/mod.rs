//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the real application router (same middleware stack as `main.rs`)
//! and provides request helpers plus tenant/user seeding.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use callsheet_api::auth::jwt::{generate_access_token, JwtConfig};
use callsheet_api::auth::password::hash_password;
use callsheet_api::config::ServerConfig;
use callsheet_api::router::build_app_router;
use callsheet_api::state::AppState;
use callsheet_core::roles::Role;
use callsheet_core::types::DbId;
use callsheet_db::models::company::CreateCompany;
use callsheet_db::models::user::CreateUser;
use callsheet_db::repositories::{CompanyRepo, UserRepo};

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors production router construction.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// A seeded tenant + user with a ready-to-use Bearer token.
pub struct TestUser {
    pub user_id: DbId,
    pub company_id: DbId,
    pub email: String,
    pub token: String,
}

/// Create a company and a user with the given role, returning a valid
/// access token for that user. Emails are globally unique, so the seeded
/// address is qualified by the company id.
pub async fn seed_user(pool: &PgPool, role: Role) -> TestUser {
    let company = CompanyRepo::create(
        pool,
        &CreateCompany {
            name: "Test Pictures".to_string(),
        },
    )
    .await
    .expect("company seed should succeed");

    let email = format!("{}-{}@test.example", role.as_str(), company.id);
    let password_hash = hash_password("test-password").expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            company_id: company.id,
            email: email.clone(),
            password_hash,
            name: "Test User".to_string(),
            role: Some(role.as_str().to_string()),
        },
    )
    .await
    .expect("user seed should succeed");

    let token = generate_access_token(user.id, user.company_id, role, &test_config().jwt)
        .expect("token generation should succeed");

    TestUser {
        user_id: user.id,
        company_id: company.id,
        email,
        token,
    }
}

/// Parse a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Send a GET request without authentication.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", bearer(token))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a JSON body, no authentication (login).
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST with a JSON body and a Bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", bearer(token))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT with a JSON body and a Bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", bearer(token))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE with a Bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", bearer(token))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Assert a response is the standard error envelope with the given status.
pub async fn assert_error(response: Response<Body>, status: StatusCode, code: &str) {
    assert_eq!(response.status(), status);
    let json = body_json(response).await;
    assert_eq!(json["code"], code);
}
