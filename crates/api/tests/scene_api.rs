//! HTTP-level integration tests for the `/scenes` resource.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Scene create/update responses embed the conflict report computed against
//! the saved state; the save itself always commits first.

mod common;

use axum::http::StatusCode;
use common::{
    assert_error, body_json, build_test_app, delete_auth, get_auth, post_json_auth,
    put_json_auth, seed_user,
};
use callsheet_core::roles::Role;
use sqlx::PgPool;

fn scene_body(
    number: &str,
    start: Option<&str>,
    minutes: Option<i64>,
    actors: &[i64],
) -> serde_json::Value {
    serde_json::json!({
        "scene_number": number,
        "title": format!("Scene {number}"),
        "scheduled_time": start,
        "duration_minutes": minutes,
        "assigned_actors": actors,
    })
}

// ---------------------------------------------------------------------------
// Test: creating a lone scene reports no conflicts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn create_scene_without_conflicts(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(60), &[1, 2]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["data"]["scene_number"], "1A");
    assert_eq!(json["data"]["conflicts"]["has_conflicts"], false);
    assert_eq!(
        json["data"]["conflicts"]["conflicts"].as_array().unwrap().len(),
        0
    );
}

// ---------------------------------------------------------------------------
// Test: overlapping scene with shared cast reports a resource conflict,
// and the save still commits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn overlapping_scene_reports_resource_conflict(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool.clone());
    let first = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(60), &[1, 2]),
        )
        .await,
    )
    .await;
    let first_id = first["data"]["id"].as_i64().unwrap();

    // 09:30 start overlaps 09:00-10:00; actor 2 is shared.
    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("2B", Some("2026-03-14T09:30:00Z"), Some(60), &[2, 3]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    let conflicts = json["data"]["conflicts"]["conflicts"].as_array().unwrap();
    assert_eq!(json["data"]["conflicts"]["has_conflicts"], true);
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["conflicting_scene_id"].as_i64().unwrap(), first_id);
    assert_eq!(conflicts[0]["conflict_type"], "resource");
    assert_eq!(conflicts[0]["conflicting_resources"], serde_json::json!([2]));

    // The conflicted save committed anyway: both scenes exist.
    let app = build_test_app(pool);
    let listing = body_json(get_auth(app, "/api/v1/scenes", &user.token).await).await;
    assert_eq!(listing["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Test: overlap without shared personnel is a plain time conflict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn overlap_without_shared_people_is_time_conflict(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(60), &[1, 2]),
    )
    .await;

    let app = build_test_app(pool);
    let json = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("2B", Some("2026-03-14T09:30:00Z"), Some(60), &[3, 4]),
        )
        .await,
    )
    .await;

    let conflicts = json["data"]["conflicts"]["conflicts"].as_array().unwrap();
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0]["conflict_type"], "time");
    assert_eq!(
        conflicts[0]["conflicting_resources"].as_array().unwrap().len(),
        0
    );
}

// ---------------------------------------------------------------------------
// Test: back-to-back scenes do not conflict (half-open intervals)
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn touching_scenes_do_not_conflict(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(60), &[1]),
    )
    .await;

    // Starts at 10:00 exactly as the first ends.
    let app = build_test_app(pool);
    let json = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("2B", Some("2026-03-14T10:00:00Z"), Some(30), &[1]),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["conflicts"]["has_conflicts"], false);
}

// ---------------------------------------------------------------------------
// Test: updating a scene never conflicts with itself
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn update_excludes_own_scene(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool.clone());
    let created = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(60), &[1]),
        )
        .await,
    )
    .await;
    let scene_id = created["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool);
    let json = body_json(
        put_json_auth(
            app,
            &format!("/api/v1/scenes/{scene_id}"),
            &user.token,
            serde_json::json!({ "title": "Renamed" }),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["title"], "Renamed");
    assert_eq!(json["data"]["conflicts"]["has_conflicts"], false);
}

// ---------------------------------------------------------------------------
// Test: unscheduled scenes save cleanly and never conflict
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn unscheduled_scene_never_conflicts(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool.clone());
    post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(480), &[1]),
    )
    .await;

    // Same cast, no schedule: no conflict possible.
    let app = build_test_app(pool);
    let json = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("2B", None, None, &[1]),
        )
        .await,
    )
    .await;
    assert_eq!(json["data"]["conflicts"]["has_conflicts"], false);
}

// ---------------------------------------------------------------------------
// Test: a scene can be returned to unscheduled
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn clearing_schedule_returns_scene_to_unscheduled(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    // Two overlapping scenes sharing actor 1.
    let app = build_test_app(pool.clone());
    let first = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(60), &[1]),
        )
        .await,
    )
    .await;
    let first_id = first["data"]["id"].as_i64().unwrap();

    let app = build_test_app(pool.clone());
    let second = body_json(
        post_json_auth(
            app,
            "/api/v1/scenes",
            &user.token,
            scene_body("2B", Some("2026-03-14T09:30:00Z"), Some(60), &[1]),
        )
        .await,
    )
    .await;
    assert_eq!(second["data"]["conflicts"]["has_conflicts"], true);
    let second_id = second["data"]["id"].as_i64().unwrap();

    // COALESCE updates cannot null a field, so unscheduling has its own
    // endpoint.
    let app = build_test_app(pool.clone());
    let response = delete_auth(
        app,
        &format!("/api/v1/scenes/{second_id}/schedule"),
        &user.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["scheduled_time"].is_null());
    assert_eq!(json["data"]["conflicts"]["has_conflicts"], false);

    // The former partner no longer conflicts either.
    let app = build_test_app(pool);
    let report = body_json(
        post_json_auth(
            app,
            &format!("/api/v1/scenes/{first_id}/conflicts"),
            &user.token,
            serde_json::json!({}),
        )
        .await,
    )
    .await;
    assert_eq!(report["data"]["has_conflicts"], false);
}

// ---------------------------------------------------------------------------
// Test: validation failures are 400s
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_scene_input_rejected(pool: PgPool) {
    let user = seed_user(&pool, Role::Producer).await;

    let app = build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("", Some("2026-03-14T09:00:00Z"), Some(60), &[]),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scenes",
        &user.token,
        scene_body("1A", Some("2026-03-14T09:00:00Z"), Some(0), &[]),
    )
    .await;
    assert_error(response, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

// ---------------------------------------------------------------------------
// Test: viewers cannot mutate scenes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn viewer_cannot_create_scene(pool: PgPool) {
    let viewer = seed_user(&pool, Role::Viewer).await;

    let app = build_test_app(pool);
    let response = post_json_auth(
        app,
        "/api/v1/scenes",
        &viewer.token,
        scene_body("1A", None, None, &[]),
    )
    .await;
    assert_error(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}
