pub mod health;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
/// /auth/me                    current user (auth)
///
/// /users                      list, create (admin)
///
/// /shows                      list, create
/// /shows/{id}                 get, update, delete
///
/// /scenes                     list (?show_id=), create
/// /scenes/{id}                get, update, delete
/// /scenes/{id}/schedule       return to unscheduled (DELETE)
/// /scenes/{id}/conflicts      conflict report for one scene (POST)
///
/// /conflicts/batch            batch conflict resolution (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/me", get(handlers::auth::me));

    let user_routes = Router::new().route(
        "/",
        get(handlers::users::list).post(handlers::users::create),
    );

    let show_routes = Router::new()
        .route("/", get(handlers::shows::list).post(handlers::shows::create))
        .route(
            "/{id}",
            get(handlers::shows::get_by_id)
                .put(handlers::shows::update)
                .delete(handlers::shows::delete),
        );

    let scene_routes = Router::new()
        .route(
            "/",
            get(handlers::scenes::list).post(handlers::scenes::create),
        )
        .route(
            "/{id}",
            get(handlers::scenes::get_by_id)
                .put(handlers::scenes::update)
                .delete(handlers::scenes::delete),
        )
        .route(
            "/{id}/schedule",
            delete(handlers::scenes::clear_schedule),
        )
        .route("/{id}/conflicts", post(handlers::conflicts::check_scene));

    let conflict_routes = Router::new().route("/batch", post(handlers::conflicts::batch));

    Router::new()
        .nest("/auth", auth_routes)
        .nest("/users", user_routes)
        .nest("/shows", show_routes)
        .nest("/scenes", scene_routes)
        .nest("/conflicts", conflict_routes)
}
