//! Handlers for the `/shows` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use callsheet_core::error::CoreError;
use callsheet_core::types::DbId;
use callsheet_core::validation::validate_title;
use callsheet_db::models::show::{CreateShow, UpdateShow};
use callsheet_db::repositories::ShowRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireManageShows, RequireViewSchedule};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /shows
pub async fn list(
    RequireViewSchedule(auth): RequireViewSchedule,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let shows = ShowRepo::list(&state.pool, auth.company_id).await?;
    Ok(Json(DataResponse { data: shows }))
}

/// GET /shows/{id}
pub async fn get_by_id(
    RequireViewSchedule(auth): RequireViewSchedule,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let show = ShowRepo::find_by_id(&state.pool, auth.company_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Show", id }))?;
    Ok(Json(DataResponse { data: show }))
}

/// POST /shows
pub async fn create(
    RequireManageShows(auth): RequireManageShows,
    State(state): State<AppState>,
    Json(input): Json<CreateShow>,
) -> AppResult<impl IntoResponse> {
    validate_title(&input.title).map_err(AppError::BadRequest)?;

    let show = ShowRepo::create(&state.pool, auth.company_id, &input).await?;

    tracing::info!(user_id = auth.user_id, show_id = show.id, "Show created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: show })))
}

/// PUT /shows/{id}
pub async fn update(
    RequireManageShows(auth): RequireManageShows,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateShow>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::BadRequest)?;
    }

    let show = ShowRepo::update(&state.pool, auth.company_id, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Show", id }))?;

    tracing::info!(user_id = auth.user_id, show_id = show.id, "Show updated");
    Ok(Json(DataResponse { data: show }))
}

/// DELETE /shows/{id}
pub async fn delete(
    RequireManageShows(auth): RequireManageShows,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = ShowRepo::delete(&state.pool, auth.company_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Show", id }));
    }

    tracing::info!(user_id = auth.user_id, show_id = id, "Show deleted");
    Ok(StatusCode::NO_CONTENT)
}
