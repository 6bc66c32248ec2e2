//! Handlers for the `/scenes` resource.
//!
//! Create and update persist first, then run the conflict scanner against
//! the saved state. Conflicts never block the save; the response carries
//! them so the UI can warn and let the user keep or revise the schedule.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use callsheet_core::conflicts::ConflictReport;
use callsheet_core::error::CoreError;
use callsheet_core::types::DbId;
use callsheet_core::validation::{validate_duration_minutes, validate_scene_number, validate_title};
use callsheet_db::models::scene::{CreateScene, Scene, UpdateScene};
use callsheet_db::repositories::SceneRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::conflicts::scan_scene;
use crate::middleware::rbac::{RequireManageScenes, RequireViewSchedule};
use crate::response::DataResponse;
use crate::state::AppState;

/// Query parameters for listing scenes.
#[derive(Debug, serde::Deserialize)]
pub struct SceneListParams {
    pub show_id: Option<DbId>,
}

/// Mutation response: the saved scene plus its conflict report.
#[derive(Debug, Serialize)]
pub struct SceneWithConflicts {
    #[serde(flatten)]
    pub scene: Scene,
    pub conflicts: ConflictReport,
}

fn validate_create(input: &CreateScene) -> Result<(), AppError> {
    validate_scene_number(&input.scene_number).map_err(AppError::BadRequest)?;
    validate_title(&input.title).map_err(AppError::BadRequest)?;
    if let Some(minutes) = input.duration_minutes {
        validate_duration_minutes(minutes).map_err(AppError::BadRequest)?;
    }
    Ok(())
}

fn validate_update(input: &UpdateScene) -> Result<(), AppError> {
    if let Some(ref scene_number) = input.scene_number {
        validate_scene_number(scene_number).map_err(AppError::BadRequest)?;
    }
    if let Some(ref title) = input.title {
        validate_title(title).map_err(AppError::BadRequest)?;
    }
    if let Some(minutes) = input.duration_minutes {
        validate_duration_minutes(minutes).map_err(AppError::BadRequest)?;
    }
    Ok(())
}

/// GET /scenes?show_id=
///
/// List the company's scenes, optionally restricted to one show.
pub async fn list(
    RequireViewSchedule(auth): RequireViewSchedule,
    State(state): State<AppState>,
    Query(params): Query<SceneListParams>,
) -> AppResult<impl IntoResponse> {
    let scenes = SceneRepo::list(&state.pool, auth.company_id, params.show_id).await?;
    Ok(Json(DataResponse { data: scenes }))
}

/// GET /scenes/{id}
pub async fn get_by_id(
    RequireViewSchedule(auth): RequireViewSchedule,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scene = SceneRepo::find_by_id(&state.pool, auth.company_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    Ok(Json(DataResponse { data: scene }))
}

/// POST /scenes
///
/// Create a scene, then report conflicts against the saved state. The
/// write has already committed by the time conflicts come back.
pub async fn create(
    RequireManageScenes(auth): RequireManageScenes,
    State(state): State<AppState>,
    Json(input): Json<CreateScene>,
) -> AppResult<impl IntoResponse> {
    validate_create(&input)?;

    let scene = SceneRepo::create(&state.pool, auth.company_id, &input).await?;
    let conflicts = scan_scene(&state.pool, &scene).await?;

    tracing::info!(
        user_id = auth.user_id,
        scene_id = scene.id,
        has_conflicts = conflicts.has_conflicts,
        "Scene created"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: SceneWithConflicts { scene, conflicts },
        }),
    ))
}

/// PUT /scenes/{id}
///
/// Update a scene, then report conflicts against the saved state.
pub async fn update(
    RequireManageScenes(auth): RequireManageScenes,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScene>,
) -> AppResult<impl IntoResponse> {
    validate_update(&input)?;

    let scene = SceneRepo::update(&state.pool, auth.company_id, id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    let conflicts = scan_scene(&state.pool, &scene).await?;

    tracing::info!(
        user_id = auth.user_id,
        scene_id = scene.id,
        has_conflicts = conflicts.has_conflicts,
        "Scene updated"
    );

    Ok(Json(DataResponse {
        data: SceneWithConflicts { scene, conflicts },
    }))
}

/// DELETE /scenes/{id}/schedule
///
/// Return a scene to unscheduled. An unscheduled scene cannot conflict, so
/// the report in the response is empty by construction.
pub async fn clear_schedule(
    RequireManageScenes(auth): RequireManageScenes,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let scene = SceneRepo::clear_schedule(&state.pool, auth.company_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    let conflicts = scan_scene(&state.pool, &scene).await?;

    tracing::info!(user_id = auth.user_id, scene_id = scene.id, "Scene unscheduled");
    Ok(Json(DataResponse {
        data: SceneWithConflicts { scene, conflicts },
    }))
}

/// DELETE /scenes/{id}
pub async fn delete(
    RequireManageScenes(auth): RequireManageScenes,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = SceneRepo::delete(&state.pool, auth.company_id, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound { entity: "Scene", id }));
    }

    tracing::info!(user_id = auth.user_id, scene_id = id, "Scene deleted");
    Ok(StatusCode::NO_CONTENT)
}
