//! Handlers and orchestration for scheduling conflict detection.
//!
//! The engine itself lives in `callsheet_core::conflicts`; this module owns
//! the one blocking point per scan (the candidate fetch) and the batch
//! aggregation. A candidate-fetch failure propagates to the caller
//! unchanged -- the surrounding mutation fails rather than saving with
//! conflicts unchecked.

use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use sqlx::PgPool;

use callsheet_core::conflicts::{scan, ConflictInfo, ConflictReport};
use callsheet_core::error::CoreError;
use callsheet_core::types::DbId;
use callsheet_db::models::scene::Scene;
use callsheet_db::repositories::SceneRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireViewSchedule;
use crate::response::DataResponse;
use crate::state::AppState;

/// Run a conflict scan for a persisted scene against its scope (same
/// company, same show when the scene has one).
///
/// Advisory only: reads scene state as of the query, takes no lock. Two
/// concurrent writers can both pass; the product behaviour is warn and
/// allow override, not exclusive reservation.
pub async fn scan_scene(pool: &PgPool, scene: &Scene) -> Result<ConflictReport, sqlx::Error> {
    // Unscheduled subject: skip the fetch entirely, the scan is empty.
    if scene.scheduled_time.is_none() {
        return Ok(ConflictReport::new(Vec::new()));
    }

    let candidates =
        SceneRepo::conflict_candidates(pool, scene.company_id, scene.show_id, Some(scene.id))
            .await?;
    Ok(ConflictReport::new(scan(&scene.conflict_subject(), &candidates)))
}

/// Request body for `POST /conflicts/batch`.
#[derive(Debug, Deserialize)]
pub struct BatchConflictRequest {
    pub scene_ids: Vec<DbId>,
}

/// POST /api/v1/scenes/{id}/conflicts
///
/// Conflict report for one existing scene.
pub async fn check_scene(
    RequireViewSchedule(auth): RequireViewSchedule,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ConflictReport>>> {
    let scene = SceneRepo::find_by_id(&state.pool, auth.company_id, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;

    let report = scan_scene(&state.pool, &scene).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/conflicts/batch
///
/// Resolve conflicts for a set of scene ids (e.g. a calendar view). The
/// response maps scene id to its conflicts; ids with zero conflicts are
/// omitted entirely -- absence means clean, never an empty list.
pub async fn batch(
    RequireViewSchedule(auth): RequireViewSchedule,
    State(state): State<AppState>,
    Json(input): Json<BatchConflictRequest>,
) -> AppResult<Json<DataResponse<HashMap<DbId, Vec<ConflictInfo>>>>> {
    let scenes =
        SceneRepo::list_scheduled_by_ids(&state.pool, auth.company_id, &input.scene_ids).await?;

    let mut resolved: HashMap<DbId, Vec<ConflictInfo>> = HashMap::new();
    for scene in &scenes {
        let report = scan_scene(&state.pool, scene).await?;
        if report.has_conflicts {
            resolved.insert(scene.id, report.conflicts);
        }
    }

    Ok(Json(DataResponse { data: resolved }))
}
