//! Repository for the `scenes` table, including the candidate-pool queries
//! used by conflict detection.

use sqlx::PgPool;

use callsheet_core::conflicts::CandidateScene;
use callsheet_core::personnel::encode_personnel;
use callsheet_core::types::DbId;

use crate::models::scene::{CreateScene, Scene, UpdateScene};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, show_id, scene_number, title, scheduled_time, \
    duration_minutes, assigned_actors, assigned_crew, created_at, updated_at";

/// Provides CRUD and conflict-candidate queries for scenes, always scoped
/// to a company.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene, returning the created row.
    ///
    /// Personnel lists are encoded to JSON text; `None` stays NULL.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateScene,
    ) -> Result<Scene, sqlx::Error> {
        let actors = input.assigned_actors.as_deref().map(encode_personnel);
        let crew = input.assigned_crew.as_deref().map(encode_personnel);
        let query = format!(
            "INSERT INTO scenes
                (company_id, show_id, scene_number, title, scheduled_time,
                 duration_minutes, assigned_actors, assigned_crew)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(company_id)
            .bind(input.show_id)
            .bind(&input.scene_number)
            .bind(&input.title)
            .bind(input.scheduled_time)
            .bind(input.duration_minutes)
            .bind(actors)
            .bind(crew)
            .fetch_one(pool)
            .await
    }

    /// Find a scene by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1 AND company_id = $2");
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List scenes for a company, optionally restricted to one show.
    /// Scheduled scenes first (earliest start), unscheduled last.
    pub async fn list(
        pool: &PgPool,
        company_id: DbId,
        show_id: Option<DbId>,
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE company_id = $1 AND ($2::BIGINT IS NULL OR show_id = $2)
             ORDER BY scheduled_time ASC NULLS LAST, id ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(company_id)
            .bind(show_id)
            .fetch_all(pool)
            .await
    }

    /// Update a scene. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matches within the company.
    pub async fn update(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
        input: &UpdateScene,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let actors = input.assigned_actors.as_deref().map(encode_personnel);
        let crew = input.assigned_crew.as_deref().map(encode_personnel);
        let query = format!(
            "UPDATE scenes SET
                show_id = COALESCE($3, show_id),
                scene_number = COALESCE($4, scene_number),
                title = COALESCE($5, title),
                scheduled_time = COALESCE($6, scheduled_time),
                duration_minutes = COALESCE($7, duration_minutes),
                assigned_actors = COALESCE($8, assigned_actors),
                assigned_crew = COALESCE($9, assigned_crew),
                updated_at = NOW()
             WHERE id = $1 AND company_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(company_id)
            .bind(input.show_id)
            .bind(&input.scene_number)
            .bind(&input.title)
            .bind(input.scheduled_time)
            .bind(input.duration_minutes)
            .bind(actors)
            .bind(crew)
            .fetch_optional(pool)
            .await
    }

    /// Return a scene to unscheduled by clearing its scheduled time. The
    /// partial-update path cannot express this (COALESCE keeps existing
    /// values), so it gets its own query. Duration and personnel are kept.
    ///
    /// Returns `None` if no row matches within the company.
    pub async fn clear_schedule(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "UPDATE scenes SET scheduled_time = NULL, updated_at = NOW()
             WHERE id = $1 AND company_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a scene. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, company_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Fetch the conflict-candidate pool for a scan: scheduled scenes in the
    /// company (optionally one show), excluding the subject's own id.
    ///
    /// Unscheduled scenes never enter the pool, so they can neither trigger
    /// nor receive a conflict.
    pub async fn conflict_candidates(
        pool: &PgPool,
        company_id: DbId,
        show_id: Option<DbId>,
        exclude_id: Option<DbId>,
    ) -> Result<Vec<CandidateScene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE company_id = $1
               AND scheduled_time IS NOT NULL
               AND ($2::BIGINT IS NULL OR show_id = $2)
               AND ($3::BIGINT IS NULL OR id <> $3)
             ORDER BY scheduled_time ASC, id ASC"
        );
        let scenes = sqlx::query_as::<_, Scene>(&query)
            .bind(company_id)
            .bind(show_id)
            .bind(exclude_id)
            .fetch_all(pool)
            .await?;
        Ok(scenes
            .iter()
            .filter_map(Scene::conflict_candidate)
            .collect())
    }

    /// Fetch the scheduled scenes among `ids` within a company. Batch
    /// conflict resolution input; ids without a scheduled time are dropped
    /// here rather than scanned and discarded later.
    pub async fn list_scheduled_by_ids(
        pool: &PgPool,
        company_id: DbId,
        ids: &[DbId],
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE company_id = $1
               AND id = ANY($2)
               AND scheduled_time IS NOT NULL
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(company_id)
            .bind(ids)
            .fetch_all(pool)
            .await
    }
}
