//! Repository for the `shows` table.

use sqlx::PgPool;

use callsheet_core::types::DbId;

use crate::models::show::{CreateShow, Show, UpdateShow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, company_id, title, description, created_at, updated_at";

/// Provides CRUD operations for shows, always scoped to a company.
pub struct ShowRepo;

impl ShowRepo {
    /// Insert a new show, returning the created row.
    pub async fn create(
        pool: &PgPool,
        company_id: DbId,
        input: &CreateShow,
    ) -> Result<Show, sqlx::Error> {
        let query = format!(
            "INSERT INTO shows (company_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(company_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a show by ID within a company.
    pub async fn find_by_id(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE id = $1 AND company_id = $2");
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .bind(company_id)
            .fetch_optional(pool)
            .await
    }

    /// List all shows for a company, newest first.
    pub async fn list(pool: &PgPool, company_id: DbId) -> Result<Vec<Show>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shows WHERE company_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(company_id)
            .fetch_all(pool)
            .await
    }

    /// Update a show. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row matches within the company.
    pub async fn update(
        pool: &PgPool,
        company_id: DbId,
        id: DbId,
        input: &UpdateShow,
    ) -> Result<Option<Show>, sqlx::Error> {
        let query = format!(
            "UPDATE shows SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                updated_at = NOW()
             WHERE id = $1 AND company_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Show>(&query)
            .bind(id)
            .bind(company_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a show. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, company_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1 AND company_id = $2")
            .bind(id)
            .bind(company_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
