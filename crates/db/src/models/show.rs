//! Show (production) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use callsheet_core::types::{DbId, Timestamp};

/// A row from the `shows` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Show {
    pub id: DbId,
    pub company_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new show.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShow {
    pub title: String,
    pub description: Option<String>,
}

/// DTO for updating a show. All fields optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateShow {
    pub title: Option<String>,
    pub description: Option<String>,
}
