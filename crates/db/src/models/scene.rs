//! Scene entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use callsheet_core::conflicts::{CandidateScene, ConflictSubject};
use callsheet_core::personnel::combined_personnel;
use callsheet_core::types::{DbId, Timestamp};

/// A row from the `scenes` table.
///
/// `assigned_actors` and `assigned_crew` hold JSON arrays of person ids as
/// text; they are decoded best-effort when the scene enters a conflict scan.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub company_id: DbId,
    pub show_id: Option<DbId>,
    pub scene_number: String,
    pub title: String,
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub assigned_actors: Option<String>,
    pub assigned_crew: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Scene {
    /// Combined cast + crew pool for conflict detection.
    pub fn personnel(&self) -> std::collections::HashSet<DbId> {
        combined_personnel(self.assigned_actors.as_deref(), self.assigned_crew.as_deref())
    }

    /// View of this scene as the subject of a conflict scan.
    pub fn conflict_subject(&self) -> ConflictSubject {
        ConflictSubject {
            id: Some(self.id),
            scheduled_time: self.scheduled_time,
            duration_minutes: self.duration_minutes.map(i64::from),
            personnel: self.personnel(),
        }
    }

    /// View of this scene as a conflict candidate. `None` if unscheduled --
    /// unscheduled scenes can neither trigger nor receive a conflict.
    pub fn conflict_candidate(&self) -> Option<CandidateScene> {
        let scheduled_time = self.scheduled_time?;
        Some(CandidateScene {
            id: self.id,
            scene_number: self.scene_number.clone(),
            title: self.title.clone(),
            scheduled_time,
            duration_minutes: self.duration_minutes.map(i64::from),
            personnel: self.personnel(),
        })
    }
}

/// DTO for creating a new scene.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScene {
    pub show_id: Option<DbId>,
    pub scene_number: String,
    pub title: String,
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    /// Person ids; encoded to a JSON text column on insert.
    pub assigned_actors: Option<Vec<DbId>>,
    pub assigned_crew: Option<Vec<DbId>>,
}

/// DTO for updating a scene. Only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScene {
    pub show_id: Option<DbId>,
    pub scene_number: Option<String>,
    pub title: Option<String>,
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i32>,
    pub assigned_actors: Option<Vec<DbId>>,
    pub assigned_crew: Option<Vec<DbId>>,
}
