//! Scene scheduling conflict detection.
//!
//! Pure functions only: the repository layer fetches the candidate pool
//! (same company, optionally same show, scheduled, subject excluded) and the
//! engine classifies each pair. Detection is advisory -- it runs after a
//! scene write commits and never blocks the save, so no locking is taken
//! around a scan. Two concurrent writers may both pass their checks; that is
//! the intended warn-and-override behaviour.

use std::collections::HashSet;

use chrono::Duration;
use serde::Serialize;

use crate::types::{DbId, Timestamp};

/// Duration assumed for conflict purposes when a scene has no explicit
/// duration. Hardcoded rather than per-company configuration.
pub const DEFAULT_DURATION_MINUTES: i64 = 60;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Classification of a detected conflict between two scenes.
///
/// Strict two-tier policy: a pair that overlaps in time AND shares personnel
/// is always `Resource`, never `Time`. A pair produces at most one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictType {
    /// Overlapping time windows with no shared personnel (soft warning).
    Time,
    /// Overlapping time windows with at least one shared person.
    Resource,
}

/// A single detected conflict. Constructed fresh on every scan and never
/// persisted; lives only for the duration of one request/response cycle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConflictInfo {
    pub conflicting_scene_id: DbId,
    /// Display-only; carries no weight in detection.
    pub conflicting_scene_number: String,
    /// Display-only; carries no weight in detection.
    pub conflicting_scene_title: String,
    pub conflict_type: ConflictType,
    /// Person ids present in both scenes. Empty for `Time` conflicts,
    /// sorted ascending for deterministic output.
    pub conflicting_resources: Vec<DbId>,
}

/// Conflict scan result returned to API callers alongside the saved scene.
#[derive(Debug, Clone, Serialize)]
pub struct ConflictReport {
    pub has_conflicts: bool,
    pub conflicts: Vec<ConflictInfo>,
}

impl ConflictReport {
    pub fn new(conflicts: Vec<ConflictInfo>) -> Self {
        Self {
            has_conflicts: !conflicts.is_empty(),
            conflicts,
        }
    }
}

/// The scene being checked. `id` is `None` for a not-yet-created scene;
/// `scheduled_time` is `None` for an unscheduled scene, which can never
/// participate in a conflict.
#[derive(Debug, Clone)]
pub struct ConflictSubject {
    pub id: Option<DbId>,
    pub scheduled_time: Option<Timestamp>,
    pub duration_minutes: Option<i64>,
    /// Combined cast + crew pool; the engine does not distinguish the two.
    pub personnel: HashSet<DbId>,
}

/// An existing scheduled scene the subject is compared against. Candidates
/// without a scheduled time are filtered out before the engine runs, so
/// `scheduled_time` is not optional here.
#[derive(Debug, Clone)]
pub struct CandidateScene {
    pub id: DbId,
    pub scene_number: String,
    pub title: String,
    pub scheduled_time: Timestamp,
    pub duration_minutes: Option<i64>,
    pub personnel: HashSet<DbId>,
}

// ---------------------------------------------------------------------------
// Interval overlap
// ---------------------------------------------------------------------------

/// Effective duration of a scene for overlap purposes: the stored value, or
/// [`DEFAULT_DURATION_MINUTES`] when absent.
pub fn effective_duration(duration_minutes: Option<i64>) -> Duration {
    Duration::minutes(duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES))
}

/// Half-open interval overlap test at minute granularity.
///
/// Returns true iff `start_a < end_b && start_b < end_a`. Touching
/// endpoints (one scene ending exactly when another begins) do NOT overlap.
pub fn overlaps(
    start_a: Timestamp,
    duration_a: Duration,
    start_b: Timestamp,
    duration_b: Duration,
) -> bool {
    let end_a = start_a + duration_a;
    let end_b = start_b + duration_b;
    start_a < end_b && start_b < end_a
}

// ---------------------------------------------------------------------------
// Resource intersection
// ---------------------------------------------------------------------------

/// Person ids present in both pools, sorted ascending. An empty result
/// means "no resource conflict", not an error.
pub fn shared_personnel(a: &HashSet<DbId>, b: &HashSet<DbId>) -> Vec<DbId> {
    let mut shared: Vec<DbId> = a.intersection(b).copied().collect();
    shared.sort_unstable();
    shared
}

// ---------------------------------------------------------------------------
// Classifier
// ---------------------------------------------------------------------------

/// Classify one subject/candidate pair, producing zero or one conflict.
///
/// No time overlap -> `None`. Overlap with shared personnel -> `Resource`
/// (shared ids attached). Overlap without shared personnel -> `Time`.
pub fn classify(
    subject_start: Timestamp,
    subject_duration: Duration,
    subject_personnel: &HashSet<DbId>,
    candidate: &CandidateScene,
) -> Option<ConflictInfo> {
    if !overlaps(
        subject_start,
        subject_duration,
        candidate.scheduled_time,
        effective_duration(candidate.duration_minutes),
    ) {
        return None;
    }

    let shared = shared_personnel(subject_personnel, &candidate.personnel);
    let conflict_type = if shared.is_empty() {
        ConflictType::Time
    } else {
        ConflictType::Resource
    };

    Some(ConflictInfo {
        conflicting_scene_id: candidate.id,
        conflicting_scene_number: candidate.scene_number.clone(),
        conflicting_scene_title: candidate.title.clone(),
        conflict_type,
        conflicting_resources: shared,
    })
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

/// Scan the subject against every candidate, accumulating conflicts.
///
/// An unscheduled subject yields no conflicts. A subject with an id never
/// compares against itself, even if the caller left it in the candidate
/// slice. No result limit: if N candidates overlap, N records come back.
pub fn scan(subject: &ConflictSubject, candidates: &[CandidateScene]) -> Vec<ConflictInfo> {
    let Some(subject_start) = subject.scheduled_time else {
        return Vec::new();
    };
    let subject_duration = effective_duration(subject.duration_minutes);

    candidates
        .iter()
        .filter(|candidate| subject.id != Some(candidate.id))
        .filter_map(|candidate| {
            classify(subject_start, subject_duration, &subject.personnel, candidate)
        })
        .collect()
}
