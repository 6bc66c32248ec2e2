//! Decoding of personnel assignment lists.
//!
//! Assigned cast and crew are persisted as JSON arrays of integer person
//! ids in text columns. Decoding is deliberately best-effort: a malformed
//! or absent encoding degrades conflict detection for that one scene (empty
//! pool) instead of aborting the whole scan.

use std::collections::HashSet;

use crate::types::DbId;

/// Decode a stored personnel list into a set of person ids.
///
/// `None`, empty strings, and anything that does not parse as a JSON array
/// of integers all decode to the empty set. Duplicates collapse; order is
/// irrelevant.
pub fn decode_personnel(raw: Option<&str>) -> HashSet<DbId> {
    let Some(raw) = raw else {
        return HashSet::new();
    };
    match serde_json::from_str::<Vec<DbId>>(raw) {
        Ok(ids) => ids.into_iter().collect(),
        Err(_) => HashSet::new(),
    }
}

/// Combined pool for conflict purposes: the union of assigned actors and
/// assigned crew. The detector does not distinguish cast from crew.
pub fn combined_personnel(actors: Option<&str>, crew: Option<&str>) -> HashSet<DbId> {
    let mut pool = decode_personnel(actors);
    pool.extend(decode_personnel(crew));
    pool
}

/// Encode a personnel list for storage, sorted for stable output.
pub fn encode_personnel(ids: &[DbId]) -> String {
    let mut sorted: Vec<DbId> = ids.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    serde_json::to_string(&sorted).unwrap_or_else(|_| "[]".to_string())
}
