//! User model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use callsheet_core::types::{DbId, Timestamp};

/// A row from the `users` table. The password hash never leaves the
/// repository layer in API responses; see [`UserProfile`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub company_id: DbId,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Public view of a user, safe to serialize in responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: DbId,
    pub company_id: DbId,
    pub email: String,
    pub name: String,
    pub role: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            company_id: user.company_id,
            email: user.email,
            name: user.name,
            role: user.role,
        }
    }
}

/// DTO for creating a new user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub company_id: DbId,
    pub email: String,
    /// Already hashed by the caller; repositories never see plaintext.
    pub password_hash: String,
    pub name: String,
    /// Defaults to `viewer` if omitted.
    pub role: Option<String>,
}
