//! Handlers for the `/users` resource. Admin-only account management
//! within the caller's company.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use callsheet_core::roles::Role;
use callsheet_core::validation::{validate_email, validate_password};
use callsheet_db::models::user::{CreateUser, UserProfile};
use callsheet_db::repositories::UserRepo;

use crate::auth::password::hash_password;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireManageUsers;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    /// Defaults to `viewer` if omitted. Unknown names are rejected.
    pub role: Option<String>,
}

/// GET /users
///
/// List the company's users.
pub async fn list(
    RequireManageUsers(auth): RequireManageUsers,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let users = UserRepo::list_by_company(&state.pool, auth.company_id).await?;
    let profiles: Vec<UserProfile> = users.into_iter().map(UserProfile::from).collect();
    Ok(Json(DataResponse { data: profiles }))
}

/// POST /users
///
/// Create a user in the caller's company. The plaintext password is hashed
/// here; repositories only ever see the hash. A duplicate email surfaces as
/// a 409 via the unique constraint.
pub async fn create(
    RequireManageUsers(auth): RequireManageUsers,
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    validate_email(&input.email).map_err(AppError::BadRequest)?;
    validate_password(&input.password).map_err(AppError::BadRequest)?;
    let role = input
        .role
        .as_deref()
        .map(Role::parse)
        .transpose()
        .map_err(AppError::BadRequest)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            company_id: auth.company_id,
            email: input.email,
            password_hash,
            name: input.name,
            role: role.map(|r| r.as_str().to_string()),
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        created_user_id = user.id,
        "User created"
    );
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UserProfile::from(user),
        }),
    ))
}
