//! Capability-based access control extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose resolved
//! [`Authorizer`] lacks the required capability. Use these in route handlers
//! to enforce authorization at the type level; no role-name comparisons at
//! call sites.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use callsheet_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `manage_scenes` capability. Rejects with 403 otherwise.
///
/// ```ignore
/// async fn create(RequireManageScenes(user): RequireManageScenes) -> AppResult<Json<()>> {
///     // user's authorizer is guaranteed to allow scene management here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireManageScenes(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageScenes {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.authorizer.can_manage_scenes() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Scene management permission required".into(),
            )));
        }
        Ok(RequireManageScenes(user))
    }
}

/// Requires the `manage_users` capability (admin only). Rejects with 403
/// otherwise.
pub struct RequireManageUsers(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageUsers {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.authorizer.can_manage_users() {
            return Err(AppError::Core(CoreError::Forbidden(
                "User management permission required".into(),
            )));
        }
        Ok(RequireManageUsers(user))
    }
}

/// Requires the `manage_shows` capability. Rejects with 403 otherwise.
pub struct RequireManageShows(pub AuthUser);

impl FromRequestParts<AppState> for RequireManageShows {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.authorizer.can_manage_shows() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Show management permission required".into(),
            )));
        }
        Ok(RequireManageShows(user))
    }
}

/// Requires the `view_schedule` capability (any authenticated role today,
/// but routed through the authorizer so the grant stays in one place).
pub struct RequireViewSchedule(pub AuthUser);

impl FromRequestParts<AppState> for RequireViewSchedule {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.authorizer.can_view_schedule() {
            return Err(AppError::Core(CoreError::Forbidden(
                "Schedule view permission required".into(),
            )));
        }
        Ok(RequireViewSchedule(user))
    }
}
