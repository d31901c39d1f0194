use axum::extract::{Extension, State};

use crate::auth::Identity;
use crate::error::ApiError;
use crate::handlers::public::users::UserResponse;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /users/me - the authenticated caller's account
pub async fn me(State(state): State<AppState>, Extension(identity): Extension<Identity>) -> ApiResult<UserResponse> {
    // the resolver just saw this user; a miss means it was removed in between
    let user = state
        .users
        .get(identity.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid token."))?;
    Ok(ApiResponse::success(user.into()))
}
