use axum::extract::{Extension, State};
use serde_json::Value;

use crate::api::{parse_new_blog, summaries, BlogDetail, BlogSummary};
use crate::auth::Identity;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /blogs - caller's records, newest first
pub async fn list(State(state): State<AppState>, Extension(identity): Extension<Identity>) -> ApiResult<Vec<BlogSummary>> {
    let blogs = state.blogs.list(identity.user_id).await?;
    tracing::debug!("Listed {} blogs for {}", blogs.len(), identity.user_id);
    Ok(ApiResponse::success(summaries(&blogs)))
}

/// POST /blogs - create a record owned by the caller
///
/// `id`, `created_at` and `user` in the payload are dropped; the owner is
/// always the authenticated caller.
pub async fn create(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<BlogDetail> {
    let fields = parse_new_blog(payload)?;
    let blog = state.blogs.create(identity.user_id, fields).await?;

    tracing::info!("Created blog {} for {}", blog.id, identity.user_id);
    Ok(ApiResponse::created(BlogDetail::from(&blog)))
}
