use axum::extract::{Extension, Path, State};
use serde_json::Value;

use super::owned_blog;
use crate::api::{parse_changes, BlogDetail, WriteMode};
use crate::auth::Identity;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /blogs/:id
pub async fn retrieve(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<BlogDetail> {
    let blog = owned_blog(&state, &identity, &id).await?;
    Ok(ApiResponse::success(BlogDetail::from(&blog)))
}

/// PUT /blogs/:id - every writable field required
pub async fn update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<BlogDetail> {
    apply(&state, &identity, &id, payload, WriteMode::Full).await
}

/// PATCH /blogs/:id - only the supplied fields change
pub async fn partial_update(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    ApiJson(payload): ApiJson<Value>,
) -> ApiResult<BlogDetail> {
    apply(&state, &identity, &id, payload, WriteMode::Partial).await
}

/// DELETE /blogs/:id
pub async fn destroy(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    let blog = owned_blog(&state, &identity, &id).await?;
    state.blogs.delete(blog.id).await?;

    tracing::info!("Deleted blog {} for {}", blog.id, identity.user_id);
    Ok(ApiResponse::no_content())
}

async fn apply(state: &AppState, identity: &Identity, id: &str, payload: Value, mode: WriteMode) -> ApiResult<BlogDetail> {
    // ownership first, so non-owners see 404 whatever they send
    let blog = owned_blog(state, identity, id).await?;
    let changes = parse_changes(payload, mode)?;

    if changes.is_empty() {
        return Ok(ApiResponse::success(BlogDetail::from(&blog)));
    }

    let updated = state.blogs.update(blog.id, changes).await?;
    tracing::debug!("Updated blog {} ({:?})", updated.id, mode);
    Ok(ApiResponse::success(BlogDetail::from(&updated)))
}
