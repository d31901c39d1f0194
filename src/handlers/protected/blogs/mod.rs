pub mod collection;
pub mod record;

// Re-export handler functions for use in routing
pub use collection::create as blog_create;
pub use collection::list as blog_list;
pub use record::destroy as blog_destroy;
pub use record::partial_update as blog_partial_update;
pub use record::retrieve as blog_retrieve;
pub use record::update as blog_update;

use crate::auth::Identity;
use crate::database::Blog;
use crate::error::ApiError;
use crate::state::AppState;

/// Loads a record for `identity`. A malformed id, a missing id and a record
/// owned by someone else all produce the same `NotFound`.
pub(crate) async fn owned_blog(state: &AppState, identity: &Identity, raw_id: &str) -> Result<Blog, ApiError> {
    let id = parse_blog_id(raw_id).ok_or_else(ApiError::not_found)?;

    let blog = state.blogs.get(id).await?;
    if blog.user_id != identity.user_id {
        tracing::debug!("User {} asked for blog {} owned by someone else", identity.user_id, id);
        return Err(ApiError::not_found());
    }
    Ok(blog)
}

/// Accepts only the canonical decimal form, so `+5` and `05` are not aliases of `5`.
fn parse_blog_id(raw_id: &str) -> Option<i64> {
    raw_id.parse::<i64>().ok().filter(|id| id.to_string() == raw_id)
}
