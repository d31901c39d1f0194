use async_trait::async_trait;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Blog, BlogChanges, NewBlog, NewUser, User};

/// Persistent blog records keyed by id, with a per-owner listing.
///
/// The store does no ownership checks of its own: callers resolve the
/// record, compare `user_id`, and only then mutate.
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Inserts a record owned by `owner`, assigning `id` and `created_at`.
    async fn create(&self, owner: Uuid, fields: NewBlog) -> Result<Blog, DatabaseError>;

    async fn get(&self, id: i64) -> Result<Blog, DatabaseError>;

    /// All records owned by `owner`, newest first.
    async fn list(&self, owner: Uuid) -> Result<Vec<Blog>, DatabaseError>;

    /// Applies `changes` in place. Owner, id and created_at are never touched.
    async fn update(&self, id: i64, changes: BlogChanges) -> Result<Blog, DatabaseError>;

    async fn delete(&self, id: i64) -> Result<(), DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict { field: "email" }` when the email is taken.
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError>;

    async fn get(&self, id: Uuid) -> Result<Option<User>, DatabaseError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError>;
}
