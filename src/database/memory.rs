use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::manager::DatabaseError;
use super::models::{Blog, BlogChanges, NewBlog, NewUser, User};
use super::store::{BlogStore, UserStore};

#[derive(Default)]
struct BlogTable {
    rows: BTreeMap<i64, Blog>,
    last_id: i64,
}

/// Process-local blog store. Writes take the table lock, so concurrent
/// updates to one record are applied one after another.
#[derive(Clone, Default)]
pub struct MemoryBlogStore {
    table: Arc<RwLock<BlogTable>>,
}

impl MemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn create(&self, owner: Uuid, fields: NewBlog) -> Result<Blog, DatabaseError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let blog = Blog {
            id: table.last_id,
            user_id: owner,
            title: fields.title,
            caption: fields.caption,
            url: fields.url,
            time_minutes: fields.time_minutes,
            created_at: Utc::now(),
        };
        table.rows.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn get(&self, id: i64) -> Result<Blog, DatabaseError> {
        self.table
            .read()
            .await
            .rows
            .get(&id)
            .cloned()
            .ok_or_else(|| DatabaseError::NotFound(format!("blog {}", id)))
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<Blog>, DatabaseError> {
        let table = self.table.read().await;
        let mut blogs: Vec<Blog> = table.rows.values().filter(|b| b.user_id == owner).cloned().collect();
        blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(blogs)
    }

    async fn update(&self, id: i64, changes: BlogChanges) -> Result<Blog, DatabaseError> {
        let mut table = self.table.write().await;
        let blog = table
            .rows
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("blog {}", id)))?;
        changes.apply_to(blog);
        Ok(blog.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        match self.table.write().await.rows.remove(&id) {
            Some(_) => Ok(()),
            None => Err(DatabaseError::NotFound(format!("blog {}", id))),
        }
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryUserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `is_active`; returns false when the user does not exist.
    pub async fn set_active(&self, id: Uuid, active: bool) -> bool {
        match self.users.write().await.get_mut(&id) {
            Some(user) => {
                user.is_active = active;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict { field: "email".to_string() });
        }
        let created = User {
            id: Uuid::new_v4(),
            email: user.email,
            name: user.name,
            password_hash: user.password_hash,
            is_active: true,
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.users.read().await.values().find(|u| u.email == email).cloned())
    }
}
