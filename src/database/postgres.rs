use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::manager::{DatabaseError, DatabaseManager};
use super::models::{Blog, BlogChanges, NewBlog, NewUser, User};
use super::store::{BlogStore, UserStore};

const BLOG_COLUMNS: &str = "id, user_id, title, caption, url, time_minutes, created_at";
const USER_COLUMNS: &str = "id, email, name, password_hash, is_active, is_staff, is_superuser, created_at";

#[derive(Clone)]
pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn create(&self, owner: Uuid, fields: NewBlog) -> Result<Blog, DatabaseError> {
        let sql = format!(
            "INSERT INTO blogs (user_id, title, caption, url, time_minutes) VALUES ($1, $2, $3, $4, $5) RETURNING {}",
            BLOG_COLUMNS
        );
        let blog = sqlx::query_as::<_, Blog>(&sql)
            .bind(owner)
            .bind(&fields.title)
            .bind(&fields.caption)
            .bind(&fields.url)
            .bind(fields.time_minutes)
            .fetch_one(&self.pool)
            .await?;
        Ok(blog)
    }

    async fn get(&self, id: i64) -> Result<Blog, DatabaseError> {
        let sql = format!("SELECT {} FROM blogs WHERE id = $1", BLOG_COLUMNS);
        sqlx::query_as::<_, Blog>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("blog {}", id)))
    }

    async fn list(&self, owner: Uuid) -> Result<Vec<Blog>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM blogs WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
            BLOG_COLUMNS
        );
        let blogs = sqlx::query_as::<_, Blog>(&sql).bind(owner).fetch_all(&self.pool).await?;
        Ok(blogs)
    }

    async fn update(&self, id: i64, changes: BlogChanges) -> Result<Blog, DatabaseError> {
        // COALESCE keeps the stored value for every absent field
        let sql = format!(
            "UPDATE blogs SET title = COALESCE($1, title), caption = COALESCE($2, caption), \
             url = COALESCE($3, url), time_minutes = COALESCE($4, time_minutes) \
             WHERE id = $5 RETURNING {}",
            BLOG_COLUMNS
        );
        sqlx::query_as::<_, Blog>(&sql)
            .bind(changes.title)
            .bind(changes.caption)
            .bind(changes.url)
            .bind(changes.time_minutes)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("blog {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<(), DatabaseError> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!("blog {}", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let sql = format!(
            "INSERT INTO users (id, email, name, password_hash, is_staff, is_superuser) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            USER_COLUMNS
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(Uuid::new_v4())
            .bind(&user.email)
            .bind(&user.name)
            .bind(&user.password_hash)
            .bind(user.is_staff)
            .bind(user.is_superuser)
            .fetch_one(&self.pool)
            .await?;
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql).bind(id).fetch_optional(&self.pool).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        let user = sqlx::query_as::<_, User>(&sql).bind(email).fetch_optional(&self.pool).await?;
        Ok(user)
    }
}
