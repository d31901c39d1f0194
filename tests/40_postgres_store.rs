//! Runs only when TEST_DATABASE_URL points at a disposable Postgres database.

use anyhow::Result;
use uuid::Uuid;

use blog_creator_api::config::DatabaseConfig;
use blog_creator_api::database::{
    BlogChanges, BlogStore, DatabaseError, DatabaseManager, NewBlog, NewUser, PgBlogStore, PgUserStore, UserStore,
};

async fn stores() -> Result<Option<(PgBlogStore, PgUserStore)>> {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set; skipping");
        return Ok(None);
    };
    let pool = DatabaseManager::connect(&DatabaseConfig {
        url,
        max_connections: 2,
        connection_timeout: 5,
    })
    .await?;
    DatabaseManager::migrate(&pool).await?;
    Ok(Some((PgBlogStore::new(pool.clone()), PgUserStore::new(pool))))
}

async fn new_owner(users: &PgUserStore) -> Result<Uuid> {
    let user = users
        .create(NewUser {
            email: format!("{}@example.com", Uuid::new_v4()),
            name: "Store Test".to_string(),
            password_hash: "unused".to_string(),
            is_staff: false,
            is_superuser: false,
        })
        .await?;
    Ok(user.id)
}

fn new_blog(title: &str) -> NewBlog {
    NewBlog {
        title: title.to_string(),
        caption: "caption".to_string(),
        url: "https://example.com".to_string(),
        time_minutes: 3,
    }
}

#[tokio::test]
async fn postgres_blog_lifecycle() -> Result<()> {
    let Some((blogs, users)) = stores().await? else {
        return Ok(());
    };
    let owner = new_owner(&users).await?;

    let first = blogs.create(owner, new_blog("first")).await?;
    let second = blogs.create(owner, new_blog("second")).await?;
    let ids: Vec<i64> = blogs.list(owner).await?.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);

    let updated = blogs
        .update(
            first.id,
            BlogChanges {
                title: Some("renamed".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "renamed");
    assert_eq!(updated.url, first.url);
    assert_eq!(updated.created_at, first.created_at);

    blogs.delete(first.id).await?;
    assert!(matches!(blogs.get(first.id).await, Err(DatabaseError::NotFound(_))));
    assert!(matches!(blogs.delete(first.id).await, Err(DatabaseError::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn postgres_duplicate_email_conflicts() -> Result<()> {
    let Some((_, users)) = stores().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());
    let user = NewUser {
        email: email.clone(),
        name: String::new(),
        password_hash: "unused".to_string(),
        is_staff: false,
        is_superuser: false,
    };

    users.create(user.clone()).await?;
    let err = users.create(user).await.unwrap_err();
    assert!(matches!(err, DatabaseError::Conflict { ref field } if field == "email"));
    assert!(users.find_by_email(&email).await?.is_some());
    Ok(())
}
