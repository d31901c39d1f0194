use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::database::models::Blog;

/// List view of a blog record. `id` and `created_at` are server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogSummary {
    pub id: i64,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub time_minutes: i32,
    pub created_at: DateTime<Utc>,
}

/// Single-record view. Carries the summary fields and currently nothing more;
/// fields added here stay out of list responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogDetail {
    #[serde(flatten)]
    pub summary: BlogSummary,
}

impl From<&Blog> for BlogSummary {
    fn from(blog: &Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title.clone(),
            caption: blog.caption.clone(),
            url: blog.url.clone(),
            time_minutes: blog.time_minutes,
            created_at: blog.created_at,
        }
    }
}

impl From<&Blog> for BlogDetail {
    fn from(blog: &Blog) -> Self {
        Self { summary: BlogSummary::from(blog) }
    }
}

pub fn summaries(blogs: &[Blog]) -> Vec<BlogSummary> {
    blogs.iter().map(BlogSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn detail_never_exposes_owner() {
        let blog = Blog {
            id: 7,
            user_id: Uuid::new_v4(),
            title: "Blog Title".into(),
            caption: "Blog caption".into(),
            url: "http://example.com/image.png".into(),
            time_minutes: 5,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(BlogDetail::from(&blog)).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();

        assert_eq!(value["id"], 7);
        assert_eq!(value["time_minutes"], 5);
        assert!(value.get("user").is_none());
        assert!(value.get("user_id").is_none());
        assert_eq!(keys.len(), 6);
        assert_eq!(value, serde_json::to_value(BlogSummary::from(&blog)).unwrap());
    }
}
