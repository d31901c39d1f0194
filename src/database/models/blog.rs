use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A stored blog record. `user_id` is the owning identity and is never
/// changed after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Blog {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub caption: String,
    pub url: String,
    pub time_minutes: i32,
    pub created_at: DateTime<Utc>,
}

/// Client-writable fields of a new record, all present and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlog {
    pub title: String,
    pub caption: String,
    pub url: String,
    pub time_minutes: i32,
}

/// Field changes for an update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogChanges {
    pub title: Option<String>,
    pub caption: Option<String>,
    pub url: Option<String>,
    pub time_minutes: Option<i32>,
}

impl BlogChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.caption.is_none() && self.url.is_none() && self.time_minutes.is_none()
    }

    /// Applies the changes in place.
    pub fn apply_to(&self, blog: &mut Blog) {
        if let Some(title) = &self.title {
            blog.title = title.clone();
        }
        if let Some(caption) = &self.caption {
            blog.caption = caption.clone();
        }
        if let Some(url) = &self.url {
            blog.url = url.clone();
        }
        if let Some(minutes) = self.time_minutes {
            blog.time_minutes = minutes;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Blog {
        Blog {
            id: 1,
            user_id: Uuid::new_v4(),
            title: "Blog Title".into(),
            caption: "Blog caption".into(),
            url: "http://image.png".into(),
            time_minutes: 5,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn apply_changes_only_touches_present_fields() {
        let mut blog = sample();
        let before = blog.clone();
        let changes = BlogChanges {
            title: Some("New blog title".into()),
            ..Default::default()
        };
        changes.apply_to(&mut blog);

        assert_eq!(blog.title, "New blog title");
        assert_eq!(blog.url, before.url);
        assert_eq!(blog.caption, before.caption);
        assert_eq!(blog.time_minutes, before.time_minutes);
        assert_eq!(blog.user_id, before.user_id);
    }

    #[test]
    fn empty_changes() {
        assert!(BlogChanges::default().is_empty());
        assert!(!BlogChanges { time_minutes: Some(0), ..Default::default() }.is_empty());
    }
}
