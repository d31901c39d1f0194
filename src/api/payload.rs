use serde_json::{Map, Value};
use std::collections::HashMap;

use crate::database::models::{BlogChanges, NewBlog};

/// Fields the server owns. They are dropped from write payloads before
/// validation, never reported as errors.
pub const READ_ONLY_FIELDS: &[&str] = &["id", "created_at", "user", "user_id"];

/// Writable fields that must all be present on create and full update
pub const REQUIRED_FIELDS: &[&str] = &["title", "caption", "url", "time_minutes"];

const MAX_CHAR_LENGTH: usize = 255;

pub type FieldErrors = HashMap<String, String>;

/// How missing fields are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Every required field must be present (create, PUT)
    Full,
    /// Any subset is accepted (PATCH)
    Partial,
}

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),
    #[error("Invalid field values")]
    Fields(FieldErrors),
}

/// Parses a write payload into field changes.
///
/// Read-only keys and unknown keys are ignored. All offending fields are
/// reported together so nothing is committed on partial success.
pub fn parse_changes(payload: Value, mode: WriteMode) -> Result<BlogChanges, PayloadError> {
    let mut map = match payload {
        Value::Object(map) => map,
        _ => return Err(PayloadError::InvalidJson("Expected JSON object".to_string())),
    };
    strip_read_only(&mut map);

    let mut errors = FieldErrors::new();
    let changes = BlogChanges {
        title: text_field(&map, "title", Some(MAX_CHAR_LENGTH), &mut errors),
        caption: text_field(&map, "caption", None, &mut errors),
        url: text_field(&map, "url", Some(MAX_CHAR_LENGTH), &mut errors),
        time_minutes: minutes_field(&map, "time_minutes", &mut errors),
    };

    if mode == WriteMode::Full {
        for field in REQUIRED_FIELDS {
            if !map.contains_key(*field) {
                errors.insert(field.to_string(), "This field is required.".to_string());
            }
        }
    }

    if !errors.is_empty() {
        return Err(PayloadError::Fields(errors));
    }

    Ok(changes)
}

/// Parses a create payload; every required field must be present.
pub fn parse_new_blog(payload: Value) -> Result<NewBlog, PayloadError> {
    let changes = parse_changes(payload, WriteMode::Full)?;
    NewBlog::try_from(changes).map_err(PayloadError::Fields)
}

impl TryFrom<BlogChanges> for NewBlog {
    type Error = FieldErrors;

    fn try_from(changes: BlogChanges) -> Result<Self, Self::Error> {
        match changes {
            BlogChanges {
                title: Some(title),
                caption: Some(caption),
                url: Some(url),
                time_minutes: Some(time_minutes),
            } => Ok(NewBlog { title, caption, url, time_minutes }),
            partial => {
                let present = [
                    ("title", partial.title.is_some()),
                    ("caption", partial.caption.is_some()),
                    ("url", partial.url.is_some()),
                    ("time_minutes", partial.time_minutes.is_some()),
                ];
                Err(present
                    .iter()
                    .filter(|(_, present)| !present)
                    .map(|(field, _)| (field.to_string(), "This field is required.".to_string()))
                    .collect())
            }
        }
    }
}

fn strip_read_only(map: &mut Map<String, Value>) {
    for field in READ_ONLY_FIELDS {
        if map.remove(*field).is_some() {
            tracing::debug!("Ignoring read-only field '{}' in write payload", field);
        }
    }
}

fn text_field(
    map: &Map<String, Value>,
    field: &str,
    max_len: Option<usize>,
    errors: &mut FieldErrors,
) -> Option<String> {
    let value = map.get(field)?;
    let message = match value {
        Value::Null => "This field may not be null.".to_string(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                "This field may not be blank.".to_string()
            } else if let Some(max) = max_len.filter(|max| trimmed.chars().count() > *max) {
                format!("Ensure this field has no more than {} characters.", max)
            } else {
                return Some(trimmed.to_string());
            }
        }
        _ => "Not a valid string.".to_string(),
    };
    errors.insert(field.to_string(), message);
    None
}

fn minutes_field(map: &Map<String, Value>, field: &str, errors: &mut FieldErrors) -> Option<i32> {
    let value = map.get(field)?;
    let message = match value {
        Value::Null => "This field may not be null.",
        Value::Number(n) => match n.as_i64() {
            Some(v) if v < 0 => "Ensure this value is greater than or equal to 0.",
            Some(v) => match i32::try_from(v) {
                Ok(v) => return Some(v),
                Err(_) => "Ensure this value is less than or equal to 2147483647.",
            },
            // floats, or integers beyond i64
            None => "A valid integer is required.",
        },
        _ => "A valid integer is required.",
    };
    errors.insert(field.to_string(), message.to_string());
    None
}
