use axum::extract::State;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use crate::database::User;
use crate::error::ApiError;
use crate::middleware::{ApiJson, ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

/// POST /users - register a new account
pub async fn register(State(state): State<AppState>, ApiJson(payload): ApiJson<CreateUserRequest>) -> ApiResult<UserResponse> {
    let (email, password) = require_credentials(payload.email, payload.password)?;
    let user = state.users.create_user(&email, &password, &payload.name).await?;
    Ok(ApiResponse::created(user.into()))
}

/// POST /users/token - exchange email and password for a bearer token
pub async fn token(State(state): State<AppState>, ApiJson(payload): ApiJson<TokenRequest>) -> ApiResult<TokenResponse> {
    let (email, password) = require_credentials(payload.email, payload.password)?;
    let token = state.users.issue_token(&email, &password).await?;
    Ok(ApiResponse::success(TokenResponse { token }))
}

fn require_credentials(email: Option<String>, password: Option<String>) -> Result<(String, String), ApiError> {
    let mut field_errors = HashMap::new();
    if email.is_none() {
        field_errors.insert("email".to_string(), "This field is required.".to_string());
    }
    if password.is_none() {
        field_errors.insert("password".to_string(), "This field is required.".to_string());
    }
    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(ApiError::validation_error("Invalid field values", Some(field_errors))),
    }
}
