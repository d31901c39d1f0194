use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Identity};
use crate::error::ApiError;
use crate::state::AppState;

/// Resolves the caller before any protected handler runs and injects the
/// `Identity` into request extensions. Fails with 401 without touching
/// the blog store.
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Owned copy: the request body is not Sync, so no borrow of the
    // request may be held across the await below
    let token = extract_token_from_headers(request.headers())?.to_string();

    let identity = match state.identity.resolve(&token).await {
        Ok(identity) => identity,
        Err(e) => {
            if !matches!(e, AuthError::Database(_)) {
                tracing::warn!("Rejected credential on {} {}: {}", request.method(), request.uri().path(), e);
            }
            return Err(e.into());
        }
    };

    tracing::debug!("Authenticated {} ({})", identity.email, identity.user_id);
    request.extensions_mut().insert::<Identity>(identity);

    Ok(next.run(request).await)
}

/// Reads `Authorization: Bearer <token>`. `Token <token>` is accepted as well.
fn extract_token_from_headers(headers: &HeaderMap) -> Result<&str, AuthError> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(AuthError::MissingCredentials)?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid Authorization header format".to_string()))?;

    let token = auth_str
        .strip_prefix("Bearer ")
        .or_else(|| auth_str.strip_prefix("Token "))
        .ok_or_else(|| AuthError::InvalidToken("Authorization header must use Bearer token format".to_string()))?
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidToken("Empty token".to_string()));
    }
    Ok(token)
}
