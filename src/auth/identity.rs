use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use super::{AuthError, JwtKeys};
use crate::database::UserStore;

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

/// Maps a bearer credential to an identity
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Verifies a JWT and confirms its subject is still an active user
pub struct JwtIdentityResolver {
    keys: JwtKeys,
    users: Arc<dyn UserStore>,
}

impl JwtIdentityResolver {
    pub fn new(keys: JwtKeys, users: Arc<dyn UserStore>) -> Self {
        Self { keys, users }
    }
}

#[async_trait]
impl IdentityResolver for JwtIdentityResolver {
    async fn resolve(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.keys.verify(token)?;

        match self.users.get(claims.sub).await? {
            Some(user) if user.is_active => Ok(Identity {
                user_id: user.id,
                email: user.email,
            }),
            _ => Err(AuthError::InactiveUser),
        }
    }
}
