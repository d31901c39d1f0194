use std::sync::Arc;

use crate::auth::{hash_password, verify_password, AuthError, JwtKeys};
use crate::database::models::{normalize_email, NewUser, User};
use crate::database::{DatabaseError, UserStore};

const MIN_PASSWORD_LENGTH: usize = 5;

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Users must have an email address")]
    EmailRequired,
    #[error("Ensure this field has at least 5 characters.")]
    PasswordTooShort,
    #[error("A user with that email already exists")]
    EmailTaken,
    #[error("Unable to authenticate with provided credentials")]
    InvalidCredentials,
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Database(DatabaseError),
}

impl From<DatabaseError> for UserError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::Conflict { ref field } if field == "email" => UserError::EmailTaken,
            other => UserError::Database(other),
        }
    }
}

/// Account creation and credential exchange
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    keys: JwtKeys,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    pub async fn create_user(&self, email: &str, password: &str, name: &str) -> Result<User, UserError> {
        self.insert(email, password, name, false).await
    }

    /// Creates a staff account with every permission flag set
    pub async fn create_superuser(&self, email: &str, password: &str, name: &str) -> Result<User, UserError> {
        self.insert(email, password, name, true).await
    }

    /// Exchanges credentials for a bearer token. Unknown email, wrong
    /// password and inactive account all fail the same way.
    pub async fn issue_token(&self, email: &str, password: &str) -> Result<String, UserError> {
        let email = normalize_email(email);
        let user = match self.users.find_by_email(&email).await? {
            Some(user) if user.is_active && verify_password(password, &user.password_hash) => user,
            _ => {
                tracing::warn!("Token request rejected for '{}'", email);
                return Err(UserError::InvalidCredentials);
            }
        };

        let token = self.keys.issue(user.id, &user.email)?;
        tracing::info!("Issued token for user {}", user.id);
        Ok(token)
    }

    pub async fn get(&self, id: uuid::Uuid) -> Result<Option<User>, UserError> {
        Ok(self.users.get(id).await?)
    }

    async fn insert(&self, email: &str, password: &str, name: &str, superuser: bool) -> Result<User, UserError> {
        let email = normalize_email(email);
        if email.is_empty() {
            return Err(UserError::EmailRequired);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(UserError::PasswordTooShort);
        }

        let user = self
            .users
            .create(NewUser {
                email,
                name: name.trim().to_string(),
                password_hash: hash_password(password)?,
                is_staff: superuser,
                is_superuser: superuser,
            })
            .await?;

        tracing::info!("Created user {} ({})", user.id, user.email);
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserStore::new()), JwtKeys::new("service-secret", 1))
    }

    #[tokio::test]
    async fn create_user_with_email_successful() {
        let svc = service();
        let user = svc.create_user("test@example.com", "testpass123", "").await.unwrap();

        assert_eq!(user.email, "test@example.com");
        assert!(verify_password("testpass123", &user.password_hash));
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert!(user.is_active);
    }

    #[tokio::test]
    async fn new_user_email_normalized() {
        let svc = service();
        let user = svc.create_user("Test2@Example.com", "testpass123", "").await.unwrap();
        assert_eq!(user.email, "Test2@example.com");
    }

    #[tokio::test]
    async fn new_user_without_email_fails() {
        let svc = service();
        assert!(matches!(
            svc.create_user("  ", "testpass123", "").await,
            Err(UserError::EmailRequired)
        ));
    }

    #[tokio::test]
    async fn create_superuser_sets_flags() {
        let svc = service();
        let user = svc.create_superuser("admin@example.com", "testpass123", "Admin").await.unwrap();
        assert!(user.is_superuser);
        assert!(user.is_staff);
    }

    #[tokio::test]
    async fn duplicate_email_is_taken() {
        let svc = service();
        svc.create_user("dup@example.com", "testpass123", "").await.unwrap();
        assert!(matches!(
            svc.create_user("dup@EXAMPLE.com", "testpass123", "").await,
            Err(UserError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn token_requires_matching_password() {
        let svc = service();
        svc.create_user("test@example.com", "goodpass", "").await.unwrap();

        assert!(svc.issue_token("test@example.com", "goodpass").await.is_ok());
        assert!(matches!(
            svc.issue_token("test@example.com", "badpass").await,
            Err(UserError::InvalidCredentials)
        ));
        assert!(matches!(
            svc.issue_token("nobody@example.com", "goodpass").await,
            Err(UserError::InvalidCredentials)
        ));
    }
}
