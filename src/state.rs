use std::sync::Arc;

use crate::auth::{IdentityResolver, JwtIdentityResolver, JwtKeys};
use crate::config::AppConfig;
use crate::database::{BlogStore, UserStore};
use crate::services::UserService;

/// Dependencies shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogStore>,
    pub users: UserService,
    pub identity: Arc<dyn IdentityResolver>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wires the JWT resolver and user service over the given stores
    pub fn new(config: AppConfig, blogs: Arc<dyn BlogStore>, users: Arc<dyn UserStore>) -> Self {
        let keys = JwtKeys::from_config(&config.security);
        Self {
            blogs,
            users: UserService::new(users.clone(), keys.clone()),
            identity: Arc::new(JwtIdentityResolver::new(keys, users)),
            config: Arc::new(config),
        }
    }
}
