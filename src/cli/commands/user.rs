use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::config::config;
use crate::database::PgUserStore;
use crate::services::UserService;

pub async fn handle(email: &str, password: &str, name: &str, superuser: bool) -> anyhow::Result<()> {
    let config = config();
    let pool = super::connect(config).await?;
    let service = UserService::new(Arc::new(PgUserStore::new(pool)), JwtKeys::from_config(&config.security));

    let user = if superuser {
        service.create_superuser(email, password, name).await?
    } else {
        service.create_user(email, password, name).await?
    };

    println!("✓ Created user {} ({})", user.email, user.id);
    Ok(())
}
