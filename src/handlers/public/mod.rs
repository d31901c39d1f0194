// Token acquisition and liveness; no authentication required
pub mod health;
pub mod users;

pub use health::health;
pub use users::register as user_register;
pub use users::token as user_token;
