pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryBlogStore, MemoryUserStore};
pub use models::{Blog, BlogChanges, NewBlog, NewUser, User};
pub use postgres::{PgBlogStore, PgUserStore};
pub use store::{BlogStore, UserStore};
