// Every handler here expects an `Identity` extension set by the auth layer
pub mod blogs;
pub mod users;

pub use blogs::*;
pub use users::me as user_me;
