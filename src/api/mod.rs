pub mod format;
pub mod payload;

pub use format::{summaries, BlogDetail, BlogSummary};
pub use payload::{parse_changes, parse_new_blog, FieldErrors, PayloadError, WriteMode};
