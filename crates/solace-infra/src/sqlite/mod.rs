//! SQLite persistence via sqlx.

pub mod api_key;
pub mod pool;
pub mod session;
