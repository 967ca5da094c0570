//! Infrastructure implementations for Solace.
//!
//! Concrete backends for the ports defined in `solace-core`: SQLite
//! persistence via sqlx, the OpenAI-compatible completion provider, and
//! configuration/secret loading from the data directory and environment.

pub mod config;
pub mod llm;
pub mod secret;
pub mod sqlite;
