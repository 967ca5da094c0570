//! Business logic and trait definitions for Solace.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements. It depends only on `solace-types` --
//! never on `solace-infra` or any database/HTTP crate.

pub mod analytics;
pub mod chat;
pub mod event;
pub mod gateway;
pub mod llm;
