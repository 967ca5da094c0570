//! Shared domain types for Solace.
//!
//! This crate contains the core domain types used across the Solace service:
//! chat sessions and messages, the emotion vocabulary, conversation tones,
//! analytics shapes, LLM request/response types, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod analytics;
pub mod chat;
pub mod config;
pub mod emotion;
pub mod error;
pub mod event;
pub mod identity;
pub mod llm;
pub mod tone;
