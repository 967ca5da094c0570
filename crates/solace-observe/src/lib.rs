//! Observability for Solace: tracing subscriber setup and OpenTelemetry
//! span attribute conventions.

pub mod genai_attrs;
pub mod tracing_setup;
