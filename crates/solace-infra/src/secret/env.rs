//! Environment variable secret lookup.
//!
//! The completion provider API key is never written to disk or config; it is
//! read from the environment variable named by `GatewayConfig::api_key_env`
//! and wrapped in [`SecretString`] so it cannot leak through Debug output.

use secrecy::SecretString;

/// Read an API key from the environment variable `name`.
///
/// Returns `None` when the variable is unset. A variable with invalid
/// Unicode is treated as not found rather than an error, since keys must
/// be valid strings.
pub fn api_key_from_env(name: &str) -> Option<SecretString> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}
