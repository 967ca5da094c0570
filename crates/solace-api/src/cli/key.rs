//! API key management commands.

use anyhow::Result;
use console::style;
use uuid::Uuid;

use crate::state::AppState;

/// Create a new API key and print it once.
///
/// Each key gets a fresh user ID; all sessions created with the key are
/// scoped to that user.
pub async fn create_key(state: &AppState, name: &str, json: bool) -> Result<()> {
    let user_id = Uuid::now_v7();
    let (raw_key, record) = state.api_keys.create(name, user_id).await?;

    if json {
        let out = serde_json::json!({
            "id": record.id,
            "name": record.name,
            "user_id": record.user_id,
            "key": raw_key,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} API key '{}' created (save this -- it won't be shown again):",
        style("🔑").bold(),
        style(&record.name).cyan()
    );
    println!();
    println!("  {}", style(&raw_key).yellow().bold());
    println!();
    println!("  User ID: {}", style(record.user_id).dim());
    println!();

    Ok(())
}

/// Make sure at least one API key exists before serving.
///
/// A fresh install has no keys, which would leave the whole session surface
/// unreachable. Creates and prints a key named "default" in that case.
pub async fn ensure_default_key(state: &AppState) -> Result<()> {
    if !state.api_keys.list().await?.is_empty() {
        return Ok(());
    }

    let (raw_key, record) = state.api_keys.create("default", Uuid::now_v7()).await?;

    println!();
    println!(
        "  {} API key generated (save this -- it won't be shown again):",
        style("🔑").bold()
    );
    println!();
    println!("  {}", style(&raw_key).yellow().bold());
    println!();
    println!("  User ID: {}", style(record.user_id).dim());

    Ok(())
}

/// List stored API keys (hashes only, never key material).
pub async fn list_keys(state: &AppState, json: bool) -> Result<()> {
    let keys = state.api_keys.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&keys)?);
        return Ok(());
    }

    if keys.is_empty() {
        println!();
        println!("  No API keys. Create one with: solace key create <name>");
        println!();
        return Ok(());
    }

    println!();
    for key in &keys {
        let last_used = key
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        println!(
            "  {} {}  user {}  last used {}",
            style("•").dim(),
            style(&key.name).cyan(),
            style(key.user_id).dim(),
            style(last_used).dim()
        );
    }
    println!();

    Ok(())
}
