//! System status dashboard command.

use anyhow::Result;
use console::style;

use crate::state::AppState;

/// Display system status dashboard.
///
/// Shows session and message counts, API key count, gateway settings,
/// and storage info.
pub async fn status(state: &AppState, json: bool) -> Result<()> {
    let sessions: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_sessions")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let messages: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM chat_messages")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let api_keys: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM api_keys")
        .fetch_one(&state.db_pool.reader)
        .await?;

    let gateway = &state.config.gateway;

    if json {
        let status = serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "data_dir": state.data_dir.display().to_string(),
            "sessions": sessions,
            "messages": messages,
            "api_keys": api_keys,
            "gateway": {
                "provider": gateway.provider,
                "model": gateway.model,
            },
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} Solace v{}",
        style("⚡").bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("  {}", style("── Chat ──").dim());
    println!("  Sessions: {}", style(sessions).bold());
    println!("  Messages: {}", style(messages).bold());
    println!();

    println!("  {}", style("── Gateway ──").dim());
    println!("  Provider: {}", style(&gateway.provider).cyan());
    println!("  Model:    {}", style(&gateway.model).cyan());
    println!();

    println!("  {}", style("── Auth ──").dim());
    println!("  API keys: {}", style(api_keys).bold());
    println!();

    println!("  {}", style("── System ──").dim());
    println!("  Data dir: {}", style(state.data_dir.display()).dim());
    println!("  Database: {}", style("SQLite (WAL mode)").dim());
    println!();

    Ok(())
}
