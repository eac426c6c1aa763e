//! `dglow status` -- data directory, database, and configuration summary.

use crate::state::AppState;

pub async fn status(state: &AppState, json: bool) -> anyhow::Result<()> {
    let session_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM consult_sessions")
        .fetch_one(&state.db_pool.reader)
        .await?;
    let key_count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM api_keys")
        .fetch_one(&state.db_pool.reader)
        .await?;

    let llm_configured = state.config.llm.api_key.is_some();
    let weather_configured = state.config.weather.api_key.is_some();

    if json {
        let summary = serde_json::json!({
            "data_dir": state.data_dir.display().to_string(),
            "sessions": session_count.0,
            "api_keys": key_count.0,
            "llm_model": state.config.llm.model,
            "llm_configured": llm_configured,
            "weather_configured": weather_configured,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        let check_mark = |ok: bool| {
            if ok {
                format!("{}", console::style("✓").green())
            } else {
                format!("{}", console::style("✗").red())
            }
        };

        println!();
        println!(
            "  {} Dermaglow status",
            console::style("🩺").bold()
        );
        println!();
        println!(
            "  Data directory: {}",
            console::style(state.data_dir.display()).cyan()
        );
        println!("  Sessions: {}", session_count.0);
        println!("  API keys: {}", key_count.0);
        println!(
            "  {} LLM configured ({})",
            check_mark(llm_configured),
            state.config.llm.model
        );
        println!("  {} Weather configured", check_mark(weather_configured));
        println!();
    }

    Ok(())
}
