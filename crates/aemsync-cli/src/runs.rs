//! Read-only listing of recent import runs.

use chrono::{DateTime, Utc};

/// Print the most recent import runs as a markdown table.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub(crate) async fn run_list_runs(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let runs = aemsync_db::list_import_runs(pool, limit).await?;

    if runs.is_empty() {
        println!("no import runs recorded");
        return Ok(());
    }

    println!("| run | status | created | skipped | started | completed | error |");
    println!("|-----|--------|---------|---------|---------|-----------|-------|");
    for run in &runs {
        let error = run
            .error_message
            .as_deref()
            .unwrap_or("\u{2014}")
            .replace('|', "\\|");
        println!(
            "| {} | {} | {} | {} | {} | {} | {} |",
            run.id,
            run.status,
            run.products_created,
            run.products_skipped,
            fmt_time(run.started_at),
            fmt_time(run.completed_at),
            error,
        );
    }

    Ok(())
}

/// Format an optional timestamp for display, returning `"—"` when `None`.
fn fmt_time(ts: Option<DateTime<Utc>>) -> String {
    ts.map_or_else(
        || "\u{2014}".to_string(),
        |t| t.format("%Y-%m-%d %H:%M:%S").to_string(),
    )
}
