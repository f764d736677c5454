use anyhow::Result;
use clap::{Args, Subcommand};
use sqlx::PgPool;

use crate::telemetry::{self};
use crate::telemetry::ops::history::Phase as HistoryPhase;
use crate::util::time::parse_since_opt;

pub mod db;
pub mod types;

/// osint history ls/clear
#[derive(Args)]
pub struct HistoryCmd {
    #[command(subcommand)]
    pub cmd: HistorySub,
}

#[derive(Subcommand)]
pub enum HistorySub {
    /// List past searches, newest first
    Ls {
        #[arg(long, default_value_t = 50)]
        limit: i64,
        /// Only entries newer than this: 12h, 2d, YYYY-MM-DD or RFC3339
        #[arg(long)]
        since: Option<String>,
    },
    // delete every entry (plan-only by default; use --apply to write)
    Clear {
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

pub async fn run(pool: &PgPool, args: HistoryCmd) -> Result<()> {
    match args.cmd {
        HistorySub::Ls { limit, since } => ls_history(pool, limit, since).await?,
        HistorySub::Clear { apply } => clear_history(pool, apply).await?,
    }
    Ok(())
}

async fn ls_history(pool: &PgPool, limit: i64, since: Option<String>) -> Result<()> {
    let log = telemetry::history();
    let _g = log.root_span_kv([("limit", limit.to_string()), ("since", format!("{:?}", since))]).entered();
    let since_ts = parse_since_opt(since.as_deref())?;

    let _s = log.span(&HistoryPhase::List).entered();
    let entries = db::list_entries(pool, limit.max(1), since_ts).await?;
    if entries.is_empty() { log.info("ℹ️  No searches recorded."); }
    for e in &entries {
        log.info(format!("[{}] {} {} — {}", e.history_id, e.timestamp.format("%Y-%m-%d %H:%M:%S"), e.category, e.query));
    }
    log.result(&types::HistoryList { entries })?;
    Ok(())
}

async fn clear_history(pool: &PgPool, apply: bool) -> Result<()> {
    let log = telemetry::history();
    let _g = log.root_span_kv([("mode", if apply { "apply".to_string() } else { "plan".to_string() })]).entered();

    if !apply {
        let rows = { let _s = log.span(&HistoryPhase::Count).entered(); db::count_entries(pool).await? };
        log.info(format!("📝 History plan — clear rows={}", rows));
        log.info("   Use --apply to execute.");
        log.plan(&types::HistoryClearPlan { action: "clear", rows })?;
        return Ok(());
    }

    let deleted = { let _s = log.span(&HistoryPhase::Clear).entered(); db::clear(pool).await? };
    log.info(format!("🗑️ History cleared — deleted={}", deleted));
    log.result(&types::HistoryClearResult { deleted })?;
    Ok(())
}
