use std::time::Instant;

use anyhow::{bail, Result};
use clap::Args;
use futures::future::join_all;
use serde::Serialize;
use sqlx::PgPool;

use crate::dispatch::fetch::{Fetcher, HttpFetcher};
use crate::dispatch::types::{ExecutionResponse, Status};
use crate::dispatch::{substitute_query, Dispatcher};
use crate::history;
use crate::output::types::Meta;
use crate::telemetry::{self};
use crate::telemetry::ops::search::Phase as SearchPhase;
use crate::tool;
use crate::tool::types::Tool;

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Username, Email, Domain, IP, ... (case-insensitive)
    pub category: String,
    pub query: String,
    #[arg(long, default_value_t = false)]
    pub apply: bool,
    #[arg(long, default_value_t = false)]
    pub include_inactive: bool,
    /// Do not record this search in history
    #[arg(long, default_value_t = false)]
    pub no_history: bool,
}

#[derive(Serialize)]
pub struct PlannedTool {
    pub name: String,
    pub method: String,
    pub url: String,
}

#[derive(Serialize)]
pub struct SearchPlan {
    pub category: String,
    pub query: String,
    pub tools: Vec<PlannedTool>,
}

pub async fn run(pool: &PgPool, args: SearchCmd) -> Result<()> {
    let log = telemetry::search();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("category", args.category.clone()),
        ("include_inactive", args.include_inactive.to_string()),
        ("no_history", args.no_history.to_string()),
    ]).entered();

    if args.query.trim().is_empty() { bail!("Search query must not be empty"); }

    let tools = {
        let _s = log.span(&SearchPhase::Resolve).entered();
        let active = if args.include_inactive { None } else { Some(true) };
        tool::db::list_tools(pool, Some(&args.category), active).await?
    };
    if tools.is_empty() { log.warn(format!("No tools registered for category {}", args.category)); }

    if !args.apply {
        let _s = log.span(&SearchPhase::Plan).entered();
        let planned: Vec<PlannedTool> = tools.iter()
            .map(|t| PlannedTool { name: t.name.clone(), method: t.method.clone(), url: substitute_query(&t.url, &args.query) })
            .collect();
        log.info(format!("📝 Search plan — category={} tools={}", args.category, planned.len()));
        for p in &planned { log.info(format!("  {} [{}] {}", p.name, p.method, p.url)); }
        log.info("   Use --apply to execute.");
        log.plan(&SearchPlan { category: args.category, query: args.query, tools: planned })?;
        return Ok(());
    }

    if !args.no_history {
        let _s = log.span(&SearchPhase::Record).entered();
        let entry = history::db::add_entry(pool, &args.category, &args.query).await?;
        log.debug_kv("recorded search", [("history_id", entry.history_id.to_string())]);
    }

    let t0 = Instant::now();
    let dispatcher = Dispatcher::new(HttpFetcher::new()?);
    let response = {
        let _s = log.span_kv(&SearchPhase::Execute, [("tools", tools.len().to_string())]).entered();
        execute_all(&dispatcher, &tools, &args.query).await
    };

    for r in response.values() {
        log.tool_outcome(&r.tool_name, r.status.as_str(), r.execution_time, r.error.as_deref());
    }
    let count = |s: Status| response.values().filter(|r| r.status == s).count();
    log.totals(count(Status::Success), count(Status::Error), count(Status::Unsupported));

    let meta = Meta { duration_ms: Some(t0.elapsed().as_millis()), run_id: None };
    log.result_with_meta(&response, meta)?;
    Ok(())
}

/// Runs every tool concurrently. Each dispatch resolves on its own, so a
/// failing tool only ever shows up as its own entry.
pub async fn execute_all<F: Fetcher>(dispatcher: &Dispatcher<F>, tools: &[Tool], query: &str) -> ExecutionResponse {
    let runs = tools.iter().map(|t| async move { (t.name.clone(), dispatcher.execute(t, query).await) });
    join_all(runs).await.into_iter().collect()
}
