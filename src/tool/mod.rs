use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use sqlx::PgPool;
use url::Url;

use crate::dispatch::types::Method;
use crate::dispatch::{substitute_query, QUERY_PLACEHOLDER};
use crate::telemetry::{self};
use crate::telemetry::ops::registry::Phase as RegistryPhase;

pub mod db;
pub mod types;

use types::NewTool;

/// osint tool add/ls/import/categories
#[derive(Args)]
pub struct ToolCmd {
    #[command(subcommand)]
    pub cmd: ToolSub,
}

#[derive(Subcommand)]
pub enum ToolSub {
    // register a tool (plan-only by default; use --apply to write)
    Add {
        name: String,
        #[arg(long)]
        category: String,
        /// api | web
        #[arg(long, default_value = "web")]
        method: String,
        /// URL template; `<query>` is replaced by the encoded search term
        #[arg(long)]
        url: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, default_value_t = false)]
        inactive: bool,
        /// Free-form JSON config blob stored with the tool
        #[arg(long)]
        config: Option<String>,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    // list tools
    Ls {
        #[arg(long)]
        category: Option<String>,
        /// Filter by active status: true/false. Omit to show all.
        #[arg(long)]
        active: Option<bool>,
    },
    /// Bulk-register tools from a JSON file: {"tools": [...]}
    Import {
        path: PathBuf,
        #[arg(long, default_value_t = false)]
        apply: bool,
        #[arg(long, default_value_t = 10)]
        plan_limit: usize,
    },
    /// List distinct categories
    Categories,
}

pub async fn run(pool: &PgPool, args: ToolCmd) -> Result<()> {
    let log = telemetry::registry();
    let _g = log.root_span().entered();
    match args.cmd {
        ToolSub::Add { name, category, method, url, description, inactive, config, apply } => {
            let config = match config {
                Some(raw) => Some(serde_json::from_str(&raw).context("--config must be valid JSON")?),
                None => None,
            };
            let tool = NewTool { name, category, description, method, url, is_active: !inactive, config };
            add_tool(pool, tool, apply).await?
        }
        ToolSub::Ls { category, active } => ls_tools(pool, category, active).await?,
        ToolSub::Import { path, apply, plan_limit } => import_tools(pool, path, apply, plan_limit).await?,
        ToolSub::Categories => ls_categories(pool).await?,
    }
    Ok(())
}

/// Rejects tools that can never run; returns warnings for ones that will
/// run but probably not as intended.
pub fn validate(tool: &NewTool) -> Result<Vec<String>> {
    if tool.name.trim().is_empty() { bail!("Tool name must not be empty"); }
    if tool.category.trim().is_empty() { bail!("Tool category must not be empty"); }
    if Url::parse(&substitute_query(&tool.url, "probe")).is_err() { bail!("Invalid URL template: {}", tool.url); }

    let mut warnings = Vec::new();
    if !tool.url.contains(QUERY_PLACEHOLDER) {
        warnings.push(format!("{}: URL has no {} placeholder; every search hits the same page", tool.name, QUERY_PLACEHOLDER));
    }
    if Method::parse(&tool.method).is_none() {
        warnings.push(format!("{}: method {:?} is not supported and will report unsupported", tool.name, tool.method));
    }
    Ok(warnings)
}

pub fn parse_registry(raw: &str) -> Result<Vec<NewTool>> {
    let file: types::RegistryFile = serde_json::from_str(raw).context("parse registry file")?;
    Ok(file.tools)
}

async fn add_tool(pool: &PgPool, tool: NewTool, apply: bool) -> Result<()> {
    let log = telemetry::registry();
    let _g = log.root_span_kv([
        ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
        ("name", tool.name.clone()),
        ("category", tool.category.clone()),
        ("method", tool.method.clone()),
    ]).entered();

    // friendly errors before DB I/O
    let warnings = validate(&tool)?;
    for w in &warnings { log.warn(w); }

    if !apply {
        let _s = log.span(&RegistryPhase::Plan).entered();
        log.info(format!("📝 Tool plan — add name={} category={} method={} url={}", tool.name, tool.category, tool.method, tool.url));
        log.info("   Use --apply to execute.");
        let plan = types::ToolAddPlan { action: "add", tool, warnings };
        log.plan(&plan)?;
        return Ok(());
    }

    let _s = log.span(&RegistryPhase::Add).entered();
    let tool_id = db::insert_tool(pool, &tool).await?;
    log.info_kv("➕ Tool added", [("tool_id", tool_id.to_string()), ("name", tool.name.clone())]);
    let result = types::ToolAddResult { tool_id, name: tool.name };
    log.result(&result)?;
    Ok(())
}

async fn ls_tools(pool: &PgPool, category: Option<String>, active: Option<bool>) -> Result<()> {
    let log = telemetry::registry();
    let _g = log.root_span_kv([("category", format!("{:?}", category)), ("active", format!("{:?}", active))]).entered();
    let _s = log.span(&RegistryPhase::List).entered();
    let tools = db::list_tools(pool, category.as_deref(), active).await?;
    log.info("🧰 Tools:");
    for t in &tools {
        log.info(format!("[{}] {} ({}) method={} active={} url={}", t.tool_id, t.name, t.category, t.method, t.is_active, t.url));
    }
    log.result(&types::ToolList { tools })?;
    Ok(())
}

async fn import_tools(pool: &PgPool, path: PathBuf, apply: bool, plan_limit: usize) -> Result<()> {
    let log = telemetry::registry();
    let _g = log.root_span_kv([
        ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
        ("path", path.display().to_string()),
    ]).entered();

    let raw = tokio::fs::read_to_string(&path).await.with_context(|| format!("read {}", path.display()))?;
    let tools = parse_registry(&raw)?;
    let mut warnings = Vec::new();
    for t in &tools { warnings.extend(validate(t)?); }
    for w in &warnings { log.warn(w); }

    if !apply {
        let _s = log.span(&RegistryPhase::Plan).entered();
        log.info(format!("📝 Import plan — file={} tools={}", path.display(), tools.len()));
        for t in tools.iter().take(plan_limit) { log.info(format!("  {} ({}) method={} url={}", t.name, t.category, t.method, t.url)); }
        if tools.len() > plan_limit { log.info(format!("  ... ({} more)", tools.len() - plan_limit)); }
        log.info("   Use --apply to execute.");
        let plan = types::ToolImportPlan {
            file: path.display().to_string(),
            tools: tools.len(),
            sample: tools.into_iter().take(plan_limit).collect(),
            warnings,
        };
        log.plan(&plan)?;
        return Ok(());
    }

    let _s = log.span(&RegistryPhase::Import).entered();
    let mut tool_ids = Vec::with_capacity(tools.len());
    for t in &tools {
        let id = db::insert_tool(pool, t).await?;
        log.info_kv("➕ Tool added", [("tool_id", id.to_string()), ("name", t.name.clone())]);
        tool_ids.push(id);
    }
    log.info(format!("📦 Imported {} tools", tool_ids.len()));
    log.result(&types::ToolImportResult { inserted: tool_ids.len(), tool_ids })?;
    Ok(())
}

async fn ls_categories(pool: &PgPool) -> Result<()> {
    let log = telemetry::registry();
    let _s = log.span(&RegistryPhase::Categories).entered();
    let categories = db::list_categories(pool).await?;
    log.info(format!("🗂️ Categories: {}", categories.join(", ")));
    log.result(&types::CategoryList { categories })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_tool(method: &str, url: &str) -> NewTool {
        NewTool {
            name: "crt.sh".into(),
            category: "Domain".into(),
            description: None,
            method: method.into(),
            url: url.into(),
            is_active: true,
            config: None,
        }
    }

    #[test]
    fn valid_tool_has_no_warnings() {
        let warnings = validate(&new_tool("web", "https://crt.sh/?q=<query>")).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn warns_on_missing_placeholder_and_unknown_method() {
        let warnings = validate(&new_tool("ftp", "https://crt.sh/")).unwrap();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("<query>"));
        assert!(warnings[1].contains("ftp"));
    }

    #[test]
    fn rejects_bad_url_and_blank_fields() {
        assert!(validate(&new_tool("web", "not a url <query>")).is_err());
        let mut t = new_tool("web", "https://crt.sh/?q=<query>");
        t.category = "  ".into();
        assert!(validate(&t).is_err());
    }

    #[test]
    fn registry_file_defaults() {
        let raw = r#"{"tools": [
            {"name": "GitHub", "category": "Username", "method": "web", "url": "https://github.com/<query>"},
            {"name": "IPinfo", "category": "IP", "method": "api", "url": "https://ipinfo.io/<query>/json",
             "isActive": false, "config": {"token": "<token>"}}
        ]}"#;
        let tools = parse_registry(raw).unwrap();
        assert_eq!(tools.len(), 2);
        assert!(tools[0].is_active);
        assert!(tools[0].config.is_none());
        assert!(!tools[1].is_active);
        assert_eq!(tools[1].config.as_ref().unwrap()["token"], "<token>");
    }

    #[test]
    fn bundled_registry_is_valid() {
        let tools = parse_registry(include_str!("../../registry/tools.json")).unwrap();
        assert!(!tools.is_empty());
        for t in &tools {
            assert!(validate(t).unwrap().is_empty(), "{} should validate cleanly", t.name);
        }
    }

    #[test]
    fn registry_file_requires_tools_key() {
        assert!(parse_registry(r#"{"items": []}"#).is_err());
    }
}
