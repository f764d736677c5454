use anyhow::Result;
use clap::Args;
use serde::Serialize;
use sqlx::PgPool;
use sqlx::migrate::Migrator;

use crate::telemetry::{self};
use crate::telemetry::ops::init::Phase as InitPhase;

static MIGRATOR: Migrator = sqlx::migrate!();

/// Create/upgrade the osint schema (plan-only by default)
#[derive(Args)]
pub struct InitCmd {
    #[arg(long, default_value_t = false)]
    pub apply: bool,
}

#[derive(Serialize)]
pub struct MigrationInfo { pub version: i64, pub description: String }

#[derive(Serialize)]
pub struct InitPlan { pub migrations: Vec<MigrationInfo> }

#[derive(Serialize)]
pub struct InitResult { pub applied: usize, pub tables: Vec<String> }

pub async fn run(pool: &PgPool, args: InitCmd) -> Result<()> {
    let log = telemetry::init();
    let _g = log.root_span_kv([("apply", args.apply.to_string())]).entered();

    let migrations: Vec<MigrationInfo> = MIGRATOR.iter()
        .map(|m| MigrationInfo { version: m.version, description: m.description.to_string() })
        .collect();

    if !args.apply {
        let _s = log.span(&InitPhase::Plan).entered();
        log.info(format!("📝 Init plan — migrations={}", migrations.len()));
        for m in &migrations { log.info(format!("  {} {}", m.version, m.description)); }
        log.info("   Use --apply to execute.");
        log.plan(&InitPlan { migrations })?;
        return Ok(());
    }

    {
        let _s = log.span(&InitPhase::Migrate).entered();
        // idempotent; already-applied versions are skipped
        MIGRATOR.run(pool).await?;
    }

    let tables = {
        let _s = log.span(&InitPhase::Verify).entered();
        sqlx::query_scalar::<_, String>(
            "SELECT table_name::TEXT FROM information_schema.tables WHERE table_schema = 'osint' ORDER BY table_name",
        )
        .fetch_all(pool)
        .await?
    };
    log.info(format!("✅ Database initialized — tables: {}", tables.join(", ")));
    log.result(&InitResult { applied: migrations.len(), tables })?;
    Ok(())
}
