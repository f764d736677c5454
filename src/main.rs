use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use std::env;

mod dispatch;
mod history;
mod init;
mod output;
mod search;
mod telemetry;
mod tool;
mod util;

#[derive(Parser)]
#[command(name = "osint", about = "Fan a query out to registered lookup tools")]
struct Cli {
    #[arg(global = true, short, long)]
    dsn: Option<String>,
    /// Emit JSON envelopes to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Init(init::InitCmd),
    Tool(tool::ToolCmd),
    Search(search::SearchCmd),
    History(history::HistoryCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // stderr logging; respects RUST_LOG and OSINT_LOG_FORMAT
    telemetry::config::init_tracing();
    let dsn = cli
        .dsn
        .or_else(|| env::var("DATABASE_URL").ok())
        .context("Please provide --dsn or set DATABASE_URL in .env")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&dsn)
        .await
        .context("connect to database")?;

    match cli.command {
        Commands::Init(args) => init::run(&pool, args).await?,
        Commands::Tool(args) => tool::run(&pool, args).await?,
        Commands::Search(args) => search::run(&pool, args).await?,
        Commands::History(args) => history::run(&pool, args).await?,
    }

    Ok(())
}
