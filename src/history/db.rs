use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::types::SearchHistory;

pub async fn add_entry(pool: &PgPool, category: &str, query: &str) -> Result<SearchHistory> {
    let row = sqlx::query_as::<_, SearchHistory>(
        r#"
        INSERT INTO osint.search_history (category, query)
        VALUES ($1, $2)
        RETURNING history_id, category, query, timestamp
        "#,
    )
    .bind(category)
    .bind(query)
    .fetch_one(pool)
    .await?;
    Ok(row)
}

/// Newest first.
pub async fn list_entries(pool: &PgPool, limit: i64, since: Option<DateTime<Utc>>) -> Result<Vec<SearchHistory>> {
    let rows = sqlx::query_as::<_, SearchHistory>(
        r#"
        SELECT history_id, category, query, timestamp
        FROM osint.search_history
        WHERE ($1::TIMESTAMPTZ IS NULL OR timestamp >= $1::TIMESTAMPTZ)
        ORDER BY timestamp DESC, history_id DESC
        LIMIT $2
        "#,
    )
    .bind(since)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn count_entries(pool: &PgPool) -> Result<i64> {
    let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM osint.search_history")
        .fetch_one(pool)
        .await?;
    Ok(n)
}

pub async fn clear(pool: &PgPool) -> Result<u64> {
    let res = sqlx::query("DELETE FROM osint.search_history").execute(pool).await?;
    Ok(res.rows_affected())
}
