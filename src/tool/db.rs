use anyhow::Result;
use sqlx::PgPool;

use super::types::{NewTool, Tool};

pub async fn insert_tool(pool: &PgPool, tool: &NewTool) -> Result<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO osint.tool (name, category, description, method, url, is_active, config)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING tool_id
        "#,
    )
    .bind(&tool.name)
    .bind(&tool.category)
    .bind(tool.description.as_deref())
    .bind(&tool.method)
    .bind(&tool.url)
    .bind(tool.is_active)
    .bind(tool.config.as_ref())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Category matches case-insensitively; `None` filters are ignored.
pub async fn list_tools(pool: &PgPool, category: Option<&str>, active: Option<bool>) -> Result<Vec<Tool>> {
    let rows = sqlx::query_as::<_, Tool>(
        r#"
        SELECT tool_id, name, category, description, method, url, is_active, config
        FROM osint.tool
        WHERE ($1::TEXT IS NULL OR lower(category) = lower($1::TEXT))
          AND ($2::BOOL IS NULL OR is_active = $2::BOOL)
        ORDER BY tool_id
        "#,
    )
    .bind(category)
    .bind(active)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

// Distinct categories, in the order they were first registered.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<String>> {
    let rows = sqlx::query_scalar::<_, String>(
        r#"
        SELECT category
        FROM osint.tool
        GROUP BY category
        ORDER BY MIN(tool_id)
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
