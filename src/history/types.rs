use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistory {
    pub history_id: i32,
    pub category: String,
    pub query: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct HistoryList {
    pub entries: Vec<SearchHistory>,
}

#[derive(Serialize)]
pub struct HistoryClearPlan {
    pub action: &'static str,
    pub rows: i64,
}

#[derive(Serialize)]
pub struct HistoryClearResult {
    pub deleted: u64,
}
