use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered lookup source.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub tool_id: i32,
    pub name: String,
    pub category: String,
    pub description: Option<String>,
    pub method: String,
    pub url: String,
    pub is_active: bool,
    pub config: Option<Value>,
}

fn default_active() -> bool { true }

/// Insert shape, shared by `tool add` and registry files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTool {
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub method: String,
    pub url: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub config: Option<Value>,
}

#[derive(Deserialize)]
pub struct RegistryFile {
    pub tools: Vec<NewTool>,
}

#[derive(Serialize)]
pub struct ToolAddPlan {
    pub action: &'static str,
    pub tool: NewTool,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ToolAddResult {
    pub tool_id: i32,
    pub name: String,
}

#[derive(Serialize)]
pub struct ToolList {
    pub tools: Vec<Tool>,
}

#[derive(Serialize)]
pub struct ToolImportPlan {
    pub file: String,
    pub tools: usize,
    pub sample: Vec<NewTool>,
    pub warnings: Vec<String>,
}

#[derive(Serialize)]
pub struct ToolImportResult {
    pub inserted: usize,
    pub tool_ids: Vec<i32>,
}

#[derive(Serialize)]
pub struct CategoryList {
    pub categories: Vec<String>,
}
