use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// How a tool is queried. Stored as free text in the registry, so anything
/// that does not parse here is reported as unsupported at execution time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Method { Api, Web }

impl Method {
    pub fn parse(s: &str) -> Option<Method> {
        match s.to_ascii_lowercase().as_str() {
            "api" => Some(Method::Api),
            "web" => Some(Method::Web),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status { Success, Error, Unsupported }

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self { Status::Success => "success", Status::Error => "error", Status::Unsupported => "unsupported" }
    }
}

/// Normalized outcome of running one tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_name: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub method: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
}

impl ToolResult {
    pub fn success(tool_name: &str, method: Method, data: Value, elapsed_ms: u64) -> Self {
        ToolResult {
            tool_name: tool_name.to_string(),
            status: Status::Success,
            data: Some(data),
            error: None,
            method,
            execution_time: Some(elapsed_ms),
        }
    }

    pub fn error(tool_name: &str, method: Method, error: impl Into<String>, elapsed_ms: u64) -> Self {
        ToolResult {
            tool_name: tool_name.to_string(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
            method,
            execution_time: Some(elapsed_ms),
        }
    }

    // No request is made, so there is nothing to time. Method falls back to api.
    pub fn unsupported(tool_name: &str, method: &str) -> Self {
        ToolResult {
            tool_name: tool_name.to_string(),
            status: Status::Unsupported,
            data: None,
            error: Some(format!("Method {} not supported", method)),
            method: Method::Api,
            execution_time: None,
        }
    }
}

/// Tool name -> result, one entry per tool resolved for a category.
pub type ExecutionResponse = BTreeMap<String, ToolResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn method_parse_is_case_insensitive() {
        assert_eq!(Method::parse("API"), Some(Method::Api));
        assert_eq!(Method::parse("Web"), Some(Method::Web));
        assert_eq!(Method::parse("graphql"), None);
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let r = ToolResult::success("crt.sh", Method::Web, json!({"url": "https://crt.sh/?q=a"}), 12);
        let v = serde_json::to_value(&r).unwrap();
        assert_eq!(v["toolName"], "crt.sh");
        assert_eq!(v["status"], "success");
        assert_eq!(v["method"], "web");
        assert_eq!(v["executionTime"], 12);
        assert!(v.get("error").is_none());
    }

    #[test]
    fn unsupported_names_the_method() {
        let r = ToolResult::unsupported("Shodan", "graphql");
        assert_eq!(r.status, Status::Unsupported);
        assert_eq!(r.method, Method::Api);
        assert!(r.data.is_none());
        assert!(r.execution_time.is_none());
        assert_eq!(r.error.as_deref(), Some("Method graphql not supported"));
    }
}
