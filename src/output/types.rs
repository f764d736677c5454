use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const SCHEMA_VERSION: &str = "osint.v1";

#[derive(Debug, Clone, Serialize, Default)]
pub struct Meta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

/// Stdout contract for every command: a plan (dry run) or a result.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope {
    pub schema_version: &'static str,
    pub time: DateTime<Utc>,
    pub request_id: Uuid,
    pub op: &'static str,
    pub apply: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl Envelope {
    fn new(op: &'static str, apply: bool, payload: Value, meta: Option<Meta>) -> Self {
        let (plan, result) = if apply { (None, Some(payload)) } else { (Some(payload), None) };
        Envelope {
            schema_version: SCHEMA_VERSION,
            time: Utc::now(),
            request_id: Uuid::new_v4(),
            op,
            apply,
            plan,
            result,
            meta,
        }
    }

    pub fn plan<T: Serialize>(op: &'static str, plan: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(Self::new(op, false, serde_json::to_value(plan)?, meta))
    }

    pub fn result<T: Serialize>(op: &'static str, result: &T, meta: Option<Meta>) -> Result<Self, serde_json::Error> {
        Ok(Self::new(op, true, serde_json::to_value(result)?, meta))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plan_envelope() {
        let env = Envelope::plan("search", &json!({"tools": 3}), None).expect("to serialize plan");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["schema_version"], SCHEMA_VERSION);
        assert_eq!(v["apply"], false);
        assert_eq!(v["plan"]["tools"], 3);
        assert!(v.get("result").is_none());
        assert!(v.get("meta").is_none());
    }

    #[test]
    fn result_envelope_with_meta() {
        let meta = Meta { duration_ms: Some(42), run_id: None };
        let env = Envelope::result("search", &json!({"total": 3}), Some(meta)).expect("to serialize result");
        let v = serde_json::to_value(&env).unwrap();
        assert_eq!(v["apply"], true);
        assert_eq!(v["result"]["total"], 3);
        assert_eq!(v["meta"]["duration_ms"], 42);
        assert!(v["meta"].get("run_id").is_none());
    }
}
