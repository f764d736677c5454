use anyhow::Result;
use serde::Serialize;
use std::marker::PhantomData;
use tracing::{info, debug, warn, Span};

use crate::output::types::Meta;

use super::emit;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

/// Per-operation logger. Human text goes to stderr through tracing; plans
/// and results go to stdout as envelopes.
pub struct LogCtx<O: OpMarker> {
    pub(crate) json: bool,
    pub(crate) _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    fn op_name(&self) -> &'static str { O::NAME }

    pub fn root_span(&self) -> Span { O::root_span() }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span { ph.span() }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        info!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) { if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); } }
    pub fn warn(&self, msg: impl AsRef<str>) { if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); } }

    pub fn info_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        if self.json { let details = kv_to_string(kv); info!(op = %self.op_name(), details = %details, "{}", msg); }
        else { info!("{}", msg); }
    }

    pub fn debug_kv<'a, D>(&self, msg: &str, kv: D)
    where
        D: IntoIterator<Item = (&'a str, String)>,
    {
        let details = kv_to_string(kv);
        if self.json { debug!(op = %self.op_name(), details = %details, "{}", msg); }
        else { debug!("{} {}", msg, details); }
    }

    pub fn plan<T: Serialize>(&self, plan: &T) -> Result<()> { emit::print_plan(self.op_name(), plan, None) }
    pub fn result<T: Serialize>(&self, result: &T) -> Result<()> { emit::print_result(self.op_name(), result, None) }
    pub fn result_with_meta<T: Serialize>(&self, result: &T, meta: Meta) -> Result<()> { emit::print_result(self.op_name(), result, Some(meta)) }
}

impl LogCtx<crate::telemetry::ops::search::Search> {
    pub fn tool_outcome(&self, tool: &str, status: &str, execution_ms: Option<u64>, error: Option<&str>) {
        let ms = execution_ms.map(|m| m as i64).unwrap_or(-1);
        let error = error.unwrap_or("");
        if self.json { info!(op = %self.op_name(), tool, status, execution_ms = ms, error, "tool_outcome"); }
        else if error.is_empty() { info!("🔹 {} — {} ({} ms)", tool, status, ms); }
        else { info!("🔸 {} — {} ({} ms): {}", tool, status, ms, error); }
    }

    pub fn totals(&self, success: usize, error: usize, unsupported: usize) {
        if self.json { info!(op = %self.op_name(), success, error, unsupported, "search_totals"); }
        else { info!("📊 Search totals — success={} error={} unsupported={}", success, error, unsupported); }
    }
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv { parts.push(format!("{}={}", k, v)); }
    parts.join(" ")
}
