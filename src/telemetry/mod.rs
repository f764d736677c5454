pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

fn log_ctx<O: ctx::OpMarker>() -> LogCtx<O> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }

pub fn init() -> LogCtx<ops::init::Init> { log_ctx() }
pub fn registry() -> LogCtx<ops::registry::Registry> { log_ctx() }
pub fn search() -> LogCtx<ops::search::Search> { log_ctx() }
pub fn history() -> LogCtx<ops::history::History> { log_ctx() }
