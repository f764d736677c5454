use std::sync::atomic::{AtomicBool, Ordering};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Set from the global `--json` flag: stdout carries JSON envelopes only.
pub fn set_json_mode(on: bool) { JSON_MODE.store(on, Ordering::SeqCst); }
pub fn json_mode() -> bool { JSON_MODE.load(Ordering::SeqCst) }

pub fn logs_are_json() -> bool {
    matches!(std::env::var("OSINT_LOG_FORMAT").as_deref(), Ok("json"))
}

/// Initialize tracing/logging according to RUST_LOG and OSINT_LOG_FORMAT.
/// - Defaults to `info` if `RUST_LOG` is unset
/// - Supports `OSINT_LOG_FORMAT=json` for JSON logs (stderr)
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let builder = tracing_subscriber::registry().with(filter);

    if logs_are_json() {
        let _ = builder.with(fmt_layer.json().flatten_event(true)).try_init();
    } else {
        let _ = builder.with(fmt_layer.compact()).try_init();
    }
}
