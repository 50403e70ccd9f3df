//! Browser logging setup.
//!
//! Routes `tracing` events to the developer console and panics through
//! `console_error_panic_hook`. The level can be raised or lowered per browser
//! by writing `error`/`warn`/`info`/`debug`/`trace` to the
//! `brandreport_log_level` localStorage key.

use std::sync::Once;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;

const LOG_LEVEL_KEY: &str = "brandreport_log_level";

static INIT: Once = Once::new();

/// Install the console subscriber. Safe to call more than once.
pub fn init() {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(MakeWebConsoleWriter::new())
            .without_time();

        let level = stored_log_level().unwrap_or(LevelFilter::INFO);
        tracing_subscriber::registry()
            .with(level)
            .with(fmt_layer)
            .init();
    });
}

fn stored_log_level() -> Option<LevelFilter> {
    let storage = web_sys::window()?.local_storage().ok()??;
    let value = storage.get_item(LOG_LEVEL_KEY).ok()??;
    parse_level(&value)
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}
