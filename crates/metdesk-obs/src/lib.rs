//! Logging setup for the metdesk service

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Debug output from the summary core and the HTTP layer, info elsewhere
pub const DEFAULT_FILTER: &str = "info,metdesk_core=debug,metdesk_server=debug";

/// Directive string to use: `RUST_LOG` when set and non-blank, the default
/// otherwise.
pub fn filter_directives(rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(directives) if !directives.is_empty() => directives.to_string(),
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Install the JSON subscriber that carries the per-field debug events of the
/// daily summary reduction. A second call keeps the first subscriber.
pub fn init(service_name: &str) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directives = filter_directives(rust_log.as_deref());

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(&directives))
        .with(tracing_subscriber::fmt::layer().json())
        .try_init();

    tracing::info!(service = %service_name, filter = %directives, "logging initialized");
}
