use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
};

/// Installs the global subscriber with `info` as the default level.
pub fn init() {
    init_with_default("info");
}

/// Installs the global subscriber. `RUST_LOG` wins over `default_level`.
/// Returns `false` if a subscriber was already installed, which is kept.
///
/// At debug level the per-image `analyze_image` spans also report their
/// duration when they close.
pub fn init_with_default(default_level: &str) -> bool {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let span_events = if is_debug(&env_filter.to_string()) {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_span_events(span_events);

    match tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        Ok(()) => true,
        Err(e) => {
            debug!("Keeping existing subscriber: {}", e);
            false
        }
    }
}

fn is_debug(filter: &str) -> bool {
    filter.contains("debug") || filter.contains("trace")
}
