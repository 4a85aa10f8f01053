use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ServerSection};

/// Install the global subscriber. `RUST_LOG` wins over `server.log_level`.
pub fn init(server: &ServerSection) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    match server.log_format {
        LogFormat::Compact => registry
            .with(fmt::layer().with_target(false).compact())
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true).with_current_span(true))
            .init(),
    }
}
