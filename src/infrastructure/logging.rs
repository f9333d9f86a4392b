//! Tracing subscriber setup.
//!
//! Filtering follows `RUST_LOG`, falling back to debug output for this crate and the HTTP
//! layer. The output format comes from `logging.format` in the service configuration.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::config::LogFormat;

const DEFAULT_FILTER: &str = "pdf_chat=debug,tower_http=debug";

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}
