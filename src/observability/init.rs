//! Subscriber setup.

use super::tracer;
use crate::infrastructure::resolve_trace_file;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "dropzone";

/// Installs the global tracing subscriber for `config`.
///
/// Safe to call more than once: only the first successful call installs a
/// subscriber. Observability is optional, so failures (an unwritable trace
/// directory, an invalid filter) fall back quietly instead of erroring.
///
/// # Example
///
/// ```rust
/// use dropzone::observability::init_tracing;
/// use dropzone::Config;
///
/// let config = Config {
///     trace_level: Some("dropzone=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let otel_layer = config.trace_file.as_deref().and_then(|option| {
        let path = resolve_trace_file(option);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok()?;
        }

        let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
        let provider = tracer::create_tracer_provider(path, resource);
        Some(OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME)))
    });

    let fmt_layer = otel_layer.is_none().then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .with(fmt_layer)
        .try_init();
}
