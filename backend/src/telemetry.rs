//! Tracing subscriber setup.
//!
//! Logs always go to stdout through the fmt layer. An OTLP span exporter is
//! layered on top when a collector endpoint is configured; if the exporter
//! cannot be built the broker keeps running with stdout logging only.

use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

type ExporterError = Box<dyn std::error::Error + Send + Sync>;

/// Per-crate directives appended after the global `LOG_LEVEL`.
const CRATE_DIRECTIVES: &str = "download_broker_backend=debug,tower_http=debug,sqlx::query=info";

const TRACER_NAME: &str = "download-broker";

/// Flushes and shuts down the tracer provider when dropped. Hold it for the
/// lifetime of the process.
pub struct OtelGuard {
    provider: SdkTracerProvider,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(e) = self.provider.shutdown() {
            eprintln!("Failed to shutdown OTel tracer provider: {e:?}");
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the computed filter.
pub fn init_tracing(
    otel_endpoint: Option<&str>,
    service_name: &str,
    log_level: &str,
) -> Option<OtelGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(log_level)));

    let provider = otel_endpoint.map(|endpoint| (endpoint, tracer_provider(endpoint, service_name)));

    let otel_layer = match &provider {
        Some((_, Ok(provider))) => {
            use opentelemetry::trace::TracerProvider;
            Some(tracing_opentelemetry::layer().with_tracer(provider.tracer(TRACER_NAME)))
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .init();

    match provider {
        Some((endpoint, Ok(provider))) => {
            tracing::info!(otel_endpoint = endpoint, service_name, "OpenTelemetry tracing enabled");
            Some(OtelGuard { provider })
        }
        Some((endpoint, Err(e))) => {
            tracing::warn!(otel_endpoint = endpoint, error = %e, "OTLP exporter unavailable, logging to stdout only");
            None
        }
        None => None,
    }
}

fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.is_empty() {
        CRATE_DIRECTIVES.to_string()
    } else {
        format!("{},{}", level, CRATE_DIRECTIVES)
    }
}

fn tracer_provider(endpoint: &str, service_name: &str) -> Result<SdkTracerProvider, ExporterError> {
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::{SpanExporter, WithExportConfig};
    use opentelemetry_sdk::trace::BatchSpanProcessor;
    use opentelemetry_sdk::Resource;

    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let resource = Resource::builder()
        .with_service_name(service_name.to_owned())
        .with_attribute(KeyValue::new("service.version", env!("CARGO_PKG_VERSION")))
        .build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_span_processor(BatchSpanProcessor::builder(exporter).build())
        .build())
}
