//! Console logging, with optional span export over OTLP
//!
//! `RUST_LOG` overrides the level picked by `--debug`. With the `telemetry`
//! feature, `--otel` adds an exporter configured from the standard
//! `OTEL_EXPORTER_OTLP_*` variables and `OTEL_SERVICE_NAME`.

use anyhow::{anyhow, Result};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    pub debug: bool,
    pub otel: bool,
}

pub fn init(config: &TracingConfig) -> Result<()> {
    let default = if config.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(config.debug).compact());

    #[cfg(feature = "telemetry")]
    let registry = registry.with(if config.otel { Some(otel_layer()?) } else { None });

    #[cfg(not(feature = "telemetry"))]
    if config.otel {
        eprintln!("warning: --otel ignored, bookshelf was built without the telemetry feature");
    }

    registry.try_init().map_err(|err| anyhow!(err))
}

#[cfg(feature = "telemetry")]
fn otel_layer<S>(
) -> Result<tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_sdk::{runtime, trace::TracerProvider, Resource};

    let service = std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "bookshelf".into());
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .map_err(|e| anyhow!("OTLP exporter: {e}"))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, runtime::Tokio)
        .with_resource(Resource::new([KeyValue::new("service.name", service)]))
        .build();
    let tracer = provider.tracer("bookshelf");
    // the global handle keeps the provider alive until shutdown_otel
    let _ = opentelemetry::global::set_tracer_provider(provider);

    Ok(tracing_opentelemetry::layer().with_tracer(tracer))
}

/// Flush pending spans before exit.
pub fn shutdown_otel() {
    #[cfg(feature = "telemetry")]
    opentelemetry::global::shutdown_tracer_provider();
}
