//! Logging and tracing initialization
//!
//! Console logging follows the logging configuration; OTLP trace export
//! is switched on by setting `OTEL_ENDPOINT` in the environment.

use std::str::FromStr;

use anyhow::{Context, Result};
use opentelemetry::{KeyValue, trace::TracerProvider};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{Resource, trace::SdkTracerProvider};
use opentelemetry_semantic_conventions::{
    SCHEMA_URL,
    attribute::{SERVICE_NAME, SERVICE_VERSION},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// An OpenTelemetry guard that manages the lifecycle of the tracer provider.
///
/// Once dropped, the tracer provider will be gracefully shut down.
pub struct OtelGuard(SdkTracerProvider, tracing::Level);

impl OtelGuard {
    fn tracer(&self, name: &'static str) -> opentelemetry_sdk::trace::Tracer {
        self.0.tracer(name)
    }

    fn layer<S>(&self) -> impl Layer<S>
    where
        S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
    {
        let tracer = self.tracer("tripcraft");
        tracing_opentelemetry::layer()
            .with_tracer(tracer)
            .with_filter(LevelFilter::from_level(self.1))
    }
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(err) = self.0.shutdown() {
            eprintln!("{err:?}");
        }
    }
}

/// OTLP export configuration, loaded from the environment
struct OtelConfig {
    endpoint: String,
    level: tracing::Level,
}

impl OtelConfig {
    fn load() -> Option<Self> {
        let endpoint = std::env::var("OTEL_ENDPOINT").ok().filter(|s| !s.is_empty())?;
        let level = std::env::var("OTEL_LEVEL")
            .ok()
            .and_then(|s| tracing::Level::from_str(&s).ok())
            .unwrap_or(tracing::Level::DEBUG);

        Some(Self { endpoint, level })
    }

    fn resource(&self) -> Resource {
        Resource::builder()
            .with_schema_url(
                [
                    KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
                    KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
                ],
                SCHEMA_URL,
            )
            .build()
    }

    fn provider(&self) -> Result<OtelGuard> {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(self.endpoint.clone())
            .build()
            .context("Failed to build OTLP span exporter")?;

        let provider = SdkTracerProvider::builder()
            .with_resource(self.resource())
            .with_batch_exporter(exporter)
            .build();

        Ok(OtelGuard(provider, self.level))
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns the OTLP guard when export is configured; keep it alive for
/// the lifetime of the process.
pub fn init(config: &LoggingConfig) -> Result<Option<OtelGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let guard = OtelConfig::load().map(|otel| otel.provider()).transpose()?;

    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(guard.as_ref().map(|otel| otel.layer()));

    if config.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    Ok(guard)
}
