//! Log output for the `xbridge` binary and its libraries.
//!
//! Events go to stderr so that stdout stays free for command output. Spans can additionally be
//! exported over OTLP when an endpoint is configured.
use std::env;

use opentelemetry::{trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace::SdkTracerProvider, Resource};
use tracing::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// OTLP endpoint to export spans to; export is off when unset.
pub const OTLP_URL_ENVVAR: &str = "XBRIDGE_OTLP_URL";

/// Label appended to the service name, to tell several operators apart in one collector.
pub const SVC_LABEL_ENVVAR: &str = "XBRIDGE_SVC_LABEL";

/// Log targets owned by this workspace. Verbosity flags only raise the level of these, so
/// transport crates stay quiet unless `RUST_LOG` asks for them.
const WORKSPACE_TARGETS: &[&str] = &[
    "xbridge",
    "xbridge_common",
    "xbridge_deployer",
    "xbridge_ledger",
    "xbridge_registry",
    "xbridge_supervisor",
];

/// How [`init`] sets up logging.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Service name reported to the span collector.
    whoami: String,

    /// OTLP endpoint, if spans are exported.
    otel_url: Option<String>,

    /// Filter directive used when `RUST_LOG` is not set.
    default_directive: String,
}

impl LoggerConfig {
    /// Creates a config for the service `base`, labelled from [`SVC_LABEL_ENVVAR`] and
    /// exporting to [`OTLP_URL_ENVVAR`] when those are set.
    pub fn for_service(base: &str) -> Self {
        let whoami = match env::var(SVC_LABEL_ENVVAR) {
            Ok(label) => format!("{base}%{label}"),
            Err(_) => base.to_owned(),
        };

        Self {
            whoami,
            otel_url: env::var(OTLP_URL_ENVVAR).ok(),
            default_directive: directive_for_verbosity(0),
        }
    }

    /// Overrides the OTLP endpoint.
    pub fn with_otlp_url(mut self, url: Option<String>) -> Self {
        self.otel_url = url;
        self
    }

    /// Derives the default filter from a `-v` count (0 = info, 1 = debug, 2+ = trace).
    pub fn with_verbosity(mut self, verbosity: u8) -> Self {
        self.default_directive = directive_for_verbosity(verbosity);
        self
    }

    /// Service name reported to the span collector.
    pub fn whoami(&self) -> &str {
        &self.whoami
    }

    /// Returns the filter directive applied when `RUST_LOG` is absent.
    pub fn default_directive(&self) -> &str {
        &self.default_directive
    }
}

/// Keeps the span exporter alive for the lifetime of the process.
///
/// Dropping the guard flushes spans still buffered by the exporter.
#[derive(Debug, Default)]
#[must_use = "dropping the guard shuts the span exporter down"]
pub struct LoggingGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for LoggingGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("failed to flush span exporter: {e}");
            }
        }
    }
}

/// Installs the global subscriber.
///
/// `LOG_FILE=1` and `LOG_LINE_NUM=1` add source locations to every event. An OTLP endpoint that
/// cannot be used is reported and logging continues on stderr alone.
pub fn init(config: LoggerConfig) -> LoggingGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_directive()));

    let with_file = env::var("LOG_FILE").is_ok_and(|v| v == "1");
    let with_line_number = env::var("LOG_LINE_NUM").is_ok_and(|v| v == "1");

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .event_format(
            tracing_subscriber::fmt::format()
                .with_file(with_file)
                .with_line_number(with_line_number),
        )
        .with_filter(filter);

    let exporter = config.otel_url.as_deref().map(|url| {
        opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(url)
            .build()
    });

    let provider = match exporter {
        Some(Ok(exporter)) => {
            let provider = SdkTracerProvider::builder()
                .with_resource(
                    Resource::builder()
                        .with_attribute(KeyValue::new("service.name", config.whoami.clone()))
                        .build(),
                )
                .with_batch_exporter(exporter)
                .build();
            let otel_layer =
                tracing_opentelemetry::layer().with_tracer(provider.tracer("xbridge"));

            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(otel_layer)
                .init();

            Some(provider)
        }
        Some(Err(err)) => {
            tracing_subscriber::registry().with(stderr_layer).init();
            warn!(%err, "span export disabled, could not build exporter");

            None
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).init();

            None
        }
    };

    debug!(whoami = %config.whoami, exporting = provider.is_some(), "logging started");

    LoggingGuard { provider }
}

fn directive_for_verbosity(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    WORKSPACE_TARGETS
        .iter()
        .fold(String::from("warn"), |directive, target| {
            format!("{directive},{target}={level}")
        })
}
