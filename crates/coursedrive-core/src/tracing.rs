//! Log subscriber setup shared by the `coursedrive` binary's two roles.
//!
//! Course commands log compact lines at `warn` so their stdout output stays
//! readable; `serve` emits JSON records at `info`, including the request spans
//! of the HTTP trace layer. Everything goes to stderr.
//!
//! `RUST_LOG` replaces the built-in directives when it is set.
//!
//! ```ignore
//! use coursedrive_core::tracing::{TracingConfig, init_tracing};
//!
//! init_tracing(TracingConfig::server())?;
//! ```

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::{
    EnvFilter, Layer, Registry,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Crates whose events pass the default filter.
const LOG_TARGETS: &[&str] = &["coursedrive", "tower_http"];

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("a global tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing::subscriber::SetGlobalDefaultError),

    #[error("invalid log filter directive: {0}")]
    InvalidFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// How log records are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingOutputFormat {
    /// Multi-line, for reading a single run closely.
    Pretty,
    /// One line per record.
    #[default]
    Compact,
    /// One JSON object per record.
    Json,
}

/// Subscriber settings.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub level: Level,
    pub format: TracingOutputFormat,
    /// Adds source file and line to each record.
    pub source_location: bool,
    pub timestamps: bool,
    /// Logs span open and close, which is where request timings show up.
    pub span_lifecycle: bool,
    /// Directive string used instead of the level-based default.
    pub directives: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::cli()
    }
}

impl TracingConfig {
    /// Course commands: compact warnings without timestamps.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            level: Level::WARN,
            format: TracingOutputFormat::Compact,
            source_location: false,
            timestamps: false,
            span_lifecycle: false,
            directives: None,
        }
    }

    /// The HTTP API: timestamped JSON at `info` with request spans.
    #[must_use]
    pub fn server() -> Self {
        Self {
            level: Level::INFO,
            format: TracingOutputFormat::Json,
            source_location: true,
            timestamps: true,
            span_lifecycle: true,
            directives: None,
        }
    }

    /// Raises or lowers the level of the default directives.
    ///
    /// `DEBUG` and finer also turn on source locations.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        if level >= Level::DEBUG {
            self.source_location = true;
        }
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Directives applied when `RUST_LOG` is unset.
    pub fn default_directives(&self) -> String {
        match self.directives {
            Some(ref directives) => directives.clone(),
            None => LOG_TARGETS
                .iter()
                .map(|target| format!("{}={}", target, self.level))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn filter(&self) -> Result<EnvFilter, TracingError> {
        if self.directives.is_none() {
            if let Ok(filter) = EnvFilter::try_from_default_env() {
                return Ok(filter);
            }
        }
        Ok(EnvFilter::try_new(self.default_directives())?)
    }

    fn layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.span_lifecycle {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let base = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_target(self.source_location)
            .with_span_events(span_events);

        match (self.format, self.timestamps) {
            (TracingOutputFormat::Pretty, _) => base.pretty().boxed(),
            (TracingOutputFormat::Compact, true) => base.compact().boxed(),
            (TracingOutputFormat::Compact, false) => base.compact().without_time().boxed(),
            (TracingOutputFormat::Json, _) => base.json().boxed(),
        }
    }
}

/// Installs the global subscriber. Call once, before any logging.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let filter = config.filter()?;
    let subscriber = tracing_subscriber::registry()
        .with(config.layer())
        .with(filter);
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
