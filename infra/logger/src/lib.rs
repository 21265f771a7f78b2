//! # Logger
//!
//! Installs the global `tracing` subscriber for Luthier binaries.
//!
//! * Console output uses the compact formatter.
//! * A log directory enables a non-blocking rolling file appender, optionally as JSON.
//! * [`LoggerBuilder::resolution_spans`] prints a line when each entity resolution span
//!   closes, with its busy/idle time. Useful when chasing slow factories at startup.
//! * `RUST_LOG` is honoured unless [`LoggerBuilder::directives`] is set.
//!
//! ## Example
//!
//! ```rust
//! # use luthier_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("luthier")
//!     .console(true)
//!     .level(LevelFilter::DEBUG)
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt, LoggerErrorKind};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use private::Sealed;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_MAX_FILES: usize = 7;
const LOG_FILE_SUFFIX: &str = "log";

#[derive(Debug)]
struct LoggerConfig {
    console: bool,
    directory: Option<PathBuf>,
    level: LevelFilter,
    rotation: Rotation,
    max_files: usize,
    json: bool,
    directives: Option<String>,
    resolution_spans: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            console: true,
            directory: None,
            level: LevelFilter::INFO,
            rotation: Rotation::DAILY,
            max_files: DEFAULT_MAX_FILES,
            json: false,
            directives: None,
            resolution_spans: false,
        }
    }
}

#[derive(Debug)]
pub struct Unnamed;
#[derive(Debug)]
pub struct Named(String);
#[derive(Debug)]
pub struct ConsoleOnly;
#[derive(Debug)]
pub struct WithDirectory;

mod private {
    pub trait Sealed {}
}
impl Sealed for Unnamed {}
impl Sealed for Named {}
impl Sealed for ConsoleOnly {}
impl Sealed for WithDirectory {}

/// Configures the global subscriber. A name is mandatory before [`LoggerBuilder::init`].
#[derive(Debug)]
pub struct LoggerBuilder<N: Sealed = Unnamed, D: Sealed = ConsoleOnly> {
    config: LoggerConfig,
    name: N,
    output: PhantomData<D>,
}

impl<D: Sealed> LoggerBuilder<Unnamed, D> {
    /// Names the process; also the prefix of rolling log files.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named, D> {
        LoggerBuilder { config: self.config, name: Named(name.into()), output: PhantomData }
    }
}

impl<D: Sealed> LoggerBuilder<Named, D> {
    #[must_use = "The builder does nothing until `init` is called."]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.config.level = level;
        self
    }

    /// Programmatic filter directives, e.g. `luthier_park=debug,config=warn`.
    ///
    /// Takes precedence over `RUST_LOG`. Invalid directives fail at [`LoggerBuilder::init`].
    #[must_use = "The builder does nothing until `init` is called."]
    pub fn directives(mut self, directives: impl Into<String>) -> Self {
        self.config.directives = Some(directives.into());
        self
    }

    #[must_use = "The builder does nothing until `init` is called."]
    pub const fn console(mut self, enabled: bool) -> Self {
        self.config.console = enabled;
        self
    }

    /// Emits one event per closed span (entity resolutions included) with timings.
    #[must_use = "The builder does nothing until `init` is called."]
    pub const fn resolution_spans(mut self, enabled: bool) -> Self {
        self.config.resolution_spans = enabled;
        self
    }

    /// Writes logs into `directory` through a rolling appender.
    pub fn directory(self, directory: impl Into<PathBuf>) -> LoggerBuilder<Named, WithDirectory> {
        let mut config = self.config;
        config.directory = Some(directory.into());
        LoggerBuilder { config, name: self.name, output: PhantomData }
    }

    /// Installs the subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the file writer's worker guard.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for an empty name, bad directives, or no output.
    /// * [`LoggerError::Appender`] when the rolling appender cannot be created.
    /// * [`LoggerError::Subscriber`] when a global subscriber already exists.
    pub fn init(self) -> Result<Logger, LoggerError> {
        validate(&self.config, &self.name.0)?;
        let filter = env_filter(&self.config)?;
        let span_events =
            if self.config.resolution_spans { FmtSpan::CLOSE } else { FmtSpan::NONE };

        let mut layers = Vec::new();

        if self.config.console {
            layers.push(layer().compact().with_ansi(true).with_span_events(span_events).boxed());
        }

        let guard = match self.config.directory {
            Some(directory) => {
                fs::create_dir_all(&directory).map_err(|e| LoggerError::Internal {
                    message: e.to_string().into(),
                    context: Some(format!("Failed to create {}", directory.display()).into()),
                })?;

                let appender = RollingFileAppender::builder()
                    .rotation(self.config.rotation)
                    .filename_prefix(&self.name.0)
                    .filename_suffix(LOG_FILE_SUFFIX)
                    .max_log_files(self.config.max_files)
                    .build(&directory)
                    .context(format!("Log directory {}", directory.display()))?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let file = layer().with_writer(writer).with_ansi(false);
                layers.push(if self.config.json { file.json().boxed() } else { file.boxed() });
                Some(guard)
            },
            None => None,
        };

        if layers.is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Neither console nor file output is enabled".into(),
                context: None,
            });
        }

        tracing_subscriber::registry().with(filter).with(layers).try_init()?;
        tracing::debug!(name = %self.name.0, "Logger installed");

        Ok(Logger { guard })
    }
}

impl LoggerBuilder<Named, WithDirectory> {
    #[must_use = "The builder does nothing until `init` is called."]
    pub const fn rotation(mut self, rotation: Rotation) -> Self {
        self.config.rotation = rotation;
        self
    }

    #[must_use = "The builder does nothing until `init` is called."]
    pub const fn max_files(mut self, max: usize) -> Self {
        self.config.max_files = max;
        self
    }

    /// Switches the file output to JSON lines.
    #[must_use = "The builder does nothing until `init` is called."]
    pub const fn json(mut self, enabled: bool) -> Self {
        self.config.json = enabled;
        self
    }
}

/// Handle to the installed subscriber.
#[must_use = "Dropping the handle stops the background file writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts a new [`LoggerBuilder`].
    ///
    /// ```rust
    /// use luthier_logger::{LevelFilter, Logger};
    ///
    /// let _logger = Logger::builder().name("luthier").level(LevelFilter::WARN).init().unwrap();
    /// ```
    #[must_use = "The builder does nothing until `init` is called."]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder { config: LoggerConfig::default(), name: Unnamed, output: PhantomData }
    }

    /// The file writer guard, when file output is enabled.
    #[must_use]
    pub const fn guard(&self) -> Option<&WorkerGuard> {
        self.guard.as_ref()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if self.guard.is_some() {
            tracing::debug!("Flushing file log writer");
        }
    }
}

fn validate(config: &LoggerConfig, name: &str) -> Result<(), LoggerError> {
    if name.trim().is_empty() {
        return Err(LoggerError::InvalidConfiguration {
            message: "Logger name cannot be empty".into(),
            context: None,
        });
    }
    if config.max_files == 0 {
        return Err(LoggerError::InvalidConfiguration {
            message: "max_files must be greater than zero".into(),
            context: None,
        });
    }
    Ok(())
}

fn env_filter(config: &LoggerConfig) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(config.level.into());
    match &config.directives {
        None => Ok(builder.from_env_lossy()),
        Some(directives) => builder.parse(directives).map_err(|e| {
            LoggerError::InvalidConfiguration {
                message: format!("Invalid directives '{directives}': {e}").into(),
                context: None,
            }
        }),
    }
}
