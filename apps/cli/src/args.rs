//! # CLI Argument Definitions

use clap::{Parser, Subcommand, ValueEnum};
use luthier_domain::Namespace;
use luthier_logger::LevelFilter;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "luthier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Load and inspect entities built from Luthier configuration documents")]
pub(crate) struct Cli {
    /// Settings file (TOML, YAML or JSON). Defaults to `luthier.*` in the working directory.
    #[arg(long, short, global = true)]
    pub(crate) settings: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info, global = true)]
    pub(crate) level: LogLevel,

    /// Also write rolling log files into this directory.
    #[arg(long, global = true)]
    pub(crate) log_dir: Option<PathBuf>,

    /// Write the log files as JSON lines.
    #[arg(long, requires = "log_dir", global = true)]
    pub(crate) json: bool,

    /// Log one line per finished entity resolution, with timings.
    #[arg(long, global = true)]
    pub(crate) spans: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Build every entry of the selected namespaces (all configured ones by default)
    Load {
        #[arg(long = "namespace", short = 'n', value_parser = configured_namespace)]
        namespaces: Vec<Namespace>,
    },
    /// Print the entity names a namespace document declares
    List { namespace: Namespace },
    /// Resolve one entity and print a summary of it
    Show { namespace: Namespace, name: String },
}

/// Only namespaces backed by a configuration document can be loaded.
fn configured_namespace(raw: &str) -> Result<Namespace, String> {
    let namespace = raw.parse::<Namespace>().map_err(|err| err.to_string())?;
    if namespace.is_configured() {
        Ok(namespace)
    } else {
        Err(format!("{namespace} has no configuration document; its entities are published by makers"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Self::ERROR,
            LogLevel::Warn => Self::WARN,
            LogLevel::Info => Self::INFO,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Trace => Self::TRACE,
        }
    }
}
