use config::{Config, Environment, File};
use luthier_domain::ParkSettings;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::info;

/// Settings file looked up when no path is given (any extension `config` understands).
pub const DEFAULT_SETTINGS_FILE: &str = "luthier";

/// Environment prefix for overrides, e.g. `LUTHIER__CONFIG_DIR=/etc/luthier`.
pub const ENV_PREFIX: &str = "LUTHIER";

#[luthier_derive::luthier_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// Loads `T` from a required settings file, overlaid with `LUTHIER__*` environment variables.
///
/// Nested keys use a double underscore: `LUTHIER__SOURCES__DIMENSIONS` maps to `sources.dimensions`.
/// Without a path, [`DEFAULT_SETTINGS_FILE`] in the working directory is used.
///
/// # Errors
/// Fails when the file is missing or unreadable, or when the merged values do not fit `T`.
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let path = path.map_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE), |p| p.as_ref().to_path_buf());
    layered(&path, true)
}

/// Loads the park settings.
///
/// An explicit path must exist. Without one, the default file is optional and the built-in
/// defaults apply, still overlaid with the environment.
///
/// # Errors
/// Same as [`load_config`].
pub fn load_settings(path: Option<impl AsRef<Path>>) -> Result<ParkSettings, ConfigError> {
    match path {
        Some(path) => layered(path.as_ref(), true),
        None => layered(Path::new(DEFAULT_SETTINGS_FILE), false),
    }
}

fn layered<T: DeserializeOwned>(path: &Path, required: bool) -> Result<T, ConfigError> {
    info!(path = %path.display(), required, "Loading settings");

    Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(ENV_PREFIX).separator("__").convert_case(config::Case::Snake),
        )
        .build()
        .context(format!("Failed to read settings from {}", path.display()))?
        .try_deserialize::<T>()
        .context("Failed to deserialize settings")
}
