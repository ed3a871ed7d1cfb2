//! Environment and build-time configuration.
//!
//! Runtime environment variables take precedence over values baked in at
//! build time. Empty values count as missing.

use std::path::PathBuf;

use bgl_application::{ClientSettings, ConfigError, OAuthClientConfig};

/// Directory name under the configuration root.
pub const APP_DIR_NAME: &str = "bgl";
/// Credential file name.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// OAuth client id variable.
pub const CLIENT_ID_VAR: &str = "BGL_CLIENT_ID";
/// OAuth client secret variable.
pub const CLIENT_SECRET_VAR: &str = "BGL_CLIENT_SECRET";
/// API base URL override variable.
pub const BASE_URL_VAR: &str = "BGL_BASE_URL";

const BUILD_CLIENT_ID: Option<&str> = option_env!("BGL_CLIENT_ID");
const BUILD_CLIENT_SECRET: Option<&str> = option_env!("BGL_CLIENT_SECRET");

/// Returns the configuration directory: `$XDG_CONFIG_HOME/bgl` when set,
/// otherwise `~/.config/bgl`.
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if neither is available.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    config_dir_from(env_var, dirs::home_dir)
}

/// Returns the credential file path inside [`config_dir`].
///
/// # Errors
///
/// Returns `ConfigError::NoConfigDir` if no configuration directory exists.
pub fn credential_path() -> Result<PathBuf, ConfigError> {
    config_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}

/// Loads the OAuth client credentials.
///
/// Missing values are left empty; login and refresh reject them before any
/// network I/O.
#[must_use]
pub fn load_client_config() -> OAuthClientConfig {
    client_config_from(env_var)
}

/// Loads HTTP client settings, honoring `BGL_BASE_URL`.
#[must_use]
pub fn load_client_settings() -> ClientSettings {
    client_settings_from(env_var)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn config_dir_from(
    lookup: impl Fn(&str) -> Option<String>,
    home: impl FnOnce() -> Option<PathBuf>,
) -> Result<PathBuf, ConfigError> {
    let root = match non_empty(lookup("XDG_CONFIG_HOME")) {
        Some(xdg) => PathBuf::from(xdg),
        None => home().ok_or(ConfigError::NoConfigDir)?.join(".config"),
    };
    Ok(root.join(APP_DIR_NAME))
}

fn client_config_from(lookup: impl Fn(&str) -> Option<String>) -> OAuthClientConfig {
    let resolve = |name: &str, baked: Option<&str>| {
        non_empty(lookup(name))
            .or_else(|| non_empty(baked.map(str::to_string)))
            .unwrap_or_default()
    };
    OAuthClientConfig::new(
        resolve(CLIENT_ID_VAR, BUILD_CLIENT_ID),
        resolve(CLIENT_SECRET_VAR, BUILD_CLIENT_SECRET),
    )
}

fn client_settings_from(lookup: impl Fn(&str) -> Option<String>) -> ClientSettings {
    ClientSettings {
        base_url: non_empty(lookup(BASE_URL_VAR)).map(|url| url.trim_end_matches('/').to_string()),
        ..ClientSettings::default()
    }
}
