//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the JWT secret is not in the environment, falls back to a file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is checked with `Config::validate`.
//!
//! ## Environment Variables
//! - `VIBEKEEPER_JWT_SECRET`: Token signing secret (required)
//! - `VIBEKEEPER_JWT_ALGORITHM`: `HS256`, `HS384` or `HS512`
//! - `VIBEKEEPER_JWT_EXPIRATION_HOURS`: Token lifetime
//! - `VIBEKEEPER_HOST` / `VIBEKEEPER_PORT`: Listen address
//! - `VIBEKEEPER_CORS_ORIGINS`: Comma separated allowed origins
//! - `VIBEKEEPER_DEBUG`: Verbose logging (true/false)
//! - `VIBEKEEPER_LOG_FORMAT`: `pretty` or `json`
//! - `VIBEKEEPER_WEB_USER_EMAIL`: Account used by the HTML pages
//! - `VIBEKEEPER_DB_PATH`: Database file path
//! - `VIBEKEEPER_DB_POOL_SIZE`: Connection pool size
//! - `VIBEKEEPER_EXTRACTOR_MODE`: `pattern`, `llm` or `hybrid`
//! - `VIBEKEEPER_LLM_API_KEY` (or `LITELLM_API_KEY`): Completions API key
//! - `VIBEKEEPER_LLM_MODEL` (or `LITELLM_MODEL`): Model name
//! - `VIBEKEEPER_LLM_API_URL`: Completions endpoint
//! - `VIBEKEEPER_LLM_TIMEOUT_SECS`: Request timeout
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./vibekeeper.{toml,json}` then `./config.{toml,json}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names relative to the executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use vibekeeper_domain::{Config, ExtractorMode, LogFormat, Result, VibeKeeperError};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["vibekeeper.toml", "vibekeeper.json", "config.toml", "config.json"];
const SEARCH_DIRS: [&str; 3] = [".", "..", "../.."];
const SECRET_VAR: &str = "VIBEKEEPER_JWT_SECRET";

/// Load configuration with automatic fallback strategy
///
/// Environment variables are used when `VIBEKEEPER_JWT_SECRET` is set;
/// otherwise the configuration comes from a config file.
///
/// # Errors
/// Returns `VibeKeeperError::Config` if:
/// - An environment variable has an invalid value
/// - No secret is in the environment and no config file can be loaded
/// - File format is invalid
/// - The loaded configuration fails validation
pub fn load() -> Result<Config> {
    let config = if env_opt(SECRET_VAR).is_some() {
        let config = load_from_env()?;
        tracing::info!("Configuration loaded from environment variables");
        config
    } else {
        tracing::debug!("{SECRET_VAR} not set, trying config file");
        load_from_file(None)?
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `VIBEKEEPER_JWT_SECRET` is required; everything else falls back to
/// the defaults in [`Config`].
///
/// # Errors
/// Returns `VibeKeeperError::Config` if the secret is missing or a variable
/// has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    config.auth.jwt_secret = env_var(SECRET_VAR)?;

    if let Some(algorithm) = env_opt("VIBEKEEPER_JWT_ALGORITHM") {
        config.auth.jwt_algorithm = algorithm;
    }
    if let Some(hours) = env_parse::<i64>("VIBEKEEPER_JWT_EXPIRATION_HOURS")? {
        config.auth.jwt_expiration_hours = hours;
    }

    if let Some(host) = env_opt("VIBEKEEPER_HOST") {
        config.server.host = host;
    }
    if let Some(port) = env_parse::<u16>("VIBEKEEPER_PORT")? {
        config.server.port = port;
    }
    if let Some(origins) = env_opt("VIBEKEEPER_CORS_ORIGINS") {
        config.server.cors_origins = split_list(&origins);
    }
    config.server.debug = env_bool("VIBEKEEPER_DEBUG", config.server.debug);
    if let Some(format) = env_opt("VIBEKEEPER_LOG_FORMAT") {
        config.server.log_format = parse_log_format(&format)?;
    }
    if let Some(email) = env_opt("VIBEKEEPER_WEB_USER_EMAIL") {
        config.server.web_user_email = email;
    }

    if let Some(path) = env_opt("VIBEKEEPER_DB_PATH") {
        config.database.path = path;
    }
    if let Some(pool_size) = env_parse::<u32>("VIBEKEEPER_DB_POOL_SIZE")? {
        config.database.pool_size = pool_size;
    }

    if let Some(mode) = env_parse::<ExtractorMode>("VIBEKEEPER_EXTRACTOR_MODE")? {
        config.extractor.mode = Some(mode);
    }
    config.extractor.api_key =
        env_opt("VIBEKEEPER_LLM_API_KEY").or_else(|| env_opt("LITELLM_API_KEY"));
    if let Some(model) = env_opt("VIBEKEEPER_LLM_MODEL").or_else(|| env_opt("LITELLM_MODEL")) {
        config.extractor.model = model;
    }
    if let Some(url) = env_opt("VIBEKEEPER_LLM_API_URL") {
        config.extractor.api_url = url;
    }
    if let Some(timeout) = env_parse::<u64>("VIBEKEEPER_LLM_TIMEOUT_SECS")? {
        config.extractor.timeout_secs = timeout;
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `VibeKeeperError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(VibeKeeperError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            VibeKeeperError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| VibeKeeperError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| VibeKeeperError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| VibeKeeperError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(VibeKeeperError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut bases = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        bases.push(cwd);
    }
    if let Some(exe_dir) =
        std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        bases.push(exe_dir);
    }

    bases
        .iter()
        .flat_map(|base| SEARCH_DIRS.iter().map(move |dir| base.join(dir)))
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `VibeKeeperError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        VibeKeeperError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank counts as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|value| {
            value.parse::<T>().map_err(|e| {
                VibeKeeperError::Config(format!("Invalid value for {}: {}", key, e))
            })
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn parse_log_format(value: &str) -> Result<LogFormat> {
    match value.to_ascii_lowercase().as_str() {
        "pretty" | "text" => Ok(LogFormat::Pretty),
        "json" => Ok(LogFormat::Json),
        other => Err(VibeKeeperError::Config(format!("Invalid log format: {}", other))),
    }
}

fn split_list(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|item| !item.is_empty()).map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use once_cell::sync::Lazy;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    const VARS: [&str; 6] = [
        "VIBEKEEPER_JWT_SECRET",
        "VIBEKEEPER_PORT",
        "VIBEKEEPER_EXTRACTOR_MODE",
        "VIBEKEEPER_LLM_API_KEY",
        "LITELLM_API_KEY",
        "LITELLM_MODEL",
    ];

    fn clear_vars() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_env_bool_parsing() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");

        std::env::set_var("VK_TEST_BOOL_YES", "Yes");
        std::env::set_var("VK_TEST_BOOL_OFF", "off");
        assert!(env_bool("VK_TEST_BOOL_YES", false));
        assert!(!env_bool("VK_TEST_BOOL_OFF", true));

        std::env::remove_var("VK_TEST_BOOL_MISSING");
        assert!(env_bool("VK_TEST_BOOL_MISSING", true));

        std::env::remove_var("VK_TEST_BOOL_YES");
        std::env::remove_var("VK_TEST_BOOL_OFF");
    }

    #[test]
    fn test_load_from_env_requires_secret() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();

        let err = load_from_env().unwrap_err();
        assert!(matches!(err, VibeKeeperError::Config(msg) if msg.contains("VIBEKEEPER_JWT_SECRET")));
    }

    #[test]
    fn test_load_from_env_applies_overrides_and_aliases() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();

        std::env::set_var("VIBEKEEPER_JWT_SECRET", "s3cret");
        std::env::set_var("VIBEKEEPER_PORT", "9000");
        std::env::set_var("LITELLM_API_KEY", "sk-alias");
        std::env::set_var("LITELLM_MODEL", "gpt-4o");

        let config = load_from_env().expect("config from env");
        assert_eq!(config.auth.jwt_secret, "s3cret");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.extractor.api_key.as_deref(), Some("sk-alias"));
        assert_eq!(config.extractor.model, "gpt-4o");
        assert_eq!(config.extractor.effective_mode(), ExtractorMode::Hybrid);
        assert_eq!(config.database.path, "occasions.db");

        clear_vars();
    }

    #[test]
    fn test_load_from_env_invalid_number() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();

        std::env::set_var("VIBEKEEPER_JWT_SECRET", "s3cret");
        std::env::set_var("VIBEKEEPER_PORT", "eighty");
        let err = load_from_env().unwrap_err();
        assert!(matches!(err, VibeKeeperError::Config(msg) if msg.contains("VIBEKEEPER_PORT")));

        std::env::set_var("VIBEKEEPER_PORT", "8080");
        std::env::set_var("VIBEKEEPER_EXTRACTOR_MODE", "magic");
        assert!(load_from_env().is_err());

        clear_vars();
    }

    #[test]
    fn test_load_reports_invalid_env_value_instead_of_probing_files() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        clear_vars();

        std::env::set_var("VIBEKEEPER_JWT_SECRET", "s3cret");
        std::env::set_var("VIBEKEEPER_PORT", "abc");
        let err = load().unwrap_err();
        assert!(
            matches!(&err, VibeKeeperError::Config(msg) if msg.contains("VIBEKEEPER_PORT")),
            "unexpected error: {err:?}"
        );

        clear_vars();
    }

    #[test]
    fn test_parse_config_formats() {
        let json = r#"{ "auth": { "jwt_secret": "s" }, "database": { "path": "test.db" } }"#;
        let config = parse_config(json, Path::new("vibekeeper.json")).unwrap();
        assert_eq!(config.database.path, "test.db");

        let toml = "[auth]\njwt_secret = \"s\"\n[extractor]\nmode = \"llm\"\n";
        let config = parse_config(toml, Path::new("vibekeeper.toml")).unwrap();
        assert_eq!(config.extractor.mode, Some(ExtractorMode::Llm));

        assert!(parse_config("whatever", Path::new("vibekeeper.yaml")).is_err());
    }

    #[test]
    fn test_split_list_and_log_format() {
        assert_eq!(split_list("http://a, http://b,,"), vec!["http://a", "http://b"]);
        assert_eq!(parse_log_format("JSON").unwrap(), LogFormat::Json);
        assert!(parse_log_format("xml").is_err());
    }
}
