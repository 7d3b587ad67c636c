use anyhow::anyhow;
use tracing_subscriber::EnvFilter;
use vibekeeper_domain::{LogFormat, ServerConfig, VibeKeeperError};

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG` when set, otherwise `info` (or `debug`
/// when `debug` is enabled). Output is JSON lines when `log_format = "json"`.
pub fn init_tracing(server: &ServerConfig) -> anyhow::Result<()> {
    let default_level = if server.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);
    let installed = match server.log_format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };

    installed.map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

/// Convert a `VibeKeeperError` into a stable label suitable for logging.
#[inline]
pub fn error_label(error: &VibeKeeperError) -> &'static str {
    match error {
        VibeKeeperError::Database(_) => "database",
        VibeKeeperError::Config(_) => "config",
        VibeKeeperError::Network(_) => "network",
        VibeKeeperError::Auth(_) => "auth",
        VibeKeeperError::NotFound(_) => "not_found",
        VibeKeeperError::InvalidInput(_) => "invalid_input",
        VibeKeeperError::Extraction(_) => "extraction",
        VibeKeeperError::Internal(_) => "internal",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_labels_are_stable() {
        assert_eq!(error_label(&VibeKeeperError::NotFound("x".into())), "not_found");
        assert_eq!(error_label(&VibeKeeperError::Extraction("x".into())), "extraction");
    }
}
