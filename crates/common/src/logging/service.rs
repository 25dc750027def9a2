//! Common logging initialization for binaries.

use std::path::Path;

use tracing::info;
use tracing_subscriber::util::TryInitError;

use super::{format_service_name, init, FileLoggingConfig, LoggerConfig};

/// Configuration parameters for logging initialization.
#[derive(Debug)]
pub struct LoggingInitConfig<'a> {
    /// Base service name
    pub service_base_name: &'a str,
    /// Optional service label to append like prod or dev
    pub service_label: Option<&'a str>,
    /// Directory for file-based logging
    pub log_dir: Option<&'a Path>,
    /// Prefix for log file names, defaults to the base service name
    pub log_file_prefix: Option<&'a str>,
    pub json_format: bool,
    /// Log to stderr instead of stdout
    pub stderr: bool,
}

/// Builds the [`LoggerConfig`] described by `config`.
pub fn logger_config(config: &LoggingInitConfig<'_>) -> LoggerConfig {
    let service_name = format_service_name(config.service_base_name, config.service_label);
    let mut lconfig = LoggerConfig::new(service_name)
        .with_json_logging(config.json_format)
        .with_stderr(config.stderr);

    if let Some(dir) = config.log_dir {
        let prefix = config
            .log_file_prefix
            .unwrap_or(config.service_base_name)
            .to_string();
        lconfig = lconfig.with_file_logging(
            FileLoggingConfig::new(dir.to_path_buf(), prefix).with_json_format(config.json_format),
        );
    }

    lconfig
}

/// Initialize logging from configuration with all standard setup.
pub fn init_logging_from_config(config: LoggingInitConfig<'_>) -> Result<(), TryInitError> {
    let lconfig = logger_config(&config);
    let file_config = lconfig.file_logging_config.clone();

    init(lconfig)?;

    if let Some(file_config) = &file_config {
        info!(
            log_dir = %file_config.directory.display(),
            log_prefix = %file_config.file_name_prefix,
            "file logging enabled"
        );
    }
    Ok(())
}
