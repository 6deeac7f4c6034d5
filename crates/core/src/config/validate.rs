use super::{
    types::{ArchiverBackend, Config},
    ConfigError,
};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Working directory is set
/// - Upload limits are non-zero
/// - Command archiver timeout is non-zero
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.storage.workdir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "storage.workdir cannot be empty".to_string(),
        ));
    }

    if config.limits.max_files_per_field == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_files_per_field cannot be 0".to_string(),
        ));
    }

    if config.limits.max_body_bytes == 0 {
        return Err(ConfigError::ValidationError(
            "limits.max_body_bytes cannot be 0".to_string(),
        ));
    }

    if config.archiver.backend == ArchiverBackend::Command {
        if let Some(command) = &config.archiver.command {
            if command.timeout_secs == 0 {
                return Err(ConfigError::ValidationError(
                    "archiver.command.timeout_secs cannot be 0".to_string(),
                ));
            }
        }
    }

    Ok(())
}
