use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub archiver: ArchiverConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    "0.0.0.0".parse().unwrap()
}

fn default_port() -> u16 {
    8080
}

/// Working directory for uploads, merged outputs and archives
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
        }
    }
}

fn default_workdir() -> PathBuf {
    PathBuf::from("uploads")
}

/// Archiver configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ArchiverConfig {
    /// Packaging backend
    #[serde(default)]
    pub backend: ArchiverBackend,
    /// Command-specific configuration (used when backend = "command")
    #[serde(default)]
    pub command: Option<CommandArchiverConfig>,
}

/// Available packaging backends
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ArchiverBackend {
    /// In-process, via the zip crate
    #[default]
    Library,
    /// Out-of-process, via an external interpreter
    Command,
}

/// Command archiver backend configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommandArchiverConfig {
    /// Interpreter executable (e.g. "python3")
    #[serde(default = "default_interpreter")]
    pub interpreter: PathBuf,
    /// Packaging timeout in seconds (default: 120)
    #[serde(default = "default_command_timeout")]
    pub timeout_secs: u64,
}

impl Default for CommandArchiverConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            timeout_secs: default_command_timeout(),
        }
    }
}

fn default_interpreter() -> PathBuf {
    PathBuf::from("python3")
}

fn default_command_timeout() -> u64 {
    120
}

/// Upload limits
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LimitsConfig {
    /// Maximum files per upload field (default: 100)
    #[serde(default = "default_max_files")]
    pub max_files_per_field: usize,
    /// Maximum request body size in bytes (default: 256 MiB)
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_files_per_field: default_max_files(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

fn default_max_files() -> usize {
    100
}

fn default_max_body_bytes() -> usize {
    256 * 1024 * 1024
}

/// Sanitized config for API responses (host paths redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub archiver: SanitizedArchiverConfig,
    pub limits: LimitsConfig,
}

/// Sanitized archiver config (interpreter path hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedArchiverConfig {
    pub backend: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command_timeout_secs: Option<u64>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            archiver: SanitizedArchiverConfig {
                backend: match config.archiver.backend {
                    ArchiverBackend::Library => "library".to_string(),
                    ArchiverBackend::Command => "command".to_string(),
                },
                command_timeout_secs: config.archiver.command.as_ref().map(|c| c.timeout_secs),
            },
            limits: config.limits.clone(),
        }
    }
}
