use crate::workflows::allocation::{AllocationConfig, CoveragePolicy, MatchMode, ScoringKey};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub allocation: AllocationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            allocation: allocation_from_env(AllocationConfig::default())?,
        })
    }
}

/// Layers `MATCH_*` variables over `base`.
pub fn allocation_from_env(mut base: AllocationConfig) -> Result<AllocationConfig, ConfigError> {
    if let Some(raw) = setting("MATCH_MODE") {
        base.mode = MatchMode::parse(&raw).ok_or_else(|| invalid("MATCH_MODE", &raw))?;
    }
    if let Some(raw) = setting("MATCH_COVERAGE") {
        base.coverage =
            CoveragePolicy::parse(&raw).ok_or_else(|| invalid("MATCH_COVERAGE", &raw))?;
    }
    if let Some(raw) = setting("MATCH_TRACK_OVERLAP") {
        base.track_overlap = match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            _ => return Err(invalid("MATCH_TRACK_OVERLAP", &raw)),
        };
    }

    for key in ScoringKey::all() {
        if let Some(raw) = setting(key.env_var()) {
            base.scoring
                .apply(key.name(), &raw)
                .map_err(|_| invalid(key.env_var(), &raw))?;
        }
    }

    Ok(base)
}

/// Reads an allocation config JSON file; omitted fields keep their defaults.
pub fn allocation_from_file(path: &Path) -> Result<AllocationConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|err| ConfigError::ConfigFile {
        path: path.to_path_buf(),
        detail: err.to_string(),
    })?;

    let config: AllocationConfig =
        serde_json::from_str(&contents).map_err(|err| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    config
        .scoring
        .validate()
        .map_err(|err| ConfigError::ConfigFile {
            path: path.to_path_buf(),
            detail: err.to_string(),
        })?;

    Ok(config)
}

fn setting(variable: &str) -> Option<String> {
    env::var(variable)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

fn invalid(variable: &'static str, value: &str) -> ConfigError {
    ConfigError::InvalidSetting {
        variable,
        value: value.to_string(),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidSetting { variable: &'static str, value: String },
    ConfigFile { path: PathBuf, detail: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidSetting { variable, value } => {
                write!(f, "{variable} has unsupported value '{value}'")
            }
            ConfigError::ConfigFile { path, detail } => {
                write!(f, "allocation config {}: {}", path.display(), detail)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidSetting { .. }
            | ConfigError::ConfigFile { .. } => None,
        }
    }
}
