use crate::workflows::ranking::{ExperienceLevel, ProxyOptions, SearchRequest};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

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
    pub search: SearchConfig,
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
            search: SearchConfig::from_env()?,
        })
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

/// Search descriptor and data locations for ranking runs.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub request: SearchRequest,
    pub postings_path: Option<PathBuf>,
    pub rules_path: Option<PathBuf>,
}

impl SearchConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = SearchRequest::default();

        let rows = match env::var("JOB_SEARCH_ROWS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidRows(raw))?,
            Err(_) => defaults.rows,
        };

        let use_apify_proxy = match env::var("JOB_SEARCH_USE_PROXY") {
            Ok(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidFlag {
                name: "JOB_SEARCH_USE_PROXY",
                value: raw,
            })?,
            Err(_) => defaults.proxy.use_apify_proxy,
        };

        let apify_proxy_groups = env::var("JOB_SEARCH_PROXY_GROUPS")
            .map(|raw| split_list(&raw))
            .unwrap_or(defaults.proxy.apify_proxy_groups);

        let experience_level = match env::var("JOB_SEARCH_EXPERIENCE_LEVEL") {
            Ok(raw) => {
                let mut codes = split_list(&raw);
                if codes.len() == 1 {
                    ExperienceLevel::Single(codes.remove(0))
                } else {
                    ExperienceLevel::Multiple(codes)
                }
            }
            Err(_) => defaults.experience_level,
        };

        let request = SearchRequest {
            work_type: env::var("JOB_SEARCH_WORK_TYPE").unwrap_or(defaults.work_type),
            rows,
            experience_level,
            published_at: env::var("JOB_SEARCH_PUBLISHED_AT").unwrap_or(defaults.published_at),
            title: env::var("JOB_SEARCH_TITLE").unwrap_or(defaults.title),
            proxy: ProxyOptions {
                use_apify_proxy,
                apify_proxy_groups,
            },
        };

        Ok(Self {
            request,
            postings_path: env::var_os("JOB_POSTINGS_PATH").map(PathBuf::from),
            rules_path: env::var_os("JOB_SCORING_RULES").map(PathBuf::from),
        })
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidRows(String),
    InvalidFlag { name: &'static str, value: String },
    MissingDataset,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidRows(value) => {
                write!(f, "JOB_SEARCH_ROWS must be a positive integer, got '{value}'")
            }
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be true or false, got '{value}'")
            }
            ConfigError::MissingDataset => write!(
                f,
                "no posting dataset given; pass --input or set JOB_POSTINGS_PATH"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidRows(_)
            | ConfigError::InvalidFlag { .. }
            | ConfigError::MissingDataset => None,
        }
    }
}
