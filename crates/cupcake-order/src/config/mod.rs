use crate::workflows::order::{Clock, OffsetClock, OrderLocale, SystemClock};
use chrono::FixedOffset;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

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
    pub order: OrderConfig,
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

        let locale_tag = env::var("ORDER_LOCALE").unwrap_or_else(|_| "en-US".to_string());
        let locale = OrderLocale::from_tag(&locale_tag)
            .ok_or_else(|| ConfigError::UnknownLocale(locale_tag.clone()))?;

        let utc_offset = match env::var("ORDER_UTC_OFFSET") {
            Ok(raw) if !raw.trim().is_empty() => Some(parse_utc_offset(&raw)?),
            _ => None,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            order: OrderConfig { locale, utc_offset },
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

/// Formatting and calendar inputs for order pricing and pickup dates.
#[derive(Debug, Clone, Default)]
pub struct OrderConfig {
    pub locale: OrderLocale,
    /// Fixed offset used to decide "today"; the host's local time when unset.
    pub utc_offset: Option<FixedOffset>,
}

impl OrderConfig {
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.utc_offset {
            Some(offset) => Arc::new(OffsetClock::new(offset)),
            None => Arc::new(SystemClock),
        }
    }
}

pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, ConfigError> {
    raw.trim()
        .parse::<FixedOffset>()
        .map_err(|source| ConfigError::InvalidUtcOffset {
            value: raw.to_string(),
            source,
        })
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    UnknownLocale(String),
    InvalidUtcOffset {
        value: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::UnknownLocale(tag) => write!(
                f,
                "ORDER_LOCALE '{}' is not supported (expected one of {})",
                tag,
                OrderLocale::SUPPORTED.join(", ")
            ),
            ConfigError::InvalidUtcOffset { value, .. } => {
                write!(f, "ORDER_UTC_OFFSET '{}' must look like +07:00", value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::UnknownLocale(_) => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidUtcOffset { source, .. } => Some(source),
        }
    }
}
