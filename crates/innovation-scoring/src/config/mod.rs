use crate::scoring::{MatchWeights, ReadinessTable};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

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
    pub scoring: ScoringConfig,
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
            scoring: ScoringConfig::from_env()?,
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

/// Deployment defaults for weighting and score bands. Requests may override
/// them per call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    pub match_weights: MatchWeights,
    pub high_threshold: f64,
    pub medium_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            match_weights: MatchWeights::default(),
            high_threshold: 80.0,
            medium_threshold: 60.0,
        }
    }
}

impl ScoringConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            match_weights: MatchWeights {
                skill_weight: read_number(
                    "SCORING_SKILL_WEIGHT",
                    defaults.match_weights.skill_weight,
                )?,
                capacity_weight: read_number(
                    "SCORING_CAPACITY_WEIGHT",
                    defaults.match_weights.capacity_weight,
                )?,
            },
            high_threshold: read_number("SCORING_HIGH_THRESHOLD", defaults.high_threshold)?,
            medium_threshold: read_number("SCORING_MEDIUM_THRESHOLD", defaults.medium_threshold)?,
        };

        if config.high_threshold < config.medium_threshold {
            return Err(ConfigError::InvertedThresholds {
                high: config.high_threshold,
                medium: config.medium_threshold,
            });
        }

        Ok(config)
    }

    pub fn score_bands(&self) -> ReadinessTable {
        ReadinessTable::score_bands(self.high_threshold, self.medium_threshold)
    }
}

fn read_number(variable: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(variable) {
        Ok(raw) => {
            let parsed = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite() && *value >= 0.0);
            parsed.ok_or(ConfigError::InvalidNumber { variable, raw })
        }
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { variable: &'static str, raw: String },
    InvertedThresholds { high: f64, medium: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { variable, raw } => {
                write!(f, "{variable} must be a non-negative number, found '{raw}'")
            }
            ConfigError::InvertedThresholds { high, medium } => write!(
                f,
                "SCORING_HIGH_THRESHOLD ({high}) must not be below SCORING_MEDIUM_THRESHOLD ({medium})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvertedThresholds { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
