use crate::lending::ProductLimits;
use rust_decimal::Decimal;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

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
    pub product: ProductLimits,
    pub profiles: ProfileStoreConfig,
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

        let product = load_product_limits()?;
        let csv_path = env::var("LOAN_PROFILES_CSV")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            product,
            profiles: ProfileStoreConfig { csv_path },
        })
    }
}

fn load_product_limits() -> Result<ProductLimits, ConfigError> {
    let defaults = ProductLimits::default();

    let max_loan_amount = decimal_var("LOAN_MAX_AMOUNT", defaults.max_loan_amount)?;
    let min_period_months =
        months_var("LOAN_MIN_PERIOD_MONTHS", defaults.min_period_months)?;
    let max_period_months =
        months_var("LOAN_MAX_PERIOD_MONTHS", defaults.max_period_months)?;
    let required_credit_score =
        decimal_var("LOAN_REQUIRED_CREDIT_SCORE", defaults.required_credit_score)?;

    if max_loan_amount <= Decimal::ZERO {
        return Err(ConfigError::InvalidProductLimits(
            "LOAN_MAX_AMOUNT must be greater than zero",
        ));
    }
    if min_period_months >= max_period_months {
        return Err(ConfigError::InvalidProductLimits(
            "LOAN_MIN_PERIOD_MONTHS must be below LOAN_MAX_PERIOD_MONTHS",
        ));
    }
    if required_credit_score <= Decimal::ZERO {
        return Err(ConfigError::InvalidProductLimits(
            "LOAN_REQUIRED_CREDIT_SCORE must be greater than zero",
        ));
    }

    Ok(ProductLimits {
        max_loan_amount,
        min_period_months,
        max_period_months,
        required_credit_score,
    })
}

fn decimal_var(name: &'static str, default: Decimal) -> Result<Decimal, ConfigError> {
    match env::var(name) {
        Ok(raw) => Decimal::from_str(raw.trim()).map_err(|_| ConfigError::InvalidNumber(name)),
        Err(_) => Ok(default),
    }
}

fn months_var(name: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber(name)),
        Err(_) => Ok(default),
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

/// Where applicant credit records are loaded from. `None` means the built-in seed.
#[derive(Debug, Clone, Default)]
pub struct ProfileStoreConfig {
    pub csv_path: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber(&'static str),
    InvalidProductLimits(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber(name) => write!(f, "{name} must be a valid number"),
            ConfigError::InvalidProductLimits(detail) => write!(f, "{detail}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber(_)
            | ConfigError::InvalidProductLimits(_) => None,
        }
    }
}
