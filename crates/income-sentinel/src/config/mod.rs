use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::workflows::screening::{ClassifierConfig, EstimatorConfig, Occupation};

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
    pub model: ModelConfig,
    pub screening: ScreeningConfig,
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
        let log_format = match env::var("APP_LOG_FORMAT") {
            Ok(raw) => raw.parse()?,
            Err(_) => LogFormat::Compact,
        };

        let artifact_path = env::var("APP_MODEL_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig {
                log_level,
                log_format,
            },
            model: ModelConfig { artifact_path },
            screening: ScreeningConfig::from_env()?,
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
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Full,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "full" => Ok(Self::Full),
            _ => Err(ConfigError::InvalidLogFormat(value.to_string())),
        }
    }
}

/// Where the regression model artifact lives.
#[derive(Debug, Clone, Default)]
pub struct ModelConfig {
    pub artifact_path: Option<PathBuf>,
}

/// Estimator bounds and classifier policy thresholds.
#[derive(Debug, Clone, Default)]
pub struct ScreeningConfig {
    pub estimator: EstimatorConfig,
    pub classifier: ClassifierConfig,
}

impl ScreeningConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let estimator = EstimatorConfig {
            min_income: env_number("APP_MIN_INCOME", defaults.estimator.min_income)?,
            max_income: env_number("APP_MAX_INCOME", defaults.estimator.max_income)?,
        };
        if estimator.min_income <= 0.0 || estimator.min_income > estimator.max_income {
            return Err(ConfigError::InvalidIncomeBounds {
                min: estimator.min_income,
                max: estimator.max_income,
            });
        }

        let mut classifier = defaults.classifier;
        classifier.override_multiplier =
            env_number("APP_OVERRIDE_MULTIPLIER", classifier.override_multiplier)?;
        classifier.underreporting_ratio =
            env_number("APP_UNDERREPORTING_RATIO", classifier.underreporting_ratio)?;

        for (occupation, key) in [
            (Occupation::Salaried, "APP_TOLERANCE_SALARIED"),
            (Occupation::SelfEmployed, "APP_TOLERANCE_SELF_EMPLOYED"),
            (Occupation::Business, "APP_TOLERANCE_BUSINESS"),
        ] {
            let fallback = classifier.tolerance_for(occupation).unwrap_or_default();
            let tolerance = env_number(key, fallback)?;
            classifier
                .variance_tolerance_pct
                .insert(occupation, tolerance);
        }

        Ok(Self {
            estimator,
            classifier,
        })
    }
}

fn env_number(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or(ConfigError::InvalidNumber { key, value: raw }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidLogFormat(String),
    InvalidNumber { key: &'static str, value: String },
    InvalidIncomeBounds { min: f64, max: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidLogFormat(value) => {
                write!(f, "APP_LOG_FORMAT must be 'compact' or 'full', found '{value}'")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a non-negative number, found '{value}'")
            }
            ConfigError::InvalidIncomeBounds { min, max } => write!(
                f,
                "income bounds must satisfy 0 < APP_MIN_INCOME <= APP_MAX_INCOME (found {min} and {max})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidLogFormat(_)
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidIncomeBounds { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_LOG_FORMAT",
            "APP_MODEL_PATH",
            "APP_MIN_INCOME",
            "APP_MAX_INCOME",
            "APP_OVERRIDE_MULTIPLIER",
            "APP_UNDERREPORTING_RATIO",
            "APP_TOLERANCE_SALARIED",
            "APP_TOLERANCE_SELF_EMPLOYED",
            "APP_TOLERANCE_BUSINESS",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.telemetry.log_format, LogFormat::Compact);
        assert!(config.model.artifact_path.is_none());
        assert_eq!(config.screening.estimator.min_income, 200_000.0);
        assert_eq!(config.screening.estimator.max_income, 5_000_000.0);
        assert_eq!(
            config.screening.classifier.tolerance_for(Occupation::Salaried),
            Some(3.0)
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn policy_thresholds_come_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_TOLERANCE_BUSINESS", "12.5");
        env::set_var("APP_UNDERREPORTING_RATIO", "0.9");
        env::set_var("APP_MODEL_PATH", "/srv/models/income.json");

        let config = AppConfig::load().expect("config loads");

        let classifier = &config.screening.classifier;
        assert_eq!(classifier.tolerance_for(Occupation::Business), Some(12.5));
        assert_eq!(classifier.underreporting_ratio, 0.9);
        assert_eq!(
            config.model.artifact_path,
            Some(PathBuf::from("/srv/models/income.json"))
        );
        reset_env();
    }

    #[test]
    fn inverted_income_bounds_are_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MIN_INCOME", "900000");
        env::set_var("APP_MAX_INCOME", "100000");

        let result = AppConfig::load();
        reset_env();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidIncomeBounds { .. })
        ));
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_OVERRIDE_MULTIPLIER", "twice");

        let result = AppConfig::load();
        reset_env();

        match result {
            Err(ConfigError::InvalidNumber { key, value }) => {
                assert_eq!(key, "APP_OVERRIDE_MULTIPLIER");
                assert_eq!(value, "twice");
            }
            other => panic!("expected invalid number, got {other:?}"),
        }
    }
}
