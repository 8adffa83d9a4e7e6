use std::env;
use std::fmt;
use std::time::Duration;

/// Distinguishes runtime behavior for different stages of the desk.
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

/// Top-level configuration for the registration desk.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub submission: SubmissionConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let delay_ms = env::var("FORM_SUBMIT_DELAY_MS")
            .unwrap_or_else(|_| DEFAULT_SUBMIT_DELAY_MS.to_string())
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidSubmitDelay)?;

        let freeze_while_submitting = match env::var("FORM_FREEZE_WHILE_SUBMITTING") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFreezeFlag { value: raw })?,
            Err(_) => true,
        };

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            submission: SubmissionConfig {
                delay_ms,
                freeze_while_submitting,
            },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Fixed latency of the simulated submission endpoint.
pub const DEFAULT_SUBMIT_DELAY_MS: u64 = 2000;

/// Settings for the simulated submission round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionConfig {
    pub delay_ms: u64,
    pub freeze_while_submitting: bool,
}

impl SubmissionConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            delay_ms: DEFAULT_SUBMIT_DELAY_MS,
            freeze_while_submitting: true,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidSubmitDelay,
    InvalidFreezeFlag { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidSubmitDelay => {
                write!(f, "FORM_SUBMIT_DELAY_MS must be a whole number of milliseconds")
            }
            ConfigError::InvalidFreezeFlag { value } => write!(
                f,
                "FORM_FREEZE_WHILE_SUBMITTING must be true or false (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
