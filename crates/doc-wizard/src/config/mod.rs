use std::env;
use std::fmt;
use std::path::PathBuf;

const DEFAULT_RECORD_PREFIX: &str = "tpl";

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
    pub telemetry: TelemetryConfig,
    pub wizard: WizardConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let reference_path = non_empty_var("WIZARD_REFERENCE_PATH").map(PathBuf::from);
        let company_signers_csv = non_empty_var("WIZARD_SIGNERS_CSV").map(PathBuf::from);

        let record_prefix = match env::var("WIZARD_ID_PREFIX") {
            Ok(raw) => validate_prefix(raw.trim())?,
            Err(_) => DEFAULT_RECORD_PREFIX.to_string(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            wizard: WizardConfig {
                reference_path,
                company_signers_csv,
                record_prefix,
            },
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn validate_prefix(raw: &str) -> Result<String, ConfigError> {
    let valid = !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-');
    if valid {
        Ok(raw.to_string())
    } else {
        Err(ConfigError::InvalidIdPrefix {
            value: raw.to_string(),
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the wizard's reference data comes from and how records are named.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    pub reference_path: Option<PathBuf>,
    pub company_signers_csv: Option<PathBuf>,
    pub record_prefix: String,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            reference_path: None,
            company_signers_csv: None,
            record_prefix: DEFAULT_RECORD_PREFIX.to_string(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidIdPrefix { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidIdPrefix { value } => write!(
                f,
                "WIZARD_ID_PREFIX must be non-empty ASCII letters, digits, or '-' (got '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
