use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_GENERATOR_URL: &str = "http://localhost:8082/api/numbers/random";
pub const DEFAULT_GENERATOR_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct CalculatorConfig {
    pub common: core_config::Config,
    pub generator: GeneratorServiceConfig,
    /// Report upstream failures with 502 (and formatting failures with 500)
    /// instead of the default 200.
    pub strict_upstream_errors: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratorServiceConfig {
    /// Full URL of the random number endpoint.
    pub url: String,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for GeneratorServiceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GENERATOR_URL.to_string(),
            timeout: Some(Duration::from_secs(DEFAULT_GENERATOR_TIMEOUT_SECS)),
        }
    }
}

impl CalculatorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        Ok(CalculatorConfig {
            common,
            generator: GeneratorServiceConfig {
                url: env::var("GENERATOR_URL")
                    .unwrap_or_else(|_| DEFAULT_GENERATOR_URL.to_string()),
                timeout: parse_timeout(env::var("GENERATOR_TIMEOUT_SECS").ok().as_deref())?,
            },
            strict_upstream_errors: parse_flag(
                "STRICT_UPSTREAM_ERRORS",
                env::var("STRICT_UPSTREAM_ERRORS").ok().as_deref(),
            )?,
        })
    }
}

/// `0` disables the timeout; unset uses the default.
fn parse_timeout(raw: Option<&str>) -> Result<Option<Duration>, AppError> {
    let Some(value) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(Some(Duration::from_secs(DEFAULT_GENERATOR_TIMEOUT_SECS)));
    };

    let secs: u64 = value.parse().map_err(|e| {
        AppError::ConfigError(anyhow::anyhow!(
            "Invalid GENERATOR_TIMEOUT_SECS '{}': {}",
            value,
            e
        ))
    })?;

    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

fn parse_flag(key: &str, raw: Option<&str>) -> Result<bool, AppError> {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(false),
        Some("true" | "1" | "yes") => Ok(true),
        Some("false" | "0" | "no") => Ok(false),
        Some(other) => Err(AppError::ConfigError(anyhow::anyhow!(
            "Invalid {} '{}': expected true or false",
            key,
            other
        ))),
    }
}
