use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Port the calculator expects the generator on.
pub const DEFAULT_PORT: u16 = 8082;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub common: core_config::Config,
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Default)]
pub struct RandomConfig {
    /// Fixed seed for reproducible sequences. `None` draws from the thread RNG.
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load(DEFAULT_PORT)?;

        Ok(GeneratorConfig {
            common,
            random: RandomConfig {
                seed: parse_seed(env::var("RANDOM_SEED").ok().as_deref())?,
            },
        })
    }
}

fn parse_seed(raw: Option<&str>) -> Result<Option<u64>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!("Invalid RANDOM_SEED '{}': {}", value, e))
        }),
    }
}
