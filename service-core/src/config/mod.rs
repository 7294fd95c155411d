use crate::error::AppError;
use config::{Config as Cfg, Environment, File};
use serde::Deserialize;

/// Settings shared by every service.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub port: u16,
}

impl Config {
    /// Load common settings from `.env`, an optional `configuration` file and
    /// `APP__*` environment variables, in increasing order of precedence.
    ///
    /// `default_port` applies when no source sets `port`.
    pub fn load(default_port: u16) -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let config = Cfg::builder()
            .set_default("port", i64::from(default_port))?
            .add_source(File::with_name("configuration").required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
