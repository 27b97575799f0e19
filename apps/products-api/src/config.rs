//! Configuration for Products API

use core_config::{AppInfo, FromEnv, app_info, env_flag, server::ServerConfig};

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Start with the sample catalog (`SEED_SAMPLE_DATA`, default true)
    pub seed_sample_data: bool,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Ok(Self {
            app: app_info!("Products API"),
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            seed_sample_data: env_flag("SEED_SAMPLE_DATA", true)?,
        })
    }
}
