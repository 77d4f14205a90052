// File: site-backup/src/config/manager.rs
use super::{Config, SecretsLoader};
use crate::constants::paths;
use crate::scheduler::WeeklySchedule;
use anyhow::{anyhow, Result};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tracing::info;

pub struct ConfigManager {
    current_config: Arc<Config>,
}

impl ConfigManager {
    pub async fn new(config_dir: String) -> Result<Self> {
        let config = Self::load_configuration(&config_dir).await?;
        Ok(Self {
            current_config: Arc::new(config),
        })
    }

    pub fn get_current_config(&self) -> Arc<Config> {
        self.current_config.clone()
    }

    async fn load_configuration(config_dir: &str) -> Result<Config> {
        let main_config_path = format!("{}/{}", config_dir, paths::MAIN_CONFIG);
        let main_config_content = fs::read_to_string(&main_config_path).await
            .map_err(|e| anyhow!("Failed to read main config {}: {}", main_config_path, e))?;

        let mut config: Config = toml::from_str(&main_config_content)
            .map_err(|e| anyhow!("Failed to parse main config: {}", e))?;

        // Reject a bad slot now rather than on the first scheduler tick
        WeeklySchedule::from_config(&config.schedule)
            .map_err(|e| anyhow!("Invalid schedule in {}: {}", main_config_path, e))?;

        if config.schedule.poll_interval_seconds == 0 {
            return Err(anyhow!("schedule.poll_interval_seconds must be greater than 0"));
        }

        let secrets_path = Path::new(config_dir).join(paths::SECRETS_FILE);
        config.credentials = SecretsLoader::load(&secrets_path)?.into_credentials();

        info!(
            "Loaded configuration from {}: backups every {} at {}, pull command '{}'",
            config_dir,
            config.schedule.weekday,
            config.schedule.time,
            config.pull.command
        );

        Ok(config)
    }
}
