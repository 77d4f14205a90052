// File: site-backup/src/config/mod.rs
pub mod manager;
pub mod secrets;
use serde::{Deserialize, Serialize};
use std::fmt;
pub use manager::ConfigManager;
pub use secrets::SecretsLoader;

use crate::constants;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Where backups are written; relative paths resolve against the working directory
    pub backup_directory: Option<String>,
    #[serde(default)]
    pub controller: ControllerConfig,
    #[serde(default)]
    pub mail: MailConfig,
    #[serde(default)]
    pub schedule: ScheduleConfig,
    #[serde(default)]
    pub pull: PullConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    // Populated from secrets.toml
    #[serde(skip)]
    pub credentials: Credentials,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControllerConfig {
    #[serde(default = "default_controller_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

fn default_controller_url() -> String {
    constants::controller::DEFAULT_BASE_URL.to_string()
}

fn default_request_timeout() -> u64 {
    constants::controller::REQUEST_TIMEOUT_SECONDS
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: default_controller_url(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub username: Option<String>,
    pub recipient: Option<String>,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

fn default_smtp_host() -> String {
    constants::mail::DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    constants::mail::DEFAULT_SMTP_PORT
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            username: None,
            recipient: None,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default = "default_weekday")]
    pub weekday: String,
    #[serde(default = "default_time")]
    pub time: String,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// IANA zone name; host local time when unset
    pub timezone: Option<String>,
}

fn default_weekday() -> String {
    constants::schedule::DEFAULT_WEEKDAY.to_string()
}

fn default_time() -> String {
    constants::schedule::DEFAULT_TIME.to_string()
}

fn default_poll_interval() -> u64 {
    constants::schedule::POLL_INTERVAL.as_secs()
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            weekday: default_weekday(),
            time: default_time(),
            poll_interval_seconds: default_poll_interval(),
            timezone: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullConfig {
    #[serde(default = "default_pull_command")]
    pub command: String,
    #[serde(default = "default_pull_args")]
    pub args: Vec<String>,
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_pull_command() -> String {
    constants::pull::DEFAULT_COMMAND.to_string()
}

fn default_pull_args() -> Vec<String> {
    vec![
        "--sites".to_string(),
        "{site}".to_string(),
        "--output".to_string(),
        "{directory}/{site}.yml".to_string(),
    ]
}

fn default_token_env() -> String {
    constants::pull::DEFAULT_TOKEN_ENV.to_string()
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            command: default_pull_command(),
            args: default_pull_args(),
            token_env: default_token_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_file_name")]
    pub file_name: String,
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
    #[serde(default = "default_backup_count")]
    pub backup_count: usize,
}

fn default_log_directory() -> String {
    constants::logging::DEFAULT_DIRECTORY.to_string()
}

fn default_log_file_name() -> String {
    constants::logging::DEFAULT_FILE_NAME.to_string()
}

fn default_max_bytes() -> usize {
    constants::logging::DEFAULT_MAX_BYTES
}

fn default_backup_count() -> usize {
    constants::logging::DEFAULT_BACKUP_COUNT
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: default_log_directory(),
            file_name: default_log_file_name(),
            max_bytes: default_max_bytes(),
            backup_count: default_backup_count(),
        }
    }
}

/// Secrets resolved from secrets.toml. Debug output never shows the values.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub auth_token: Option<String>,
    pub mail_password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("auth_token", &redact(&self.auth_token))
            .field("mail_password", &redact(&self.mail_password))
            .finish()
    }
}

/// Treats empty and whitespace-only strings as unset
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
