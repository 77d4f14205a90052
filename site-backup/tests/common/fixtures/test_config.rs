//! Test configuration builder for creating test configs programmatically

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Builder for creating test configurations
pub struct TestConfigBuilder {
    temp_dir: TempDir,
    mail_username: Option<String>,
    mail_recipient: Option<String>,
    backup_directory: Option<String>,
    auth_token: Option<String>,
    mail_password: Option<String>,
    controller_url: Option<String>,
    weekday: String,
    time: String,
    timezone: Option<String>,
}

impl TestConfigBuilder {
    /// Create a builder with every required field set
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            mail_username: Some("backups@example.com".to_string()),
            mail_recipient: Some("netops@example.com".to_string()),
            backup_directory: Some("backups".to_string()),
            auth_token: Some("test-auth-token".to_string()),
            mail_password: Some("mail-secret".to_string()),
            controller_url: None,
            weekday: "saturday".to_string(),
            time: "22:00".to_string(),
            timezone: None,
        }
    }

    pub fn mail_username(mut self, username: Option<&str>) -> Self {
        self.mail_username = username.map(str::to_string);
        self
    }

    pub fn backup_directory(mut self, directory: Option<&str>) -> Self {
        self.backup_directory = directory.map(str::to_string);
        self
    }

    pub fn auth_token(mut self, token: Option<&str>) -> Self {
        self.auth_token = token.map(str::to_string);
        self
    }

    pub fn controller_url(mut self, url: &str) -> Self {
        self.controller_url = Some(url.to_string());
        self
    }

    pub fn schedule(mut self, weekday: &str, time: &str) -> Self {
        self.weekday = weekday.to_string();
        self.time = time.to_string();
        self
    }

    pub fn timezone(mut self, timezone: &str) -> Self {
        self.timezone = Some(timezone.to_string());
        self
    }

    fn main_toml(&self) -> String {
        let mut toml = String::new();
        if let Some(dir) = &self.backup_directory {
            toml.push_str(&format!("backup_directory = \"{}\"\n", dir));
        }

        toml.push_str("\n[mail]\n");
        if let Some(username) = &self.mail_username {
            toml.push_str(&format!("username = \"{}\"\n", username));
        }
        if let Some(recipient) = &self.mail_recipient {
            toml.push_str(&format!("recipient = \"{}\"\n", recipient));
        }

        if let Some(url) = &self.controller_url {
            toml.push_str(&format!("\n[controller]\nbase_url = \"{}\"\n", url));
        }

        toml.push_str(&format!(
            "\n[schedule]\nweekday = \"{}\"\ntime = \"{}\"\n",
            self.weekday, self.time
        ));
        if let Some(tz) = &self.timezone {
            toml.push_str(&format!("timezone = \"{}\"\n", tz));
        }

        toml
    }

    fn secrets_toml(&self) -> String {
        let mut toml = String::new();
        if let Some(token) = &self.auth_token {
            toml.push_str(&format!("auth_token = \"{}\"\n", token));
        }
        if let Some(password) = &self.mail_password {
            toml.push_str(&format!("mail_password = \"{}\"\n", password));
        }
        toml
    }

    /// Build and write config files to temp directory
    pub fn build(self) -> TestConfig {
        let config_dir = self.temp_dir.path().join("config");
        fs::create_dir_all(&config_dir).expect("Failed to create config dir");

        fs::write(config_dir.join("main.toml"), self.main_toml())
            .expect("Failed to write main.toml");
        fs::write(config_dir.join("secrets.toml"), self.secrets_toml())
            .expect("Failed to write secrets.toml");

        TestConfig {
            config_dir,
            _temp_dir: self.temp_dir,
        }
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Config files on disk; removed when dropped
pub struct TestConfig {
    config_dir: PathBuf,
    _temp_dir: TempDir,
}

impl TestConfig {
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Parent of the config directory, usable as a working directory
    pub fn root(&self) -> PathBuf {
        self.config_dir
            .parent()
            .expect("config dir has a parent")
            .to_path_buf()
    }
}
