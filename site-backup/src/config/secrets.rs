// File: site-backup/src/config/secrets.rs
//! Secrets loader for the controller token and the mail password.
//!
//! Secrets are stored in a separate TOML file (config/secrets.toml) that should
//! be excluded from version control.
//!
//! Example secrets.toml:
//! ```toml
//! auth_token = "controller-static-token"
//! mail_password = "smtp-password"
//! ```

use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

use super::{non_empty, Credentials};

/// Loader for secrets from the secrets.toml file
pub struct SecretsLoader {
    secrets: Credentials,
}

impl SecretsLoader {
    /// Load secrets from the specified file path.
    /// Returns an empty loader if the file doesn't exist.
    pub fn load(secrets_path: &Path) -> Result<Self> {
        if !secrets_path.exists() {
            warn!(
                "Secrets file not found at {:?}, auth token and mail password are unset",
                secrets_path
            );
            return Ok(Self {
                secrets: Credentials::default(),
            });
        }

        let content = std::fs::read_to_string(secrets_path)
            .with_context(|| format!("Failed to read secrets file: {:?}", secrets_path))?;

        let secrets: Credentials = toml::from_str(&content)
            .with_context(|| format!("Failed to parse secrets file: {:?}", secrets_path))?;

        info!(
            "Loaded secrets from {:?} (auth token: {}, mail password: {})",
            secrets_path,
            presence(&secrets.auth_token),
            presence(&secrets.mail_password),
        );

        Ok(Self { secrets })
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.secrets.auth_token.as_deref()
    }

    pub fn into_credentials(self) -> Credentials {
        self.secrets
    }
}

fn presence(value: &Option<String>) -> &'static str {
    if non_empty(value).is_some() {
        "set"
    } else {
        "unset"
    }
}
