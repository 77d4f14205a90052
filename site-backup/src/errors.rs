//! Custom error types for the site backup job
//!
//! Provides structured error handling with context for the failure scenarios
//! that are recovered locally (pull, notify, controller) and the fatal ones
//! that stop the process during bootstrap.

use std::fmt;

/// Fatal precondition failures detected before the scheduler starts
#[derive(Debug)]
pub enum BootstrapError {
    /// Mail username is not configured
    MissingMailUsername,

    /// Controller auth token is not configured
    MissingAuthToken,

    /// Token did not yield a tenant context
    AuthenticationFailed(ControllerError),

    /// Backup directory is not configured
    MissingBackupDirectory,

    /// Backup directory could not be resolved or created
    DirectoryCreation { path: String, reason: String },
}

/// Controller API error variants
#[derive(Debug)]
pub enum ControllerError {
    /// Request could not be sent or the connection failed
    Transport { url: String, reason: String },

    /// Controller answered with a non-success status
    Status {
        url: String,
        status: u16,
        message: String,
    },

    /// Response body could not be decoded
    InvalidResponse { url: String, reason: String },

    /// Token was accepted but no tenant is associated with it
    NoTenant,
}

/// Failure of the external pull routine for one site
#[derive(Debug)]
pub enum PullError {
    /// Export command could not be started
    Spawn { command: String, reason: String },

    /// Export command ran and exited unsuccessfully
    Failed {
        site_name: String,
        exit_code: Option<i32>,
        output: String,
    },
}

/// Mail delivery error variants
#[derive(Debug)]
pub enum NotifyError {
    /// Sender or recipient address is not a valid mailbox
    InvalidAddress { address: String, reason: String },

    /// Message could not be assembled
    Build { reason: String },

    /// Connect, STARTTLS, authentication or submission failed
    Transport { reason: String },
}

/// Configuration loading and validation errors
#[derive(Debug)]
pub enum ConfigError {
    /// Invalid configuration value
    InvalidValue { field: String, reason: String },
}

impl fmt::Display for BootstrapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapError::MissingMailUsername => {
                write!(f, "EMAIL Username missing, please check.")
            }
            BootstrapError::MissingAuthToken => write!(f, "No AUTH_TOKEN found"),
            BootstrapError::AuthenticationFailed(e) => {
                write!(f, "AUTH_TOKEN login failure, please check token: {}", e)
            }
            BootstrapError::MissingBackupDirectory => write!(f, "Directory is missing"),
            BootstrapError::DirectoryCreation { path, reason } => {
                write!(f, "Failed to create backup directory '{}': {}", path, reason)
            }
        }
    }
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Transport { url, reason } => {
                write!(f, "Request to {} failed: {}", url, reason)
            }
            ControllerError::Status {
                url,
                status,
                message,
            } => {
                write!(f, "Controller returned {} for {}: {}", status, url, message)
            }
            ControllerError::InvalidResponse { url, reason } => {
                write!(f, "Invalid response from {}: {}", url, reason)
            }
            ControllerError::NoTenant => write!(f, "No tenant associated with token"),
        }
    }
}

impl fmt::Display for PullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PullError::Spawn { command, reason } => {
                write!(f, "Failed to start '{}': {}", command, reason)
            }
            PullError::Failed {
                site_name,
                exit_code,
                output,
            } => match exit_code {
                Some(code) => write!(
                    f,
                    "Pull for '{}' exited with code {}: {}",
                    site_name, code, output
                ),
                None => write!(
                    f,
                    "Pull for '{}' terminated by signal: {}",
                    site_name, output
                ),
            },
        }
    }
}

impl fmt::Display for NotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyError::InvalidAddress { address, reason } => {
                write!(f, "Invalid mail address '{}': {}", address, reason)
            }
            NotifyError::Build { reason } => write!(f, "Failed to build message: {}", reason),
            NotifyError::Transport { reason } => write!(f, "SMTP delivery failed: {}", reason),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { field, reason } => {
                write!(f, "Invalid value for '{}': {}", field, reason)
            }
        }
    }
}

impl std::error::Error for BootstrapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BootstrapError::AuthenticationFailed(e) => Some(e),
            _ => None,
        }
    }
}
impl std::error::Error for ControllerError {}
impl std::error::Error for PullError {}
impl std::error::Error for NotifyError {}
impl std::error::Error for ConfigError {}

impl From<ControllerError> for BootstrapError {
    fn from(err: ControllerError) -> Self {
        BootstrapError::AuthenticationFailed(err)
    }
}
