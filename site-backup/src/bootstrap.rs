//! Startup precondition checks
//!
//! Runs once before the scheduler starts. Checks are ordered: mail username,
//! auth token (plus a login against the controller), backup directory. The
//! first failing check is returned and the binary exits on it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::{non_empty, Config};
use crate::controller::{Authenticator, TenantContext};
use crate::errors::BootstrapError;

/// Everything the scheduler needs once all preconditions hold
#[derive(Debug, Clone)]
pub struct BootstrapContext {
    pub mail_username: String,
    pub token: String,
    pub tenant: TenantContext,
    pub backup_directory: PathBuf,
}

pub async fn bootstrap<A: Authenticator>(
    config: &Config,
    authenticator: &A,
    working_dir: &Path,
) -> Result<BootstrapContext, BootstrapError> {
    let mail_username =
        non_empty(&config.mail.username).ok_or(BootstrapError::MissingMailUsername)?;

    let token =
        non_empty(&config.credentials.auth_token).ok_or(BootstrapError::MissingAuthToken)?;
    let tenant = authenticator.authenticate(token).await?;

    let configured_dir =
        non_empty(&config.backup_directory).ok_or(BootstrapError::MissingBackupDirectory)?;
    let backup_directory = prepare_backup_directory(working_dir, configured_dir).await?;

    Ok(BootstrapContext {
        mail_username: mail_username.to_string(),
        token: token.to_string(),
        tenant,
        backup_directory,
    })
}

/// Resolve `configured` against `working_dir` and make sure it exists
pub async fn prepare_backup_directory(
    working_dir: &Path,
    configured: &str,
) -> Result<PathBuf, BootstrapError> {
    // Absolute paths replace working_dir entirely
    let path = working_dir.join(configured);

    match tokio::fs::metadata(&path).await {
        Ok(meta) if meta.is_dir() => return Ok(path),
        Ok(_) => return Err(creation_error(&path, "path exists but is not a directory")),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(creation_error(&path, e)),
    }

    match tokio::fs::create_dir_all(&path).await {
        Ok(()) => info!("Created backup directory {}", path.display()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {}
        Err(e) => return Err(creation_error(&path, e)),
    }

    Ok(path)
}

fn creation_error(path: &Path, reason: impl ToString) -> BootstrapError {
    BootstrapError::DirectoryCreation {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}
