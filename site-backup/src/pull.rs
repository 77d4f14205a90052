//! Per-site configuration export
//!
//! The export itself is owned by an external tool. [`CommandPuller`] runs it
//! once per site, handing over the token through the environment so it never
//! shows up in a process listing.

use std::future::Future;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as AsyncCommand;
use tracing::debug;

use crate::config::PullConfig;
use crate::constants::pull::{DIRECTORY_PLACEHOLDER, SITE_PLACEHOLDER};
use crate::errors::PullError;

/// Exports one site's configuration into `directory`
pub trait SitePuller {
    fn pull(
        &self,
        site_name: &str,
        token: &str,
        directory: &Path,
    ) -> impl Future<Output = Result<(), PullError>> + Send;
}

#[derive(Debug, Clone)]
pub struct CommandPuller {
    command: String,
    args: Vec<String>,
    token_env: String,
}

impl CommandPuller {
    pub fn new(command: String, args: Vec<String>, token_env: String) -> Self {
        Self {
            command,
            args,
            token_env,
        }
    }

    pub fn from_config(config: &PullConfig) -> Self {
        Self::new(
            config.command.clone(),
            config.args.clone(),
            config.token_env.clone(),
        )
    }

    /// Arguments with `{site}` and `{directory}` filled in
    pub fn render_args(&self, site_name: &str, directory: &Path) -> Vec<String> {
        let directory = directory.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(DIRECTORY_PLACEHOLDER, &directory)
                    .replace(SITE_PLACEHOLDER, site_name)
            })
            .collect()
    }
}

impl SitePuller for CommandPuller {
    async fn pull(&self, site_name: &str, token: &str, directory: &Path) -> Result<(), PullError> {
        let args = self.render_args(site_name, directory);
        debug!("Executing pull: {} {}", self.command, args.join(" "));

        let output = AsyncCommand::new(&self.command)
            .args(&args)
            .env(&self.token_env, token)
            .current_dir(directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| PullError::Spawn {
                command: self.command.clone(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(());
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        Err(PullError::Failed {
            site_name: site_name.to_string(),
            exit_code: output.status.code(),
            output: if !stderr.is_empty() { stderr } else { stdout },
        })
    }
}
