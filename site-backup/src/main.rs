// File: site-backup/src/main.rs
use anyhow::Result;
use std::time::Duration;
use tracing::{error, info, warn};

use site_backup::bootstrap::bootstrap;
use site_backup::config::{non_empty, ConfigManager};
use site_backup::constants::paths;
use site_backup::controller::ControllerClient;
use site_backup::logging::init_console_logging;
use site_backup::pull::CommandPuller;
use site_backup::scheduler::{BackupScheduler, WeeklySchedule};
use site_backup::services::{BackupRunner, Notifier, SmtpMailer};

#[tokio::main]
async fn main() -> Result<()> {
    let config_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| paths::CONFIG_DIR.to_string());

    // Console first so configuration problems are visible
    let log_file = init_console_logging()?;

    // Load configuration
    let config_manager = ConfigManager::new(config_dir).await?;
    let config = config_manager.get_current_config();

    let log_guard = log_file.attach(&config.logging)?;

    info!(
        "Site backup {} ({})",
        env!("CARGO_PKG_VERSION"),
        config.controller.base_url
    );
    info!("Starting Backup Script");

    let controller = ControllerClient::new(
        &config.controller.base_url,
        Duration::from_secs(config.controller.request_timeout_seconds),
    )?;

    let working_dir = std::env::current_dir()?;
    let context = match bootstrap(&config, &controller, &working_dir).await {
        Ok(context) => context,
        Err(e) => {
            error!("{}", e);
            // process::exit skips destructors; flush the log file first
            drop(log_guard);
            std::process::exit(1);
        }
    };
    info!(
        "Tenant {} authenticated, backups go to {}",
        context.tenant.tenant_id,
        context.backup_directory.display()
    );

    let recipient = match non_empty(&config.mail.recipient) {
        Some(recipient) => recipient.to_string(),
        None => {
            warn!("No mail recipient configured, summary notifications will fail");
            String::new()
        }
    };

    let runner = BackupRunner::new(
        controller.session(context.token.clone(), context.tenant.clone()),
        CommandPuller::from_config(&config.pull),
        Notifier::new(SmtpMailer::from_config(&config)),
        context.token,
        context.backup_directory,
        recipient,
    );

    let schedule = WeeklySchedule::from_config(&config.schedule)?;
    let scheduler = BackupScheduler::new(
        schedule,
        Duration::from_secs(config.schedule.poll_interval_seconds),
    );

    let runner = &runner;
    scheduler
        .run(|| async move {
            runner.run().await;
        })
        .await;

    Ok(())
}
