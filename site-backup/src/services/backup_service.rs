// File: site-backup/src/services/backup_service.rs
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::constants::logging::RUN_TIMESTAMP_FORMAT;
use crate::constants::mail::{FAILURE_SUBJECT, SUCCESS_SUBJECT};
use crate::controller::SiteLister;
use crate::pull::SitePuller;
use crate::services::notifier::{DeliveryStatus, MailTransport, Notification, Notifier};

/// Outcome of one backup run across all sites
#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub attempted_count: usize,
    pub failed_count: usize,
    pub failed_site_names: Vec<String>,
    /// Set when the site list itself could not be fetched
    pub listing_error: Option<String>,
}

impl RunResult {
    fn new(run_id: Uuid) -> Self {
        Self {
            run_id,
            started_at: Utc::now(),
            finished_at: None,
            attempted_count: 0,
            failed_count: 0,
            failed_site_names: Vec::new(),
            listing_error: None,
        }
    }

    fn record_failure(&mut self, site_name: String) {
        self.failed_count += 1;
        self.failed_site_names.push(site_name);
    }

    pub fn is_success(&self) -> bool {
        self.failed_count == 0 && self.listing_error.is_none()
    }

    pub fn summary_message(&self) -> String {
        if let Some(err) = &self.listing_error {
            return format!("Failed to retrieve site list: {}", err);
        }

        if self.failed_count > 0 {
            format!(
                "Failed backing up {} sites out of {}.\n{}",
                self.failed_count,
                self.attempted_count,
                format_site_list(&self.failed_site_names)
            )
        } else {
            format!("Successfully backed up {} sites", self.attempted_count)
        }
    }

    pub fn notification_subject(&self) -> &'static str {
        if self.is_success() {
            SUCCESS_SUBJECT
        } else {
            FAILURE_SUBJECT
        }
    }
}

/// Renders names the way the summary mail has always listed them: `['A', 'B']`.
///
/// Quotes and backslashes are escaped; other control characters pass through.
pub fn format_site_list(names: &[String]) -> String {
    let quoted: Vec<String> = names
        .iter()
        .map(|name| {
            let escaped = name.replace('\\', "\\\\");
            if name.contains('\'') && !name.contains('"') {
                format!("\"{}\"", escaped)
            } else {
                format!("'{}'", escaped.replace('\'', "\\'"))
            }
        })
        .collect();
    format!("[{}]", quoted.join(", "))
}

/// Pull every active site once, isolating failures per site.
///
/// Non-active sites are skipped and not counted. A failed pull is recorded and
/// the loop moves on to the next site.
pub async fn back_up_sites<L, P>(
    lister: &L,
    puller: &P,
    token: &str,
    directory: &Path,
) -> RunResult
where
    L: SiteLister,
    P: SitePuller,
{
    let mut result = RunResult::new(Uuid::new_v4());

    let sites = match lister.list_sites().await {
        Ok(sites) => sites,
        Err(e) => {
            error!("Failed to retrieve site list: {}", e);
            result.listing_error = Some(e.to_string());
            return result;
        }
    };

    for site in sites {
        if !site.admin_state.is_active() {
            debug!("Skipping site {} ({})", site.name, site.admin_state);
            continue;
        }

        result.attempted_count += 1;

        match puller.pull(&site.name, token, directory).await {
            Ok(()) => debug!("Backed up {}", site.name),
            Err(e) => {
                warn!("Failed to backup {}", site.name);
                warn!("{}", e);
                result.record_failure(site.name);
            }
        }
    }

    result
}

/// Weekly backup job: back up all active sites, then mail one summary
pub struct BackupRunner<L, P, T> {
    lister: L,
    puller: P,
    notifier: Notifier<T>,
    token: String,
    directory: PathBuf,
    recipient: String,
}

impl<L, P, T> BackupRunner<L, P, T>
where
    L: SiteLister,
    P: SitePuller,
    T: MailTransport,
{
    pub fn new(
        lister: L,
        puller: P,
        notifier: Notifier<T>,
        token: String,
        directory: PathBuf,
        recipient: String,
    ) -> Self {
        Self {
            lister,
            puller,
            notifier,
            token,
            directory,
            recipient,
        }
    }

    pub fn notifier(&self) -> &Notifier<T> {
        &self.notifier
    }

    pub fn puller(&self) -> &P {
        &self.puller
    }

    /// One full run. Never fails: every error is logged and reflected in the result.
    pub async fn run(&self) -> RunResult {
        let run_id = Uuid::new_v4();
        let span = info_span!("backup_run", %run_id);

        async move {
            info!(
                "Starting backups {}",
                Local::now().format(RUN_TIMESTAMP_FORMAT)
            );

            let mut result =
                back_up_sites(&self.lister, &self.puller, &self.token, &self.directory).await;
            result.run_id = run_id;

            let message = result.summary_message();
            info!("{}", message);

            let notification = Notification {
                subject: result.notification_subject().to_string(),
                body: message,
                recipient: self.recipient.clone(),
            };

            if let DeliveryStatus::Failed(reason) = self.notifier.notify(&notification).await {
                debug!("Summary notification not delivered: {}", reason);
            }

            result.finished_at = Some(Utc::now());
            info!(
                "Finished backups {}",
                Local::now().format(RUN_TIMESTAMP_FORMAT)
            );

            result
        }
        .instrument(span)
        .await
    }
}
