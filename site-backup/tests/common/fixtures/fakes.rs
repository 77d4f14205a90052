//! In-memory stand-ins for the controller, the pull routine and SMTP
//!
//! Each fake records how it was called so tests can assert on call order
//! and arguments.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use site_backup::controller::{Authenticator, Site, SiteLister, TenantContext};
use site_backup::errors::{ControllerError, NotifyError, PullError};
use site_backup::pull::SitePuller;
use site_backup::services::{MailTransport, Notification};

/// Site lister returning a fixed listing, or a fixed error
pub struct FakeSiteLister {
    sites: Vec<Site>,
    error: Option<String>,
    calls: AtomicUsize,
}

impl FakeSiteLister {
    pub fn with_sites(sites: Vec<Site>) -> Self {
        Self {
            sites,
            error: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            sites: Vec::new(),
            error: Some(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SiteLister for FakeSiteLister {
    async fn list_sites(&self) -> Result<Vec<Site>, ControllerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.error {
            Some(message) => Err(ControllerError::Status {
                url: "http://controller.test/sites".to_string(),
                status: 503,
                message: message.clone(),
            }),
            None => Ok(self.sites.clone()),
        }
    }
}

/// A single recorded pull invocation
#[derive(Debug, Clone, PartialEq)]
pub struct PullCall {
    pub site_name: String,
    pub token: String,
    pub directory: PathBuf,
}

/// Pull routine that fails for a configured set of site names
#[derive(Default)]
pub struct FakePuller {
    failing: HashSet<String>,
    calls: Mutex<Vec<PullCall>>,
}

impl FakePuller {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing_for(names: &[&str]) -> Self {
        Self {
            failing: names.iter().map(|n| n.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<PullCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn pulled_sites(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.site_name).collect()
    }
}

impl SitePuller for FakePuller {
    async fn pull(&self, site_name: &str, token: &str, directory: &Path) -> Result<(), PullError> {
        self.calls.lock().unwrap().push(PullCall {
            site_name: site_name.to_string(),
            token: token.to_string(),
            directory: directory.to_path_buf(),
        });

        if self.failing.contains(site_name) {
            Err(PullError::Failed {
                site_name: site_name.to_string(),
                exit_code: Some(1),
                output: format!("export of {} failed", site_name),
            })
        } else {
            Ok(())
        }
    }
}

/// Mail transport that records every notification and optionally fails
#[derive(Default)]
pub struct RecordingTransport {
    fail: bool,
    attempts: Mutex<Vec<Notification>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unreachable() -> Self {
        Self {
            fail: true,
            attempts: Mutex::new(Vec::new()),
        }
    }

    /// Every notification handed to the transport, delivered or not
    pub fn attempts(&self) -> Vec<Notification> {
        self.attempts.lock().unwrap().clone()
    }
}

impl MailTransport for RecordingTransport {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.attempts.lock().unwrap().push(notification.clone());
        if self.fail {
            Err(NotifyError::Transport {
                reason: "connection refused".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

/// Authenticator with a canned outcome and a call counter
pub struct FakeAuthenticator {
    tenant: Option<TenantContext>,
    calls: AtomicUsize,
}

impl FakeAuthenticator {
    pub fn accepting(tenant: TenantContext) -> Self {
        Self {
            tenant: Some(tenant),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            tenant: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Authenticator for FakeAuthenticator {
    async fn authenticate(&self, _token: &str) -> Result<TenantContext, ControllerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tenant.clone().ok_or(ControllerError::NoTenant)
    }
}
