pub mod backup_service;
pub mod notifier;

pub use backup_service::{back_up_sites, BackupRunner, RunResult};
pub use notifier::{DeliveryStatus, MailTransport, Notification, Notifier, SmtpMailer};
