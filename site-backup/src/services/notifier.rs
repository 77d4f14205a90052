// File: site-backup/src/services/notifier.rs
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials as SmtpCredentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use serde::Serialize;
use std::future::Future;
use tracing::{info, warn};

use crate::config::{non_empty, Config};
use crate::errors::NotifyError;

/// A single plain-text mail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub subject: String,
    pub body: String,
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    Sent,
    Failed(String),
}

impl DeliveryStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, DeliveryStatus::Sent)
    }
}

/// Delivers one notification; errors are reported, never retried
pub trait MailTransport {
    fn send(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}

/// SMTP submission with STARTTLS and username/password login
#[derive(Clone)]
pub struct SmtpMailer {
    host: String,
    port: u16,
    username: String,
    password: String,
}

impl SmtpMailer {
    pub fn new(host: String, port: u16, username: String, password: String) -> Self {
        Self {
            host,
            port,
            username,
            password,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.mail.smtp_host.clone(),
            config.mail.smtp_port,
            non_empty(&config.mail.username).unwrap_or_default().to_string(),
            config.credentials.mail_password.clone().unwrap_or_default(),
        )
    }

    fn build_message(&self, notification: &Notification) -> Result<Message, NotifyError> {
        let from = parse_mailbox(&self.username)?;
        let to = parse_mailbox(&notification.recipient)?;

        Message::builder()
            .from(from)
            .to(to)
            .subject(notification.subject.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(notification.body.clone())
            .map_err(|e| NotifyError::Build {
                reason: e.to_string(),
            })
    }
}

impl MailTransport for SmtpMailer {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let message = self.build_message(notification)?;

        // A fresh connection per mail; it is closed when the transport drops
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(|e| NotifyError::Transport {
                reason: format!("{}:{}: {}", self.host, self.port, e),
            })?
            .port(self.port)
            .credentials(SmtpCredentials::new(
                self.username.clone(),
                self.password.clone(),
            ))
            .build();

        transport
            .send(message)
            .await
            .map(|_| ())
            .map_err(|e| NotifyError::Transport {
                reason: format!("{}:{}: {}", self.host, self.port, e),
            })
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Best-effort mail delivery: failures are logged and returned as a status
pub struct Notifier<T> {
    transport: T,
}

impl<T: MailTransport> Notifier<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn notify(&self, notification: &Notification) -> DeliveryStatus {
        match self.transport.send(notification).await {
            Ok(()) => {
                info!("Email sent to {}", notification.recipient);
                DeliveryStatus::Sent
            }
            Err(e) => {
                warn!(
                    "Failed to send email '{}' to {}: {}",
                    notification.subject, notification.recipient, e
                );
                DeliveryStatus::Failed(e.to_string())
            }
        }
    }
}
