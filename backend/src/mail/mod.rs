//! Summary notification for finished imports.
//!
//! The import job's only contract with this module is best-effort and
//! fire-and-forget: a delivery failure is logged and softens the completion
//! message, it never rolls back or re-attempts the committed inserts.

use async_trait::async_trait;
use common::model::import::RowError;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;

use crate::config::SmtpConfig;

const SUBJECT: &str = "Collaborator import finished";

/// Everything the summary email needs, assembled by the import job once the
/// final batch has been flushed.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    pub recipient_email: String,
    pub user_name: String,
    pub file_name: String,
    pub created: u64,
    pub skipped: u64,
    pub total: u64,
    pub finished_at: String,
    pub errors: Vec<RowError>,
    pub dashboard_url: String,
}

#[derive(thiserror::Error, Debug)]
pub enum NotifyError {
    #[error("invalid address: {0}")]
    Address(String),

    #[error("failed to build message: {0}")]
    Message(String),

    #[error("smtp transport error: {0}")]
    Transport(String),
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_import_summary(&self, summary: &ImportSummary) -> Result<(), NotifyError>;
}

/// Renders the plain-text body: greeting, counts, sampled errors, dashboard
/// link.
pub fn render_summary(s: &ImportSummary) -> String {
    let mut body = format!(
        "Hello {},\n\n\
         The import of \"{}\" has finished ({}).\n\n\
         Created: {}\n\
         Skipped: {}\n\
         Total processed: {}\n",
        s.user_name, s.file_name, s.finished_at, s.created, s.skipped, s.total
    );

    if !s.errors.is_empty() {
        body.push_str("\nFirst issues found:\n");
        for err in &s.errors {
            body.push_str(&format!("  - line {}: {}\n", err.line, err.reason));
        }
    }

    body.push_str(&format!(
        "\nYou can review your collaborators at {}\n",
        s.dashboard_url
    ));
    body
}

pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(creds)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_import_summary(&self, summary: &ImportSummary) -> Result<(), NotifyError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e: lettre::address::AddressError| {
                        NotifyError::Address(e.to_string())
                    })?,
            )
            .to(summary.recipient_email.parse().map_err(
                |e: lettre::address::AddressError| NotifyError::Address(e.to_string()),
            )?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(render_summary(summary))
            .map_err(|e| NotifyError::Message(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Used when SMTP is not configured; writes the rendered summary to the log
/// so imports stay observable in development.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_import_summary(&self, summary: &ImportSummary) -> Result<(), NotifyError> {
        info!(
            "import summary for {}:\n{}",
            summary.recipient_email,
            render_summary(summary)
        );
        Ok(())
    }
}
