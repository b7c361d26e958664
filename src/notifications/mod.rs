use async_trait::async_trait;
use serde::Serialize;

use crate::domain::value_objects::Email;

// ============================================================================
// Email Notifications
// ============================================================================
//
// The core only composes messages and hands them to an `EmailSender`.
// Delivery (SMTP, provider APIs, retries) belongs to the implementation.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmailMessage {
    pub to: Email,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    pub fn new(to: Email, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum NotificationError {
    #[error("Email rejected for {recipient}: {reason}")]
    Rejected { recipient: String, reason: String },

    #[error("Email transport unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: EmailMessage) -> Result<(), NotificationError>;
}

/// Sender that only logs the message; for development and the demo binary
#[derive(Debug, Default, Clone)]
pub struct TracingEmailSender;

#[async_trait]
impl EmailSender for TracingEmailSender {
    async fn send(&self, message: EmailMessage) -> Result<(), NotificationError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.body.len(),
            "📧 Email dispatched"
        );
        Ok(())
    }
}
