//! Outbound mail collaborator.
//!
//! Delivery transport is outside this system; the service layer only depends
//! on the [`Mailer`] capability. The default implementation writes messages
//! to the application log, which is where reset links surface during local
//! development.

use async_trait::async_trait;

use crate::error::AppError;

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError>;
}

/// Writes outbound messages to the application log instead of delivering them.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        log::info!("mail to <{}>: {} | {}", to, subject, body);
        Ok(())
    }
}

/// Captures outbound messages so tests can assert on them.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingMailer {
    pub sent: std::sync::Mutex<Vec<(String, String, String)>>,
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), AppError> {
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}
