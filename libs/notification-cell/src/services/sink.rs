use async_trait::async_trait;
use tracing::info;

use shared_models::CommunicationChannel;

/// Outbound boundary for rendered notifications. Implementations accept a
/// rendered message and a destination on one channel; delivery success is
/// reported as a boolean so callers can count failures without aborting a
/// batch.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(
        &self,
        channel: CommunicationChannel,
        destination: &str,
        subject: Option<&str>,
        body: &str,
    ) -> bool;
}

/// Default sink: writes the rendered message to the log. Stands in for
/// real email/SMS/voice transports, which live outside this system.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(
        &self,
        channel: CommunicationChannel,
        destination: &str,
        subject: Option<&str>,
        body: &str,
    ) -> bool {
        match subject {
            Some(subject) => info!(
                "{} notification to {}: {} | {}",
                channel, destination, subject, body
            ),
            None => info!("{} notification to {}: {}", channel, destination, body),
        }
        true
    }
}
