use crate::domain::message::PayslipEmail;
use crate::domain::ports::MailTransport;
use crate::error::DispatchError;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// An in-memory transport that accepts every message.
///
/// Backs `--dry-run`: the whole pipeline runs, nothing leaves the machine.
/// Clones share the same outbox.
#[derive(Default, Clone)]
pub struct OutboxTransport {
    delivered: Arc<RwLock<Vec<PayslipEmail>>>,
}

impl OutboxTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages accepted so far, in send order.
    pub async fn delivered(&self) -> Vec<PayslipEmail> {
        self.delivered.read().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.delivered.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.delivered.read().await.is_empty()
    }
}

#[async_trait]
impl MailTransport for OutboxTransport {
    async fn send(&self, email: PayslipEmail) -> Result<(), DispatchError> {
        info!(
            to = %email.to,
            attachment = %email.attachment.filename,
            bytes = email.attachment.content.len(),
            "message held in outbox"
        );
        self.delivered.write().await.push(email);
        Ok(())
    }
}
