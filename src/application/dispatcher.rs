use crate::domain::message::{PayslipAttachment, PayslipEmail};
use crate::domain::ports::MailTransportBox;
use crate::domain::record::EmployeeRecord;
use crate::error::DispatchError;
use crate::infrastructure::directory::DOCUMENT_EXTENSION;
use std::path::Path;
use tracing::{error, info};

const ATTACHMENT_CONTENT_TYPE: &str = "application/pdf";

/// Composes and sends one payslip email per call.
///
/// Every fault is classified, logged and turned into `false`; nothing
/// escapes to the caller.
pub struct MailDispatcher {
    transport: MailTransportBox,
    sender: String,
    organization: String,
}

impl MailDispatcher {
    pub fn new(
        transport: MailTransportBox,
        sender: impl Into<String>,
        organization: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            sender: sender.into(),
            organization: organization.into(),
        }
    }

    /// Sends `record`'s payslip at `document`. Returns `true` once the relay
    /// accepted the message.
    pub async fn send_one(&self, record: &EmployeeRecord, document: &Path) -> bool {
        match self.try_send(record, document).await {
            Ok(()) => {
                info!(
                    employee_id = %record.employee_id(),
                    "Email sent successfully to {}",
                    record.email()
                );
                true
            }
            Err(DispatchError::Authentication(reason)) => {
                error!(
                    employee_id = %record.employee_id(),
                    %reason,
                    "Email authentication failed for {}",
                    record.email()
                );
                false
            }
            Err(DispatchError::Transport(reason)) => {
                error!(
                    employee_id = %record.employee_id(),
                    "SMTP error sending email to {}: {}",
                    record.email(),
                    reason
                );
                false
            }
            Err(DispatchError::Local(reason)) => {
                error!(
                    employee_id = %record.employee_id(),
                    "Error sending email to {}: {}",
                    record.email(),
                    reason
                );
                false
            }
        }
    }

    pub fn compose(&self, record: &EmployeeRecord, document: Vec<u8>) -> PayslipEmail {
        PayslipEmail {
            from: self.sender.clone(),
            to: record.email().to_string(),
            subject: format!("Your Monthly Payslip from {}", self.organization),
            body: format!(
                "Dear {},\nPlease find your monthly payslip attached to this email.\nBest regards,\n{} Payroll Department",
                record.name(),
                self.organization
            ),
            attachment: PayslipAttachment {
                filename: format!("{}_payslip.{DOCUMENT_EXTENSION}", record.employee_id()),
                content_type: ATTACHMENT_CONTENT_TYPE,
                content: document,
            },
        }
    }

    async fn try_send(&self, record: &EmployeeRecord, document: &Path) -> Result<(), DispatchError> {
        let content = tokio::fs::read(document).await.map_err(|e| {
            DispatchError::Local(format!("cannot read {}: {e}", document.display()))
        })?;
        let email = self.compose(record, content);
        self.transport.send(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::PayslipEmail;
    use crate::domain::money::Money;
    use crate::domain::ports::MailTransport;
    use crate::infrastructure::outbox::OutboxTransport;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct FailingTransport(DispatchError);

    #[async_trait]
    impl MailTransport for FailingTransport {
        async fn send(&self, _email: PayslipEmail) -> Result<(), DispatchError> {
            Err(self.0.clone())
        }
    }

    fn record() -> EmployeeRecord {
        EmployeeRecord::new(
            3,
            "Nashe Pastor",
            "nashe@example.com",
            Money::new(dec!(4500)),
            Money::new(dec!(1000)),
            Money::new(dec!(500)),
        )
        .unwrap()
    }

    fn document(dir: &tempfile::TempDir) -> std::path::PathBuf {
        let path = dir.path().join("A0003.pdf");
        std::fs::write(&path, b"%PDF-1.3 payslip").unwrap();
        path
    }

    #[test]
    fn test_compose_uses_templates() {
        let dispatcher =
            MailDispatcher::new(Box::new(OutboxTransport::new()), "payroll@acme.test", "Acme");
        let email = dispatcher.compose(&record(), b"pdf".to_vec());

        assert_eq!(email.from, "payroll@acme.test");
        assert_eq!(email.to, "nashe@example.com");
        assert_eq!(email.subject, "Your Monthly Payslip from Acme");
        assert!(email.body.starts_with("Dear Nashe Pastor,"));
        assert!(email.body.ends_with("Acme Payroll Department"));
        assert_eq!(email.attachment.filename, "A0003_payslip.pdf");
        assert_eq!(email.attachment.content_type, "application/pdf");
        assert_eq!(email.attachment.content, b"pdf".to_vec());
    }

    #[tokio::test]
    async fn test_send_one_delivers_document_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxTransport::new();
        let dispatcher = MailDispatcher::new(Box::new(outbox.clone()), "payroll@acme.test", "Acme");

        assert!(dispatcher.send_one(&record(), &document(&dir)).await);

        let delivered = outbox.delivered().await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].attachment.content, b"%PDF-1.3 payslip".to_vec());
    }

    #[tokio::test]
    async fn test_missing_attachment_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let outbox = OutboxTransport::new();
        let dispatcher = MailDispatcher::new(Box::new(outbox.clone()), "payroll@acme.test", "Acme");

        let sent = dispatcher
            .send_one(&record(), &dir.path().join("missing.pdf"))
            .await;

        assert!(!sent);
        assert!(outbox.is_empty().await);
    }

    #[tokio::test]
    async fn test_every_fault_class_returns_false() {
        let dir = tempfile::tempdir().unwrap();
        let path = document(&dir);

        for fault in [
            DispatchError::Authentication("535 bad credentials".to_string()),
            DispatchError::Transport("connection reset".to_string()),
            DispatchError::Local("teardown failed".to_string()),
        ] {
            let dispatcher =
                MailDispatcher::new(Box::new(FailingTransport(fault)), "payroll@acme.test", "Acme");
            assert!(!dispatcher.send_one(&record(), &path).await);
        }
    }
}
