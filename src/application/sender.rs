use crate::application::dispatcher::MailDispatcher;
use crate::domain::record::RecordSet;
use crate::infrastructure::directory::PayslipDirectory;
use serde::Serialize;
use std::fmt;
use tracing::{info, warn};

/// Delivery totals. `failed` is always `total - sent`, so records skipped
/// for a missing document count as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendSummary {
    pub total: usize,
    pub sent: usize,
    pub failed: usize,
}

impl SendSummary {
    fn new(total: usize, sent: usize) -> Self {
        Self {
            total,
            sent,
            failed: total - sent,
        }
    }
}

impl fmt::Display for SendSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Summary:")?;
        writeln!(f, "Total employees: {}", self.total)?;
        writeln!(f, "Emails sent successfully: {}", self.sent)?;
        write!(f, "Failed emails: {}", self.failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SendOutcome {
    /// Documents were missing and the operator did not agree to continue.
    Declined { missing: Vec<String> },
    Completed(SendSummary),
}

impl SendOutcome {
    pub fn sent(&self) -> usize {
        match self {
            SendOutcome::Declined { .. } => 0,
            SendOutcome::Completed(summary) => summary.sent,
        }
    }
}

/// Mails every record's generated payslip, one at a time, in input order.
pub struct BatchSender {
    dispatcher: MailDispatcher,
    directory: PayslipDirectory,
}

impl BatchSender {
    pub fn new(dispatcher: MailDispatcher, directory: PayslipDirectory) -> Self {
        Self {
            dispatcher,
            directory,
        }
    }

    /// Names of the employees whose document is absent, in input order.
    pub fn missing_documents(&self, records: &RecordSet) -> Vec<String> {
        records
            .iter()
            .filter(|record| !self.directory.has_document(record.employee_id()))
            .map(|record| record.name().to_string())
            .collect()
    }

    /// Sends every available payslip.
    ///
    /// With documents missing and `force` unset nothing is sent and the
    /// missing names come back in [`SendOutcome::Declined`].
    pub async fn send_all(&self, records: &RecordSet, force: bool) -> SendOutcome {
        let missing = self.missing_documents(records);
        if !missing.is_empty() {
            if !force {
                info!(missing = missing.len(), "sending declined");
                return SendOutcome::Declined { missing };
            }
            warn!(missing = missing.len(), "continuing without missing payslips");
        }

        let mut sent = 0;
        for record in records {
            if !self.directory.has_document(record.employee_id()) {
                warn!(
                    employee_id = %record.employee_id(),
                    "Skipping {}: payslip not found",
                    record.name()
                );
                continue;
            }
            let path = self.directory.path_for(record.employee_id());
            if self.dispatcher.send_one(record, &path).await {
                sent += 1;
            }
        }

        SendOutcome::Completed(SendSummary::new(records.len(), sent))
    }
}
