#![allow(dead_code)]

use async_trait::async_trait;
use payslip_mailer::domain::message::PayslipEmail;
use payslip_mailer::domain::ports::MailTransport;
use payslip_mailer::error::DispatchError;
use std::io::Error;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const PAYROLL_HEADER: [&str; 5] = ["NAME", "EMAIL", "BASIC SALARY", "ALLOWANCES", "DEDUCTIONS"];

/// Writes a payroll table with `rows` employees named `Employee 1..=rows`.
pub fn generate_payroll_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let mut wtr = csv::WriterBuilder::new().from_path(path)?;
    wtr.write_record(PAYROLL_HEADER)?;

    for i in 1..=rows {
        wtr.write_record([
            format!("Employee {i}"),
            format!("employee{i}@example.com"),
            format!("{}.00", 3000 + i * 100),
            "250.00".to_string(),
            "125.50".to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes a complete settings file for the given sender.
pub fn write_config(path: &Path, sender: &str) -> Result<(), Error> {
    let content = format!(
        "[EMAIL]\n\
         SMTP_SERVER = smtp.example.com\n\
         SMTP_PORT = 587\n\
         FROM_EMAIL = {sender}\n\
         EMAIL_PASSWORD = \"app-password\"\n\
         \n\
         [PAYSLIP]\n\
         COMPANY_NAME = \"Acme Holdings\"\n\
         DEFAULT_STYLE_HEADING = navy\n\
         DEFAULT_STYLE_BODY = black\n"
    );
    std::fs::write(path, content)
}

/// Accepts every message except those addressed to `reject_logins`, which
/// fail the way a relay refusing the credential would.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    reject_logins: Vec<String>,
    accepted: Arc<Mutex<Vec<PayslipEmail>>>,
}

impl ScriptedTransport {
    pub fn rejecting(addresses: &[&str]) -> Self {
        Self {
            reject_logins: addresses.iter().map(|a| a.to_string()).collect(),
            accepted: Arc::default(),
        }
    }

    pub fn accepted(&self) -> Vec<PayslipEmail> {
        self.accepted.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailTransport for ScriptedTransport {
    async fn send(&self, email: PayslipEmail) -> Result<(), DispatchError> {
        if self.reject_logins.contains(&email.to) {
            return Err(DispatchError::Authentication(
                "535 5.7.8 Username and Password not accepted".to_string(),
            ));
        }
        self.accepted.lock().unwrap().push(email);
        Ok(())
    }
}
