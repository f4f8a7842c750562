use super::message::PayslipEmail;
use super::record::EmployeeRecord;
use crate::error::{DispatchError, RenderError};
use async_trait::async_trait;
use std::path::Path;

/// Turns one record into a document at `destination`, overwriting any
/// previous file there.
pub trait PayslipRenderer: Send + Sync {
    fn render(&self, record: &EmployeeRecord, destination: &Path) -> Result<(), RenderError>;
}

/// Delivers one composed email. Each call is an independent session.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: PayslipEmail) -> Result<(), DispatchError>;
}

pub type PayslipRendererBox = Box<dyn PayslipRenderer>;
pub type MailTransportBox = Box<dyn MailTransport>;
