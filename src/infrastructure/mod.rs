//! Adapters behind the domain ports: PDF rendering, SMTP delivery, the
//! dry-run outbox and the payslip output directory.

pub mod directory;
pub mod outbox;
pub mod pdf;
pub mod smtp;
