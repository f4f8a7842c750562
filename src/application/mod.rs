//! Batch orchestration: render every payslip, then mail every payslip.
//!
//! Both phases absorb per-record faults into outcomes so one bad employee
//! never stops the rest of the run.

pub mod dispatcher;
pub mod generator;
pub mod report;
pub mod sender;

pub use dispatcher::MailDispatcher;
pub use generator::{BatchGenerator, GenerationOutcome, GenerationStatus};
pub use report::RunReport;
pub use sender::{BatchSender, SendOutcome, SendSummary};
