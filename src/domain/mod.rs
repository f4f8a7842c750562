//! Payroll domain: money, employee records, composed emails and the ports
//! the pipeline talks through.

pub mod message;
pub mod money;
pub mod ports;
pub mod record;
