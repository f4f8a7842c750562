//! Monthly payslip batch: read the payroll table, render one PDF per
//! employee, then mail each document to its owner over SMTP.
//!
//! Per-record faults are logged and counted; only configuration and input
//! faults stop a run.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
