//! Tabular input and output in CSV.

pub mod record_reader;
pub mod record_writer;

pub use record_reader::RecordReader;
pub use record_writer::SalaryTableWriter;
