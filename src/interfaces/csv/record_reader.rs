use crate::domain::record::{PayrollRow, RecordSet};
use crate::error::{RecordError, Result};
use std::io::Read;

/// Reads the payroll table from a CSV source.
///
/// Headers are matched case-insensitively and `_` counts as a space, so
/// `basic_salary` and `BASIC SALARY` name the same column. Extra columns,
/// including any identifier or net salary column, are ignored.
pub struct RecordReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> RecordReader<R> {
    /// Creates a new `RecordReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Reads every row, assigning identifiers in input order.
    ///
    /// The first row that fails to deserialize aborts the load; its 1-based
    /// data row number is reported.
    pub fn read_all(mut self) -> Result<RecordSet> {
        let headers = self.reader.headers()?.iter().map(normalize).collect();
        self.reader.set_headers(headers);

        let rows = self
            .reader
            .into_deserialize::<PayrollRow>()
            .enumerate()
            .map(|(index, row)| {
                row.map_err(|e| RecordError::Malformed {
                    row: index + 1,
                    message: e.to_string(),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(RecordSet::from_rows(rows)?)
    }
}

fn normalize(header: &str) -> String {
    header.trim().replace('_', " ").to_uppercase()
}
