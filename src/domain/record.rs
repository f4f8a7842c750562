use super::money::Money;
use crate::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional employee code: `A0001` for the first row of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EmployeeId(String);

impl EmployeeId {
    /// Builds the identifier for the 1-based row `position`.
    pub fn from_position(position: usize) -> Self {
        Self(format!("A{position:04}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the payroll table, exactly as read.
///
/// Identifier and net salary columns are deliberately absent: both are
/// synthesized when the row becomes an [`EmployeeRecord`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PayrollRow {
    #[serde(rename = "NAME")]
    pub name: String,
    #[serde(rename = "EMAIL")]
    pub email: String,
    #[serde(rename = "BASIC SALARY")]
    pub basic_salary: Money,
    #[serde(rename = "ALLOWANCES")]
    pub allowances: Money,
    #[serde(rename = "DEDUCTIONS")]
    pub deductions: Money,
}

/// An employee's payroll entry for the current batch.
///
/// Fields are read-only; the identifier and net salary are fixed at
/// construction so the net figure can never drift from its inputs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    employee_id: EmployeeId,
    name: String,
    email: String,
    basic_salary: Money,
    allowances: Money,
    deductions: Money,
    net_salary: Money,
}

impl EmployeeRecord {
    pub fn new(
        position: usize,
        name: impl Into<String>,
        email: impl Into<String>,
        basic_salary: Money,
        allowances: Money,
        deductions: Money,
    ) -> Result<Self, RecordError> {
        let net_salary = net_salary(basic_salary, allowances, deductions).ok_or_else(|| {
            RecordError::Malformed {
                row: position,
                message: "net salary is out of range".to_string(),
            }
        })?;
        Ok(Self {
            employee_id: EmployeeId::from_position(position),
            name: name.into(),
            email: email.into(),
            basic_salary,
            allowances,
            deductions,
            net_salary,
        })
    }

    pub fn from_row(position: usize, row: PayrollRow) -> Result<Self, RecordError> {
        Self::new(
            position,
            row.name,
            row.email,
            row.basic_salary,
            row.allowances,
            row.deductions,
        )
    }

    pub fn employee_id(&self) -> &EmployeeId {
        &self.employee_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn basic_salary(&self) -> Money {
        self.basic_salary
    }

    pub fn allowances(&self) -> Money {
        self.allowances
    }

    pub fn deductions(&self) -> Money {
        self.deductions
    }

    pub fn net_salary(&self) -> Money {
        self.net_salary
    }
}

/// `basic + allowances - deductions`, unclamped. `None` on overflow.
pub fn net_salary(basic_salary: Money, allowances: Money, deductions: Money) -> Option<Money> {
    basic_salary
        .checked_add(allowances)?
        .checked_sub(deductions)
}

/// The ordered batch of records processed in one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<EmployeeRecord>,
}

impl RecordSet {
    /// Assigns identifiers by input order, starting at `A0001`.
    ///
    /// Fails on the first row whose net salary cannot be represented.
    pub fn from_rows(rows: impl IntoIterator<Item = PayrollRow>) -> Result<Self, RecordError> {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| EmployeeRecord::from_row(index + 1, row))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EmployeeRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a EmployeeRecord;
    type IntoIter = std::slice::Iter<'a, EmployeeRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
