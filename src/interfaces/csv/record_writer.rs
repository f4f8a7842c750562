use crate::domain::money::Money;
use crate::domain::record::RecordSet;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 6] = [
    "employee_id",
    "name",
    "basic_salary",
    "allowances",
    "deductions",
    "net_salary",
];

/// Writes the computed salary table, one line per record.
pub struct SalaryTableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> SalaryTableWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_records(&mut self, records: &RecordSet) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for record in records {
            self.writer.write_record([
                record.employee_id().to_string(),
                record.name().to_string(),
                amount(record.basic_salary()),
                amount(record.allowances()),
                amount(record.deductions()),
                amount(record.net_salary()),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Plain two-decimal amount, without the currency symbol or grouping.
fn amount(money: Money) -> String {
    format!("{:.2}", money.value().round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::PayrollRow;
    use rust_decimal_macros::dec;

    #[test]
    fn test_writer_emits_header_and_net_salary() {
        let records = RecordSet::from_rows([PayrollRow {
            name: "Anisha Gurure".to_string(),
            email: "anisha@example.com".to_string(),
            basic_salary: Money::new(dec!(4500.00)),
            allowances: Money::new(dec!(1000.00)),
            deductions: Money::new(dec!(500.00)),
        }])
        .unwrap();
        let mut buffer = Vec::new();

        SalaryTableWriter::new(&mut buffer)
            .write_records(&records)
            .unwrap();

        let output = String::from_utf8(buffer).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("employee_id,name,basic_salary,allowances,deductions,net_salary")
        );
        assert_eq!(
            lines.next(),
            Some("A0001,Anisha Gurure,4500.00,1000.00,500.00,5000.00")
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_writer_keeps_negative_net() {
        let records = RecordSet::from_rows([PayrollRow {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            basic_salary: Money::new(dec!(100)),
            allowances: Money::ZERO,
            deductions: Money::new(dec!(150)),
        }])
        .unwrap();
        let mut buffer = Vec::new();

        SalaryTableWriter::new(&mut buffer)
            .write_records(&records)
            .unwrap();

        assert!(String::from_utf8(buffer).unwrap().ends_with("Ann,100.00,0.00,150.00,-50.00\n"));
    }
}
