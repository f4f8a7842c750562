//! What goes on a payslip, in page order, before any drawing happens.

use crate::domain::record::EmployeeRecord;
use chrono::NaiveDate;

pub const SUBHEADING: &str = "Monthly Payslip";

const DISCLAIMER: [&str; 2] = [
    "This payslip was generated automatically.",
    "Please contact the payroll department if you notice any discrepancies.",
];

const SIGNATURE_RULE: &str = "_______________________________";
const SIGNATORY_NAME: &str = "Ms. Jane Smith";
const SIGNATORY_TITLE: &str = "Payroll Manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipContent {
    pub heading: String,
    pub subheading: &'static str,
    pub details: Vec<String>,
    /// Label and formatted amount. The first row is drawn as the header.
    pub salary_rows: Vec<(&'static str, String)>,
    pub footer: Vec<String>,
    pub signature: Vec<String>,
}

impl PayslipContent {
    pub fn new(record: &EmployeeRecord, organization: &str, issued: NaiveDate) -> Self {
        Self {
            heading: organization.to_string(),
            subheading: SUBHEADING,
            details: vec![
                format!("Employee Name: {}", record.name()),
                format!("Employee ID: {}", record.employee_id()),
                format!("Date: {}", issued.format("%B %Y")),
            ],
            salary_rows: vec![
                ("Basic Salary:", record.basic_salary().to_string()),
                ("Allowances:", record.allowances().to_string()),
                ("Deductions:", record.deductions().to_string()),
                ("Net Salary:", record.net_salary().to_string()),
            ],
            footer: std::iter::once(organization.to_string())
                .chain(DISCLAIMER.iter().map(|line| line.to_string()))
                .collect(),
            signature: vec![
                SIGNATURE_RULE.to_string(),
                SIGNATORY_NAME.to_string(),
                SIGNATORY_TITLE.to_string(),
                organization.to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::money::Money;
    use rust_decimal_macros::dec;

    fn record() -> EmployeeRecord {
        EmployeeRecord::new(
            2,
            "Demy Bingura",
            "demy@example.com",
            Money::new(dec!(4500.00)),
            Money::new(dec!(1000.00)),
            Money::new(dec!(500.00)),
        )
        .unwrap()
    }

    #[test]
    fn test_content_order_and_formatting() {
        let issued = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        let content = PayslipContent::new(&record(), "Revenge Fashion", issued);

        assert_eq!(content.heading, "Revenge Fashion");
        assert_eq!(content.subheading, "Monthly Payslip");
        assert_eq!(
            content.details,
            vec![
                "Employee Name: Demy Bingura",
                "Employee ID: A0002",
                "Date: October 2026",
            ]
        );
        assert_eq!(
            content.salary_rows,
            vec![
                ("Basic Salary:", "$4,500.00".to_string()),
                ("Allowances:", "$1,000.00".to_string()),
                ("Deductions:", "$500.00".to_string()),
                ("Net Salary:", "$5,000.00".to_string()),
            ]
        );
    }

    #[test]
    fn test_footer_and_signature_name_the_organization() {
        let issued = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let content = PayslipContent::new(&record(), "Acme", issued);

        assert_eq!(content.footer[0], "Acme");
        assert_eq!(content.footer.len(), 3);
        assert!(content.footer[1].contains("generated automatically"));
        assert_eq!(
            content.signature,
            vec![SIGNATURE_RULE, "Ms. Jane Smith", "Payroll Manager", "Acme"]
        );
    }
}
