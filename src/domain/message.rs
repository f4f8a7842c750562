/// A composed payslip email, independent of any wire format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: PayslipAttachment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipAttachment {
    pub filename: String,
    pub content_type: &'static str,
    pub content: Vec<u8>,
}
