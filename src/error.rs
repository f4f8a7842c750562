use miette::Diagnostic;
use thiserror::Error;

/// Crate-wide error for the load and generate phases.
///
/// Per-record render and dispatch faults never surface through this type;
/// the batch loops absorb them into outcomes.
#[derive(Error, Debug, Diagnostic)]
pub enum PayslipError {
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Record(#[from] RecordError),
}

pub type Result<T> = std::result::Result<T, PayslipError>;

/// Faults that make the settings unusable. Any of these aborts the run
/// before a single record is touched.
#[derive(Error, Debug, Diagnostic)]
pub enum ConfigError {
    #[error("configuration file not found: {path}")]
    #[diagnostic(
        code(payslip::config::not_found),
        help("create the settings file or point --config at one. Example contents:\n{example}")
    )]
    NotFound { path: String, example: &'static str },

    #[error("failed to parse configuration file '{path}': {message}")]
    #[diagnostic(code(payslip::config::unreadable))]
    Unreadable { path: String, message: String },

    #[error("missing required configuration: {}", .keys.join(", "))]
    #[diagnostic(
        code(payslip::config::missing),
        help("set these keys in the [EMAIL] section or export them as environment variables")
    )]
    Missing { keys: Vec<String> },

    #[error("invalid value '{value}' for {key}: {reason}")]
    #[diagnostic(code(payslip::config::invalid))]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Faults in the payroll input table.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("malformed payroll row {row}: {message}")]
    Malformed { row: usize, message: String },
}

/// Faults raised while composing or writing a single payslip document.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("layout error: {0}")]
    Layout(String),
}

/// Classified failure of a single email delivery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// The relay rejected the sender identity or credential.
    #[error("authentication rejected: {0}")]
    Authentication(String),
    /// Network or relay protocol fault.
    #[error("transport fault: {0}")]
    Transport(String),
    /// Attachment read, message composition or teardown fault.
    #[error("local fault: {0}")]
    Local(String),
}
