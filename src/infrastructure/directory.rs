use crate::domain::record::EmployeeId;
use std::io;
use std::path::{Path, PathBuf};

/// Output directory used when `--out-dir` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "payslips";
/// Extension of every rendered payslip.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// The directory holding one document per employee, named `<id>.pdf`.
///
/// A document's presence here is the only signal that a record is ready
/// to be mailed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayslipDirectory {
    root: PathBuf,
}

impl PayslipDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Creates the directory if absent. Idempotent.
    pub fn ensure(&self) -> io::Result<()> {
        std::fs::create_dir_all(&self.root)
    }

    pub fn path_for(&self, id: &EmployeeId) -> PathBuf {
        self.root.join(format!("{id}.{DOCUMENT_EXTENSION}"))
    }

    pub fn has_document(&self, id: &EmployeeId) -> bool {
        self.path_for(id).exists()
    }
}

impl Default for PayslipDirectory {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}
