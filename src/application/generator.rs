use crate::domain::ports::PayslipRendererBox;
use crate::domain::record::RecordSet;
use crate::error::Result;
use crate::infrastructure::directory::PayslipDirectory;
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// What happened to one record during generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutcome {
    pub employee_id: String,
    pub name: String,
    #[serde(flatten)]
    pub status: GenerationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerationStatus {
    Generated { path: PathBuf },
    Failed { reason: String },
}

impl GenerationOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self.status, GenerationStatus::Generated { .. })
    }
}

/// Renders one document per record into the payslip directory.
pub struct BatchGenerator {
    renderer: PayslipRendererBox,
    directory: PayslipDirectory,
}

impl BatchGenerator {
    pub fn new(renderer: PayslipRendererBox, directory: PayslipDirectory) -> Self {
        Self {
            renderer,
            directory,
        }
    }

    /// Renders every record in input order.
    ///
    /// A failing record is logged and recorded; the batch moves on. Only a
    /// failure to create the output directory ends the call early.
    pub fn generate_all(&self, records: &RecordSet) -> Result<Vec<GenerationOutcome>> {
        self.directory.ensure()?;

        let outcomes = records
            .iter()
            .map(|record| {
                let path = self.directory.path_for(record.employee_id());
                let status = match self.renderer.render(record, &path) {
                    Ok(()) => {
                        info!(
                            employee_id = %record.employee_id(),
                            "Payslip generated for {} (ID: {})",
                            record.name(),
                            record.employee_id()
                        );
                        GenerationStatus::Generated { path }
                    }
                    Err(e) => {
                        error!(
                            employee_id = %record.employee_id(),
                            "Error generating payslip for {}: {}",
                            record.name(),
                            e
                        );
                        GenerationStatus::Failed {
                            reason: e.to_string(),
                        }
                    }
                };
                GenerationOutcome {
                    employee_id: record.employee_id().to_string(),
                    name: record.name().to_string(),
                    status,
                }
            })
            .collect();

        Ok(outcomes)
    }
}
