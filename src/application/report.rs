use crate::application::generator::GenerationOutcome;
use crate::application::sender::SendOutcome;
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable account of one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub generated: Vec<GenerationOutcome>,
    /// `None` when the send phase was skipped.
    pub delivery: Option<SendOutcome>,
}

impl RunReport {
    pub fn generated_count(&self) -> usize {
        self.generated.iter().filter(|o| o.is_generated()).count()
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::generator::GenerationStatus;
    use crate::application::sender::SendSummary;
    use std::path::PathBuf;

    fn report() -> RunReport {
        RunReport {
            generated: vec![
                GenerationOutcome {
                    employee_id: "A0001".to_string(),
                    name: "Ann".to_string(),
                    status: GenerationStatus::Generated {
                        path: PathBuf::from("payslips/A0001.pdf"),
                    },
                },
                GenerationOutcome {
                    employee_id: "A0002".to_string(),
                    name: "Bob".to_string(),
                    status: GenerationStatus::Failed {
                        reason: "disk full".to_string(),
                    },
                },
            ],
            delivery: Some(SendOutcome::Completed(SendSummary {
                total: 2,
                sent: 1,
                failed: 1,
            })),
        }
    }

    #[test]
    fn test_generated_count_ignores_failures() {
        assert_eq!(report().generated_count(), 1);
    }

    #[test]
    fn test_write_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        report().write_json(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["generated"][0]["status"], "generated");
        assert_eq!(json["generated"][1]["reason"], "disk full");
        assert_eq!(json["delivery"]["outcome"], "completed");
        assert_eq!(json["delivery"]["sent"], 1);
    }

    #[test]
    fn test_skipped_delivery_is_null() {
        let json = serde_json::to_value(RunReport::default()).unwrap();
        assert!(json["delivery"].is_null());
    }
}
