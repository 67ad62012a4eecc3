//! Write an assessment response to a JSON file.
//!
//! The export is the same shape the HTTP shell returns: summary, raw
//! assessment, both chart specs, and any encoding notes. Downstream tools can
//! re-render the charts from the specs without re-running the model.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::AssessmentOutput;
use crate::error::AppError;

/// Write a full assessment response as pretty-printed JSON.
pub fn write_assessment_json(path: &Path, output: &AssessmentOutput) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(
            2,
            format!("Failed to create export file '{}': {e}", path.display()),
        )
    })?;

    serde_json::to_writer_pretty(file, output)
        .map_err(|e| AppError::new(2, format!("Failed to write assessment JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Decision, RiskAssessment};
    use crate::report;

    #[test]
    fn export_round_trips_through_serde() {
        let assessment = RiskAssessment {
            is_high_risk: false,
            default_probability: 21.5,
            repayment_probability: 78.5,
        };
        let output = AssessmentOutput {
            summary: report::build_summary(&assessment),
            assessment,
            gauge: report::credit_gauge_spec(680.0),
            dti: report::dti_bullet_spec(0.27),
            notes: vec![],
        };

        let path = std::env::temp_dir().join(format!("cg-export-{}.json", std::process::id()));
        write_assessment_json(&path, &output).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: AssessmentOutput = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.summary.decision, Decision::Approve);
        assert_eq!(parsed.gauge, output.gauge);
        assert_eq!(parsed.dti, output.dti);

        let _ = std::fs::remove_file(&path);
    }
}
