//! Shared assessment pipeline used by every front-end.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> store check -> feature build -> inference -> presentation
//!
//! The CLI, the TUI, and the HTTP shell then focus on presentation
//! (printing vs widgets vs JSON).

use serde::{Deserialize, Serialize};

use crate::assets::AssetStore;
use crate::domain::{ApplicantProfile, ChartSpec, RiskAssessment, StatusSummary};
use crate::error::AppError;
use crate::{engine, features, report};

/// All computed outputs of a single assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentOutput {
    pub summary: StatusSummary,
    pub assessment: RiskAssessment,
    pub gauge: ChartSpec,
    pub dti: ChartSpec,
    /// Encoding fallback notes, if any (surfaced next to the result).
    pub notes: Vec<String>,
}

/// Either a full assessment or the fixed degraded-store response.
#[derive(Debug, Clone)]
pub enum AssessmentOutcome {
    Ready(Box<AssessmentOutput>),
    Unavailable,
}

/// Execute the full pipeline for one applicant.
///
/// A degraded store short-circuits to `Unavailable` for **any** input, before
/// validation and before any inference. Validation failures on a ready store
/// are usage errors (`exit code 2`) and never reach the classifier.
pub fn run_assessment(
    store: &AssetStore,
    profile: &ApplicantProfile,
) -> Result<AssessmentOutcome, AppError> {
    let Some(artifacts) = store.artifacts() else {
        return Ok(AssessmentOutcome::Unavailable);
    };

    profile.validate().map_err(|msg| AppError::new(2, msg))?;

    let built = features::build_features(
        profile,
        artifacts.home_encoder.as_ref(),
        artifacts.intent_encoder.as_ref(),
    );

    let assessment = engine::assess(artifacts, &built.vector)?;

    let summary = report::build_summary(&assessment);
    let gauge = report::credit_gauge_spec(profile.credit_score);
    let dti = report::dti_bullet_spec(built.dti_ratio);

    Ok(AssessmentOutcome::Ready(Box::new(AssessmentOutput {
        summary,
        assessment,
        gauge,
        dti,
        notes: built.fallback_notes,
    })))
}
