//! Presentation adapter: turn an assessment into user-facing output.
//!
//! Everything here is pure formatting: the only branch is the binary
//! decision, and the chart banding/thresholds are fixed policy shared with
//! the original scorecard. Keeping this in one place keeps the engine clean
//! and makes the output golden-testable.

use crate::domain::{
    BandTone, ChartBand, ChartSpec, ChartShape, Decision, RiskAssessment, StatusSummary,
};

pub mod format;

pub use format::*;

/// Fixed response body when the artifact store is degraded.
pub const UNAVAILABLE_MESSAGE: &str =
    "System unavailable: risk model artifacts failed to load. No assessment was made.";

/// Credit-score gauge threshold (subprime cutoff marker).
pub const SCORE_THRESHOLD: f64 = 600.0;

/// DTI bullet threshold (percent).
pub const DTI_THRESHOLD: f64 = 40.0;

/// Build the status card content for a decision.
pub fn build_summary(assessment: &RiskAssessment) -> StatusSummary {
    if assessment.is_high_risk {
        StatusSummary {
            decision: Decision::Decline,
            headline: "HIGH RISK DETECTED".to_string(),
            probability_label: "Default Probability".to_string(),
            probability_pct: assessment.default_probability,
            recommendation: "RECOMMENDATION: DECLINE".to_string(),
        }
    } else {
        StatusSummary {
            decision: Decision::Approve,
            headline: "LOAN APPROVED".to_string(),
            probability_label: "Repayment Score".to_string(),
            probability_pct: assessment.repayment_probability,
            recommendation: "RECOMMENDATION: APPROVE".to_string(),
        }
    }
}

/// Credit-score gauge: [300, 850] with the fixed three-band policy and a
/// threshold marker at 600, regardless of the input value.
pub fn credit_gauge_spec(credit_score: f64) -> ChartSpec {
    ChartSpec {
        title: "FICO Score".to_string(),
        shape: ChartShape::Gauge,
        value: credit_score,
        axis_min: 300.0,
        axis_max: 850.0,
        bands: vec![
            ChartBand {
                from: 300.0,
                to: 600.0,
                tone: BandTone::Danger,
            },
            ChartBand {
                from: 600.0,
                to: 750.0,
                tone: BandTone::Caution,
            },
            ChartBand {
                from: 750.0,
                to: 850.0,
                tone: BandTone::Good,
            },
        ],
        threshold: SCORE_THRESHOLD,
        suffix: None,
    }
}

/// Debt-load bullet: DTI as a percentage on [0, 100], threshold at 40%.
pub fn dti_bullet_spec(dti_ratio: f64) -> ChartSpec {
    ChartSpec {
        title: "Debt Load (DTI)".to_string(),
        shape: ChartShape::Bullet,
        value: dti_ratio * 100.0,
        axis_min: 0.0,
        axis_max: 100.0,
        bands: vec![
            ChartBand {
                from: 0.0,
                to: 30.0,
                tone: BandTone::Good,
            },
            ChartBand {
                from: 30.0,
                to: 45.0,
                tone: BandTone::Caution,
            },
            ChartBand {
                from: 45.0,
                to: 100.0,
                tone: BandTone::Danger,
            },
        ],
        threshold: DTI_THRESHOLD,
        suffix: Some("%".to_string()),
    }
}
