//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - collected from any shell (CLI flags, TUI form, HTTP JSON)
//! - passed through the assessment pipeline unchanged
//! - exported to JSON for downstream renderers

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Housing situation presented by the input form.
///
/// This is the *advertised* closed set. The profile itself carries the raw
/// string label, because the encoder artifacts are the source of truth for
/// which labels were seen at training time (see `features`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum HomeOwnership {
    Rent,
    Mortgage,
    Own,
}

impl HomeOwnership {
    /// Wire label, matching the training-time vocabulary.
    pub fn label(self) -> &'static str {
        match self {
            HomeOwnership::Rent => "Rent",
            HomeOwnership::Mortgage => "Mortgage",
            HomeOwnership::Own => "Own",
        }
    }

    pub const ALL: [HomeOwnership; 3] = [
        HomeOwnership::Rent,
        HomeOwnership::Mortgage,
        HomeOwnership::Own,
    ];
}

/// Stated purpose of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum LoanIntent {
    Personal,
    Education,
    Medical,
    Venture,
}

impl LoanIntent {
    /// Wire label, matching the training-time vocabulary.
    pub fn label(self) -> &'static str {
        match self {
            LoanIntent::Personal => "Personal",
            LoanIntent::Education => "Education",
            LoanIntent::Medical => "Medical",
            LoanIntent::Venture => "Venture",
        }
    }

    pub const ALL: [LoanIntent; 4] = [
        LoanIntent::Personal,
        LoanIntent::Education,
        LoanIntent::Medical,
        LoanIntent::Venture,
    ];
}

/// One applicant, as entered in the form.
///
/// Categorical fields are raw strings on purpose: the closed sets above are
/// what the shells offer, but the HTTP shell can submit anything, and the
/// encoding step owns the out-of-vocabulary policy. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: f64,
    pub annual_income: f64,
    pub loan_amount: f64,
    pub credit_score: f64,
    pub employment_years: f64,
    pub home_ownership: String,
    pub loan_intent: String,
    pub prior_default: bool,
}

impl ApplicantProfile {
    /// Validation boundary applied before feature building.
    ///
    /// Rejects values the classifier was never meant to see: non-finite
    /// numerics and negative magnitudes. Age and credit score outside their
    /// advisory ranges ([18, 80] and [300, 850]) are accepted unchanged.
    pub fn validate(&self) -> Result<(), String> {
        let numerics = [
            ("age", self.age),
            ("annual_income", self.annual_income),
            ("loan_amount", self.loan_amount),
            ("credit_score", self.credit_score),
            ("employment_years", self.employment_years),
        ];
        for (name, value) in numerics {
            if !value.is_finite() {
                return Err(format!("Field `{name}` must be a finite number."));
            }
        }
        if self.annual_income < 0.0 {
            return Err("Field `annual_income` must be non-negative.".to_string());
        }
        if self.loan_amount < 0.0 {
            return Err("Field `loan_amount` must be non-negative.".to_string());
        }
        if self.employment_years < 0.0 {
            return Err("Field `employment_years` must be non-negative.".to_string());
        }
        Ok(())
    }
}

/// Engine output: the classifier decision plus both class probabilities.
///
/// Probabilities are percentages and sum to 100 (within floating-point
/// tolerance). The decision comes from the classifier's own operating point,
/// not from a 50% cutoff, so the two can diverge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub is_high_risk: bool,
    pub default_probability: f64,
    pub repayment_probability: f64,
}

/// Final decision surfaced to the user. Strictly binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Approve,
    Decline,
}

impl Decision {
    pub fn display_name(self) -> &'static str {
        match self {
            Decision::Approve => "APPROVE",
            Decision::Decline => "DECLINE",
        }
    }
}

/// Status card content: decision, headline, probability line, recommendation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusSummary {
    pub decision: Decision,
    pub headline: String,
    pub probability_label: String,
    pub probability_pct: f64,
    pub recommendation: String,
}

/// Chart geometry. `Gauge` is an angular dial, `Bullet` a horizontal bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartShape {
    Gauge,
    Bullet,
}

/// Semantic tone of a chart band; renderers map tones to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandTone {
    Good,
    Caution,
    Danger,
}

/// One colored interval `[from, to)` on a chart axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartBand {
    pub from: f64,
    pub to: f64,
    pub tone: BandTone,
}

/// Declarative description of a gauge/bullet visualization.
///
/// The core produces only this spec, never pixels; the ASCII renderer, the
/// TUI, and any downstream UI all draw from the same description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    pub shape: ChartShape,
    pub value: f64,
    pub axis_min: f64,
    pub axis_max: f64,
    pub bands: Vec<ChartBand>,
    pub threshold: f64,
    /// Suffix appended when displaying the value (e.g. "%").
    pub suffix: Option<String>,
}

impl ChartSpec {
    /// Map an axis value to a `[0, 1]` position, clamping out-of-range values
    /// so renderers never index outside their grid.
    pub fn position(&self, value: f64) -> f64 {
        let span = self.axis_max - self.axis_min;
        if !(span.is_finite() && span > 0.0) {
            return 0.0;
        }
        ((value - self.axis_min) / span).clamp(0.0, 1.0)
    }

    /// Tone of the band covering `value`.
    ///
    /// Bands are contiguous and ascending; values past the last band edge
    /// take the last band's tone (the top band is closed, per the fixed
    /// banding policy).
    pub fn tone_at(&self, value: f64) -> Option<BandTone> {
        for band in &self.bands {
            if value < band.to {
                return Some(band.tone);
            }
        }
        self.bands.last().map(|b| b.tone)
    }

    /// Value with its display suffix, formatted to one decimal place.
    pub fn value_text(&self) -> String {
        match &self.suffix {
            Some(s) => format!("{:.1}{s}", self.value),
            None => format!("{:.1}", self.value),
        }
    }
}
