//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - applicant inputs (`ApplicantProfile`, `HomeOwnership`, `LoanIntent`)
//! - engine output (`RiskAssessment`)
//! - presentation output (`StatusSummary`, `ChartSpec`)

pub mod types;

pub use types::*;
