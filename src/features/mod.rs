//! Feature engineering: applicant profile → ordered model feature vector.
//!
//! The classifier and scaler are order-sensitive: a reordered vector corrupts
//! predictions silently, with no runtime error. The order therefore lives in
//! exactly one place (`FEATURE_SCHEMA`), shared by this builder and the
//! golden tests.

use crate::assets::CategoryEncoder;
use crate::domain::ApplicantProfile;

pub const FEATURE_COUNT: usize = 9;

/// Training-time column order. Load-bearing; do not reorder.
pub const FEATURE_SCHEMA: [&str; FEATURE_COUNT] = [
    "Age",
    "Income",
    "Loan_Amount",
    "Credit_Score",
    "Employment_Length",
    "Home_Ownership",
    "Loan_Intent",
    "Previous_Defaults",
    "DTI_Ratio",
];

pub type FeatureVector = [f64; FEATURE_COUNT];

/// Builder output: the vector plus the derived ratio and any encoding notes.
#[derive(Debug, Clone)]
pub struct BuiltFeatures {
    pub vector: FeatureVector,
    pub dti_ratio: f64,
    /// Human-readable notes for out-of-vocabulary fallbacks, so shells can
    /// surface them next to the result.
    pub fallback_notes: Vec<String>,
}

/// Debt-to-income ratio. The `+1` is a zero-division guard fixed at training
/// time; changing it changes predictions.
pub fn dti_ratio(loan_amount: f64, annual_income: f64) -> f64 {
    loan_amount / (annual_income + 1.0)
}

/// Assemble the model input vector for one applicant.
///
/// Pure function of the profile and the read-only encoders. Out-of-vocabulary
/// categories fall back to encoded value 0 with a warning (policy documented
/// in DESIGN.md) rather than failing the request.
pub fn build_features(
    profile: &ApplicantProfile,
    home_encoder: &dyn CategoryEncoder,
    intent_encoder: &dyn CategoryEncoder,
) -> BuiltFeatures {
    let mut fallback_notes = Vec::new();

    let prior_default = if profile.prior_default { 1.0 } else { 0.0 };
    let dti = dti_ratio(profile.loan_amount, profile.annual_income);

    let home_code = encode_or_fallback(
        home_encoder,
        &profile.home_ownership,
        "home ownership",
        &mut fallback_notes,
    );
    let intent_code = encode_or_fallback(
        intent_encoder,
        &profile.loan_intent,
        "loan intent",
        &mut fallback_notes,
    );

    let vector = [
        profile.age,
        profile.annual_income,
        profile.loan_amount,
        profile.credit_score,
        profile.employment_years,
        home_code,
        intent_code,
        prior_default,
        dti,
    ];

    BuiltFeatures {
        vector,
        dti_ratio: dti,
        fallback_notes,
    }
}

fn encode_or_fallback(
    encoder: &dyn CategoryEncoder,
    raw: &str,
    field: &str,
    notes: &mut Vec<String>,
) -> f64 {
    match encoder.encode(raw) {
        Some(code) => code as f64,
        None => {
            log::warn!("unrecognized {field} '{raw}', falling back to encoded value 0");
            notes.push(format!(
                "Unrecognized {field} '{raw}'; scored with fallback encoding 0."
            ));
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::LabelEncoder;

    fn encoders() -> (LabelEncoder, LabelEncoder) {
        (
            LabelEncoder {
                classes: vec!["Mortgage".into(), "Own".into(), "Rent".into()],
            },
            LabelEncoder {
                classes: vec![
                    "Education".into(),
                    "Medical".into(),
                    "Personal".into(),
                    "Venture".into(),
                ],
            },
        )
    }

    fn profile() -> ApplicantProfile {
        ApplicantProfile {
            age: 30.0,
            annual_income: 55000.0,
            loan_amount: 15000.0,
            credit_score: 680.0,
            employment_years: 5.0,
            home_ownership: "Rent".to_string(),
            loan_intent: "Personal".to_string(),
            prior_default: false,
        }
    }

    #[test]
    fn golden_feature_vector() {
        let (home, intent) = encoders();
        let built = build_features(&profile(), &home, &intent);

        let expected = [
            30.0,
            55000.0,
            15000.0,
            680.0,
            5.0,
            2.0, // Rent
            2.0, // Personal
            0.0,
            15000.0 / 55001.0,
        ];
        assert_eq!(built.vector.len(), FEATURE_SCHEMA.len());
        for (got, want) in built.vector.iter().zip(expected.iter()) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
        assert!(built.fallback_notes.is_empty());
    }

    #[test]
    fn prior_default_maps_to_one() {
        let (home, intent) = encoders();
        let mut p = profile();
        p.prior_default = true;
        let built = build_features(&p, &home, &intent);
        assert_eq!(built.vector[7], 1.0);
    }

    #[test]
    fn dti_monotone_in_loan_and_income() {
        let base = dti_ratio(15000.0, 55000.0);
        assert!(dti_ratio(16000.0, 55000.0) > base);
        assert!(dti_ratio(15000.0, 60000.0) < base);
    }

    #[test]
    fn dti_zero_loan_is_zero() {
        assert_eq!(dti_ratio(0.0, 0.0), 0.0);
        assert_eq!(dti_ratio(0.0, 123456.0), 0.0);
    }

    #[test]
    fn dti_guard_handles_zero_income() {
        // income 0 divides by 1, not 0.
        assert!((dti_ratio(500.0, 0.0) - 500.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_category_falls_back_with_note() {
        let (home, intent) = encoders();
        let mut p = profile();
        p.home_ownership = "Houseboat".to_string();
        let built = build_features(&p, &home, &intent);
        assert_eq!(built.vector[5], 0.0);
        assert_eq!(built.fallback_notes.len(), 1);
        assert!(built.fallback_notes[0].contains("Houseboat"));
    }
}
