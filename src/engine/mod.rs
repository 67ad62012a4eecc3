//! Risk engine: scaled inference over the built feature vector.
//!
//! The engine applies the fitted scaler and classifier in the same field
//! order used at training time, and reports exactly what the classifier
//! returns. It never mutates the artifacts and must not be invoked when the
//! store is degraded (the pipeline checks first).

use crate::assets::Artifacts;
use crate::domain::RiskAssessment;
use crate::error::AppError;
use crate::features::FeatureVector;

/// Run inference on one unscaled feature vector.
pub fn assess(artifacts: &Artifacts, features: &FeatureVector) -> Result<RiskAssessment, AppError> {
    let scaled = artifacts.scaler.transform(features);

    let decision = artifacts.classifier.predict(&scaled);
    let probs = artifacts.classifier.predict_probability(&scaled);

    if !(probs[0].is_finite() && probs[1].is_finite()) {
        return Err(AppError::new(4, "Non-finite class probability from classifier."));
    }

    Ok(RiskAssessment {
        is_high_risk: decision == 1,
        default_probability: probs[1] * 100.0,
        repayment_probability: probs[0] * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{CategoryEncoder, Classifier, Scaler};
    use crate::features::FEATURE_COUNT;

    struct FixedClassifier {
        decision: u8,
        p_default: f64,
    }

    impl Classifier for FixedClassifier {
        fn predict(&self, _features: &FeatureVector) -> u8 {
            self.decision
        }
        fn predict_probability(&self, _features: &FeatureVector) -> [f64; 2] {
            [1.0 - self.p_default, self.p_default]
        }
    }

    struct OffsetScaler(f64);

    impl Scaler for OffsetScaler {
        fn transform(&self, features: &FeatureVector) -> FeatureVector {
            let mut out = *features;
            for v in &mut out {
                *v += self.0;
            }
            out
        }
    }

    /// Classifier that decides from the first (scaled) feature, to prove the
    /// engine feeds the scaled vector to the classifier.
    struct SignClassifier;

    impl Classifier for SignClassifier {
        fn predict(&self, features: &FeatureVector) -> u8 {
            u8::from(features[0] > 0.0)
        }
        fn predict_probability(&self, features: &FeatureVector) -> [f64; 2] {
            if features[0] > 0.0 { [0.2, 0.8] } else { [0.8, 0.2] }
        }
    }

    struct NoopEncoder;

    impl CategoryEncoder for NoopEncoder {
        fn encode(&self, _category: &str) -> Option<usize> {
            Some(0)
        }
    }

    fn artifacts(classifier: Box<dyn Classifier>, scaler: Box<dyn Scaler>) -> Artifacts {
        Artifacts {
            classifier,
            scaler,
            home_encoder: Box::new(NoopEncoder),
            intent_encoder: Box::new(NoopEncoder),
        }
    }

    #[test]
    fn reports_classifier_decision_not_probability_cutoff() {
        // decision says low risk while the default probability is 70%: the
        // engine must report the decision, not re-derive it from 50%.
        let a = artifacts(
            Box::new(FixedClassifier {
                decision: 0,
                p_default: 0.7,
            }),
            Box::new(OffsetScaler(0.0)),
        );
        let out = assess(&a, &[0.0; FEATURE_COUNT]).unwrap();
        assert!(!out.is_high_risk);
        assert!((out.default_probability - 70.0).abs() < 1e-9);
        assert!((out.repayment_probability - 30.0).abs() < 1e-9);
    }

    #[test]
    fn probabilities_sum_to_one_hundred() {
        let a = artifacts(
            Box::new(FixedClassifier {
                decision: 1,
                p_default: 0.634,
            }),
            Box::new(OffsetScaler(0.0)),
        );
        let out = assess(&a, &[0.0; FEATURE_COUNT]).unwrap();
        assert!((out.default_probability + out.repayment_probability - 100.0).abs() < 1e-6);
        assert!(out.is_high_risk);
    }

    #[test]
    fn scaler_is_applied_before_the_classifier() {
        // Raw features are all zero; the offset scaler shifts them positive,
        // so a classifier reading the scaled vector must flag high risk.
        let a = artifacts(Box::new(SignClassifier), Box::new(OffsetScaler(1.0)));
        let out = assess(&a, &[0.0; FEATURE_COUNT]).unwrap();
        assert!(out.is_high_risk);

        let a = artifacts(Box::new(SignClassifier), Box::new(OffsetScaler(-1.0)));
        let out = assess(&a, &[0.0; FEATURE_COUNT]).unwrap();
        assert!(!out.is_high_risk);
    }

    struct BrokenClassifier;

    impl Classifier for BrokenClassifier {
        fn predict(&self, _features: &FeatureVector) -> u8 {
            0
        }
        fn predict_probability(&self, _features: &FeatureVector) -> [f64; 2] {
            [f64::NAN, f64::NAN]
        }
    }

    #[test]
    fn non_finite_probability_is_a_runtime_error() {
        let a = artifacts(Box::new(BrokenClassifier), Box::new(OffsetScaler(0.0)));
        let err = assess(&a, &[0.0; FEATURE_COUNT]).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
