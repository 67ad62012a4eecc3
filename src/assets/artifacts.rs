//! Fitted artifact types and the capability traits behind them.
//!
//! The engine never depends on a concrete model family. It sees exactly four
//! operations: `predict`, `predict_probability`, `transform`, `encode`. The
//! concrete types here are the serialized forms the training pipeline exports
//! (JSON parameter files), and tests substitute doubles freely.

use serde::{Deserialize, Serialize};

use crate::features::{FEATURE_COUNT, FEATURE_SCHEMA, FeatureVector};

/// Binary classifier over the model feature vector.
///
/// `predict` returns the trained class (1 = default risk); probabilities are
/// `[p_repay, p_default]` and sum to 1. The two are allowed to disagree with
/// a naive 50% cutoff: the decision uses the artifact's own operating point.
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> u8;
    fn predict_probability(&self, features: &FeatureVector) -> [f64; 2];
}

/// Numeric feature normalization fitted on the training distribution.
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> FeatureVector;
}

/// Fixed mapping from a training-time categorical vocabulary to integer codes.
///
/// Returns `None` for labels outside the fitted vocabulary; the caller owns
/// the fallback policy.
pub trait CategoryEncoder: Send + Sync {
    fn encode(&self, category: &str) -> Option<usize>;
}

/// Logistic classifier: weights over the scaled feature vector, an intercept,
/// and the fitted decision threshold on the default-class probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticModel {
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub threshold: f64,
}

impl LogisticModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.weights.len() != FEATURE_COUNT {
            return Err(format!(
                "Classifier has {} weights; the feature schema has {} fields ({}).",
                self.weights.len(),
                FEATURE_COUNT,
                FEATURE_SCHEMA.join(", ")
            ));
        }
        if !self.weights.iter().all(|w| w.is_finite()) || !self.intercept.is_finite() {
            return Err("Classifier weights/intercept must be finite.".to_string());
        }
        if !(self.threshold.is_finite() && self.threshold > 0.0 && self.threshold < 1.0) {
            return Err("Classifier threshold must lie in (0, 1).".to_string());
        }
        Ok(())
    }

    fn default_probability(&self, features: &FeatureVector) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        sigmoid(z)
    }
}

impl Classifier for LogisticModel {
    fn predict(&self, features: &FeatureVector) -> u8 {
        u8::from(self.default_probability(features) >= self.threshold)
    }

    fn predict_probability(&self, features: &FeatureVector) -> [f64; 2] {
        let p_default = self.default_probability(features);
        [1.0 - p_default, p_default]
    }
}

/// Standard scaler: per-feature `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn validate(&self) -> Result<(), String> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(format!(
                "Scaler mean/scale must each have {FEATURE_COUNT} entries (got {}/{}).",
                self.mean.len(),
                self.scale.len()
            ));
        }
        if !self.mean.iter().all(|v| v.is_finite()) {
            return Err("Scaler means must be finite.".to_string());
        }
        if !self.scale.iter().all(|v| v.is_finite() && *v != 0.0) {
            return Err("Scaler scales must be finite and non-zero.".to_string());
        }
        Ok(())
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> FeatureVector {
        let mut out = [0.0; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            out[i] = (features[i] - self.mean[i]) / self.scale[i];
        }
        out
    }
}

/// Label encoder: class position in the training-time ordered vocabulary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("Encoder has an empty class vocabulary.".to_string());
        }
        Ok(())
    }
}

impl CategoryEncoder for LabelEncoder {
    fn encode(&self, category: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == category)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(threshold: f64) -> LogisticModel {
        LogisticModel {
            weights: vec![0.0; FEATURE_COUNT],
            intercept: 0.0,
            threshold,
        }
    }

    #[test]
    fn logistic_probabilities_sum_to_one() {
        let m = LogisticModel {
            weights: vec![0.5, -0.2, 0.1, -1.0, 0.0, 0.3, 0.3, 1.5, 0.9],
            intercept: -0.4,
            threshold: 0.5,
        };
        let probs = m.predict_probability(&[1.0, 0.5, -0.3, 2.0, 0.0, 1.0, 1.0, 1.0, 0.2]);
        assert!((probs[0] + probs[1] - 1.0).abs() < 1e-12);
        assert!(probs[1] > 0.0 && probs[1] < 1.0);
    }

    #[test]
    fn logistic_decision_uses_fitted_threshold() {
        // Zero weights + zero intercept put the default probability at exactly
        // 0.5 for any input, so the decision flips with the threshold alone.
        let zeros = [0.0; FEATURE_COUNT];
        assert_eq!(model(0.45).predict(&zeros), 1);
        assert_eq!(model(0.55).predict(&zeros), 0);
    }

    #[test]
    fn logistic_validate_rejects_wrong_arity() {
        let m = LogisticModel {
            weights: vec![1.0, 2.0],
            intercept: 0.0,
            threshold: 0.5,
        };
        assert!(m.validate().is_err());
    }

    #[test]
    fn scaler_transform_centers_and_scales() {
        let s = StandardScaler {
            mean: vec![10.0; FEATURE_COUNT],
            scale: vec![2.0; FEATURE_COUNT],
        };
        let out = s.transform(&[12.0; FEATURE_COUNT]);
        assert!(out.iter().all(|v| (*v - 1.0).abs() < 1e-12));
    }

    #[test]
    fn scaler_validate_rejects_zero_scale() {
        let mut s = StandardScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        };
        s.scale[3] = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn encoder_maps_vocabulary_positions() {
        let e = LabelEncoder {
            classes: vec!["Mortgage".to_string(), "Own".to_string(), "Rent".to_string()],
        };
        assert_eq!(e.encode("Mortgage"), Some(0));
        assert_eq!(e.encode("Rent"), Some(2));
        assert_eq!(e.encode("Boat"), None);
        // Exact match only: casing matters, like the training-time fit.
        assert_eq!(e.encode("rent"), None);
    }
}
