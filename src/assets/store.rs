//! Process-wide artifact store.
//!
//! The four fitted artifacts load once at startup from a known directory and
//! are read-only afterwards, so the store can be shared freely across request
//! handlers. A load failure does not kill the process: the store enters a
//! **degraded** state and every request must check it first and short-circuit
//! to the fixed unavailable response instead of attempting inference.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::assets::artifacts::{
    CategoryEncoder, Classifier, LabelEncoder, LogisticModel, Scaler, StandardScaler,
};

pub const MODEL_FILE: &str = "credit_model.json";
pub const SCALER_FILE: &str = "credit_scaler.json";
pub const HOME_ENCODER_FILE: &str = "home_encoder.json";
pub const INTENT_ENCODER_FILE: &str = "intent_encoder.json";

/// Default artifact directory, relative to the working directory.
pub const DEFAULT_ASSET_DIR: &str = "assets";

/// The loaded artifact set, behind the narrow capability traits.
pub struct Artifacts {
    pub classifier: Box<dyn Classifier>,
    pub scaler: Box<dyn Scaler>,
    pub home_encoder: Box<dyn CategoryEncoder>,
    pub intent_encoder: Box<dyn CategoryEncoder>,
}

/// Read-only artifact store with explicit degraded-state handling.
pub struct AssetStore {
    artifacts: Option<Artifacts>,
    degraded_reason: Option<String>,
}

impl AssetStore {
    /// Load all four artifacts from `dir`.
    ///
    /// Never fails the process: any artifact error produces a degraded store
    /// that records the reason.
    pub fn load(dir: &Path) -> Self {
        match load_artifacts(dir) {
            Ok(artifacts) => {
                log::info!("risk artifacts online ({})", dir.display());
                Self {
                    artifacts: Some(artifacts),
                    degraded_reason: None,
                }
            }
            Err(reason) => {
                log::error!("risk artifacts unavailable: {reason}");
                Self {
                    artifacts: None,
                    degraded_reason: Some(reason),
                }
            }
        }
    }

    /// Build a ready store from in-memory artifacts (tests, embedding).
    pub fn from_artifacts(artifacts: Artifacts) -> Self {
        Self {
            artifacts: Some(artifacts),
            degraded_reason: None,
        }
    }

    pub fn artifacts(&self) -> Option<&Artifacts> {
        self.artifacts.as_ref()
    }

    pub fn is_degraded(&self) -> bool {
        self.artifacts.is_none()
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        self.degraded_reason.as_deref()
    }
}

/// Resolve the artifact directory: CLI flag, then `ASSET_DIR` (with `.env`
/// support), then the default relative path.
pub fn resolve_asset_dir(flag: Option<&Path>) -> PathBuf {
    if let Some(dir) = flag {
        return dir.to_path_buf();
    }
    dotenvy::dotenv().ok();
    match std::env::var("ASSET_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(DEFAULT_ASSET_DIR),
    }
}

fn load_artifacts(dir: &Path) -> Result<Artifacts, String> {
    let classifier: LogisticModel = read_artifact(dir, MODEL_FILE)?;
    classifier
        .validate()
        .map_err(|e| format!("{MODEL_FILE}: {e}"))?;

    let scaler: StandardScaler = read_artifact(dir, SCALER_FILE)?;
    scaler.validate().map_err(|e| format!("{SCALER_FILE}: {e}"))?;

    let home_encoder: LabelEncoder = read_artifact(dir, HOME_ENCODER_FILE)?;
    home_encoder
        .validate()
        .map_err(|e| format!("{HOME_ENCODER_FILE}: {e}"))?;

    let intent_encoder: LabelEncoder = read_artifact(dir, INTENT_ENCODER_FILE)?;
    intent_encoder
        .validate()
        .map_err(|e| format!("{INTENT_ENCODER_FILE}: {e}"))?;

    Ok(Artifacts {
        classifier: Box::new(classifier),
        scaler: Box::new(scaler),
        home_encoder: Box::new(home_encoder),
        intent_encoder: Box::new(intent_encoder),
    })
}

fn read_artifact<T: serde::de::DeserializeOwned>(dir: &Path, name: &str) -> Result<T, String> {
    let path = dir.join(name);
    let file =
        File::open(&path).map_err(|e| format!("Failed to open artifact '{}': {e}", path.display()))?;
    serde_json::from_reader(file).map_err(|e| format!("Invalid artifact '{}': {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FEATURE_COUNT;
    use std::fs;

    fn temp_asset_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cg-assets-{tag}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_valid_artifacts(dir: &Path) {
        let model = LogisticModel {
            weights: vec![0.1; FEATURE_COUNT],
            intercept: -0.2,
            threshold: 0.45,
        };
        let scaler = StandardScaler {
            mean: vec![0.0; FEATURE_COUNT],
            scale: vec![1.0; FEATURE_COUNT],
        };
        let home = LabelEncoder {
            classes: vec!["Mortgage".into(), "Own".into(), "Rent".into()],
        };
        let intent = LabelEncoder {
            classes: vec![
                "Education".into(),
                "Medical".into(),
                "Personal".into(),
                "Venture".into(),
            ],
        };
        fs::write(dir.join(MODEL_FILE), serde_json::to_string(&model).unwrap()).unwrap();
        fs::write(dir.join(SCALER_FILE), serde_json::to_string(&scaler).unwrap()).unwrap();
        fs::write(dir.join(HOME_ENCODER_FILE), serde_json::to_string(&home).unwrap()).unwrap();
        fs::write(
            dir.join(INTENT_ENCODER_FILE),
            serde_json::to_string(&intent).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn load_from_missing_dir_is_degraded_not_fatal() {
        let store = AssetStore::load(Path::new("/nonexistent/cg-artifacts"));
        assert!(store.is_degraded());
        assert!(store.artifacts().is_none());
        assert!(store.degraded_reason().unwrap().contains("Failed to open artifact"));
    }

    #[test]
    fn load_valid_artifacts_is_ready() {
        let dir = temp_asset_dir("ready");
        write_valid_artifacts(&dir);

        let store = AssetStore::load(&dir);
        assert!(!store.is_degraded());
        let artifacts = store.artifacts().unwrap();
        assert_eq!(artifacts.home_encoder.encode("Rent"), Some(2));
        assert_eq!(artifacts.intent_encoder.encode("Personal"), Some(2));

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_artifact_degrades_with_reason() {
        let dir = temp_asset_dir("invalid");
        write_valid_artifacts(&dir);
        // Corrupt the scaler: wrong arity.
        let bad = StandardScaler {
            mean: vec![0.0; 2],
            scale: vec![1.0; 2],
        };
        fs::write(dir.join(SCALER_FILE), serde_json::to_string(&bad).unwrap()).unwrap();

        let store = AssetStore::load(&dir);
        assert!(store.is_degraded());
        assert!(store.degraded_reason().unwrap().contains(SCALER_FILE));

        let _ = fs::remove_dir_all(&dir);
    }
}
