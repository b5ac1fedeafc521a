//! Tree ensemble
//!
//! Random forests average their trees; gradient-boosted ensembles add a
//! scaled sum of tree outputs to a base score. Both are loaded from the same
//! JSON document and differ only in `combine`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{FeatureRow, MlError, MlResult, Predictor, RegressionTree, FEATURE_NAMES};

/// How tree outputs are combined
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combine {
    /// Average of all trees (random forest)
    Mean {},
    /// `base_score + learning_rate * sum` (gradient boosting)
    Boosted {
        /// Prediction before any tree is applied
        base_score: f64,
        /// Shrinkage applied to every tree
        learning_rate: f64,
    },
}

/// A fitted ensemble of regression trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    feature_names: Vec<String>,
    combine: Combine,
    trees: Vec<RegressionTree>,
}

impl TreeEnsemble {
    /// Build an ensemble over the standard feature columns
    pub fn new(combine: Combine, trees: Vec<RegressionTree>) -> MlResult<Self> {
        let ensemble = Self {
            feature_names: FEATURE_NAMES.iter().map(|name| name.to_string()).collect(),
            combine,
            trees,
        };
        ensemble.validate()?;
        Ok(ensemble)
    }

    /// Parse and check an exported model
    pub fn from_json(text: &str) -> MlResult<Self> {
        let ensemble: Self =
            serde_json::from_str(text).map_err(|e| MlError::Load(e.to_string()))?;
        ensemble.validate()?;
        Ok(ensemble)
    }

    /// Read an exported model from disk
    pub fn load(path: &Path) -> MlResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| MlError::Load(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }

    fn validate(&self) -> MlResult<()> {
        if !self.feature_names.iter().map(String::as_str).eq(FEATURE_NAMES) {
            return Err(MlError::FeatureMismatch);
        }
        if self.trees.is_empty() {
            return Err(MlError::EmptyEnsemble);
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(i)?;
        }
        Ok(())
    }

    /// Number of trees
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

impl Predictor for TreeEnsemble {
    fn predict(&self, row: &FeatureRow) -> MlResult<f64> {
        let mut sum = 0.0;
        for (i, tree) in self.trees.iter().enumerate() {
            sum += tree.predict(i, row)?;
        }

        let prediction = match self.combine {
            Combine::Mean {} => sum / self.trees.len() as f64,
            Combine::Boosted { base_score, learning_rate } => base_score + learning_rate * sum,
        };

        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(MlError::NonFinitePrediction)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FOREST: &str = r#"{
        "feature_names": ["cor_pm2_5", "temperature", "pressure", "humidity", "dewPoint", "temp_dew"],
        "combine": {"mean": {}},
        "trees": [
            [
                {"split": {"feature": 0, "threshold": 10.0, "left": 1, "right": 2}},
                {"leaf": {"value": 4.0}},
                {"leaf": {"value": 12.0}}
            ],
            [
                {"split": {"feature": 5, "threshold": 2.5, "left": 1, "right": 2}},
                {"leaf": {"value": 8.0}},
                {"leaf": {"value": 16.0}}
            ]
        ]
    }"#;

    fn row(pm: f64, temp_dew: f64) -> FeatureRow {
        FeatureRow::from_values([pm, 10.0, 1000.0, 60.0, 10.0 - temp_dew, temp_dew])
    }

    #[test]
    fn forest_averages_trees() {
        let forest = TreeEnsemble::from_json(FOREST).unwrap();
        assert_eq!(forest.num_trees(), 2);
        assert_eq!(forest.predict(&row(5.0, 1.0)), Ok(6.0));
        assert_eq!(forest.predict(&row(15.0, 1.0)), Ok(10.0));
        assert_eq!(forest.predict(&row(15.0, 5.0)), Ok(14.0));
    }

    #[test]
    fn boosting_scales_sum() {
        let text = FOREST.replace(
            r#"{"mean": {}}"#,
            r#"{"boosted": {"base_score": 1.0, "learning_rate": 0.5}}"#,
        );
        let model = TreeEnsemble::from_json(&text).unwrap();
        assert_eq!(model.predict(&row(5.0, 1.0)), Ok(1.0 + 0.5 * 12.0));
    }

    #[test]
    fn wrong_columns_are_rejected() {
        let text = FOREST.replace("\"temp_dew\"", "\"wind\"");
        assert_eq!(TreeEnsemble::from_json(&text), Err(MlError::FeatureMismatch));
    }

    #[test]
    fn garbage_is_a_load_error() {
        assert!(matches!(TreeEnsemble::from_json("{"), Err(MlError::Load(_))));
    }

    #[test]
    fn empty_ensemble_is_rejected() {
        assert_eq!(TreeEnsemble::new(Combine::Mean {}, Vec::new()), Err(MlError::EmptyEnsemble));
    }
}
