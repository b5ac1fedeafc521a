//! Calibrated PM2.5 Refinement
//!
//! ## Overview
//!
//! The physics correction removes the water a particle carries, but optical
//! counters still drift from reference instruments with temperature and
//! pressure. A regression model fitted against collocated reference monitors
//! takes the corrected PM2.5 plus the climate covariates and returns a
//! calibrated PM2.5.
//!
//! The model is optional. A node without one, or with one that fails on a
//! particular record, publishes the physics estimate and says so in
//! `mlValidity`.
//!
//! ## Feature Columns
//!
//! Column order is fixed by training and checked when a model is loaded:
//!
//! ```text
//! cor_pm2_5 | temperature | pressure | humidity | dewPoint | temp_dew
//! ```
//!
//! `temp_dew` is temperature minus dew point.
//!
//! ## Model Format
//!
//! Fitted ensembles (random forest or gradient boosting) are exported offline
//! to a small JSON document and evaluated here without any ML runtime:
//!
//! ```json
//! {
//!   "feature_names": ["cor_pm2_5", "temperature", "pressure", "humidity", "dewPoint", "temp_dew"],
//!   "combine": {"mean": {}},
//!   "trees": [[
//!     {"split": {"feature": 0, "threshold": 12.5, "left": 1, "right": 2}},
//!     {"leaf": {"value": 8.1}},
//!     {"leaf": {"value": 19.4}}
//!   ]]
//! }
//! ```
//!
//! A node is either a split or a leaf; the root is node 0 and a row goes left
//! when `row[feature] < threshold`. `combine` is `{"mean": {}}` for a forest
//! or `{"boosted": {"base_score": .., "learning_rate": ..}}` for boosting.
//!
//! ## Usage
//!
//! ```rust
//! use mints_core::ClimateConditions;
//! use mints_ml::MlRefiner;
//!
//! let refiner = MlRefiner::without_model();
//! let climate = ClimateConditions { temperature: 10.0, humidity: 60.0, dew_point: 9.0, pressure: 1000.0 };
//!
//! let refined = refiner.refine(12.0, &climate);
//! assert_eq!(refined.pm2_5, 12.0);
//! assert!(!refined.applied);
//! ```

use thiserror_no_std::Error;

mod features;
pub mod forest;
pub mod node;
pub mod refiner;
pub mod tree;

pub use features::{FeatureRow, FEATURE_COUNT, FEATURE_NAMES};
pub use forest::{Combine, TreeEnsemble};
pub use node::TreeNode;
pub use refiner::{MlRefiner, Refinement};
pub use tree::RegressionTree;

/// ML-specific errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MlError {
    /// Feature index outside the row
    #[error("Invalid feature index: {0}")]
    InvalidFeature(usize),

    /// A feature value is NaN or infinite
    #[error("Feature {0} is not finite")]
    NonFiniteFeature(&'static str),

    /// The model was trained on different columns
    #[error("Model feature columns do not match")]
    FeatureMismatch,

    /// A tree references a node that does not exist or points backwards
    #[error("Malformed tree {tree} at node {node}")]
    MalformedTree {
        /// Tree index within the ensemble
        tree: usize,
        /// Offending node index
        node: usize,
    },

    /// The ensemble has no trees
    #[error("Ensemble has no trees")]
    EmptyEnsemble,

    /// The model produced NaN or infinity
    #[error("Prediction is not finite")]
    NonFinitePrediction,

    /// The model file could not be read or parsed
    #[error("Failed to load model: {0}")]
    Load(String),
}

/// Result type for ML operations
pub type MlResult<T> = Result<T, MlError>;

/// A calibrated regression model
pub trait Predictor {
    /// Predict PM2.5 for one feature row
    fn predict(&self, row: &FeatureRow) -> MlResult<f64>;
}

impl<F> Predictor for F
where
    F: Fn(&FeatureRow) -> MlResult<f64>,
{
    fn predict(&self, row: &FeatureRow) -> MlResult<f64> {
        self(row)
    }
}
