//! Refinement with fallback
//!
//! Every failure path ends in the physics estimate. Nothing here returns an
//! error to the caller.

use std::{fmt, path::Path};

use log::{debug, warn};
use mints_core::ClimateConditions;

use crate::{FeatureRow, MlResult, Predictor, TreeEnsemble};

/// Outcome of one refinement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refinement {
    /// Calibrated PM2.5, or the physics estimate on fallback
    pub pm2_5: f64,
    /// Whether the model produced `pm2_5`
    pub applied: bool,
}

impl Refinement {
    fn fallback(pm2_5: f64) -> Self {
        Self { pm2_5, applied: false }
    }
}

/// Optional calibrated model in front of the physics estimate
pub struct MlRefiner {
    model: Option<Box<dyn Predictor + Send + Sync>>,
}

impl fmt::Debug for MlRefiner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlRefiner")
            .field("has_model", &self.has_model())
            .finish()
    }
}

impl Default for MlRefiner {
    fn default() -> Self {
        Self::without_model()
    }
}

impl MlRefiner {
    /// Refiner backed by a model
    pub fn new<P>(model: P) -> Self
    where
        P: Predictor + Send + Sync + 'static,
    {
        Self { model: Some(Box::new(model)) }
    }

    /// Refiner that always falls back
    pub fn without_model() -> Self {
        Self { model: None }
    }

    /// Load an exported ensemble; a missing or broken file leaves no model
    pub fn from_path(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::without_model();
        };
        match TreeEnsemble::load(path) {
            Ok(ensemble) => {
                debug!("Loaded calibration model with {} trees", ensemble.num_trees());
                Self::new(ensemble)
            }
            Err(e) => {
                warn!("Calibration model unavailable, using physics estimate: {e}");
                Self::without_model()
            }
        }
    }

    /// Whether a model is loaded
    pub fn has_model(&self) -> bool {
        self.model.is_some()
    }

    /// Refine a corrected PM2.5 against its climate reading
    pub fn refine(&self, cor_pm2_5: f64, climate: &ClimateConditions) -> Refinement {
        let Some(model) = &self.model else {
            return Refinement::fallback(cor_pm2_5);
        };

        let row = FeatureRow::new(cor_pm2_5, climate);
        match Self::predict(model.as_ref(), &row) {
            Ok(pm2_5) => Refinement { pm2_5, applied: true },
            Err(e) => {
                warn!("Calibration failed, using physics estimate: {e}");
                Refinement::fallback(cor_pm2_5)
            }
        }
    }

    fn predict(model: &(dyn Predictor + Send + Sync), row: &FeatureRow) -> MlResult<f64> {
        row.check_finite()?;
        let prediction = model.predict(row)?;
        if prediction.is_finite() {
            Ok(prediction)
        } else {
            Err(crate::MlError::NonFinitePrediction)
        }
    }
}
