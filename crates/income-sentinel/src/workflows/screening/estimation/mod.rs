mod artifact;
mod model;

pub use artifact::{
    ForestModel, LinearModel, ModelArtifact, ModelLoadError, RegressionTree, TreeNode,
};
pub use model::{IncomeModel, ModelError, ModelHandle};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::features::FeatureVector;
use super::ScreeningError;

/// Plausible income range estimates are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    pub min_income: f64,
    pub max_income: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            min_income: 200_000.0,
            max_income: 5_000_000.0,
        }
    }
}

/// Model output after clamping; `amount` always lies within the configured bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeEstimate {
    pub amount: f64,
    pub raw_prediction: f64,
    pub clamped: bool,
}

pub struct IncomeEstimator {
    model: ModelHandle,
    config: EstimatorConfig,
}

impl IncomeEstimator {
    pub fn new(model: ModelHandle, config: EstimatorConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    pub fn model(&self) -> &ModelHandle {
        &self.model
    }

    pub fn estimate(&self, features: &FeatureVector) -> Result<IncomeEstimate, ScreeningError> {
        let model = self
            .model
            .current()
            .ok_or_else(|| ScreeningError::ModelUnavailable("no model loaded".to_string()))?;

        let raw = model
            .predict(features)
            .map_err(|err| ScreeningError::ModelUnavailable(err.to_string()))?;
        if raw.is_nan() {
            return Err(ScreeningError::ModelUnavailable(
                "model produced a non-numeric prediction".to_string(),
            ));
        }

        let amount = raw.max(self.config.min_income).min(self.config.max_income);
        let clamped = amount != raw;
        if clamped {
            debug!(
                raw,
                amount,
                min = self.config.min_income,
                max = self.config.max_income,
                "income estimate clamped"
            );
        }

        Ok(IncomeEstimate {
            amount,
            raw_prediction: raw,
            clamped,
        })
    }
}
