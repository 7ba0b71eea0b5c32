use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::model::{IncomeModel, ModelError};
use crate::workflows::screening::features::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, thiserror::Error)]
pub enum ModelLoadError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid model artifact JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("linear model expects {expected} coefficients, found {found}")]
    CoefficientCount { expected: usize, found: usize },
    #[error("forest model has no trees")]
    EmptyForest,
    #[error("tree {tree} is malformed: {reason}")]
    MalformedTree { tree: usize, reason: String },
}

/// Serialized regression model exported by the training pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub name: String,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestModel {
    pub name: String,
    pub trees: Vec<RegressionTree>,
}

/// Flattened decision tree; node 0 is the root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Go left when `features[feature] <= threshold`.
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

impl ModelArtifact {
    pub fn from_path(path: &Path) -> Result<Self, ModelLoadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelLoadError> {
        let artifact: ModelArtifact = serde_json::from_reader(reader)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn name(&self) -> &str {
        match self {
            ModelArtifact::Linear(model) => &model.name,
            ModelArtifact::Forest(model) => &model.name,
        }
    }

    fn validate(&self) -> Result<(), ModelLoadError> {
        match self {
            ModelArtifact::Linear(model) => {
                if model.coefficients.len() != FEATURE_COUNT {
                    return Err(ModelLoadError::CoefficientCount {
                        expected: FEATURE_COUNT,
                        found: model.coefficients.len(),
                    });
                }
                Ok(())
            }
            ModelArtifact::Forest(model) => {
                if model.trees.is_empty() {
                    return Err(ModelLoadError::EmptyForest);
                }
                for (index, tree) in model.trees.iter().enumerate() {
                    tree.validate()
                        .map_err(|reason| ModelLoadError::MalformedTree {
                            tree: index,
                            reason,
                        })?;
                }
                Ok(())
            }
        }
    }
}

impl RegressionTree {
    fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("no nodes".to_string());
        }
        let len = self.nodes.len();
        for (index, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                left,
                right,
                ..
            } = node
            {
                if *feature >= FEATURE_COUNT {
                    return Err(format!("node {index} splits on unknown feature {feature}"));
                }
                // Children must point forward, which also rules out cycles.
                if *left <= index || *right <= index || *left >= len || *right >= len {
                    return Err(format!("node {index} has out-of-range children"));
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self, values: &[f64; FEATURE_COUNT]) -> Result<f64, ModelError> {
        let mut cursor = 0;
        // A well-formed tree reaches a leaf in fewer steps than it has nodes.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(cursor) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = values.get(*feature).ok_or_else(|| {
                        ModelError::Prediction(format!("unknown feature index {feature}"))
                    })?;
                    cursor = if *value <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Prediction(format!(
                        "node {cursor} does not exist"
                    )))
                }
            }
        }
        Err(ModelError::Prediction("tree never reached a leaf".to_string()))
    }
}

impl IncomeModel for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let values = features.values();
        let prediction = match self {
            ModelArtifact::Linear(model) => {
                model.intercept
                    + model
                        .coefficients
                        .iter()
                        .zip(values.iter())
                        .map(|(weight, value)| weight * value)
                        .sum::<f64>()
            }
            ModelArtifact::Forest(model) => {
                if model.trees.is_empty() {
                    return Err(ModelError::Prediction("forest has no trees".to_string()));
                }
                let mut total = 0.0;
                for tree in &model.trees {
                    total += tree.evaluate(values)?;
                }
                total / model.trees.len() as f64
            }
        };

        if prediction.is_nan() {
            return Err(ModelError::NotANumber);
        }
        Ok(prediction)
    }

    fn name(&self) -> &str {
        ModelArtifact::name(self)
    }
}
