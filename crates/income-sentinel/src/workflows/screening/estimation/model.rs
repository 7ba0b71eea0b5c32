use std::path::Path;
use std::sync::{Arc, RwLock};

use tracing::info;

use super::artifact::{ModelArtifact, ModelLoadError};
use crate::workflows::screening::features::FeatureVector;

/// Failure raised by a regression model while predicting.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("model produced a non-numeric prediction")]
    NotANumber,
    #[error("prediction failed: {0}")]
    Prediction(String),
}

/// Regression function mapping a feature vector to a raw income figure.
///
/// Implementations must be reentrant: the same model is shared by every
/// concurrent request.
pub trait IncomeModel: Send + Sync {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;

    fn name(&self) -> &str {
        "anonymous"
    }
}

impl<F> IncomeModel for F
where
    F: Fn(&FeatureVector) -> f64 + Send + Sync,
{
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self(features))
    }
}

/// Holder for the process-wide model.
///
/// Loaded once at startup and read-only afterwards; `reload` and `install`
/// are the only ways to swap the model.
#[derive(Clone, Default)]
pub struct ModelHandle {
    current: Arc<RwLock<Option<Arc<dyn IncomeModel>>>>,
}

impl std::fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelHandle")
            .field("model", &self.model_name())
            .finish()
    }
}

impl ModelHandle {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_model<M: IncomeModel + 'static>(model: M) -> Self {
        let handle = Self::default();
        handle.install(Arc::new(model));
        handle
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ModelLoadError> {
        let handle = Self::default();
        handle.reload(path)?;
        Ok(handle)
    }

    /// Replace the current model with the artifact at `path`.
    ///
    /// The previous model stays in place when loading fails.
    pub fn reload<P: AsRef<Path>>(&self, path: P) -> Result<(), ModelLoadError> {
        let artifact = ModelArtifact::from_path(path.as_ref())?;
        info!(
            model = artifact.name(),
            path = %path.as_ref().display(),
            "income model loaded"
        );
        self.install(Arc::new(artifact));
        Ok(())
    }

    pub fn install(&self, model: Arc<dyn IncomeModel>) {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Some(model);
    }

    pub fn current(&self) -> Option<Arc<dyn IncomeModel>> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    pub fn model_name(&self) -> Option<String> {
        self.current().map(|model| model.name().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_handle_has_no_model() {
        let handle = ModelHandle::empty();
        assert!(!handle.is_loaded());
        assert!(handle.current().is_none());
    }

    #[test]
    fn install_swaps_model_for_every_clone() {
        let handle = ModelHandle::with_model(|_: &FeatureVector| 1.0);
        let clone = handle.clone();

        handle.install(Arc::new(|_: &FeatureVector| 2.0));

        let features = FeatureVector::new([0.0; 15]).expect("zero vector is valid");
        let model = clone.current().expect("model installed");
        assert_eq!(model.predict(&features).expect("prediction"), 2.0);
    }

    #[test]
    fn failed_reload_keeps_previous_model() {
        let handle = ModelHandle::with_model(|_: &FeatureVector| 7.0);

        let result = handle.reload("/nonexistent/income-model.json");

        assert!(result.is_err());
        assert!(handle.is_loaded());
        assert_eq!(handle.model_name().as_deref(), Some("anonymous"));
    }
}
