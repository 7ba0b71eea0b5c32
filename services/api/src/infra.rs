use income_sentinel::config::AppConfig;
use income_sentinel::error::AppError;
use income_sentinel::workflows::screening::{ModelHandle, ScreeningService};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) model: ModelHandle,
    pub(crate) model_path: Option<PathBuf>,
}

/// Load the configured model, or start with an empty handle when none is configured.
///
/// `override_path` takes precedence over `APP_MODEL_PATH`.
pub(crate) fn load_model(
    config: &AppConfig,
    override_path: Option<&Path>,
) -> Result<(ModelHandle, Option<PathBuf>), AppError> {
    let path = override_path
        .map(Path::to_path_buf)
        .or_else(|| config.model.artifact_path.clone());

    match path {
        Some(path) => {
            let handle = ModelHandle::from_path(&path)?;
            Ok((handle, Some(path)))
        }
        None => {
            warn!("APP_MODEL_PATH not set; screenings will fail until a model is loaded");
            Ok((ModelHandle::empty(), None))
        }
    }
}

pub(crate) fn build_service(config: &AppConfig, model: ModelHandle) -> ScreeningService {
    ScreeningService::new(
        model,
        config.screening.estimator,
        config.screening.classifier.clone(),
    )
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .replace(',', "")
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("'{raw}' must be a non-negative amount"));
    }
    Ok(value)
}
