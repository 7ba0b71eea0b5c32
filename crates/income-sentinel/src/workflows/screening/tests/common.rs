use std::sync::Arc;

use crate::workflows::screening::domain::{TaxpayerDeclaration, TaxpayerIdentity};
use crate::workflows::screening::estimation::{EstimatorConfig, ModelHandle};
use crate::workflows::screening::features::FeatureVector;
use crate::workflows::screening::{
    screening_router, ClassifierConfig, FraudRiskClassifier, ScreeningService,
};

pub(super) fn classifier() -> FraudRiskClassifier {
    FraudRiskClassifier::new(ClassifierConfig::default())
}

pub(super) fn identity() -> TaxpayerIdentity {
    TaxpayerIdentity {
        full_name: "Meera Iyer".to_string(),
        pan: "AAAPI1234C".to_string(),
        aadhaar: "432156789012".to_string(),
        bank_account: "50100234567890".to_string(),
    }
}

pub(super) fn declaration() -> TaxpayerDeclaration {
    TaxpayerDeclaration {
        identity: identity(),
        age: 38,
        occupation: "Salaried".to_string(),
        marital_status: "Married".to_string(),
        children: "Yes".to_string(),
        reported_income: 720_000.0,
        interest_income: Some(18_000.0),
        capital_gains: None,
    }
}

/// Model that echoes the base income feature scaled by `factor`.
pub(super) fn scaling_model(factor: f64) -> ModelHandle {
    ModelHandle::with_model(move |features: &FeatureVector| {
        features.get(14).unwrap_or_default() * factor
    })
}

pub(super) fn fixed_model(amount: f64) -> ModelHandle {
    ModelHandle::with_model(move |_: &FeatureVector| amount)
}

pub(super) fn service_with(model: ModelHandle) -> ScreeningService {
    ScreeningService::new(model, EstimatorConfig::default(), ClassifierConfig::default())
}

pub(super) fn router_with(model: ModelHandle) -> axum::Router {
    screening_router(Arc::new(service_with(model)))
}
