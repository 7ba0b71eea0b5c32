use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::classification::{ClassifierConfig, FraudRiskClassifier, RiskTier, RiskVerdict};
use super::domain::{Occupation, TaxpayerDeclaration};
use super::estimation::{EstimatorConfig, IncomeEstimate, IncomeEstimator, ModelHandle};
use super::features::FeatureVectorBuilder;
use super::intake::DeclarationGuard;
use super::tax::{slab_of, tax_on, TaxSlab};
use super::ScreeningError;

/// Everything the presentation layer needs to render one screening.
#[derive(Debug, Clone, Serialize)]
pub struct ScreeningReport {
    pub taxpayer: String,
    pub occupation: Occupation,
    pub estimate: IncomeEstimate,
    pub reported_income: f64,
    pub interest_income: f64,
    pub capital_gains: f64,
    pub total_reported_income: f64,
    pub verdict: RiskVerdict,
    pub reported_slab: TaxSlab,
    pub estimated_slab: TaxSlab,
    pub tax_due: f64,
    pub estimated_tax_due: f64,
    pub assessed_at: DateTime<Utc>,
}

/// Composes intake, feature construction, estimation, classification, and tax.
pub struct ScreeningService {
    guard: DeclarationGuard,
    builder: FeatureVectorBuilder,
    estimator: IncomeEstimator,
    classifier: FraudRiskClassifier,
}

impl ScreeningService {
    pub fn new(
        model: ModelHandle,
        estimator_config: EstimatorConfig,
        classifier_config: ClassifierConfig,
    ) -> Self {
        Self::with_parts(
            DeclarationGuard::default(),
            FeatureVectorBuilder::default(),
            IncomeEstimator::new(model, estimator_config),
            FraudRiskClassifier::new(classifier_config),
        )
    }

    pub fn with_parts(
        guard: DeclarationGuard,
        builder: FeatureVectorBuilder,
        estimator: IncomeEstimator,
        classifier: FraudRiskClassifier,
    ) -> Self {
        Self {
            guard,
            builder,
            estimator,
            classifier,
        }
    }

    pub fn model(&self) -> &ModelHandle {
        self.estimator.model()
    }

    pub fn estimator(&self) -> &IncomeEstimator {
        &self.estimator
    }

    pub fn classifier(&self) -> &FraudRiskClassifier {
        &self.classifier
    }

    /// Screen one declaration end to end.
    pub fn screen(
        &self,
        declaration: TaxpayerDeclaration,
    ) -> Result<ScreeningReport, ScreeningError> {
        let declaration = self.guard.validate(declaration)?;
        let features = self.builder.build(&declaration)?;
        let estimate = self.estimator.estimate(&features)?;

        let total_reported_income = declaration.total_reported_income();
        let verdict = self.classifier.classify_occupation(
            total_reported_income,
            estimate.amount,
            declaration.age,
            declaration.occupation,
        )?;

        if verdict.tier >= RiskTier::Medium {
            warn!(
                tier = verdict.tier.label(),
                indicators = verdict.indicators.len(),
                override_triggered = verdict.override_triggered,
                estimate = estimate.amount,
                reported = total_reported_income,
                "screening flagged declaration"
            );
        } else {
            info!(
                tier = verdict.tier.label(),
                indicators = verdict.indicators.len(),
                "screening completed"
            );
        }

        Ok(ScreeningReport {
            taxpayer: declaration.identity.full_name,
            occupation: declaration.occupation,
            estimate,
            reported_income: declaration.reported_income,
            interest_income: declaration.interest_income,
            capital_gains: declaration.capital_gains,
            total_reported_income,
            verdict,
            reported_slab: slab_of(total_reported_income),
            estimated_slab: slab_of(estimate.amount),
            tax_due: tax_on(total_reported_income),
            estimated_tax_due: tax_on(estimate.amount),
            assessed_at: Utc::now(),
        })
    }
}
