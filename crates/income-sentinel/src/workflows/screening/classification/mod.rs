mod config;
mod policy;
mod rules;

pub use config::ClassifierConfig;
pub use policy::{RiskTier, RiskVerdict};

use serde::{Deserialize, Serialize};

use super::domain::Occupation;
use super::ScreeningError;
use rules::{fired_indicators, override_fires, ClassificationInput};

/// Independent boolean fraud signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudIndicator {
    TaxSlabMismatch,
    IncomeVariance,
    SevereUnderreporting,
    AgeIncomeMismatch,
    OccupationIncomeMismatch,
}

impl FraudIndicator {
    pub const fn code(self) -> &'static str {
        match self {
            FraudIndicator::TaxSlabMismatch => "tax_slab_mismatch",
            FraudIndicator::IncomeVariance => "income_variance",
            FraudIndicator::SevereUnderreporting => "severe_underreporting",
            FraudIndicator::AgeIncomeMismatch => "age_income_mismatch",
            FraudIndicator::OccupationIncomeMismatch => "occupation_income_mismatch",
        }
    }
}

/// Stateless rule classifier comparing reported income with the estimate.
#[derive(Debug, Clone, Default)]
pub struct FraudRiskClassifier {
    config: ClassifierConfig,
}

impl FraudRiskClassifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify with an occupation given as its display label.
    pub fn classify(
        &self,
        reported_income: f64,
        estimated_income: f64,
        age: u8,
        occupation: &str,
    ) -> Result<RiskVerdict, ScreeningError> {
        let occupation: Occupation = occupation.parse()?;
        self.classify_occupation(reported_income, estimated_income, age, occupation)
    }

    pub fn classify_occupation(
        &self,
        reported_income: f64,
        estimated_income: f64,
        age: u8,
        occupation: Occupation,
    ) -> Result<RiskVerdict, ScreeningError> {
        let tolerance_pct = self
            .config
            .tolerance_for(occupation)
            .ok_or_else(|| ScreeningError::UnknownOccupation(occupation.label().to_string()))?;

        if !estimated_income.is_finite() || estimated_income <= 0.0 {
            return Err(ScreeningError::InvalidEstimate(estimated_income));
        }

        let input = ClassificationInput {
            reported_income,
            estimated_income,
            age,
            occupation,
            tolerance_pct,
        };

        if override_fires(&input, &self.config) {
            return Ok(RiskVerdict::overridden());
        }

        Ok(RiskVerdict::from_indicators(fired_indicators(
            &input,
            &self.config,
        )))
    }
}
