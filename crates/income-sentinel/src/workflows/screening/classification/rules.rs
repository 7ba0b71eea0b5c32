use super::config::ClassifierConfig;
use super::FraudIndicator;
use crate::workflows::screening::domain::Occupation;
use crate::workflows::screening::tax::slab_of;

/// Inputs shared by every indicator check.
pub(crate) struct ClassificationInput {
    pub reported_income: f64,
    pub estimated_income: f64,
    pub age: u8,
    pub occupation: Occupation,
    pub tolerance_pct: f64,
}

pub(crate) fn override_fires(input: &ClassificationInput, config: &ClassifierConfig) -> bool {
    input.reported_income > input.estimated_income * config.override_multiplier
}

/// Evaluates every indicator; none of the checks short-circuit the others.
pub(crate) fn fired_indicators(
    input: &ClassificationInput,
    config: &ClassifierConfig,
) -> Vec<FraudIndicator> {
    let reported = input.reported_income;
    let estimated = input.estimated_income;

    let variance_pct = (reported - estimated).abs() / estimated * 100.0;

    let checks = [
        (
            FraudIndicator::TaxSlabMismatch,
            slab_of(reported) != slab_of(estimated),
        ),
        (
            FraudIndicator::IncomeVariance,
            variance_pct > input.tolerance_pct,
        ),
        (
            FraudIndicator::SevereUnderreporting,
            reported < estimated * config.underreporting_ratio,
        ),
        (
            FraudIndicator::AgeIncomeMismatch,
            input.age < config.young_age_limit && reported > config.young_income_cap,
        ),
        (
            FraudIndicator::OccupationIncomeMismatch,
            input.occupation == Occupation::Salaried && reported > config.salaried_income_cap,
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(indicator, fired)| fired.then_some(indicator))
        .collect()
}
