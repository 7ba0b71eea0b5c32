use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::workflows::screening::domain::Occupation;

/// Policy thresholds applied by the fraud-risk rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Reported income above `estimate * override_multiplier` is high risk outright.
    pub override_multiplier: f64,
    pub underreporting_ratio: f64,
    /// Allowed |reported - estimate| as a percentage of the estimate.
    pub variance_tolerance_pct: BTreeMap<Occupation, f64>,
    pub young_age_limit: u8,
    pub young_income_cap: f64,
    pub salaried_income_cap: f64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            override_multiplier: 2.0,
            underreporting_ratio: 0.95,
            variance_tolerance_pct: BTreeMap::from([
                (Occupation::Salaried, 3.0),
                (Occupation::SelfEmployed, 7.0),
                (Occupation::Business, 10.0),
            ]),
            young_age_limit: 30,
            young_income_cap: 1_000_000.0,
            salaried_income_cap: 2_000_000.0,
        }
    }
}

impl ClassifierConfig {
    pub fn tolerance_for(&self, occupation: Occupation) -> Option<f64> {
        self.variance_tolerance_pct.get(&occupation).copied()
    }
}
