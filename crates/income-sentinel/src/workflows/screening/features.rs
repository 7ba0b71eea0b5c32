use serde::{Deserialize, Serialize};

use super::domain::ValidatedDeclaration;
use super::ScreeningError;

pub const FEATURE_COUNT: usize = 15;

/// Column names in the positional order the regression model was trained on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "age",
    "occupation",
    "marital_status",
    "children",
    "interest_income",
    "business_income",
    "capital_gains",
    "other_income",
    "educational_expenses",
    "healthcare_costs",
    "lifestyle_expenditure",
    "other_expenses",
    "bank_debited",
    "credit_card_debited",
    "base_income",
];

/// Fixed-order model input. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; FEATURE_COUNT]")]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl TryFrom<[f64; FEATURE_COUNT]> for FeatureVector {
    type Error = ScreeningError;

    fn try_from(values: [f64; FEATURE_COUNT]) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}

impl FeatureVector {
    /// Accepts a raw vector, rejecting negative or non-finite fields.
    pub fn new(values: [f64; FEATURE_COUNT]) -> Result<Self, ScreeningError> {
        for (name, value) in FEATURE_NAMES.into_iter().zip(values) {
            if !value.is_finite() || value < 0.0 {
                return Err(ScreeningError::InvalidFeature { name, value });
            }
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }
}

/// Fixed household expense assumptions fed to the model for every taxpayer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ExpenseAssumptions {
    educational: f64,
    healthcare: f64,
    lifestyle: f64,
    other: f64,
}

impl Default for ExpenseAssumptions {
    fn default() -> Self {
        Self {
            educational: 40_000.0,
            healthcare: 30_000.0,
            lifestyle: 50_000.0,
            other: 25_000.0,
        }
    }
}

/// Shares of reported income used to derive the unobserved cash-flow fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DerivationRatios {
    business_income: f64,
    other_income: f64,
    bank_debited: f64,
    credit_card_debited: f64,
}

impl Default for DerivationRatios {
    fn default() -> Self {
        Self {
            business_income: 0.10,
            other_income: 0.05,
            bank_debited: 0.60,
            credit_card_debited: 0.30,
        }
    }
}

/// Lays a validated declaration out in model order with the fixed derivations.
#[derive(Debug, Clone, Default)]
pub struct FeatureVectorBuilder {
    expenses: ExpenseAssumptions,
    ratios: DerivationRatios,
}

impl FeatureVectorBuilder {
    pub fn build(
        &self,
        declaration: &ValidatedDeclaration,
    ) -> Result<FeatureVector, ScreeningError> {
        let reported = declaration.reported_income;
        FeatureVector::new([
            f64::from(declaration.age),
            f64::from(declaration.occupation.code()),
            f64::from(declaration.marital_status.code()),
            f64::from(declaration.children.code()),
            declaration.interest_income,
            reported * self.ratios.business_income,
            declaration.capital_gains,
            reported * self.ratios.other_income,
            self.expenses.educational,
            self.expenses.healthcare,
            self.expenses.lifestyle,
            self.expenses.other,
            reported * self.ratios.bank_debited,
            reported * self.ratios.credit_card_debited,
            reported,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::domain::{
        ChildrenStatus, MaritalStatus, Occupation, TaxpayerIdentity,
    };

    fn declaration() -> ValidatedDeclaration {
        ValidatedDeclaration {
            identity: TaxpayerIdentity {
                full_name: "Asha Rao".to_string(),
                pan: "ABCDE1234F".to_string(),
                aadhaar: "123412341234".to_string(),
                bank_account: "001122334455".to_string(),
            },
            age: 34,
            occupation: Occupation::SelfEmployed,
            marital_status: MaritalStatus::Married,
            children: ChildrenStatus::Yes,
            reported_income: 800_000.0,
            interest_income: 12_000.0,
            capital_gains: 0.0,
        }
    }

    #[test]
    fn builder_lays_out_fields_in_model_order() {
        let vector = FeatureVectorBuilder::default()
            .build(&declaration())
            .expect("vector builds");

        assert_eq!(
            vector.values(),
            &[
                34.0, 2.0, 0.0, 1.0, 12_000.0, 80_000.0, 0.0, 40_000.0, 40_000.0, 30_000.0,
                50_000.0, 25_000.0, 480_000.0, 240_000.0, 800_000.0,
            ]
        );
    }

    #[test]
    fn vector_rejects_negative_fields() {
        let mut values = [0.0; FEATURE_COUNT];
        values[6] = -1.0;

        match FeatureVector::new(values) {
            Err(ScreeningError::InvalidFeature { name, value }) => {
                assert_eq!(name, "capital_gains");
                assert_eq!(value, -1.0);
            }
            other => panic!("expected invalid feature, got {other:?}"),
        }
    }

    #[test]
    fn deserialized_vectors_are_validated() {
        let mut values = vec![1.0; FEATURE_COUNT];
        values[0] = -5.0;
        values[14] = -1.0e6;
        let json = serde_json::to_string(&values).expect("serialize");

        match serde_json::from_str::<FeatureVector>(&json) {
            Err(err) => assert!(err.to_string().contains("age")),
            Ok(vector) => panic!("negative fields accepted: {vector:?}"),
        }

        let valid = serde_json::to_string(&vec![2.0; FEATURE_COUNT]).expect("serialize");
        let vector: FeatureVector = serde_json::from_str(&valid).expect("valid vector");
        assert_eq!(vector.get(14), Some(2.0));
    }

    #[test]
    fn vector_rejects_non_finite_fields() {
        let mut values = [1.0; FEATURE_COUNT];
        values[0] = f64::NAN;

        assert!(FeatureVector::new(values).is_err());
    }
}
