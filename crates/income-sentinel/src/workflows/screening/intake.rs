use std::ops::RangeInclusive;

use super::domain::{
    ChildrenStatus, MaritalStatus, Occupation, TaxpayerDeclaration, ValidatedDeclaration,
};
use super::ScreeningError;

/// Validation failures raised while accepting a declaration.
#[derive(Debug, thiserror::Error)]
pub enum IntakeViolation {
    #[error("please fill in all personal information fields (missing {0})")]
    MissingIdentityField(&'static str),
    #[error("age {age} outside accepted range {min}..={max}")]
    AgeOutOfRange { age: u8, min: u8, max: u8 },
    #[error("please enter a valid reported income (found {0})")]
    NonPositiveIncome(f64),
    #[error("{field} must be a finite non-negative amount (found {value})")]
    InvalidAmount { field: &'static str, value: f64 },
}

const DEFAULT_AGE_RANGE: RangeInclusive<u8> = 20..=100;

/// Turns raw declarations into typed, range-checked ones.
#[derive(Debug, Clone)]
pub struct DeclarationGuard {
    age_range: RangeInclusive<u8>,
}

impl Default for DeclarationGuard {
    fn default() -> Self {
        Self {
            age_range: DEFAULT_AGE_RANGE,
        }
    }
}

impl DeclarationGuard {
    pub fn with_age_range(age_range: RangeInclusive<u8>) -> Self {
        Self { age_range }
    }

    pub fn validate(
        &self,
        declaration: TaxpayerDeclaration,
    ) -> Result<ValidatedDeclaration, ScreeningError> {
        let identity = declaration.identity;
        let required = [
            ("full_name", &identity.full_name),
            ("pan", &identity.pan),
            ("aadhaar", &identity.aadhaar),
            ("bank_account", &identity.bank_account),
        ];
        if let Some((field, _)) = required.into_iter().find(|(_, value)| value.trim().is_empty()) {
            return Err(IntakeViolation::MissingIdentityField(field).into());
        }

        if !self.age_range.contains(&declaration.age) {
            return Err(IntakeViolation::AgeOutOfRange {
                age: declaration.age,
                min: *self.age_range.start(),
                max: *self.age_range.end(),
            }
            .into());
        }

        // Categorical fields are typed before any amount is inspected so an
        // unknown occupation is reported as such.
        let occupation: Occupation = declaration.occupation.parse()?;
        let marital_status: MaritalStatus = declaration.marital_status.parse()?;
        let children: ChildrenStatus = declaration.children.parse()?;

        let reported_income = declaration.reported_income;
        if !reported_income.is_finite() || reported_income <= 0.0 {
            return Err(IntakeViolation::NonPositiveIncome(reported_income).into());
        }

        let interest_income = optional_amount("interest_income", declaration.interest_income)?;
        let capital_gains = optional_amount("capital_gains", declaration.capital_gains)?;

        Ok(ValidatedDeclaration {
            identity,
            age: declaration.age,
            occupation,
            marital_status,
            children,
            reported_income,
            interest_income,
            capital_gains,
        })
    }
}

fn optional_amount(field: &'static str, value: Option<f64>) -> Result<f64, IntakeViolation> {
    match value {
        None => Ok(0.0),
        Some(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        Some(amount) => Err(IntakeViolation::InvalidAmount {
            field,
            value: amount,
        }),
    }
}
