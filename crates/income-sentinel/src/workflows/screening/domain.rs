use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ScreeningError;

/// Occupation categories recognised by the estimator and the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Occupation {
    #[serde(rename = "Salaried")]
    Salaried,
    #[serde(rename = "Self-employed")]
    SelfEmployed,
    #[serde(rename = "Business")]
    Business,
}

impl Occupation {
    pub const ALL: [Occupation; 3] = [
        Occupation::Salaried,
        Occupation::SelfEmployed,
        Occupation::Business,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Occupation::Salaried => "Salaried",
            Occupation::SelfEmployed => "Self-employed",
            Occupation::Business => "Business",
        }
    }

    /// Positional code used by the trained model (alphabetical label order).
    pub const fn code(self) -> u8 {
        match self {
            Occupation::Business => 0,
            Occupation::Salaried => 1,
            Occupation::SelfEmployed => 2,
        }
    }
}

impl fmt::Display for Occupation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Occupation {
    type Err = ScreeningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Occupation::ALL
            .into_iter()
            .find(|occupation| occupation.label() == value.trim())
            .ok_or_else(|| ScreeningError::UnknownOccupation(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaritalStatus {
    Single,
    Married,
}

impl MaritalStatus {
    pub const fn label(self) -> &'static str {
        match self {
            MaritalStatus::Single => "Single",
            MaritalStatus::Married => "Married",
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            MaritalStatus::Married => 0,
            MaritalStatus::Single => 1,
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = ScreeningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "Single" => Ok(MaritalStatus::Single),
            "Married" => Ok(MaritalStatus::Married),
            other => Err(ScreeningError::UnknownMaritalStatus(other.to_string())),
        }
    }
}

/// Whether the taxpayer declared dependent children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChildrenStatus {
    No,
    Yes,
}

impl ChildrenStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ChildrenStatus::No => "No",
            ChildrenStatus::Yes => "Yes",
        }
    }

    pub const fn code(self) -> u8 {
        match self {
            ChildrenStatus::No => 0,
            ChildrenStatus::Yes => 1,
        }
    }
}

impl FromStr for ChildrenStatus {
    type Err = ScreeningError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "No" => Ok(ChildrenStatus::No),
            "Yes" => Ok(ChildrenStatus::Yes),
            other => Err(ScreeningError::UnknownChildrenStatus(other.to_string())),
        }
    }
}

/// Identity fields collected with every declaration. Only checked for presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxpayerIdentity {
    pub full_name: String,
    pub pan: String,
    pub aadhaar: String,
    pub bank_account: String,
}

/// Raw declaration as submitted by the taxpayer.
///
/// Categorical fields stay as text here so that unknown values surface as
/// typed errors during intake instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxpayerDeclaration {
    pub identity: TaxpayerIdentity,
    pub age: u8,
    pub occupation: String,
    pub marital_status: String,
    pub children: String,
    pub reported_income: f64,
    #[serde(default)]
    pub interest_income: Option<f64>,
    #[serde(default)]
    pub capital_gains: Option<f64>,
}

/// Declaration after intake validation; every field is typed and in range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedDeclaration {
    pub identity: TaxpayerIdentity,
    pub age: u8,
    pub occupation: Occupation,
    pub marital_status: MaritalStatus,
    pub children: ChildrenStatus,
    pub reported_income: f64,
    pub interest_income: f64,
    pub capital_gains: f64,
}

impl ValidatedDeclaration {
    /// Income compared against the estimate: base plus every declared side income.
    pub fn total_reported_income(&self) -> f64 {
        self.reported_income + self.interest_income + self.capital_gains
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupation_parses_known_labels() {
        assert_eq!("Salaried".parse::<Occupation>().ok(), Some(Occupation::Salaried));
        assert_eq!(
            " Self-employed ".parse::<Occupation>().ok(),
            Some(Occupation::SelfEmployed)
        );
        assert_eq!("Business".parse::<Occupation>().ok(), Some(Occupation::Business));
    }

    #[test]
    fn occupation_rejects_unknown_labels() {
        match "Freelancer".parse::<Occupation>() {
            Err(ScreeningError::UnknownOccupation(value)) => assert_eq!(value, "Freelancer"),
            other => panic!("expected unknown occupation, got {other:?}"),
        }
    }

    #[test]
    fn codes_follow_alphabetical_label_order() {
        assert_eq!(Occupation::Business.code(), 0);
        assert_eq!(Occupation::Salaried.code(), 1);
        assert_eq!(Occupation::SelfEmployed.code(), 2);
        assert_eq!(MaritalStatus::Married.code(), 0);
        assert_eq!(MaritalStatus::Single.code(), 1);
        assert_eq!(ChildrenStatus::No.code(), 0);
        assert_eq!(ChildrenStatus::Yes.code(), 1);
    }

    #[test]
    fn occupation_serializes_with_display_label() {
        let json = serde_json::to_string(&Occupation::SelfEmployed).expect("serialize");
        assert_eq!(json, "\"Self-employed\"");
    }
}
