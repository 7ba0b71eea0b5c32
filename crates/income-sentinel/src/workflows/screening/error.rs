use super::intake::IntakeViolation;

/// Error raised anywhere along the screening pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScreeningError {
    #[error("income model unavailable: {0}")]
    ModelUnavailable(String),
    #[error("unknown occupation '{0}' (expected Salaried, Self-employed, or Business)")]
    UnknownOccupation(String),
    #[error("unknown marital status '{0}' (expected Single or Married)")]
    UnknownMaritalStatus(String),
    #[error("unknown children answer '{0}' (expected Yes or No)")]
    UnknownChildrenStatus(String),
    #[error(transparent)]
    InvalidDeclaration(#[from] IntakeViolation),
    #[error("estimated income must be positive, found {0}")]
    InvalidEstimate(f64),
    #[error("feature {name} must be a finite non-negative number, found {value}")]
    InvalidFeature { name: &'static str, value: f64 },
}

impl ScreeningError {
    /// True when the caller sent something the pipeline refuses to score.
    pub fn is_caller_error(&self) -> bool {
        !matches!(self, ScreeningError::ModelUnavailable(_))
    }
}
