//! Income estimation and fraud-risk screening for self-reported declarations.
//!
//! A declaration passes through intake validation, feature construction, the
//! bounded income estimator, and the rule classifier; tax liability is
//! computed alongside. Every step is request-scoped and side-effect free
//! apart from the shared, explicitly reloadable model handle.

pub mod batch;
pub mod classification;
pub mod domain;
mod error;
pub mod estimation;
pub mod features;
pub mod intake;
pub mod router;
pub mod service;
pub mod tax;

#[cfg(test)]
mod tests;

pub use batch::{BatchImportError, DeclarationBatch};
pub use classification::{
    ClassifierConfig, FraudIndicator, FraudRiskClassifier, RiskTier, RiskVerdict,
};
pub use domain::{
    ChildrenStatus, MaritalStatus, Occupation, TaxpayerDeclaration, TaxpayerIdentity,
    ValidatedDeclaration,
};
pub use error::ScreeningError;
pub use estimation::{
    EstimatorConfig, IncomeEstimate, IncomeEstimator, IncomeModel, ModelArtifact, ModelError,
    ModelHandle, ModelLoadError,
};
pub use features::{FeatureVector, FeatureVectorBuilder, FEATURE_COUNT};
pub use intake::{DeclarationGuard, IntakeViolation};
pub use router::screening_router;
pub use service::{ScreeningReport, ScreeningService};
pub use tax::{slab_of, tax_on, TaxSlab};
