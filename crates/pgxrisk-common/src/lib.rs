//! pgxrisk-common — Shared domain types and errors used across all pgxrisk crates.

pub mod error;
pub mod risk;
pub mod variant;

pub use error::{PgxError, Result};
pub use risk::{ClinicalRecommendation, Phenotype, RiskAssessment, RiskLabel, Severity};
pub use variant::VariantRecord;
