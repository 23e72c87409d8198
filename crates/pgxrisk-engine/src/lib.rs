//! pgxrisk-engine — rule-based pharmacogenomic risk classification.
//!
//! Two pure components:
//!   classifier  — (drug, variant set) → RiskAssessment
//!   recommend   — (drug, phenotype)   → ClinicalRecommendation
//!
//! Both are total functions over their inputs: every combination yields a
//! well-formed result and no error can reach the caller. All configuration
//! is read-only static data, so results are idempotent and safe to compute
//! concurrently.

pub mod classifier;
pub mod genes;
pub mod recommend;

pub use classifier::assess;
pub use genes::Drug;
pub use recommend::recommend;
