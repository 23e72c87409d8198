//! Risk classification vocabulary and result types.
//!
//! These are the wire-facing shapes of the classification engine: a closed
//! set of risk labels, severities and metabolizer phenotypes, plus the
//! per-drug assessment and recommendation records built from them.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::variant::VariantRecord;

// ── Closed vocabularies ───────────────────────────────────────────────────────

/// Clinical risk category for a (drug, variant set) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLabel {
    Unknown,
    Safe,
    #[serde(rename = "Adjust Dosage")]
    AdjustDosage,
    Ineffective,
    Toxic,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Unknown => "Unknown",
            RiskLabel::Safe => "Safe",
            RiskLabel::AdjustDosage => "Adjust Dosage",
            RiskLabel::Ineffective => "Ineffective",
            RiskLabel::Toxic => "Toxic",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of the clinical consequence if the drug is given as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    None,
    Low,
    Moderate,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Low => "low",
            Severity::Moderate => "moderate",
            Severity::Critical => "critical",
        }
    }
}

/// Inferred metabolizer phenotype class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phenotype {
    /// Normal metabolizer
    NM,
    /// Intermediate metabolizer
    IM,
    /// Poor metabolizer
    PM,
    /// Ultra-rapid metabolizer
    URM,
    Unknown,
}

impl Phenotype {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phenotype::NM => "NM",
            Phenotype::IM => "IM",
            Phenotype::PM => "PM",
            Phenotype::URM => "URM",
            Phenotype::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Phenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Classification result for one (drug, variant set) pair.
///
/// Every field is a fixed constant per classification branch; nothing here is
/// a computed statistic. Computed fresh per drug per request, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
    /// Primary metabolizing gene, a compound label for multi-gene cases,
    /// or None when the drug is unrecognized.
    pub primary_gene: Option<String>,
    pub diplotype: String,
    pub phenotype: Phenotype,
    /// Variants relevant to this decision, in input order.
    pub detected_variants: Vec<VariantRecord>,
}

impl RiskAssessment {
    /// Terminal result for a drug outside the known set.
    pub fn unknown_drug() -> Self {
        Self {
            risk_label: RiskLabel::Unknown,
            confidence_score: 0.0,
            severity: Severity::None,
            primary_gene: None,
            diplotype: "Unknown".to_string(),
            phenotype: Phenotype::Unknown,
            detected_variants: Vec::new(),
        }
    }
}

/// Fixed clinical action derived from (drug, phenotype) by static lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClinicalRecommendation {
    pub action: String,
    pub guideline_source: String,
}

impl ClinicalRecommendation {
    pub fn new(action: impl Into<String>, guideline_source: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            guideline_source: guideline_source.into(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
