//! Static gene/drug configuration tables.
//!
//! Illustrative fixed-lookup data, not a population-genetics-validated
//! diplotype caller: each gene carries a single representative
//! loss-of-function rsid.

use pgxrisk_common::{Phenotype, RiskLabel, Severity};
use serde::{Deserialize, Serialize};

/// Sensitivity marker consumed only by the warfarin dual-gene branch.
pub const VKORC1_SENSITIVITY_RSID: &str = "rs9923231";

/// The closed set of drugs the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Drug {
    Codeine,
    Warfarin,
    Clopidogrel,
    Simvastatin,
    Azathioprine,
    Fluorouracil,
}

impl Drug {
    /// Case-insensitive lookup. Anything outside the known set is the
    /// Unknown-risk path, not an error.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_uppercase().as_str() {
            "CODEINE" => Some(Drug::Codeine),
            "WARFARIN" => Some(Drug::Warfarin),
            "CLOPIDOGREL" => Some(Drug::Clopidogrel),
            "SIMVASTATIN" => Some(Drug::Simvastatin),
            "AZATHIOPRINE" => Some(Drug::Azathioprine),
            "FLUOROURACIL" => Some(Drug::Fluorouracil),
            _ => None,
        }
    }

    /// Primary metabolizing gene for this drug.
    pub fn primary_gene(self) -> &'static str {
        match self {
            Drug::Codeine => "CYP2D6",
            Drug::Warfarin => "CYP2C9",
            Drug::Clopidogrel => "CYP2C19",
            Drug::Simvastatin => "SLCO1B1",
            Drug::Azathioprine => "TPMT",
            Drug::Fluorouracil => "DPYD",
        }
    }

    /// Fixed outcome when a loss-of-function variant is present in the
    /// target gene. Warfarin has no entry: it is handled by the dual-gene
    /// branch before this table is consulted.
    pub fn loss_of_function_outcome(self) -> Option<LofOutcome> {
        let outcome = match self {
            Drug::Fluorouracil => LofOutcome {
                risk_label: RiskLabel::Toxic,
                confidence_score: 0.95,
                severity: Severity::Critical,
                diplotype: "*1/*2A",
                phenotype: Phenotype::PM,
            },
            Drug::Clopidogrel => LofOutcome {
                risk_label: RiskLabel::Ineffective,
                confidence_score: 0.9,
                severity: Severity::Moderate,
                diplotype: "*1/*2",
                phenotype: Phenotype::IM,
            },
            Drug::Codeine => LofOutcome {
                risk_label: RiskLabel::AdjustDosage,
                confidence_score: 0.9,
                severity: Severity::Moderate,
                diplotype: "*1/*4",
                phenotype: Phenotype::IM,
            },
            Drug::Simvastatin => LofOutcome {
                risk_label: RiskLabel::AdjustDosage,
                confidence_score: 0.85,
                severity: Severity::Moderate,
                diplotype: "*1/*5",
                phenotype: Phenotype::IM,
            },
            Drug::Azathioprine => LofOutcome {
                risk_label: RiskLabel::AdjustDosage,
                confidence_score: 0.9,
                severity: Severity::Moderate,
                diplotype: "*1/*3A",
                phenotype: Phenotype::IM,
            },
            Drug::Warfarin => return None,
        };
        Some(outcome)
    }
}

/// Per-drug constants applied when `has_lof` is true.
#[derive(Debug, Clone, Copy)]
pub struct LofOutcome {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
    pub diplotype: &'static str,
    pub phenotype: Phenotype,
}

/// Rsids considered loss-of-function for a gene. Genes outside the table
/// have no known LOF markers.
pub fn loss_of_function_rsids(gene: &str) -> &'static [&'static str] {
    match gene {
        "CYP2C19" => &["rs4244285"],
        "CYP2C9" => &["rs1799853"],
        "CYP2D6" => &["rs3892097"],
        "SLCO1B1" => &["rs4149056"],
        "TPMT" => &["rs1142345"],
        "DPYD" => &["rs3918290"],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drug_parse_is_case_insensitive() {
        assert_eq!(Drug::parse("warfarin"), Some(Drug::Warfarin));
        assert_eq!(Drug::parse(" Codeine "), Some(Drug::Codeine));
        assert_eq!(Drug::parse("aspirin"), None);
    }

    #[test]
    fn every_drug_maps_to_a_gene_with_lof_markers() {
        for drug in [
            Drug::Codeine,
            Drug::Warfarin,
            Drug::Clopidogrel,
            Drug::Simvastatin,
            Drug::Azathioprine,
            Drug::Fluorouracil,
        ] {
            assert!(!loss_of_function_rsids(drug.primary_gene()).is_empty());
        }
    }

    #[test]
    fn warfarin_has_no_single_gene_lof_entry() {
        assert!(Drug::Warfarin.loss_of_function_outcome().is_none());
        assert!(Drug::Fluorouracil.loss_of_function_outcome().is_some());
    }
}
