//! Risk classifier — maps (drug, variant set) to a RiskAssessment.

use pgxrisk_common::{Phenotype, RiskAssessment, RiskLabel, Severity, VariantRecord};
use tracing::debug;

use crate::genes::{loss_of_function_rsids, Drug, VKORC1_SENSITIVITY_RSID};

/// Classify one drug against the extracted variant set.
///
/// Total function: every input combination yields a well-formed assessment.
/// Unrecognized drugs terminate immediately with the Unknown result.
pub fn assess(drug: &str, variants: &[VariantRecord]) -> RiskAssessment {
    let Some(drug) = Drug::parse(drug) else {
        debug!(drug, "drug not in known set");
        return RiskAssessment::unknown_drug();
    };

    if drug == Drug::Warfarin {
        return assess_warfarin(variants);
    }

    let target_gene = drug.primary_gene();
    let matching: Vec<VariantRecord> = variants
        .iter()
        .filter(|v| v.gene == target_gene)
        .cloned()
        .collect();

    if matching.is_empty() {
        return RiskAssessment {
            risk_label: RiskLabel::Safe,
            confidence_score: 0.7,
            severity: Severity::Low,
            primary_gene: Some(target_gene.to_string()),
            diplotype: "*1/*1".to_string(),
            phenotype: Phenotype::NM,
            detected_variants: Vec::new(),
        };
    }

    let has_lof = matching
        .iter()
        .any(|v| rsid_in(v, loss_of_function_rsids(target_gene)));

    if has_lof {
        if let Some(outcome) = drug.loss_of_function_outcome() {
            return RiskAssessment {
                risk_label: outcome.risk_label,
                confidence_score: outcome.confidence_score,
                severity: outcome.severity,
                primary_gene: Some(target_gene.to_string()),
                diplotype: outcome.diplotype.to_string(),
                phenotype: outcome.phenotype,
                detected_variants: matching,
            };
        }
    }

    // Deliberate asymmetry carried over from the reference rule set: a
    // recognized drug with matching but non-LOF variants still lands on
    // "Adjust Dosage" rather than Safe.
    RiskAssessment {
        risk_label: RiskLabel::AdjustDosage,
        confidence_score: 0.85,
        severity: Severity::Moderate,
        primary_gene: Some(target_gene.to_string()),
        diplotype: "*1/*2".to_string(),
        phenotype: Phenotype::IM,
        detected_variants: matching,
    }
}

/// Warfarin dual-gene branch: CYP2C9 metabolism plus the VKORC1
/// sensitivity marker. VKORC1 alone forces a dose adjustment but does not
/// re-derive the phenotype.
fn assess_warfarin(variants: &[VariantRecord]) -> RiskAssessment {
    let cyp2c9: Vec<VariantRecord> = variants
        .iter()
        .filter(|v| v.gene == "CYP2C9")
        .cloned()
        .collect();

    let vkorc1: Vec<VariantRecord> = variants
        .iter()
        .filter(|v| v.rsid.as_deref() == Some(VKORC1_SENSITIVITY_RSID))
        .cloned()
        .collect();

    let mut phenotype = Phenotype::NM;
    let mut risk_label = RiskLabel::Safe;
    let mut severity = Severity::Low;

    if cyp2c9
        .iter()
        .any(|v| rsid_in(v, loss_of_function_rsids("CYP2C9")))
    {
        phenotype = Phenotype::IM;
        risk_label = RiskLabel::AdjustDosage;
        severity = Severity::Moderate;
    }

    if !vkorc1.is_empty() {
        risk_label = RiskLabel::AdjustDosage;
        severity = Severity::Moderate;
    }

    // CYP2C9 matches first, then VKORC1 matches; duplicates kept.
    let mut detected = cyp2c9;
    detected.extend(vkorc1);

    let diplotype = if phenotype != Phenotype::NM { "*1/*2" } else { "*1/*1" };

    RiskAssessment {
        risk_label,
        confidence_score: 0.9,
        severity,
        primary_gene: Some("CYP2C9 & VKORC1".to_string()),
        diplotype: diplotype.to_string(),
        phenotype,
        detected_variants: detected,
    }
}

fn rsid_in(variant: &VariantRecord, rsids: &[&str]) -> bool {
    variant
        .rsid
        .as_deref()
        .is_some_and(|rsid| rsids.contains(&rsid))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
