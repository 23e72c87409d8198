//! Recommendation resolver — static (drug, phenotype) → clinical action table.
//!
//! Pure lookup over CPIC Level A guidance strings; independent of classifier
//! state and free of failure modes.

use pgxrisk_common::{ClinicalRecommendation, Phenotype};

use crate::genes::Drug;

const STANDARD_DOSING: &str = "Standard dosing recommended";

/// Resolve the fixed clinical action for a drug and phenotype.
///
/// Unrecognized drugs fall back to a generic clinical-judgment directive.
pub fn recommend(drug: &str, phenotype: Phenotype) -> ClinicalRecommendation {
    let Some(drug) = Drug::parse(drug) else {
        return ClinicalRecommendation::new("Adjust therapy based on clinical judgment", "CPIC");
    };

    match drug {
        Drug::Clopidogrel => {
            let source = "CPIC Level A – CYP2C19 & Clopidogrel";
            match phenotype {
                Phenotype::IM | Phenotype::PM => ClinicalRecommendation::new(
                    "Use alternative antiplatelet therapy (prasugrel or ticagrelor)",
                    source,
                ),
                _ => ClinicalRecommendation::new(STANDARD_DOSING, source),
            }
        }

        Drug::Warfarin => {
            let source = "CPIC Level A – CYP2C9 & Warfarin";
            match phenotype {
                Phenotype::IM | Phenotype::PM => ClinicalRecommendation::new(
                    "Reduce initial dose and monitor INR closely",
                    source,
                ),
                _ => ClinicalRecommendation::new(STANDARD_DOSING, source),
            }
        }

        Drug::Codeine => {
            let source = "CPIC Level A – CYP2D6 & Codeine";
            match phenotype {
                Phenotype::PM => ClinicalRecommendation::new(
                    "Avoid codeine due to lack of efficacy",
                    source,
                ),
                Phenotype::URM => ClinicalRecommendation::new(
                    "Avoid codeine due to toxicity risk",
                    source,
                ),
                Phenotype::IM => ClinicalRecommendation::new(
                    "Consider reduced dose or alternative opioid",
                    source,
                ),
                _ => ClinicalRecommendation::new(STANDARD_DOSING, source),
            }
        }

        Drug::Simvastatin => {
            let source = "CPIC Level A – SLCO1B1 & Simvastatin";
            match phenotype {
                Phenotype::IM | Phenotype::PM => ClinicalRecommendation::new(
                    "Consider lower dose or alternative statin due to myopathy risk",
                    source,
                ),
                _ => ClinicalRecommendation::new(STANDARD_DOSING, source),
            }
        }

        Drug::Azathioprine => {
            let source = "CPIC Level A – TPMT & Azathioprine";
            match phenotype {
                Phenotype::PM => ClinicalRecommendation::new(
                    "Substantially reduce dose or consider alternative therapy",
                    source,
                ),
                Phenotype::IM => ClinicalRecommendation::new(
                    "Reduce starting dose and monitor closely",
                    source,
                ),
                _ => ClinicalRecommendation::new(STANDARD_DOSING, source),
            }
        }

        Drug::Fluorouracil => {
            let source = "CPIC Level A – DPYD & Fluorouracil";
            match phenotype {
                Phenotype::IM | Phenotype::PM => ClinicalRecommendation::new(
                    "Reduce starting dose due to toxicity risk",
                    source,
                ),
                _ => ClinicalRecommendation::new(STANDARD_DOSING, source),
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
