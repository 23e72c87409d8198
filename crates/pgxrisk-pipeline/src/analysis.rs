//! End-to-end analysis flow for one uploaded file and one or more drugs.
//!
//! Per drug: classify → recommend → explain, then merge into a single
//! response record. Drugs are processed sequentially and independently;
//! nothing is shared or cached between them, so results match what each
//! drug would get if requested alone.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use pgxrisk_common::{
    ClinicalRecommendation, Phenotype, RiskAssessment, RiskLabel, Severity, VariantRecord,
};
use pgxrisk_engine::{assess, recommend};
use pgxrisk_llm::explain::variant_rsids;
use pgxrisk_llm::{generate_explanation, Explanation, LlmBackend};
use pgxrisk_vcf::extract_variants;

/// Substituted when the text-generation service fails for one drug.
/// Clearly marked so clients cannot mistake it for model output.
const EXPLANATION_UNAVAILABLE: &str =
    "Clinical explanation unavailable: text generation service error.";

// ── Response envelope ─────────────────────────────────────────────────────────

/// Per-drug response unit. Created once, never mutated, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub analysis_id: Uuid,
    pub drug: String,
    pub timestamp: DateTime<Utc>,
    pub risk_assessment: RiskSummary,
    pub pharmacogenomic_profile: PharmacogenomicProfile,
    pub clinical_recommendation: ClinicalRecommendation,
    pub llm_generated_explanation: ExplanationSection,
    pub quality_metrics: QualityMetrics,
}

#[derive(Debug, Clone, Serialize)]
pub struct RiskSummary {
    pub risk_label: RiskLabel,
    pub confidence_score: f64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize)]
pub struct PharmacogenomicProfile {
    pub primary_gene: Option<String>,
    pub diplotype: String,
    pub phenotype: Phenotype,
    pub detected_variants: Vec<VariantRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationSection {
    pub summary: String,
    pub variant_references: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityMetrics {
    pub vcf_parsing_success: bool,
    /// Total variant records extracted from the file.
    pub variant_count: usize,
    /// Variants matched to this drug's target gene(s).
    pub gene_variants_detected: usize,
    pub drug_processed: bool,
    pub multiple_drugs_supported: bool,
}

// ── Orchestration ─────────────────────────────────────────────────────────────

/// Run the full analysis for one decoded file and an ordered drug list.
///
/// A text-generation failure downgrades only that drug's explanation to a
/// marked placeholder; sibling drugs are unaffected.
pub async fn run_analysis(
    backend: &dyn LlmBackend,
    file_text: &str,
    drugs: &[String],
) -> Vec<AnalysisResult> {
    let variants = extract_variants(file_text);
    info!(
        variants = variants.len(),
        drugs = drugs.len(),
        "starting pharmacogenomic analysis"
    );

    let multiple_drugs = drugs.len() > 1;
    let mut results = Vec::with_capacity(drugs.len());

    for drug in drugs {
        results.push(analyze_drug(backend, drug, &variants, multiple_drugs).await);
    }

    results
}

async fn analyze_drug(
    backend: &dyn LlmBackend,
    drug: &str,
    variants: &[VariantRecord],
    multiple_drugs: bool,
) -> AnalysisResult {
    let assessment = assess(drug, variants);
    let recommendation = recommend(drug, assessment.phenotype);

    let explanation = match generate_explanation(backend, drug, &assessment).await {
        Ok(explanation) => explanation,
        Err(err) => {
            warn!(drug, error = %err, "text generation failed, substituting placeholder");
            Explanation {
                summary: EXPLANATION_UNAVAILABLE.to_string(),
                variant_references: variant_rsids(&assessment.detected_variants),
            }
        }
    };

    build_result(drug, assessment, recommendation, explanation, variants.len(), multiple_drugs)
}

fn build_result(
    drug: &str,
    assessment: RiskAssessment,
    recommendation: ClinicalRecommendation,
    explanation: Explanation,
    total_variants: usize,
    multiple_drugs: bool,
) -> AnalysisResult {
    let gene_variants_detected = assessment.detected_variants.len();

    AnalysisResult {
        analysis_id: Uuid::new_v4(),
        drug: drug.to_string(),
        timestamp: Utc::now(),
        risk_assessment: RiskSummary {
            risk_label: assessment.risk_label,
            confidence_score: assessment.confidence_score,
            severity: assessment.severity,
        },
        pharmacogenomic_profile: PharmacogenomicProfile {
            primary_gene: assessment.primary_gene,
            diplotype: assessment.diplotype,
            phenotype: assessment.phenotype,
            detected_variants: assessment.detected_variants,
        },
        clinical_recommendation: recommendation,
        llm_generated_explanation: ExplanationSection {
            summary: explanation.summary,
            variant_references: explanation.variant_references,
        },
        quality_metrics: QualityMetrics {
            vcf_parsing_success: true,
            variant_count: total_variants,
            gene_variants_detected,
            drug_processed: true,
            multiple_drugs_supported: multiple_drugs,
        },
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pgxrisk_llm::{LlmError, LlmRequest, LlmResponse};

    const SAMPLE_VCF: &str = "##fileformat=VCFv4.2\n\
        chr10\t96702047\t.\tC\tT\t.\t.\tGENE=CYP2C9;RS=rs1799853\n\
        chr16\t31107689\t.\tG\tA\t.\t.\tGENE=VKORC1;RS=rs9923231\n\
        chr22\t42128945\t.\tG\tA\t.\t.\tGENE=CYP2D6;RS=rs3892097;STAR=*4\n";

    struct StubBackend;

    #[async_trait]
    impl LlmBackend for StubBackend {
        async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
            Ok(LlmResponse {
                content: "Stubbed clinical explanation.".to_string(),
                model: "stub".to_string(),
                prompt_tokens: 0,
                completion_tokens: 0,
            })
        }

        fn model_id(&self) -> &str { "stub" }
    }

    struct FailingBackend;

    #[async_trait]
    impl LlmBackend for FailingBackend {
        async fn complete(&self, _req: LlmRequest) -> Result<LlmResponse, LlmError> {
            Err(LlmError::Unavailable("connection refused".to_string()))
        }

        fn model_id(&self) -> &str { "failing" }
    }

    fn drug_list(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn multi_drug_results_are_independent() {
        let drugs = drug_list(&["WARFARIN", "CODEINE"]);
        let results = run_analysis(&StubBackend, SAMPLE_VCF, &drugs).await;
        assert_eq!(results.len(), 2);

        let warfarin = &results[0];
        assert_eq!(warfarin.drug, "WARFARIN");
        assert_eq!(warfarin.risk_assessment.risk_label, RiskLabel::AdjustDosage);
        assert_eq!(
            warfarin.pharmacogenomic_profile.primary_gene.as_deref(),
            Some("CYP2C9 & VKORC1")
        );
        assert_eq!(warfarin.pharmacogenomic_profile.detected_variants.len(), 2);

        let codeine = &results[1];
        assert_eq!(codeine.drug, "CODEINE");
        assert_eq!(codeine.risk_assessment.risk_label, RiskLabel::AdjustDosage);
        assert_eq!(codeine.pharmacogenomic_profile.diplotype, "*1/*4");
        assert_eq!(codeine.pharmacogenomic_profile.detected_variants.len(), 1);

        // Same fields as if each drug were requested alone
        let alone = run_analysis(&StubBackend, SAMPLE_VCF, &drug_list(&["CODEINE"])).await;
        assert_eq!(
            alone[0].risk_assessment.risk_label,
            codeine.risk_assessment.risk_label
        );
        assert_eq!(
            alone[0].pharmacogenomic_profile.diplotype,
            codeine.pharmacogenomic_profile.diplotype
        );

        for result in &results {
            assert!(result.quality_metrics.multiple_drugs_supported);
            assert_eq!(result.quality_metrics.variant_count, 3);
        }
        assert!(!alone[0].quality_metrics.multiple_drugs_supported);
    }

    #[tokio::test]
    async fn service_failure_substitutes_marked_placeholder() {
        let results = run_analysis(&FailingBackend, SAMPLE_VCF, &drug_list(&["CODEINE"])).await;
        let explanation = &results[0].llm_generated_explanation;
        assert_eq!(explanation.summary, EXPLANATION_UNAVAILABLE);
        // Variant references survive even when the prose does not
        assert_eq!(explanation.variant_references, vec!["rs3892097"]);
        // Classification is untouched by the explanation failure
        assert_eq!(results[0].risk_assessment.risk_label, RiskLabel::AdjustDosage);
    }

    #[tokio::test]
    async fn unknown_drug_yields_well_formed_result() {
        let results = run_analysis(&StubBackend, SAMPLE_VCF, &drug_list(&["ASPIRIN"])).await;
        let result = &results[0];
        assert_eq!(result.risk_assessment.risk_label, RiskLabel::Unknown);
        assert_eq!(result.risk_assessment.confidence_score, 0.0);
        assert_eq!(result.pharmacogenomic_profile.primary_gene, None);
        assert_eq!(result.quality_metrics.gene_variants_detected, 0);
        assert_eq!(
            result.clinical_recommendation.action,
            "Adjust therapy based on clinical judgment"
        );
    }

    #[tokio::test]
    async fn explanation_summary_is_present_and_references_match() {
        let results = run_analysis(&StubBackend, SAMPLE_VCF, &drug_list(&["FLUOROURACIL"])).await;
        let result = &results[0];
        assert!(!result.llm_generated_explanation.summary.is_empty());
        // No DPYD variants in the sample, so no references either
        assert!(result.llm_generated_explanation.variant_references.is_empty());
        assert_eq!(result.risk_assessment.risk_label, RiskLabel::Safe);
    }

    #[tokio::test]
    async fn empty_file_still_produces_results() {
        let results = run_analysis(&StubBackend, "", &drug_list(&["WARFARIN"])).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].quality_metrics.variant_count, 0);
        assert_eq!(results[0].risk_assessment.risk_label, RiskLabel::Safe);
    }

    #[tokio::test]
    async fn results_serialize_with_wire_field_names() {
        let results = run_analysis(&StubBackend, SAMPLE_VCF, &drug_list(&["WARFARIN"])).await;
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["risk_assessment"]["risk_label"], "Adjust Dosage");
        assert_eq!(json["risk_assessment"]["severity"], "moderate");
        assert_eq!(json["pharmacogenomic_profile"]["phenotype"], "IM");
        assert!(json["quality_metrics"]["vcf_parsing_success"].as_bool().unwrap());
        assert!(json["timestamp"].as_str().unwrap().contains('T'));
    }
}
