//! Explanation request builder.
//!
//! Assembles the structured clinical context for the text-generation service
//! and wraps its output. The prose itself is opaque: callers and tests only
//! rely on presence and on the variant ids echoed back in
//! `variant_references`.

use pgxrisk_common::{Phenotype, RiskAssessment, RiskLabel, VariantRecord};
use serde::{Deserialize, Serialize};

use crate::backend::{LlmBackend, LlmError, LlmRequest, Message};

/// Structured prompt context for one (drug, assessment) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplanationContext {
    pub drug: String,
    pub gene: String,
    pub phenotype: Phenotype,
    pub risk_label: RiskLabel,
    /// Non-null rsids of the detected variants, in input order.
    pub variant_ids: Vec<String>,
}

impl ExplanationContext {
    pub fn from_assessment(drug: &str, assessment: &RiskAssessment) -> Self {
        Self {
            drug: drug.to_string(),
            gene: assessment
                .primary_gene
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            phenotype: assessment.phenotype,
            risk_label: assessment.risk_label,
            variant_ids: variant_rsids(&assessment.detected_variants),
        }
    }

    /// Render the prompt sent to the text-generation service.
    pub fn prompt(&self) -> String {
        let variant_section = if self.variant_ids.is_empty() {
            "No high-impact pharmacogenomic variants were detected in the target gene."
                .to_string()
        } else {
            format!(
                "The following pharmacogenomic variants were detected: {}. \
                 These variants may alter {} enzyme activity.",
                self.variant_ids.join(", "),
                self.gene
            )
        };

        format!(
            "You are a clinical pharmacogenomics expert.\n\
             \n\
             Drug: {drug}\n\
             Primary Gene: {gene}\n\
             Phenotype: {phenotype}\n\
             Risk classification: {risk}\n\
             \n\
             Variant Information:\n\
             {variants}\n\
             \n\
             Provide a structured clinical explanation including:\n\
             \n\
             1. Drug mechanism of action\n\
             2. Role of {gene} in metabolism\n\
             3. Impact of detected variants (if any)\n\
             4. Why the phenotype leads to this risk classification\n\
             5. A CPIC-aligned clinical recommendation\n\
             \n\
             Be medically accurate, precise, and concise.",
            drug = self.drug,
            gene = self.gene,
            phenotype = self.phenotype,
            risk = self.risk_label,
            variants = variant_section,
        )
    }
}

/// Generated explanation plus the rsids it was asked to reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    pub summary: String,
    pub variant_references: Vec<String>,
}

/// Non-null rsids of a variant set, in order.
pub fn variant_rsids(variants: &[VariantRecord]) -> Vec<String> {
    variants.iter().filter_map(|v| v.rsid.clone()).collect()
}

/// Build the context, invoke the backend, wrap the prose.
///
/// Service failures propagate as `LlmError`; the pipeline decides whether to
/// fail the drug's result or substitute a placeholder.
pub async fn generate_explanation(
    backend: &dyn LlmBackend,
    drug: &str,
    assessment: &RiskAssessment,
) -> Result<Explanation, LlmError> {
    let ctx = ExplanationContext::from_assessment(drug, assessment);
    let req = LlmRequest {
        messages: vec![Message::user(ctx.prompt())],
        model: None,
        max_tokens: Some(1024),
        temperature: Some(0.3),
    };
    let resp = backend.complete(req).await?;
    Ok(Explanation {
        summary: resp.content,
        variant_references: ctx.variant_ids,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
