//! pgxrisk-vcf — best-effort variant extraction from uploaded VCF text.
//!
//! This is deliberately not a VCF-standard-compliant parser: it consumes a
//! minimal tab-separated subset and reads a fixed handful of INFO sub-fields
//! (GENE, RS, STAR). Malformed rows are dropped, never reported as errors.

pub mod extractor;

pub use extractor::{decode_lossy, extract_variants, has_supported_header, SUPPORTED_VCF_HEADER};
