//! Line-oriented variant record extraction.

use std::borrow::Cow;

use pgxrisk_common::VariantRecord;
use tracing::debug;

/// Header line a conforming producer must declare. Validated by the upload
/// handler before extraction; extraction itself ignores header content.
pub const SUPPORTED_VCF_HEADER: &str = "##fileformat=VCFv4.2";

/// Minimum number of tab-separated columns a data line must carry.
const MIN_VCF_COLUMNS: usize = 8;

/// Index of the INFO column holding the `;`-separated KEY=VALUE annotations.
const INFO_COLUMN: usize = 7;

/// Decode uploaded bytes to text, replacing invalid UTF-8 with U+FFFD.
/// Decoding failures are never propagated as errors.
pub fn decode_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

/// Whether the decoded text declares the expected format version.
pub fn has_supported_header(text: &str) -> bool {
    text.starts_with(SUPPORTED_VCF_HEADER)
}

/// Extract all qualifying variant records from the decoded file text.
///
/// Blank lines and `#`-prefixed header/comment lines are skipped. A data
/// line with fewer than 8 tab-separated fields is a malformed row and is
/// silently dropped. A line contributes a record only if its INFO column
/// declares a `GENE` key; `RS` and `STAR` are optional. Output order matches
/// input order. Total function: never fails, possibly-empty result.
pub fn extract_variants(text: &str) -> Vec<VariantRecord> {
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for line in text.lines() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_VCF_COLUMNS {
            dropped += 1;
            continue;
        }

        if let Some(record) = parse_info_field(fields[INFO_COLUMN]) {
            records.push(record);
        }
    }

    if dropped > 0 {
        debug!(dropped, "skipped malformed variant rows");
    }

    records
}

/// Parse one `;`-separated KEY=VALUE annotation list. Items without `=` are
/// ignored; the first `=` splits key from value.
fn parse_info_field(info: &str) -> Option<VariantRecord> {
    let mut gene = None;
    let mut rsid = None;
    let mut star_allele = None;

    for item in info.split(';') {
        let Some((key, value)) = item.split_once('=') else {
            continue;
        };
        match key {
            "GENE" => gene = Some(value.to_string()),
            "RS" => rsid = Some(value.to_string()),
            "STAR" => star_allele = Some(value.to_string()),
            _ => {}
        }
    }

    gene.map(|gene| VariantRecord { gene, rsid, star_allele })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_full_annotation_line() {
        let line = "chr1\t100\t.\tA\tG\t.\t.\tGENE=CYP2D6;RS=rs3892097";
        let records = extract_variants(line);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gene, "CYP2D6");
        assert_eq!(records[0].rsid.as_deref(), Some("rs3892097"));
        assert_eq!(records[0].star_allele, None);
    }

    #[test]
    fn short_row_is_dropped_silently() {
        let line = "chr1\t100\t.\tA\tG\t.";
        assert!(extract_variants(line).is_empty());
    }

    #[test]
    fn header_and_comment_lines_yield_nothing() {
        let text = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
        assert!(extract_variants(text).is_empty());
    }

    #[test]
    fn blank_lines_are_skipped() {
        let text = "\n   \nchr1\t1\t.\tA\tG\t.\t.\tGENE=TPMT;RS=rs1142345\n\n";
        assert_eq!(extract_variants(text).len(), 1);
    }

    #[test]
    fn line_without_gene_key_yields_no_record() {
        let line = "chr1\t100\t.\tA\tG\t.\t.\tRS=rs3892097;STAR=*4";
        assert!(extract_variants(line).is_empty());
    }

    #[test]
    fn items_without_equals_are_ignored() {
        let line = "chr1\t100\t.\tA\tG\t.\t.\tDB;GENE=DPYD;SOMATIC;RS=rs3918290";
        let records = extract_variants(line);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].gene, "DPYD");
        assert_eq!(records[0].rsid.as_deref(), Some("rs3918290"));
    }

    #[test]
    fn star_allele_is_captured_when_present() {
        let line = "chr22\t42128945\t.\tG\tA\t.\t.\tGENE=CYP2D6;RS=rs3892097;STAR=*4";
        let records = extract_variants(line);
        assert_eq!(records[0].star_allele.as_deref(), Some("*4"));
    }

    #[test]
    fn output_preserves_input_order() {
        let text = "chr1\t1\t.\tA\tG\t.\t.\tGENE=CYP2C9;RS=rs1799853\n\
                    chr2\t2\t.\tC\tT\t.\t.\tGENE=VKORC1;RS=rs9923231\n\
                    chr3\t3\t.\tG\tA\t.\t.\tGENE=CYP2C19;RS=rs4244285";
        let genes: Vec<String> = extract_variants(text).into_iter().map(|v| v.gene).collect();
        assert_eq!(genes, vec!["CYP2C9", "VKORC1", "CYP2C19"]);
    }

    #[test]
    fn mixed_valid_and_malformed_rows() {
        let text = "##fileformat=VCFv4.2\n\
                    chr1\t1\t.\tA\tG\t.\t.\tGENE=SLCO1B1;RS=rs4149056\n\
                    not\ta\tvalid\trow\n\
                    chr2\t2\t.\tC\tT\t.\t.\tGENE=TPMT";
        let records = extract_variants(text);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].gene, "TPMT");
        assert_eq!(records[1].rsid, None);
    }

    #[test]
    fn lossy_decode_never_fails() {
        let bytes = b"chr1\t1\t.\tA\tG\t.\t.\tGENE=CYP2D6\xff";
        let text = decode_lossy(bytes);
        assert_eq!(extract_variants(&text).len(), 1);
    }

    #[test]
    fn header_detection() {
        assert!(has_supported_header("##fileformat=VCFv4.2\nchr1\t..."));
        assert!(!has_supported_header("##fileformat=VCFv4.1\n"));
        assert!(!has_supported_header(""));
    }
}
