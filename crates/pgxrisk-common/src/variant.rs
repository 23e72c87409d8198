//! Variant record type shared by the extractor, the classifier and the
//! response envelope.

use serde::{Deserialize, Serialize};

/// One genomic variant relevant to pharmacogenomics, lifted from a single
/// data line of an uploaded variant file.
///
/// A record is only constructed when its source line carries a `GENE`
/// annotation; `rsid` and `star_allele` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRecord {
    /// Gene symbol, e.g. "CYP2D6".
    pub gene: String,
    /// Reference SNP identifier, e.g. "rs3892097".
    pub rsid: Option<String>,
    /// Star-allele designation, e.g. "*4".
    pub star_allele: Option<String>,
}

impl VariantRecord {
    pub fn new(
        gene: impl Into<String>,
        rsid: Option<String>,
        star_allele: Option<String>,
    ) -> Self {
        Self { gene: gene.into(), rsid, star_allele }
    }
}
