//! pgxrisk-pipeline — per-request orchestration.
//!
//! Composes extraction → risk classification → recommendation → explanation
//! into one `AnalysisResult` per requested drug. Classification and
//! recommendation are pure; the only I/O wait is the text-generation call.

pub mod analysis;

pub use analysis::{run_analysis, AnalysisResult};
