//! pgxrisk-web — HTTP surface for the pharmacogenomic analysis pipeline.
//! Thin plumbing only: upload validation, drug-list splitting, config and
//! startup. All decision logic lives in pgxrisk-engine and pgxrisk-pipeline.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
