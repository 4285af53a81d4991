//! Contract compliance checks against regulation documents.
//!
//! Regulations are extracted, each one is paired with the contract text in
//! a prompt, and a chat-completion endpoint returns the report. Results
//! accumulate in an explicit [`Session`].

pub mod batch;
pub mod client;
pub mod loader;
pub mod prompt;
pub mod session;

#[cfg(test)]
pub mod test_support;

use serde::Serialize;

pub use batch::{read_contract, run_batch, validate, BatchReport, BatchRequest, Failure};
pub use client::{Analyzer, ComplianceClient};
pub use loader::{load_regulations, LoadReport};
pub use prompt::build_prompt;
pub use session::Session;

/// A regulation document reduced to its text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Regulation {
    pub filename: String,
    pub content: String,
}

/// The report returned for one regulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub filename: String,
    pub content: String,
}
