// Pedantic lint configuration for the crate.
// Most of these are reasonable but too strict for this codebase:
// - cast_precision_loss: Character counts stay far below f64 precision
// - missing_errors_doc: Error handling is self-evident from Result types
// - missing_panics_doc: Panics are rare and documented inline
// - module_name_repetitions: diff::DiffAlgorithm reads better than diff::Algorithm
// - similar_names: old/new pairs are contextually clear
// - needless_pass_by_value: Sometimes clearer semantically
// - match_same_arms: Combined arms can reduce readability
// - case_sensitive_file_extension_comparisons: Suffixes are lowercased upstream
#![allow(
    clippy::cast_precision_loss,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::needless_pass_by_value,
    clippy::match_same_arms,
    clippy::case_sensitive_file_extension_comparisons
)]

pub mod cli;
pub mod compliance;
pub mod config;
pub mod diff;
pub mod error;
pub mod ingest;
pub mod models;
pub mod operations;
