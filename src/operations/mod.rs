//! Shared operations behind the CLI commands.
//!
//! Each operation returns a serializable result so the binary only has to
//! pick an output format.

pub mod diff;
pub mod extract;
pub mod formats;

pub use diff::{check_diff_input, diff_documents, DiffReport, DiffStats};
pub use extract::{extract_document, ExtractOutput};
pub use formats::{list_formats, FormatInfo, FormatsResult};
