pub mod document;
pub mod opcode;

pub use document::{Document, DocumentFormat};
pub use opcode::{Opcode, Tag};
