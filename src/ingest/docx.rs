//! Word (`.docx`) paragraph extraction.
//!
//! A `.docx` file is a zip package; the body lives in `word/document.xml`.
//! Only paragraphs that are direct children of `w:body` are read, in
//! document order. Within a paragraph, `w:t` runs contribute their text,
//! `w:tab` a tab and `w:br`/`w:cr` a line break.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

use crate::error::{DocError, Result};
use crate::ingest::Extractor;

const DOCUMENT_PART: &str = "word/document.xml";

/// Which paragraphs survive extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParagraphFilter {
    /// Drop paragraphs that are empty after trimming whitespace.
    #[default]
    NonBlank,
    /// Drop only paragraphs with no text at all.
    NonEmpty,
    /// Keep every paragraph.
    All,
}

impl ParagraphFilter {
    fn keeps(self, paragraph: &str) -> bool {
        match self {
            Self::NonBlank => !paragraph.trim().is_empty(),
            Self::NonEmpty => !paragraph.is_empty(),
            Self::All => true,
        }
    }
}

/// Extracts body paragraphs joined by newlines.
pub struct DocxExtractor {
    filter: ParagraphFilter,
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new(ParagraphFilter::default())
    }
}

impl DocxExtractor {
    #[must_use]
    pub fn new(filter: ParagraphFilter) -> Self {
        Self { filter }
    }
}

impl Extractor for DocxExtractor {
    fn format(&self) -> &'static str {
        "docx"
    }

    fn extract(&self, name: &str, bytes: &[u8]) -> Result<String> {
        let xml = read_document_part(bytes).map_err(|detail| DocError::extraction(name, detail))?;
        let paragraphs = body_paragraphs(&xml)
            .map_err(|e| DocError::extraction(name, format!("malformed document.xml: {e}")))?;

        let kept: Vec<String> = paragraphs
            .into_iter()
            .filter(|p| self.filter.keeps(p))
            .collect();
        Ok(kept.join("\n"))
    }
}

fn read_document_part(bytes: &[u8]) -> std::result::Result<String, String> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| format!("not a docx package: {e}"))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| format!("missing {DOCUMENT_PART}: {e}"))?;
    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| format!("unreadable {DOCUMENT_PART}: {e}"))?;
    Ok(xml)
}

/// Text of every body-level paragraph, empty ones included.
pub fn body_paragraphs(xml: &str) -> std::result::Result<Vec<String>, quick_xml::Error> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let local = e.local_name();
                let local = local.as_ref();
                if local == b"p" && current.is_none() && parent_is(&stack, b"body") {
                    current = Some(String::new());
                } else if local == b"t" && current.is_some() {
                    in_text = true;
                }
                stack.push(local.to_vec());
            }
            Event::Empty(e) => {
                let local = e.local_name();
                match local.as_ref() {
                    b"p" if current.is_none() && parent_is(&stack, b"body") => {
                        paragraphs.push(String::new());
                    }
                    b"tab" if parent_is(&stack, b"r") => {
                        if let Some(text) = current.as_mut() {
                            text.push('\t');
                        }
                    }
                    b"br" | b"cr" if parent_is(&stack, b"r") => {
                        if let Some(text) = current.as_mut() {
                            text.push('\n');
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if in_text {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&t.unescape()?);
                    }
                }
            }
            Event::End(e) => {
                stack.pop();
                let local = e.local_name();
                match local.as_ref() {
                    b"t" => in_text = false,
                    b"p" if parent_is(&stack, b"body") => {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn parent_is(stack: &[Vec<u8>], local: &[u8]) -> bool {
    stack.last().is_some_and(|top| top.as_slice() == local)
}

#[cfg(test)]
pub mod test_support {
    use std::io::{Cursor, Write};

    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Minimal `.docx` package with one body paragraph per entry.
    /// Empty entries become self-closing `<w:p/>` elements.
    #[must_use]
    pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
        let body: String = paragraphs
            .iter()
            .map(|p| {
                if p.is_empty() {
                    "<w:p/>".to_string()
                } else {
                    format!(
                        "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
                        crate::diff::escape_html(p)
                    )
                }
            })
            .collect();
        docx_from_body(&body)
    }

    /// `.docx` package around a raw `w:body` payload.
    #[must_use]
    pub fn docx_from_body(body: &str) -> Vec<u8> {
        let xml = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{body}<w:sectPr/></w:body></w:document>"
        );
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }
}
