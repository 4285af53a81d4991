//! Dual-view HTML rendering of an alignment.
//!
//! Opcodes are computed on the unescaped characters. Each opcode's slice is
//! cut first and escaped afterwards, so multi-character entities such as
//! `&amp;` never shift the offsets of later slices.

use crate::config::RenderSettings;
use crate::diff::{opcodes, DiffAlgorithm};
use crate::models::{Opcode, Tag};

/// Colors and font of the generated markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightStyle {
    pub delete_color: String,
    pub insert_color: String,
    pub font_family: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self::from(&RenderSettings::default())
    }
}

impl From<&RenderSettings> for HighlightStyle {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            delete_color: settings.delete_color.clone(),
            insert_color: settings.insert_color.clone(),
            font_family: settings.font_family.clone(),
        }
    }
}

/// Aligns two texts and renders the old and new views.
#[derive(Debug, Clone, Default)]
pub struct Highlighter {
    pub style: HighlightStyle,
    pub algorithm: DiffAlgorithm,
}

impl Highlighter {
    #[must_use]
    pub fn new(style: HighlightStyle, algorithm: DiffAlgorithm) -> Self {
        Self { style, algorithm }
    }

    /// Returns `(old_view, new_view)`.
    #[must_use]
    pub fn highlight(&self, old: &str, new: &str) -> (String, String) {
        let a: Vec<char> = old.chars().collect();
        let b: Vec<char> = new.chars().collect();
        let ops = opcodes(&a, &b, self.algorithm);
        self.render(&a, &b, &ops)
    }

    /// Render both views from precomputed opcodes over `old` and `new`.
    #[must_use]
    pub fn render(&self, old: &[char], new: &[char], ops: &[Opcode]) -> (String, String) {
        let mut old_html = String::new();
        let mut new_html = String::new();

        for op in ops {
            let old_slice: String = old[op.old_range()].iter().collect();
            let new_slice: String = new[op.new_range()].iter().collect();
            match op.tag {
                Tag::Equal => {
                    old_html.push_str(&escape_html(&old_slice));
                    new_html.push_str(&escape_html(&new_slice));
                }
                Tag::Delete => {
                    self.push_marked(&mut old_html, &self.style.delete_color, &old_slice);
                }
                Tag::Insert => {
                    self.push_marked(&mut new_html, &self.style.insert_color, &new_slice);
                }
                Tag::Replace => {
                    self.push_marked(&mut old_html, &self.style.delete_color, &old_slice);
                    self.push_marked(&mut new_html, &self.style.insert_color, &new_slice);
                }
            }
        }

        (self.wrap(&old_html), self.wrap(&new_html))
    }

    fn push_marked(&self, out: &mut String, color: &str, slice: &str) {
        out.push_str("<span style=\"background-color:");
        out.push_str(&escape_html(color));
        out.push_str("\">");
        out.push_str(&escape_html(slice));
        out.push_str("</span>");
    }

    fn wrap(&self, body: &str) -> String {
        format!(
            "<div style=\"font-family:{}; white-space:pre-wrap;\">{body}</div>",
            escape_html(&self.style.font_family)
        )
    }
}

/// Highlight with the default style and the Ratcliff/Obershelp aligner.
#[must_use]
pub fn highlight(old: &str, new: &str) -> (String, String) {
    Highlighter::default().highlight(old, new)
}

/// Escape HTML special characters, quotes included.
#[must_use]
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: &str = "<div style=\"font-family:SimSun; white-space:pre-wrap;\">";
    const CLOSE: &str = "</div>";

    fn body(view: &str) -> &str {
        view.strip_prefix(OPEN)
            .and_then(|v| v.strip_suffix(CLOSE))
            .expect("view is wrapped")
    }

    fn markers(view: &str) -> usize {
        view.matches("<span").count()
    }

    #[test]
    fn identical_texts_have_no_markers() {
        for text in ["", "same", "line one\nline two\n", "条款 1.2"] {
            let (old, new) = highlight(text, text);
            assert_eq!(old, new);
            assert_eq!(markers(&old), 0);
            assert_eq!(body(&old), escape_html(text));
        }
    }

    #[test]
    fn empty_old_marks_everything_inserted() {
        let (old, new) = highlight("", "brand new");
        assert_eq!(body(&old), "");
        assert_eq!(
            body(&new),
            "<span style=\"background-color:#ccffcc\">brand new</span>"
        );
    }

    #[test]
    fn both_empty_yield_empty_views() {
        let (old, new) = highlight("", "");
        assert_eq!(body(&old), "");
        assert_eq!(body(&new), "");
    }

    #[test]
    fn special_chars_are_escaped_without_markers() {
        let (old, new) = highlight("a<b", "a<b");
        assert_eq!(body(&old), "a&lt;b");
        assert_eq!(body(&new), "a&lt;b");
        assert_eq!(markers(&old), 0);
    }

    #[test]
    fn slices_are_cut_before_escaping() {
        // The change sits after an '&': escaping first would shift it.
        let (old, new) = highlight("x & y = 1", "x & y = 2");
        assert_eq!(
            body(&old),
            "x &amp; y = <span style=\"background-color:#ffcccc\">1</span>"
        );
        assert_eq!(
            body(&new),
            "x &amp; y = <span style=\"background-color:#ccffcc\">2</span>"
        );
    }

    #[test]
    fn deletions_only_show_in_old_view() {
        let (old, new) = highlight("keep this, drop that", "keep this");
        assert_eq!(
            body(&old),
            "keep this<span style=\"background-color:#ffcccc\">, drop that</span>"
        );
        assert_eq!(body(&new), "keep this");
    }

    #[test]
    fn replace_marks_both_views() {
        let (old, new) = highlight("qabxcd", "abycdf");
        assert_eq!(
            body(&old),
            "<span style=\"background-color:#ffcccc\">q</span>ab\
             <span style=\"background-color:#ffcccc\">x</span>cd"
        );
        assert_eq!(
            body(&new),
            "ab<span style=\"background-color:#ccffcc\">y</span>cd\
             <span style=\"background-color:#ccffcc\">f</span>"
        );
    }

    #[test]
    fn line_breaks_are_preserved() {
        let (old, _) = highlight("a\n\n  b", "a\n\n  b");
        assert_eq!(body(&old), "a\n\n  b");
    }

    #[test]
    fn multibyte_offsets_are_character_based() {
        let (old, new) = highlight("甲方应付款", "乙方应付款");
        assert_eq!(
            body(&old),
            "<span style=\"background-color:#ffcccc\">甲</span>方应付款"
        );
        assert_eq!(
            body(&new),
            "<span style=\"background-color:#ccffcc\">乙</span>方应付款"
        );
    }

    #[test]
    fn custom_style_is_used() {
        let style = HighlightStyle {
            delete_color: "red".into(),
            insert_color: "green".into(),
            font_family: "monospace".into(),
        };
        let (old, new) = Highlighter::new(style, DiffAlgorithm::Myers).highlight("a", "b");
        assert!(old.starts_with("<div style=\"font-family:monospace;"));
        assert!(old.contains("background-color:red"));
        assert!(new.contains("background-color:green"));
    }

    #[test]
    fn style_values_cannot_break_the_attribute() {
        let style = HighlightStyle {
            delete_color: "red\" onclick=\"x".into(),
            insert_color: "<green>".into(),
            font_family: "Times\" New".into(),
        };
        let (old, new) = Highlighter::new(style, DiffAlgorithm::Ratcliff).highlight("a", "b");
        assert!(old.starts_with("<div style=\"font-family:Times&quot; New; white-space:pre-wrap;\">"));
        assert!(old.contains("<span style=\"background-color:red&quot; onclick=&quot;x\">a</span>"));
        assert!(new.contains("<span style=\"background-color:&lt;green&gt;\">b</span>"));
        assert!(!old.contains("onclick=\""));
    }

    #[test]
    fn escape_html_covers_quotes() {
        assert_eq!(
            escape_html("<a href=\"x\">'&'</a>"),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }
}
