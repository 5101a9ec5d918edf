// src/text.rs
//
// Text helpers shared by the renderer:
// - whitespace collapsing for ordinary text runs,
// - whitespace / punctuation probes used by the line-break rules,
// - markup escaping for text and attribute values,
// - line splitting and common-indent removal for script/style blocks.
//
// Whitespace is HTML whitespace (space, tab, LF, FF, CR). Non-breaking
// spaces are content.

use memchr::{memchr2_iter, memchr3_iter, memchr_iter};
use std::io::{self, Write};
use unicode_general_category::{get_general_category, GeneralCategory};

/* ============================ Utility predicates ========================= */

#[inline]
pub fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t' || b == b'\n' || b == b'\r' || b == b'\x0c'
}

#[inline]
fn is_ws_char(c: char) -> bool {
    c.is_ascii() && is_ws(c as u8)
}

pub fn trim(text: &str) -> &str {
    text.trim_matches(is_ws_char)
}

pub fn starts_with_whitespace(text: &str) -> bool {
    text.as_bytes().first().is_some_and(|&b| is_ws(b))
}

pub fn ends_with_whitespace(text: &str) -> bool {
    text.as_bytes().last().is_some_and(|&b| is_ws(b))
}

/// Unicode general category P*, so dashes and quotes count as well as `.,;:!?`.
pub fn is_punctuation(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::ConnectorPunctuation
            | GeneralCategory::DashPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OtherPunctuation
    )
}

pub fn starts_with_punctuation(text: &str) -> bool {
    text.chars().next().is_some_and(is_punctuation)
}

/* ============================== Collapsing =============================== */

/// Collapse every whitespace run to one space.
///
/// A single leading and/or trailing space survives when the input had
/// whitespace at that end, so word boundaries next to inline elements are
/// still visible. All-whitespace input collapses to the empty string.
pub fn collapse_whitespace(text: &str) -> String {
    let body = trim(text);
    if body.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(text.len());
    if starts_with_whitespace(text) {
        out.push(' ');
    }
    for (i, word) in body.split(is_ws_char).filter(|w| !w.is_empty()).enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push_str(word);
    }
    if ends_with_whitespace(text) {
        out.push(' ');
    }
    out
}

/* =============================== Escaping ================================ */

/// Escape `&`, `<` and `>` in character data.
pub fn escape_text<W: Write + ?Sized>(w: &mut W, text: &str) -> io::Result<()> {
    let bytes = text.as_bytes();
    write_escaped(w, bytes, memchr3_iter(b'&', b'<', b'>', bytes))
}

/// Escape `&` and `"` in a double-quoted attribute value.
pub fn escape_attribute<W: Write + ?Sized>(w: &mut W, value: &str) -> io::Result<()> {
    let bytes = value.as_bytes();
    write_escaped(w, bytes, memchr2_iter(b'&', b'"', bytes))
}

fn write_escaped<W, I>(w: &mut W, bytes: &[u8], hits: I) -> io::Result<()>
where
    W: Write + ?Sized,
    I: Iterator<Item = usize>,
{
    let mut start = 0usize;
    for i in hits {
        w.write_all(&bytes[start..i])?;
        w.write_all(entity(bytes[i]))?;
        start = i + 1;
    }
    w.write_all(&bytes[start..])
}

fn entity(b: u8) -> &'static [u8] {
    match b {
        b'&' => b"&amp;",
        b'<' => b"&lt;",
        b'>' => b"&gt;",
        b'"' => b"&quot;",
        _ => unreachable!("no entity for byte {b:#04x}"),
    }
}

/* ============================ Raw-text blocks ============================ */

/// Split an already trimmed script/style body into lines ready to be
/// reindented.
///
/// A trailing `\r` is dropped from each line. The whitespace shared by every
/// non-blank line after the first is removed (the first line lost its own
/// indentation to trimming), and blank lines come back empty.
pub fn raw_block_lines(body: &str) -> Vec<&str> {
    let bytes = body.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    for nl in memchr_iter(b'\n', bytes) {
        lines.push(strip_cr(&body[start..nl]));
        start = nl + 1;
    }
    if start < body.len() {
        lines.push(strip_cr(&body[start..]));
    }

    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !trim(line).is_empty())
        .map(|line| line.bytes().take_while(|&b| is_ws(b)).count())
        .min()
        .unwrap_or(0);

    for (i, line) in lines.iter_mut().enumerate() {
        if trim(line).is_empty() {
            *line = "";
        } else if i > 0 {
            // margin counts ASCII bytes, so this stays on a char boundary
            *line = &line[margin..];
        }
    }
    lines
}

fn strip_cr(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn escaped_text(s: &str) -> String {
        let mut out = Vec::new();
        escape_text(&mut out, s).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn escaped_attribute(s: &str) -> String {
        let mut out = Vec::new();
        escape_attribute(&mut out, s).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn collapse_keeps_one_space_at_each_edge() {
        assert_eq!(collapse_whitespace("  a  \n\t b \n"), " a b ");
        assert_eq!(collapse_whitespace("a\n\nb"), "a b");
        assert_eq!(collapse_whitespace("\na"), " a");
        assert_eq!(collapse_whitespace("a\r\n"), "a ");
    }

    #[test]
    fn collapse_of_blank_input_is_empty() {
        assert_eq!(collapse_whitespace(""), "");
        assert_eq!(collapse_whitespace(" \n\t "), "");
    }

    #[test]
    fn non_breaking_space_is_content() {
        assert_eq!(trim("\u{a0}x\u{a0}"), "\u{a0}x\u{a0}");
        assert_eq!(collapse_whitespace("a \u{a0} b"), "a \u{a0} b");
    }

    #[test]
    fn edge_probes() {
        assert!(starts_with_whitespace("\ta"));
        assert!(!starts_with_whitespace("a "));
        assert!(ends_with_whitespace("a\n"));
        assert!(!ends_with_whitespace(""));
    }

    #[test]
    fn punctuation_follows_unicode_categories() {
        for c in ['.', ',', '!', '?', ':', ';', '(', ')', '–', '—', '«', '_', '"'] {
            assert!(is_punctuation(c), "{c:?} should be punctuation");
        }
        for c in ['a', '1', ' ', '$', '+', '<', '|'] {
            assert!(!is_punctuation(c), "{c:?} should not be punctuation");
        }
        assert!(starts_with_punctuation(". and more"));
        assert!(!starts_with_punctuation(" ."));
        assert!(!starts_with_punctuation(""));
    }

    #[test]
    fn text_escaping() {
        assert_eq!(escaped_text("a < b && c > d"), "a &lt; b &amp;&amp; c &gt; d");
        assert_eq!(escaped_text("it's \"fine\""), "it's \"fine\"");
        assert_eq!(escaped_text("plain"), "plain");
    }

    #[test]
    fn attribute_escaping() {
        assert_eq!(escaped_attribute("&&"), "&amp;&amp;");
        assert_eq!(escaped_attribute("say \"hi\""), "say &quot;hi&quot;");
        assert_eq!(escaped_attribute("<b>"), "<b>");
        assert_eq!(escaped_attribute("it's"), "it's");
    }

    #[test]
    fn raw_lines_keep_relative_indentation() {
        let body = "body {\n  color: red;\n}";
        assert_eq!(raw_block_lines(body), vec!["body {", "  color: red;", "}"]);
    }

    #[test]
    fn raw_lines_drop_common_margin() {
        let body = "if (x) {\n      y();\n    }";
        assert_eq!(raw_block_lines(body), vec!["if (x) {", "  y();", "}"]);
    }

    #[test]
    fn raw_lines_handle_crlf_and_blank_lines() {
        let body = "a();\r\n   \r\n  b();";
        assert_eq!(raw_block_lines(body), vec!["a();", "", "b();"]);
    }

    #[test]
    fn raw_single_line() {
        assert_eq!(raw_block_lines("var x = 1;"), vec!["var x = 1;"]);
    }
}
