// src/classify.rs
//
// Tag classification tables. Names are matched ASCII case-insensitively;
// anything not listed answers `false` to every question.

/* =============================== Core sets =============================== */

/// Elements that never have an end tag or children.
/// http://www.w3.org/TR/html-markup/syntax.html#syntax-elements
pub fn is_void(name: &str) -> bool {
    matches_ignore_ascii_case(
        name.as_bytes(),
        &[
            b"area", b"base", b"br", b"col", b"command", b"embed", b"hr", b"img", b"input",
            b"keygen", b"link", b"meta", b"param", b"source", b"track", b"wbr",
        ],
    )
}

/// Phrasing content that may share a line with the text around it.
pub fn is_inline(name: &str) -> bool {
    matches_ignore_ascii_case(
        name.as_bytes(),
        &[
            b"a", b"abbr", b"audio", b"b", b"br", b"button", b"canvas", b"cite", b"code",
            b"data", b"del", b"dfn", b"em", b"i", b"iframe", b"img", b"ins", b"kbd", b"label",
            b"map", b"mark", b"math", b"meter", b"object", b"progress", b"q", b"s", b"samp",
            b"select", b"small", b"span", b"strong", b"sub", b"sup", b"textarea", b"time", b"u",
            b"var", b"video",
        ],
    )
}

/// Elements whose text is kept line for line and only reindented.
pub fn is_raw_content(name: &str) -> bool {
    matches_ignore_ascii_case(name.as_bytes(), &[b"script", b"style"])
}

/// Elements below which whitespace is significant and nothing is reflowed.
pub fn is_literal(name: &str) -> bool {
    matches_ignore_ascii_case(name.as_bytes(), &[b"pre", b"code"])
}

/// Elements the parser reads as raw text: no entities are decoded inside,
/// so their text must be written back unescaped.
pub fn is_parser_raw_text(name: &str) -> bool {
    matches_ignore_ascii_case(
        name.as_bytes(),
        &[b"iframe", b"noembed", b"noframes", b"noscript", b"plaintext", b"xmp"],
    )
}

/// Elements whose first newline after the start tag is dropped by the parser.
pub fn drops_leading_newline(name: &str) -> bool {
    matches_ignore_ascii_case(name.as_bytes(), &[b"listing", b"pre", b"textarea"])
}

/* ============================ Utility predicates ========================= */

fn matches_ignore_ascii_case(name: &[u8], set: &[&[u8]]) -> bool {
    set.iter().any(|&s| name.eq_ignore_ascii_case(s))
}
