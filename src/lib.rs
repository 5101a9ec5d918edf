//! Canonical pretty-printer for HTML.
//!
//! Input is parsed with html5ever, either as a whole document or as a
//! fragment, and written back out with deterministic indentation and line
//! breaks. The tree itself is never changed: only whitespace and layout are
//! decided here.
//!
//! ```
//! use htmlformat::{format_fragment, FormatOptions};
//!
//! let html = format_fragment("<ul><li>one</li></ul>", &FormatOptions::default())?;
//! assert_eq!(html, "<ul>\n  <li>one</li>\n</ul>\n");
//! # Ok::<(), htmlformat::FormatError>(())
//! ```

pub mod classify;
pub mod error;
pub mod parse;
pub mod render;
pub mod text;
pub mod tree;

use std::io::{Read, Write};
use tracing::debug;

pub use error::{FormatError, Result};
pub use render::Renderer;
pub use tree::{Attribute, NodeId, NodeKind, Tree};

pub const DEFAULT_INDENT: &str = "  ";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatOptions {
    /// Written verbatim once per nesting level, e.g. two spaces or `"\t"`.
    pub indent: String,
}

impl FormatOptions {
    pub fn with_indent(indent: impl Into<String>) -> Self {
        Self {
            indent: indent.into(),
        }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self::with_indent(DEFAULT_INDENT)
    }
}

/// Format a whole HTML document.
pub fn document<W: Write, R: Read>(w: W, mut r: R, options: &FormatOptions) -> Result<()> {
    let tree = parse::parse_document(&mut r)?;
    nodes(w, &tree, options)
}

/// Format a fragment of an HTML document.
pub fn fragment<W: Write, R: Read>(w: W, mut r: R, options: &FormatOptions) -> Result<()> {
    let tree = parse::parse_fragment(&mut r)?;
    nodes(w, &tree, options)
}

/// Format every top-level node of `tree`, each starting at level 0.
pub fn nodes<W: Write>(w: W, tree: &Tree, options: &FormatOptions) -> Result<()> {
    debug!(
        roots = tree.roots().len(),
        indent = ?options.indent,
        "formatting"
    );
    Renderer::new(tree, w, &options.indent)
        .render_roots()
        .map_err(FormatError::Write)
}

pub fn format_document(input: &str, options: &FormatOptions) -> Result<String> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 4);
    document(&mut out, input.as_bytes(), options)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

pub fn format_fragment(input: &str, options: &FormatOptions) -> Result<String> {
    let mut out = Vec::with_capacity(input.len() + input.len() / 4);
    fragment(&mut out, input.as_bytes(), options)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
