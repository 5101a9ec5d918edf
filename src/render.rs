// src/render.rs
//
// Tree → text. One recursive walk; the only state threaded through it is the
// nesting level and whether we are below a <pre>/<code> ("raw"), where no
// whitespace is touched and no line breaks are added.
//
// Line-break rules, in short:
// - Elements start on a fresh indented line unless they are inline and
//   directly continue a text run that did not end in whitespace.
// - An element whose only child is non-blank text is written on one line.
// - Text ends its line unless the next sibling is inline and the text did not
//   end in whitespace.
// - Text that starts with punctuation sticks to whatever precedes it, and an
//   element keeps its line open for it.
// - <script>/<style> bodies are reindented line by line, never reflowed.
// - Text is escaped except inside elements the parser reads as raw text.

use std::io::{self, Write};
use tracing::trace;

use crate::classify;
use crate::text;
use crate::tree::{Attribute, NodeId, NodeKind, Tree};

/// Write `unit` repeated `level` times.
pub fn write_indent<W: Write + ?Sized>(w: &mut W, unit: &str, level: usize) -> io::Result<()> {
    for _ in 0..level {
        w.write_all(unit.as_bytes())?;
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default)]
struct Context {
    level: usize,
    raw: bool,
}

impl Context {
    fn child(self, name: &str) -> Self {
        Self {
            level: self.level + 1,
            raw: self.raw || classify::is_literal(name),
        }
    }
}

pub struct Renderer<'t, W> {
    tree: &'t Tree,
    out: W,
    indent: &'t str,
}

impl<'t, W: Write> Renderer<'t, W> {
    pub fn new(tree: &'t Tree, out: W, indent: &'t str) -> Self {
        Self { tree, out, indent }
    }

    /// Render every top-level node of the tree at level 0, in order.
    pub fn render_roots(&mut self) -> io::Result<()> {
        for &root in self.tree.roots() {
            trace!(node = root.index(), "rendering top-level node");
            self.render(root, Context::default())?;
        }
        Ok(())
    }

    fn render(&mut self, id: NodeId, ctx: Context) -> io::Result<()> {
        let tree = self.tree;
        match tree.node(id).kind() {
            NodeKind::Document => self.render_children(id, Context::default()),
            NodeKind::Doctype(name) => {
                writeln!(self.out, "<!doctype {}>", name)?;
                self.render_children(id, Context { raw: false, ..ctx })
            }
            NodeKind::Comment(data) => {
                self.indent(ctx.level)?;
                writeln!(self.out, "<!--{}-->", data)?;
                self.render_children(id, Context { raw: false, ..ctx })
            }
            NodeKind::Text(data) => self.render_text(id, data, ctx),
            NodeKind::Element { name, attrs } => self.render_element(id, name, attrs, ctx),
        }
    }

    fn render_children(&mut self, id: NodeId, ctx: Context) -> io::Result<()> {
        let tree = self.tree;
        for child in tree.children(id) {
            self.render(child, ctx)?;
        }
        Ok(())
    }

    fn render_text(&mut self, id: NodeId, data: &str, ctx: Context) -> io::Result<()> {
        let tree = self.tree;
        let node = tree.node(id);
        let parent_name = node
            .parent()
            .and_then(|parent| tree.node(parent).element_name());
        let in_raw_block = parent_name.is_some_and(classify::is_raw_content);
        // The parser decodes no entities here, so escaping would change the text.
        let unescaped = in_raw_block || parent_name.is_some_and(classify::is_parser_raw_text);

        if ctx.raw {
            return self.write_text(data, unescaped);
        }

        let body = text::trim(data);
        if body.is_empty() {
            return Ok(());
        }

        let single = node
            .parent()
            .is_some_and(|parent| tree.has_single_text_child(parent));
        let attaches = node.prev_sibling().is_some() && text::starts_with_punctuation(body);
        if !in_raw_block && !single && !attaches {
            self.indent(ctx.level)?;
        }

        if in_raw_block {
            for line in text::raw_block_lines(body) {
                self.newline()?;
                if !line.is_empty() {
                    self.indent(ctx.level)?;
                    self.out.write_all(line.as_bytes())?;
                }
            }
            return self.newline();
        }

        self.write_text(&text::collapse_whitespace(body), unescaped)?;

        if single {
            return Ok(());
        }
        let next_breaks = match node.next_sibling().map(|next| tree.node(next).kind()) {
            None | Some(NodeKind::Comment(_)) => true,
            Some(NodeKind::Element { name, .. }) => !classify::is_inline(name),
            Some(_) => false,
        };
        if text::ends_with_whitespace(data) || next_breaks {
            self.newline()?;
        }
        Ok(())
    }

    fn render_element(
        &mut self,
        id: NodeId,
        name: &str,
        attrs: &[Attribute],
        ctx: Context,
    ) -> io::Result<()> {
        let tree = self.tree;
        let node = tree.node(id);

        // Mirrors the text rule: text only leaves its line open for inline elements.
        let continues_run = classify::is_inline(name)
            && node
                .prev_sibling()
                .and_then(|prev| tree.node(prev).text())
                .is_some_and(|prev| !text::ends_with_whitespace(prev));
        if !ctx.raw && !continues_run {
            self.indent(ctx.level)?;
        }

        write!(self.out, "<{}", name)?;
        for attr in attrs {
            write!(self.out, " {}=\"", attr.name)?;
            text::escape_attribute(&mut self.out, &attr.value)?;
            self.out.write_all(b"\"")?;
        }
        self.out.write_all(b">")?;

        let single = tree.has_single_text_child(id);
        let inner = ctx.child(name);
        // The parser eats one newline after <pre>; give verbatim content that
        // starts with a newline a spare one.
        let keeps_leading_newline = inner.raw
            && classify::drops_leading_newline(name)
            && node
                .first_child()
                .and_then(|child| tree.node(child).text())
                .is_some_and(|data| data.starts_with('\n'));
        if (!ctx.raw && !single) || keeps_leading_newline {
            self.newline()?;
        }
        if classify::is_void(name) {
            return Ok(());
        }

        self.render_children(id, inner)?;

        if !ctx.raw && (classify::is_raw_content(name) || !single) {
            self.indent(ctx.level)?;
        }
        write!(self.out, "</{}>", name)?;

        // Leave the line open only for punctuation that belongs to this element.
        let next_breaks = match node.next_sibling().map(|next| tree.node(next).kind()) {
            Some(NodeKind::Text(data)) => !text::starts_with_punctuation(data),
            _ => true,
        };
        if !ctx.raw && next_breaks {
            self.newline()?;
        }
        Ok(())
    }

    fn write_text(&mut self, data: &str, unescaped: bool) -> io::Result<()> {
        if unescaped {
            self.out.write_all(data.as_bytes())
        } else {
            text::escape_text(&mut self.out, data)
        }
    }

    fn indent(&mut self, level: usize) -> io::Result<()> {
        write_indent(&mut self.out, self.indent, level)
    }

    fn newline(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")
    }
}
