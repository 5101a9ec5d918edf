// src/parse.rs
//
// html5ever front end: parse bytes into an rcdom, then copy it into the
// arena `Tree` the renderer walks.

use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, Namespace, ParseOpts, QualName};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::io::Read;
use tracing::debug;

use crate::error::{FormatError, Result};
use crate::tree::{Attribute, NodeId, NodeKind, Tree};

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Parse a whole document. The tree has a single root, the Document node.
pub fn parse_document<R: Read>(input: &mut R) -> Result<Tree> {
    let dom = html5ever::parse_document(RcDom::default(), ParseOpts::default())
        .from_utf8()
        .read_from(input)
        .map_err(FormatError::Parse)?;

    let mut tree = Tree::new();
    let root = tree.push_root(NodeKind::Document);
    append_children(&mut tree, root, &dom.document);
    debug!(nodes = tree.len(), "parsed document");
    Ok(tree)
}

/// Parse a fragment under a context element without a tag name.
///
/// Every top-level node becomes a detached root of the tree: it has no
/// parent and no siblings.
pub fn parse_fragment<R: Read>(input: &mut R) -> Result<Tree> {
    let context = QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(""));
    let dom = html5ever::parse_fragment(RcDom::default(), ParseOpts::default(), context, Vec::new())
        .from_utf8()
        .read_from(input)
        .map_err(FormatError::Parse)?;

    let mut tree = Tree::new();
    // html5ever roots the fragment in a synthetic <html> element
    let html = dom.document.children.borrow().first().cloned();
    if let Some(html) = html {
        for child in html.children.borrow().iter() {
            let Some(kind) = node_kind(child) else {
                continue;
            };
            let id = tree.push_root(kind);
            append_children(&mut tree, id, child);
        }
    }
    debug!(
        nodes = tree.len(),
        roots = tree.roots().len(),
        "parsed fragment"
    );
    Ok(tree)
}

fn append_children(tree: &mut Tree, parent: NodeId, handle: &Handle) {
    for child in handle.children.borrow().iter() {
        let Some(kind) = node_kind(child) else {
            continue;
        };
        let id = tree.append_child(parent, kind);
        append_children(tree, id, child);
    }

    // rcdom keeps <template> contents out of line; format them as children.
    if let NodeData::Element {
        template_contents, ..
    } = &handle.data
    {
        if let Some(contents) = template_contents.borrow().as_ref() {
            append_children(tree, parent, contents);
        }
    }
}

fn node_kind(handle: &Handle) -> Option<NodeKind> {
    let kind = match &handle.data {
        NodeData::Document => NodeKind::Document,
        NodeData::Doctype { name, .. } => NodeKind::Doctype(name.to_string()),
        NodeData::Text { contents } => NodeKind::Text(contents.borrow().to_string()),
        NodeData::Comment { contents } => NodeKind::Comment(contents.to_string()),
        NodeData::Element { name, attrs, .. } => NodeKind::Element {
            name: name.local.to_string(),
            attrs: attrs
                .borrow()
                .iter()
                .map(|attr| {
                    let name = match &attr.name.prefix {
                        Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                        None => attr.name.local.to_string(),
                    };
                    Attribute::new(name, attr.value.to_string())
                })
                .collect(),
        },
        NodeData::ProcessingInstruction { .. } => return None,
    };
    Some(kind)
}
