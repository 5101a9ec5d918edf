// src/tree.rs
//
// Arena-backed node tree. Nodes own nothing: the arena owns every node and
// the parent/child/sibling links are plain indices into it, so the
// back-references never form ownership cycles.

use crate::text;

/// Index of a node inside its [`Tree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    /// Doctype name, e.g. `html`.
    Doctype(String),
    Element {
        name: String,
        /// Source order, duplicates allowed.
        attrs: Vec<Attribute>,
    },
    Text(String),
    Comment(String),
}

impl NodeKind {
    pub fn element(name: impl Into<String>) -> Self {
        NodeKind::Element {
            name: name.into(),
            attrs: Vec::new(),
        }
    }

    pub fn text(data: impl Into<String>) -> Self {
        NodeKind::Text(data.into())
    }
}

#[derive(Clone, Debug)]
pub struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    first_child: Option<NodeId>,
    last_child: Option<NodeId>,
    prev_sibling: Option<NodeId>,
    next_sibling: Option<NodeId>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn first_child(&self) -> Option<NodeId> {
        self.first_child
    }

    pub fn prev_sibling(&self) -> Option<NodeId> {
        self.prev_sibling
    }

    pub fn next_sibling(&self) -> Option<NodeId> {
        self.next_sibling
    }

    pub fn element_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Element { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text(data) => Some(data),
            _ => None,
        }
    }
}

/// A parsed document or fragment.
///
/// `roots` are the top-level nodes handed to the renderer: the Document node
/// for a whole document, or every detached top-level node of a fragment.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached top-level node: no parent, no siblings.
    pub fn push_root(&mut self, kind: NodeKind) -> NodeId {
        let id = self.alloc(kind);
        self.roots.push(id);
        id
    }

    /// Append `kind` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        debug_assert!(
            self.node(parent).text().is_none(),
            "text nodes are leaves"
        );
        let id = self.alloc(kind);
        let prev = self.nodes[parent.0].last_child;
        {
            let node = &mut self.nodes[id.0];
            node.parent = Some(parent);
            node.prev_sibling = prev;
        }
        match prev {
            Some(prev) => self.nodes[prev.0].next_sibling = Some(id),
            None => self.nodes[parent.0].first_child = Some(id),
        }
        self.nodes[parent.0].last_child = Some(id);
        id
    }

    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> Children<'_> {
        Children {
            tree: self,
            next: self.node(id).first_child,
        }
    }

    /// True when `id` is an element whose only child is a text node with
    /// something other than whitespace in it.
    ///
    /// A lone whitespace-only child counts as empty content, so an element
    /// formatted as `<head>\n</head>` still reads the same after re-parsing.
    pub fn has_single_text_child(&self, id: NodeId) -> bool {
        let node = self.node(id);
        if node.first_child.is_none() || node.first_child != node.last_child {
            return false;
        }
        node.first_child
            .and_then(|child| self.node(child).text())
            .is_some_and(|data| !text::trim(data).is_empty())
    }
}

pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.next?;
        self.next = self.tree.node(id).next_sibling;
        Some(id)
    }
}
