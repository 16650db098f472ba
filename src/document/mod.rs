//! Owned SVG document tree.
//!
//! [`SvgTree`] is a mutable arena copy of a parsed document. It is built fresh
//! for every transformation (see [`SvgTree::parse`]), mutated through the
//! [`ThemeTree`] interface and serialized back with [`SvgTree::to_svg_string`].
//!
//! Marker classes are not kept as raw `class` tokens: parsing lifts them into
//! each element's [`MarkerSet`] and serialization re-appends them.

mod parse;
mod write;

#[cfg(test)]
pub(crate) mod fake;

use crate::theme::{MarkerSet, ThemeMarker};

// ============================================================================
// ThemeTree
// ============================================================================

/// The minimal tree interface the injector and the preview resolver work on.
///
/// Selection always covers the descendants of the root element, never the
/// root itself, in document order.
pub trait ThemeTree {
    /// Handle to an element of the tree.
    type NodeId: Copy;

    /// The root element.
    fn root(&self) -> Self::NodeId;

    /// Local tag name of an element (prefix stripped).
    fn tag_name(&self, node: Self::NodeId) -> &str;

    /// Value of an attribute, if present.
    fn attribute(&self, node: Self::NodeId, name: &str) -> Option<&str>;

    /// Sets an attribute, replacing any existing value.
    fn set_attribute(&mut self, node: Self::NodeId, name: &str, value: &str);

    /// Markers attached to an element.
    fn markers(&self, node: Self::NodeId) -> MarkerSet;

    /// Attaches a marker. Returns `true` if it was not already attached.
    fn add_marker(&mut self, node: Self::NodeId, marker: ThemeMarker) -> bool;

    /// Descendant elements of the root matching `predicate`.
    fn select<F>(&self, predicate: F) -> Vec<Self::NodeId>
    where
        F: Fn(&Self, Self::NodeId) -> bool;

    /// Direct child elements of `node`.
    fn child_elements(&self, node: Self::NodeId) -> Vec<Self::NodeId>;

    /// Concatenated text content of an element.
    fn text_content(&self, node: Self::NodeId) -> String;

    /// Inserts a stylesheet element holding `css` as the root's first child.
    fn insert_stylesheet(&mut self, css: &str) -> Self::NodeId;

    /// Detaches an element (and its subtree) from the tree.
    fn remove(&mut self, node: Self::NodeId);
}

// ============================================================================
// SvgTree
// ============================================================================

/// Handle to a node of an [`SvgTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// An attribute as written in the source, with its qualified name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// Element data: qualified name, ordered attributes, markers and children.
#[derive(Debug, Clone)]
pub struct Element {
    name: String,
    attributes: Vec<Attribute>,
    markers: MarkerSet,
    children: Vec<NodeId>,
}

impl Element {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            markers: MarkerSet::EMPTY,
            children: Vec::new(),
        }
    }

    /// Qualified name as written (`path`, `svg:path`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    /// Attributes in source order. Marker classes are not included.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    pub fn markers(&self) -> MarkerSet {
        self.markers
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
enum NodeKind {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, value: Option<String> },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// A mutable SVG document tree rooted at an `<svg>` element.
#[derive(Debug, Clone)]
pub struct SvgTree {
    nodes: Vec<Node>,
    root: NodeId,
}

fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl SvgTree {
    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: NodeId(0),
        }
    }

    fn push(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { parent, kind });
        if let Some(el) = parent.and_then(|p| self.element_mut(p)) {
            el.children.push(id);
        }
        id
    }

    /// The root element.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Element data for a node, or `None` for text and other node kinds.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].kind {
            NodeKind::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Child nodes of an element, of every kind.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.element(id) {
            Some(el) => &el.children,
            None => &[],
        }
    }

    /// Elements below `id` in document order, `id` excluded.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if let Some(el) = self.element(next) {
                out.push(next);
                stack.extend(el.children.iter().rev());
            }
        }
        out
    }

    /// Compares the subtree at `a` with the subtree at `b` in `other`.
    fn same_subtree(&self, a: NodeId, other: &SvgTree, b: NodeId) -> bool {
        match (&self.nodes[a.0].kind, &other.nodes[b.0].kind) {
            (NodeKind::Element(x), NodeKind::Element(y)) => {
                x.name == y.name
                    && x.attributes == y.attributes
                    && x.markers == y.markers
                    && x.children.len() == y.children.len()
                    && x
                        .children
                        .iter()
                        .zip(&y.children)
                        .all(|(ca, cb)| self.same_subtree(*ca, other, *cb))
            }
            (NodeKind::Text(x), NodeKind::Text(y)) => x == y,
            (NodeKind::Comment(x), NodeKind::Comment(y)) => x == y,
            (
                NodeKind::ProcessingInstruction { target: t1, value: v1 },
                NodeKind::ProcessingInstruction { target: t2, value: v2 },
            ) => t1 == t2 && v1 == v2,
            _ => false,
        }
    }
}

impl PartialEq for SvgTree {
    fn eq(&self, other: &Self) -> bool {
        self.same_subtree(self.root, other, other.root)
    }
}

impl Eq for SvgTree {}

impl ThemeTree for SvgTree {
    type NodeId = NodeId;

    fn root(&self) -> NodeId {
        self.root
    }

    fn tag_name(&self, node: NodeId) -> &str {
        self.element(node).map_or("", Element::local_name)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attribute(name)
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(node) {
            el.set_attribute(name, value);
        }
    }

    fn markers(&self, node: NodeId) -> MarkerSet {
        self.element(node).map_or(MarkerSet::EMPTY, Element::markers)
    }

    fn add_marker(&mut self, node: NodeId, marker: ThemeMarker) -> bool {
        self.element_mut(node)
            .is_some_and(|el| el.markers.insert(marker))
    }

    fn select<F>(&self, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&Self, NodeId) -> bool,
    {
        self.descendant_elements(self.root)
            .into_iter()
            .filter(|id| predicate(self, *id))
            .collect()
    }

    fn child_elements(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node)
            .iter()
            .copied()
            .filter(|id| self.element(*id).is_some())
            .collect()
    }

    fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![node];
        while let Some(next) = stack.pop() {
            match &self.nodes[next.0].kind {
                NodeKind::Element(el) => stack.extend(el.children.iter().rev()),
                NodeKind::Text(t) => text.push_str(t),
                _ => {}
            }
        }
        text
    }

    fn insert_stylesheet(&mut self, css: &str) -> NodeId {
        let root = self.root;
        let name = match self.element(root).map(Element::name) {
            Some(name) => match name.rsplit_once(':') {
                Some((prefix, _)) => format!("{prefix}:{}", crate::theme::STYLE_TAG),
                None => crate::theme::STYLE_TAG.to_string(),
            },
            None => crate::theme::STYLE_TAG.to_string(),
        };

        let style = self.push(None, NodeKind::Element(Element::new(name)));
        self.push(Some(style), NodeKind::Text(css.to_string()));
        self.nodes[style.0].parent = Some(root);
        if let Some(el) = self.element_mut(root) {
            el.children.insert(0, style);
        }
        style
    }

    fn remove(&mut self, node: NodeId) {
        let Some(parent) = self.nodes[node.0].parent.take() else {
            return;
        };
        if let Some(el) = self.element_mut(parent) {
            el.children.retain(|c| *c != node);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
