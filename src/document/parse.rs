//! Building an [`SvgTree`] from markup with `roxmltree`.

use roxmltree::{Document, ParsingOptions};

use super::{Attribute, Element, NodeId, NodeKind, SvgTree};
use crate::error::TransformError;
use crate::theme::{MarkerSet, ThemeMarker};

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

/// Root element tag of an SVG document.
pub(crate) const ROOT_TAG: &str = "svg";

impl SvgTree {
    /// Parses SVG markup into a fresh tree.
    ///
    /// Only the root element and its content are kept: the XML declaration,
    /// DOCTYPE and anything outside the root are dropped. Fails with
    /// [`TransformError::InvalidDocument`] if the markup is not well-formed
    /// XML or the root element is not `<svg>`.
    ///
    /// # Example
    ///
    /// ```
    /// use favicon_theme::SvgTree;
    ///
    /// let tree = SvgTree::parse(r#"<svg><path d="M0 0"/></svg>"#).unwrap();
    /// assert_eq!(tree.to_svg_string(), r#"<svg><path d="M0 0"/></svg>"#);
    ///
    /// assert!(SvgTree::parse("<html></html>").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, TransformError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let doc = Document::parse_with_options(text, options)?;

        let root = doc.root_element();
        let tag = root.tag_name().name();
        if tag != ROOT_TAG {
            return Err(TransformError::invalid(format!(
                "expected an <{ROOT_TAG}> root element, found <{tag}>"
            )));
        }

        let mut tree = SvgTree::empty();
        tree.root = tree.copy_element(root, None);
        Ok(tree)
    }

    fn copy_element(&mut self, node: roxmltree::Node<'_, '_>, parent: Option<NodeId>) -> NodeId {
        let mut element = Element::new(qualified_element_name(node));
        element.attributes = namespace_declarations(node);

        for attr in node.attributes() {
            let name = qualified_attribute_name(node, attr.namespace(), attr.name());
            if name == "class" {
                let (rest, markers) = split_marker_classes(attr.value());
                element.markers = markers;
                if let Some(value) = rest {
                    element.attributes.push(Attribute { name, value });
                }
            } else {
                element.attributes.push(Attribute {
                    name,
                    value: attr.value().to_string(),
                });
            }
        }

        let id = self.push(parent, NodeKind::Element(element));
        for child in node.children() {
            if child.is_element() {
                self.copy_element(child, Some(id));
            } else if child.is_text() {
                let text = child.text().unwrap_or_default();
                self.push(Some(id), NodeKind::Text(text.to_string()));
            } else if child.is_comment() {
                let text = child.text().unwrap_or_default();
                self.push(Some(id), NodeKind::Comment(text.to_string()));
            } else if let Some(pi) = child.pi() {
                self.push(
                    Some(id),
                    NodeKind::ProcessingInstruction {
                        target: pi.target.to_string(),
                        value: pi.value.map(str::to_string),
                    },
                );
            }
        }
        id
    }
}

/// Separates marker classes from the other tokens of a `class` value.
///
/// Returns the attribute value to keep (`None` when only markers were present)
/// and the lifted markers. Values without markers are kept verbatim.
fn split_marker_classes(value: &str) -> (Option<String>, MarkerSet) {
    let mut markers = MarkerSet::EMPTY;
    let mut rest = Vec::new();
    for token in value.split_ascii_whitespace() {
        match ThemeMarker::from_class_name(token) {
            Some(marker) => {
                markers.insert(marker);
            }
            None => rest.push(token),
        }
    }

    if markers.is_empty() {
        (Some(value.to_string()), markers)
    } else if rest.is_empty() {
        (None, markers)
    } else {
        (Some(rest.join(" ")), markers)
    }
}

fn prefix_for(node: roxmltree::Node<'_, '_>, uri: &str) -> Option<String> {
    if uri == XML_NAMESPACE {
        return Some("xml".to_string());
    }
    node.namespaces()
        .filter(|ns| ns.uri() == uri)
        .find_map(|ns| ns.name())
        .map(str::to_string)
}

fn default_namespace<'a>(node: roxmltree::Node<'a, '_>) -> Option<&'a str> {
    node.namespaces()
        .find(|ns| ns.name().is_none())
        .map(|ns| ns.uri())
}

fn qualified_element_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(uri) if default_namespace(node) != Some(uri) => match prefix_for(node, uri) {
            Some(prefix) => format!("{prefix}:{}", tag.name()),
            None => tag.name().to_string(),
        },
        _ => tag.name().to_string(),
    }
}

fn qualified_attribute_name(
    node: roxmltree::Node<'_, '_>,
    namespace: Option<&str>,
    name: &str,
) -> String {
    match namespace.and_then(|uri| prefix_for(node, uri)) {
        Some(prefix) => format!("{prefix}:{name}"),
        None => name.to_string(),
    }
}

/// `xmlns` attributes for the namespaces this element declares itself.
///
/// roxmltree reports in-scope namespaces, so declarations inherited from an
/// ancestor are filtered out by comparing with the parent element.
fn namespace_declarations(node: roxmltree::Node<'_, '_>) -> Vec<Attribute> {
    let parent = node.parent_element();
    node.namespaces()
        .filter(|ns| ns.name() != Some("xml"))
        .filter(|ns| {
            parent.is_none_or(|p| {
                !p.namespaces()
                    .any(|inherited| inherited.name() == ns.name() && inherited.uri() == ns.uri())
            })
        })
        .map(|ns| Attribute {
            name: match ns.name() {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            },
            value: ns.uri().to_string(),
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
