//! Serializing an [`SvgTree`] back to markup.

use std::fmt::{self, Write as _};

use super::{Element, NodeId, NodeKind, SvgTree};
use crate::theme::MarkerSet;

impl SvgTree {
    /// Serializes the root element and its content.
    ///
    /// Markers are written as classes appended to the element's `class`
    /// attribute, which is added at the end of the attribute list when the
    /// element has none.
    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }

    fn write_node(&self, id: NodeId, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.nodes[id.0].kind {
            NodeKind::Element(el) => self.write_element(el, out),
            NodeKind::Text(text) => write_escaped(out, text, false),
            NodeKind::Comment(text) => write!(out, "<!--{text}-->"),
            NodeKind::ProcessingInstruction { target, value } => match value {
                Some(value) => write!(out, "<?{target} {value}?>"),
                None => write!(out, "<?{target}?>"),
            },
        }
    }

    fn write_element(&self, el: &Element, out: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(out, "<{}", el.name)?;

        let mut wrote_class = false;
        for attr in &el.attributes {
            if attr.name == "class" {
                wrote_class = true;
                write_attribute(out, "class", &class_value(Some(&attr.value), el.markers))?;
            } else {
                write_attribute(out, &attr.name, &attr.value)?;
            }
        }
        if !wrote_class && !el.markers.is_empty() {
            write_attribute(out, "class", &class_value(None, el.markers))?;
        }

        if el.children.is_empty() {
            return out.write_str("/>");
        }
        out.write_char('>')?;
        for child in &el.children {
            self.write_node(*child, out)?;
        }
        write!(out, "</{}>", el.name)
    }
}

impl fmt::Display for SvgTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_node(self.root, f)
    }
}

fn class_value(existing: Option<&str>, markers: MarkerSet) -> String {
    let existing = existing.unwrap_or_default();
    if markers.is_empty() {
        return existing.to_string();
    }
    existing
        .split_ascii_whitespace()
        .chain(markers.iter().map(|m| m.class_name()))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_attribute(out: &mut fmt::Formatter<'_>, name: &str, value: &str) -> fmt::Result {
    write!(out, " {name}=\"")?;
    write_escaped(out, value, true)?;
    out.write_char('"')
}

fn write_escaped(out: &mut fmt::Formatter<'_>, text: &str, attribute: bool) -> fmt::Result {
    for ch in text.chars() {
        match ch {
            '&' => out.write_str("&amp;")?,
            '<' => out.write_str("&lt;")?,
            '>' => out.write_str("&gt;")?,
            '"' if attribute => out.write_str("&quot;")?,
            '\n' if attribute => out.write_str("&#10;")?,
            '\r' => out.write_str("&#13;")?,
            '\t' if attribute => out.write_str("&#9;")?,
            _ => out.write_char(ch)?,
        }
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
