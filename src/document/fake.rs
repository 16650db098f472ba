//! In-memory [`ThemeTree`] used to test engine logic without an XML parser.

use std::collections::BTreeMap;

use super::ThemeTree;
use crate::theme::{MarkerSet, ThemeMarker};

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeElement {
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    pub markers: MarkerSet,
    pub text: String,
    pub parent: Option<usize>,
    pub removed: bool,
}

/// Elements stored by insertion; index 0 is the root.
///
/// `order` lists element indices in document order. [`FakeTree::add`] appends
/// to it, so elements must be added in document order.
#[derive(Debug, Clone)]
pub(crate) struct FakeTree {
    pub elements: Vec<FakeElement>,
    order: Vec<usize>,
}

impl FakeTree {
    pub fn new(root_tag: &str) -> Self {
        Self {
            elements: vec![FakeElement {
                tag: root_tag.to_string(),
                ..FakeElement::default()
            }],
            order: vec![0],
        }
    }

    /// Appends an element under `parent` and returns its index.
    pub fn add(&mut self, parent: usize, tag: &str, attributes: &[(&str, &str)]) -> usize {
        self.elements.push(FakeElement {
            tag: tag.to_string(),
            attributes: attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            parent: Some(parent),
            ..FakeElement::default()
        });
        let index = self.elements.len() - 1;
        self.order.push(index);
        index
    }

    fn is_attached(&self, mut index: usize) -> bool {
        loop {
            let el = &self.elements[index];
            if el.removed {
                return false;
            }
            match el.parent {
                Some(parent) => index = parent,
                None => return true,
            }
        }
    }
}

impl ThemeTree for FakeTree {
    type NodeId = usize;

    fn root(&self) -> usize {
        0
    }

    fn tag_name(&self, node: usize) -> &str {
        &self.elements[node].tag
    }

    fn attribute(&self, node: usize, name: &str) -> Option<&str> {
        self.elements[node].attributes.get(name).map(String::as_str)
    }

    fn set_attribute(&mut self, node: usize, name: &str, value: &str) {
        self.elements[node]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn markers(&self, node: usize) -> MarkerSet {
        self.elements[node].markers
    }

    fn add_marker(&mut self, node: usize, marker: ThemeMarker) -> bool {
        self.elements[node].markers.insert(marker)
    }

    fn select<F>(&self, predicate: F) -> Vec<usize>
    where
        F: Fn(&Self, usize) -> bool,
    {
        self.order[1..]
            .iter()
            .copied()
            .filter(|i| self.is_attached(*i))
            .filter(|i| predicate(self, *i))
            .collect()
    }

    fn child_elements(&self, node: usize) -> Vec<usize> {
        self.order
            .iter()
            .copied()
            .filter(|i| self.elements[*i].parent == Some(node) && !self.elements[*i].removed)
            .collect()
    }

    fn text_content(&self, node: usize) -> String {
        self.elements[node].text.clone()
    }

    fn insert_stylesheet(&mut self, css: &str) -> usize {
        let index = self.add(0, "style", &[]);
        self.elements[index].text = css.to_string();
        self.order.pop();
        self.order.insert(1, index);
        index
    }

    fn remove(&mut self, node: usize) {
        self.elements[node].removed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_becomes_first_child() {
        let mut tree = FakeTree::new("svg");
        let user_style = tree.add(0, "style", &[]);
        let group = tree.add(0, "g", &[]);
        let path = tree.add(group, "path", &[]);

        let sheet = tree.insert_stylesheet(".a {}");

        assert_eq!(tree.child_elements(0), vec![sheet, user_style, group]);
        assert_eq!(tree.select(|_, _| true), vec![sheet, user_style, group, path]);
        assert_eq!(tree.text_content(sheet), ".a {}");
    }
}
