//! Element arena built from a parsed backend document.
//!
//! The backend's tree borrows the input text, so it can't be stored next to
//! the text it points into. Instead the elements are copied once into a flat
//! arena in document order; navigation then works on plain indices.

use std::collections::HashMap;

use roxmltree::Document;

use super::utils::{direct_text, get_tag_name, qualified_attribute_name, qualified_tag_name};
use crate::config::{LoadOptions, NameMatching};
use crate::error::{NavError, Result};
use crate::types::NodeIndex;

/// An attribute as stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub local_name: String,
    pub qualified_name: String,
    pub value: String,
}

impl AttributeRecord {
    #[must_use]
    pub fn name(&self, mode: NameMatching) -> &str {
        match mode {
            NameMatching::Local => &self.local_name,
            NameMatching::Qualified => &self.qualified_name,
        }
    }
}

/// An element as stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRecord {
    pub local_name: String,
    pub qualified_name: String,
    pub attributes: Vec<AttributeRecord>,
    /// Concatenated direct text children.
    pub text: String,
    pub parent: Option<NodeIndex>,
    pub first_child: Option<NodeIndex>,
    pub next_sibling: Option<NodeIndex>,
}

impl ElementRecord {
    #[must_use]
    pub fn name(&self, mode: NameMatching) -> &str {
        match mode {
            NameMatching::Local => &self.local_name,
            NameMatching::Qualified => &self.qualified_name,
        }
    }
}

/// Every element of one document, root first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTree {
    elements: Vec<ElementRecord>,
}

impl ElementTree {
    /// Parse `text` with the backend and copy its elements into an arena.
    ///
    /// # Arguments
    /// * `text` - XML source text
    /// * `options` - Load options (backend limits, text trimming)
    /// * `source_name` - Label used in the error if parsing fails
    ///
    /// # Returns
    /// * `Ok(ElementTree)` with at least the root element
    /// * `Err(NavError::Parse)` if the text isn't well-formed XML
    pub fn parse(text: &str, options: &LoadOptions, source_name: &str) -> Result<Self> {
        let doc = Document::parse_with_options(text, options.parsing_options()).map_err(
            |source| NavError::Parse {
                source_name: source_name.to_string(),
                source,
            },
        )?;
        let tree = Self::from_document(&doc, options.trim_text);
        tracing::debug!(
            source = source_name,
            elements = tree.len(),
            "Built element arena"
        );
        Ok(tree)
    }

    /// Copy the elements of an already parsed document.
    #[must_use]
    pub fn from_document(doc: &Document<'_>, trim_text: bool) -> Self {
        let mut elements: Vec<ElementRecord> = Vec::new();
        let mut last_child: Vec<Option<NodeIndex>> = Vec::new();
        let mut positions: HashMap<roxmltree::NodeId, NodeIndex> = HashMap::new();

        // descendants() is pre-order, so a parent is always recorded before its children
        for node in doc.root_element().descendants().filter(|n| n.is_element()) {
            let index = NodeIndex::new(elements.len());
            let parent = node
                .parent_element()
                .and_then(|p| positions.get(&p.id()).copied());

            let attributes = node
                .attributes()
                .map(|attr| AttributeRecord {
                    local_name: attr.name().to_string(),
                    qualified_name: qualified_attribute_name(node, &attr),
                    value: attr.value().to_string(),
                })
                .collect();

            let text = direct_text(node);
            let text = if trim_text {
                text.trim().to_string()
            } else {
                text
            };

            elements.push(ElementRecord {
                local_name: get_tag_name(node).to_string(),
                qualified_name: qualified_tag_name(node),
                attributes,
                text,
                parent,
                first_child: None,
                next_sibling: None,
            });
            last_child.push(None);
            positions.insert(node.id(), index);

            if let Some(parent) = parent {
                match last_child[parent.get()] {
                    Some(previous) => elements[previous.get()].next_sibling = Some(index),
                    None => elements[parent.get()].first_child = Some(index),
                }
                last_child[parent.get()] = Some(index);
            }
        }

        Self { elements }
    }

    #[must_use]
    pub fn get(&self, index: NodeIndex) -> Option<&ElementRecord> {
        self.elements.get(index.get())
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.elements.len()
    }

    /// Iterate the element children of `index` in document order.
    pub fn children(&self, index: NodeIndex) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.get(index).and_then(|e| e.first_child),
        }
    }

    /// Iterate the element siblings that follow `index`.
    pub fn following_siblings(&self, index: NodeIndex) -> Siblings<'_> {
        Siblings {
            tree: self,
            next: self.get(index).and_then(|e| e.next_sibling),
        }
    }
}

/// Iterator over a chain of element siblings.
pub struct Siblings<'a> {
    tree: &'a ElementTree,
    next: Option<NodeIndex>,
}

impl<'a> Iterator for Siblings<'a> {
    type Item = (NodeIndex, &'a ElementRecord);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        let element = self.tree.get(index)?;
        self.next = element.next_sibling;
        Some((index, element))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(xml: &str) -> ElementTree {
        ElementTree::parse(xml, &LoadOptions::default(), "test").unwrap()
    }

    fn names<'a>(iter: impl Iterator<Item = (NodeIndex, &'a ElementRecord)>) -> Vec<&'a str> {
        iter.map(|(_, e)| e.local_name.as_str()).collect()
    }

    #[test]
    fn test_document_order() {
        let tree = build("<root><a><a1/></a><b/></root>");
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.get(NodeIndex::ROOT).unwrap().local_name, "root");
        assert_eq!(tree.get(NodeIndex::new(2)).unwrap().local_name, "a1");
        assert_eq!(
            tree.get(NodeIndex::new(2)).unwrap().parent,
            Some(NodeIndex::new(1))
        );
    }

    #[test]
    fn test_children_skip_text_and_comments() {
        let tree = build("<root>t<a/><!-- c --><?pi x?>u<b/><c/></root>");
        assert_eq!(names(tree.children(NodeIndex::ROOT)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_following_siblings() {
        let tree = build("<root><a/><b><inner/></b><c/></root>");
        assert_eq!(names(tree.following_siblings(NodeIndex::new(1))), vec!["b", "c"]);
        assert!(tree.following_siblings(NodeIndex::ROOT).next().is_none());
    }

    #[test]
    fn test_text_is_direct_only() {
        let tree = build("<root>x<child>inner</child>y</root>");
        assert_eq!(tree.get(NodeIndex::ROOT).unwrap().text, "xy");
    }

    #[test]
    fn test_trim_text() {
        let options = LoadOptions::default().with_trim_text(true);
        let tree = ElementTree::parse("<root>  padded \n</root>", &options, "test").unwrap();
        assert_eq!(tree.get(NodeIndex::ROOT).unwrap().text, "padded");
    }

    #[test]
    fn test_qualified_names() {
        let tree = build(r#"<p:root xmlns:p="urn:p"><p:item p:id="1"/></p:root>"#);
        let item = tree.get(NodeIndex::new(1)).unwrap();
        assert_eq!(item.name(NameMatching::Local), "item");
        assert_eq!(item.name(NameMatching::Qualified), "p:item");
        assert_eq!(item.attributes[0].name(NameMatching::Qualified), "p:id");
    }

    #[test]
    fn test_entities_decoded() {
        let tree = build(r#"<root a="x &amp; y">1 &lt; 2</root>"#);
        let root = tree.get(NodeIndex::ROOT).unwrap();
        assert_eq!(root.text, "1 < 2");
        assert_eq!(root.attributes[0].value, "x & y");
    }

    #[test]
    fn test_parse_error() {
        let result = ElementTree::parse("<root><open></root>", &LoadOptions::default(), "bad");
        assert!(matches!(result, Err(NavError::Parse { .. })));
    }

    #[test]
    fn test_dtd_rejected_by_default() {
        let xml = "<!DOCTYPE root [<!ENTITY e \"v\">]><root>&e;</root>";
        assert!(ElementTree::parse(xml, &LoadOptions::default(), "dtd").is_err());

        let options = LoadOptions::default().with_allow_dtd(true);
        let tree = ElementTree::parse(xml, &options, "dtd").unwrap();
        assert_eq!(tree.get(NodeIndex::ROOT).unwrap().text, "v");
    }
}
