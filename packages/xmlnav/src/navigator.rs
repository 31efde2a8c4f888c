//! The document navigator: load, walk and unload XML documents by handle.
//!
//! A [`Navigator`] owns every document it loads. Callers hold
//! [`DocumentHandle`]s and [`NodeHandle`]s, which are plain ids checked on
//! every call. Unloading a document removes it from the registry, after
//! which any handle derived from it is rejected with
//! [`NavError::InvalidHandle`].

use std::collections::HashMap;
use std::path::Path;

use crate::config::{LoadOptions, MEMORY_SOURCE};
use crate::error::{NavError, Result};
use crate::source::{decode_utf8, read_file};
use crate::types::{BoundedText, DocumentHandle, DocumentId, NodeHandle, NodeIndex};
use crate::xml::{ElementRecord, ElementTree};

/// A document held by the registry.
#[derive(Debug)]
struct LoadedDocument {
    tree: ElementTree,
    options: LoadOptions,
    source_name: String,
}

/// Registry of loaded documents and the operations that walk them.
///
/// # Examples
/// ```
/// use xmlnav::{LoadOptions, Navigator};
///
/// let mut nav = Navigator::new();
/// let (doc, root) = nav
///     .load_str(r#"<root><item id="1">a</item><item id="2">b</item></root>"#, &LoadOptions::default())
///     .unwrap();
///
/// let first = nav.find_first(root, "item").unwrap().unwrap();
/// let second = nav.find_next(first, "item").unwrap().unwrap();
/// assert!(nav.find_next(second, "item").unwrap().is_none());
///
/// assert_eq!(nav.count(root, "item").unwrap(), 2);
/// assert_eq!(nav.contents(first).unwrap().text, "a");
/// assert_eq!(nav.attribute(second, "id").unwrap().unwrap().text, "2");
///
/// nav.unload(doc).unwrap();
/// assert!(nav.contents(first).is_err());
/// ```
#[derive(Debug, Default)]
pub struct Navigator {
    documents: HashMap<DocumentId, LoadedDocument>,
}

impl Navigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and parse an XML file.
    ///
    /// # Arguments
    /// * `path` - Path to the XML file
    /// * `options` - Load options, kept with the document for later calls
    ///
    /// # Returns
    /// * `Ok((DocumentHandle, NodeHandle))` for the document and its root element
    /// * `Err(NavError::NotFound)` if the path does not resolve
    /// * `Err(NavError::Parse)` or `Err(NavError::Encoding)` for malformed content
    /// * `Err(NavError::Io)` or `Err(NavError::TooLarge)` if the file can't be read
    ///
    /// Nothing is registered when an error is returned.
    pub fn load(
        &mut self,
        path: impl AsRef<Path>,
        options: &LoadOptions,
    ) -> Result<(DocumentHandle, NodeHandle)> {
        let path = path.as_ref();
        let source_name = path.display().to_string();

        let bytes = read_file(path, options.max_file_size)?;
        let text = decode_utf8(&bytes, &source_name)?;
        let tree = ElementTree::parse(text, options, &source_name)?;

        Ok(self.register(tree, options, source_name))
    }

    /// Parse XML held in memory. Behaves like [`Navigator::load`] otherwise.
    pub fn load_str(
        &mut self,
        text: &str,
        options: &LoadOptions,
    ) -> Result<(DocumentHandle, NodeHandle)> {
        let tree = ElementTree::parse(text, options, MEMORY_SOURCE)?;
        Ok(self.register(tree, options, MEMORY_SOURCE.to_string()))
    }

    fn register(
        &mut self,
        tree: ElementTree,
        options: &LoadOptions,
        source_name: String,
    ) -> (DocumentHandle, NodeHandle) {
        let id = DocumentId::next();

        tracing::debug!(
            document = id.get(),
            source = %source_name,
            elements = tree.len(),
            "Loaded document"
        );

        self.documents.insert(
            id,
            LoadedDocument {
                tree,
                options: options.clone(),
                source_name,
            },
        );

        (
            DocumentHandle::new(id),
            NodeHandle::new(id, NodeIndex::ROOT),
        )
    }

    /// Release a document and every node derived from it.
    ///
    /// Unloading the same handle twice fails with `InvalidHandle`.
    pub fn unload(&mut self, doc: DocumentHandle) -> Result<()> {
        match self.documents.remove(&doc.id()) {
            Some(loaded) => {
                tracing::debug!(
                    document = doc.id().get(),
                    source = %loaded.source_name,
                    "Unloaded document"
                );
                Ok(())
            }
            None => Err(invalid_handle(doc.id(), "unload")),
        }
    }

    /// Whether `doc` still refers to a loaded document.
    #[must_use]
    pub fn is_loaded(&self, doc: DocumentHandle) -> bool {
        self.documents.contains_key(&doc.id())
    }

    /// Number of documents currently loaded.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.documents.len()
    }

    /// Root element of a loaded document.
    pub fn root(&self, doc: DocumentHandle) -> Result<NodeHandle> {
        self.document(doc.id(), "root")?;
        Ok(NodeHandle::new(doc.id(), NodeIndex::ROOT))
    }

    /// The document a node was derived from.
    pub fn document_of(&self, node: NodeHandle) -> Result<DocumentHandle> {
        self.element(node, "document_of")?;
        Ok(DocumentHandle::new(node.document()))
    }

    /// Path (or `<memory>`) the document was loaded from.
    pub fn source_name(&self, doc: DocumentHandle) -> Result<&str> {
        Ok(&self.document(doc.id(), "source_name")?.source_name)
    }

    /// Name of an element under its document's name-matching mode.
    pub fn name(&self, node: NodeHandle) -> Result<&str> {
        let (loaded, element) = self.element(node, "name")?;
        Ok(element.name(loaded.options.name_matching))
    }

    /// First direct child of `scope` named `name`, in document order.
    ///
    /// Grandchildren are not searched. `Ok(None)` means no child matches.
    pub fn find_first(&self, scope: NodeHandle, name: &str) -> Result<Option<NodeHandle>> {
        let (loaded, _) = self.element(scope, "find_first")?;
        let mode = loaded.options.name_matching;

        Ok(loaded
            .tree
            .children(scope.index())
            .find(|(_, child)| child.name(mode) == name)
            .map(|(index, _)| NodeHandle::new(scope.document(), index)))
    }

    /// Next sibling after `previous` named `name`, within the same parent.
    ///
    /// `Ok(None)` means there are no further matches.
    pub fn find_next(&self, previous: NodeHandle, name: &str) -> Result<Option<NodeHandle>> {
        let (loaded, _) = self.element(previous, "find_next")?;
        let mode = loaded.options.name_matching;

        Ok(loaded
            .tree
            .following_siblings(previous.index())
            .find(|(_, sibling)| sibling.name(mode) == name)
            .map(|(index, _)| NodeHandle::new(previous.document(), index)))
    }

    /// Number of direct children of `scope` named `name`.
    pub fn count(&self, scope: NodeHandle, name: &str) -> Result<usize> {
        let (loaded, _) = self.element(scope, "count")?;
        let mode = loaded.options.name_matching;

        Ok(loaded
            .tree
            .children(scope.index())
            .filter(|(_, child)| child.name(mode) == name)
            .count())
    }

    /// All direct children of `scope` named `name`, in document order.
    pub fn find_all(&self, scope: NodeHandle, name: &str) -> Result<Vec<NodeHandle>> {
        let mut found = Vec::new();
        let mut current = self.find_first(scope, name)?;
        while let Some(node) = current {
            found.push(node);
            current = self.find_next(node, name)?;
        }
        Ok(found)
    }

    /// Follow a slash-separated path of child names from `scope`.
    ///
    /// Each segment selects the first matching child; empty segments and `.`
    /// are skipped, so `""` and `"."` return `scope` itself.
    pub fn find_path(&self, scope: NodeHandle, path: &str) -> Result<Option<NodeHandle>> {
        self.element(scope, "find_path")?;

        let mut current = scope;
        for part in path.split('/').filter(|p| !p.is_empty() && *p != ".") {
            match self.find_first(current, part)? {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }

    /// Text directly inside an element, bounded by `max_text_len`.
    ///
    /// An element without text yields an empty, untruncated result.
    pub fn contents(&self, node: NodeHandle) -> Result<BoundedText> {
        let (loaded, element) = self.element(node, "contents")?;
        Ok(bounded(loaded, node, &element.text))
    }

    /// Value of the attribute named `name`, bounded by `max_text_len`.
    ///
    /// `Ok(None)` means the element has no such attribute.
    pub fn attribute(&self, node: NodeHandle, name: &str) -> Result<Option<BoundedText>> {
        let (loaded, element) = self.element(node, "attribute")?;
        let mode = loaded.options.name_matching;

        Ok(element
            .attributes
            .iter()
            .find(|attr| attr.name(mode) == name)
            .map(|attr| bounded(loaded, node, &attr.value)))
    }

    fn document(&self, id: DocumentId, operation: &str) -> Result<&LoadedDocument> {
        self.documents
            .get(&id)
            .ok_or_else(|| invalid_handle(id, operation))
    }

    fn element(
        &self,
        node: NodeHandle,
        operation: &str,
    ) -> Result<(&LoadedDocument, &ElementRecord)> {
        let loaded = self.document(node.document(), operation)?;
        let element = loaded
            .tree
            .get(node.index())
            .ok_or_else(|| invalid_handle(node.document(), operation))?;
        Ok((loaded, element))
    }
}

fn bounded(loaded: &LoadedDocument, node: NodeHandle, text: &str) -> BoundedText {
    let result = BoundedText::bounded(text, loaded.options.max_text_len);
    if result.truncated {
        tracing::debug!(
            document = node.document().get(),
            node = node.index().get(),
            len = text.len(),
            limit = ?loaded.options.max_text_len,
            "Text truncated"
        );
    }
    result
}

fn invalid_handle(document: DocumentId, operation: &str) -> NavError {
    tracing::warn!(
        document = document.get(),
        operation,
        "Invalid handle"
    );
    NavError::InvalidHandle { document }
}
