//! Helpers for reading names and text off backend nodes.

use roxmltree::{Attribute, Node};

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlnav::xml::get_tag_name;
///
/// let xml = r#"<n:root xmlns:n="urn:x"><item>text</item></n:root>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "root");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Get the tag name as written, with its prefix if it has one.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlnav::xml::qualified_tag_name;
///
/// let xml = r#"<n:root xmlns:n="urn:x"><item/></n:root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
/// assert_eq!(qualified_tag_name(root), "n:root");
/// assert_eq!(qualified_tag_name(root.first_element_child().unwrap()), "item");
/// ```
pub fn qualified_tag_name(node: Node<'_, '_>) -> String {
    let local = get_tag_name(node);
    let written = node
        .document()
        .input_text()
        .get(node.range())
        .and_then(start_tag_qname);

    match written.and_then(|qname| written_prefix(qname, local)) {
        Some(prefix) => format!("{prefix}:{local}"),
        None if written.is_some_and(|qname| qname == local) => local.to_string(),
        None => resolved_name(node, node.tag_name().namespace(), local),
    }
}

/// Get an attribute's name as written, with its prefix if it has one.
///
/// `node` must be the element that owns `attr`.
pub fn qualified_attribute_name(node: Node<'_, '_>, attr: &Attribute<'_, '_>) -> String {
    let local = attr.name();
    let written = node.document().input_text().get(attr.range_qname());

    match written.and_then(|qname| written_prefix(qname, local)) {
        Some(prefix) => format!("{prefix}:{local}"),
        None if written.is_some_and(|qname| qname == local) => local.to_string(),
        None => resolved_name(node, attr.namespace(), local),
    }
}

/// Name at the start of `<name ...`; an element's range begins at its `<`.
fn start_tag_qname(raw: &str) -> Option<&str> {
    let rest = raw.strip_prefix('<')?;
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Split `prefix:local` and return the prefix if the local part matches.
fn written_prefix<'a>(qname: &'a str, local: &str) -> Option<&'a str> {
    let (prefix, rest) = qname.split_once(':')?;
    (!prefix.is_empty() && rest == local).then_some(prefix)
}

/// Rebuild a name from its namespace when the source text doesn't carry it,
/// e.g. for elements produced by entity expansion.
fn resolved_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    match namespace.and_then(|ns| node.lookup_prefix(ns)) {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}:{local}"),
        _ => local.to_string(),
    }
}

/// Concatenate the text children that sit directly inside an element.
///
/// Text inside child elements is not included; text on either side of a
/// child element is.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use xmlnav::xml::direct_text;
///
/// let doc = Document::parse("<p>Hello <b>bold</b> world</p>").unwrap();
/// assert_eq!(direct_text(doc.root_element()), "Hello  world");
/// ```
pub fn direct_text(node: Node<'_, '_>) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_qualified_tag_name_default_namespace() {
        let xml = r#"<root xmlns="http://example.com"><child/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(qualified_tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_qualified_attribute_name() {
        let xml = r#"<root xmlns:a="urn:a" a:id="1" xml:lang="nl" plain="p"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        let names: Vec<String> = root
            .attributes()
            .map(|attr| qualified_attribute_name(root, &attr))
            .collect();
        assert_eq!(names, vec!["a:id", "xml:lang", "plain"]);
    }

    #[test]
    fn test_qualified_tag_name_uses_written_prefix() {
        let xml = r#"<root xmlns:a="urn:x" xmlns:b="urn:x"><a:item/><b:item/></root>"#;
        let doc = Document::parse(xml).unwrap();

        let names: Vec<String> = doc
            .root_element()
            .children()
            .filter(|n| n.is_element())
            .map(qualified_tag_name)
            .collect();
        assert_eq!(names, vec!["a:item", "b:item"]);
    }

    #[test]
    fn test_qualified_attribute_name_uses_written_prefix() {
        let xml = r#"<root xmlns:a="urn:x" xmlns:b="urn:x" b:id="1"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        let attr = root.attributes().next().unwrap();
        assert_eq!(qualified_attribute_name(root, &attr), "b:id");
    }

    #[test]
    fn test_start_tag_qname() {
        assert_eq!(start_tag_qname("<p:item a=\"1\"/>"), Some("p:item"));
        assert_eq!(start_tag_qname("<item>text</item>"), Some("item"));
        assert_eq!(start_tag_qname("<item\n/>"), Some("item"));
        assert_eq!(start_tag_qname("text"), None);
    }

    #[test]
    fn test_written_prefix() {
        assert_eq!(written_prefix("p:item", "item"), Some("p"));
        assert_eq!(written_prefix("item", "item"), None);
        assert_eq!(written_prefix(":item", "item"), None);
        assert_eq!(written_prefix("p:other", "item"), None);
    }

    #[test]
    fn test_direct_text_includes_cdata() {
        let doc = Document::parse("<root>a<![CDATA[<b>]]>c</root>").unwrap();
        assert_eq!(direct_text(doc.root_element()), "a<b>c");
    }

    #[test]
    fn test_direct_text_empty() {
        let doc = Document::parse("<root><child>inner</child></root>").unwrap();
        assert_eq!(direct_text(doc.root_element()), "");
    }
}
