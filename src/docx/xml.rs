//! WordprocessingML tree helpers over `roxmltree`.

use roxmltree::Node;

/// WordprocessingML main namespace.
pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Whether `node` is the WordprocessingML element `w:{name}`.
pub fn is_wml(node: Node, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(WML_NS)
}

/// A `w:`-qualified attribute of `node`.
pub fn wml_attr<'a>(node: Node<'a, 'a>, name: &str) -> Option<&'a str> {
    node.attribute((WML_NS, name))
}

/// Direct `w:{name}` children of `node`.
pub fn wml_children<'a>(
    node: Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'a>> + 'a {
    node.children().filter(move |n| is_wml(*n, name))
}

/// `w:{name}` elements anywhere beneath `node`, in document order.
pub fn wml_descendants<'a>(
    node: Node<'a, 'a>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'a>> + 'a {
    node.descendants()
        .filter(move |n| *n != node && is_wml(*n, name))
}

/// Text of every non-empty `w:t` beneath `node` joined with `delim`, then
/// trimmed.
pub fn joined_text(node: Node, delim: &str) -> String {
    let snippets: Vec<&str> = node
        .descendants()
        .filter(|n| is_wml(*n, "t"))
        .filter_map(|t| t.text())
        .collect();
    snippets.join(delim).trim().to_string()
}

/// Text of a node with no delimiter between runs.
pub fn node_text(node: Node) -> String {
    joined_text(node, "")
}

/// Untrimmed concatenation of every `w:t` beneath `node`.
pub fn raw_text(node: Node) -> String {
    node.descendants()
        .filter(|n| is_wml(*n, "t"))
        .filter_map(|t| t.text())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARA: &str = r#"<w:p xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
        <w:pPr><w:pStyle w:val="BodyText"/></w:pPr>
        <w:r><w:t xml:space="preserve"> [3.1.3] The </w:t></w:r>
        <w:r><w:rPr><w:b/></w:rPr><w:t>system</w:t></w:r>
        <w:r><w:t xml:space="preserve"> shall </w:t></w:r>
    </w:p>"#;

    #[test]
    fn test_joined_text() {
        let doc = roxmltree::Document::parse(PARA).unwrap();
        let p = doc.root_element();
        assert_eq!(node_text(p), "[3.1.3] The system shall");
        assert_eq!(joined_text(p, "|"), "[3.1.3] The |system| shall");
        assert_eq!(raw_text(p), " [3.1.3] The system shall ");
    }

    #[test]
    fn test_wml_lookup() {
        let doc = roxmltree::Document::parse(PARA).unwrap();
        let p = doc.root_element();
        assert!(is_wml(p, "p"));
        assert_eq!(wml_children(p, "r").count(), 3);
        assert_eq!(wml_descendants(p, "t").count(), 3);
        assert_eq!(wml_descendants(p, "p").count(), 0);

        let style = wml_descendants(p, "pStyle").next().unwrap();
        assert_eq!(wml_attr(style, "val"), Some("BodyText"));
    }

    #[test]
    fn test_foreign_namespace_ignored() {
        let xml = r#"<root xmlns:x="urn:other"><x:t>hidden</x:t></root>"#;
        let doc = roxmltree::Document::parse(xml).unwrap();
        assert_eq!(node_text(doc.root_element()), "");
    }
}
