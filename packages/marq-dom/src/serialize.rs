//! Markup serialization for nodes and subtrees.
//!
//! Used by the serialized marker-insertion path, which round-trips an
//! element through markup and back through the host's parser.

use crate::node::NodeData;
use crate::BaseDocument;

/// Elements serialized without an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Serialize a node (element, text or comment) including itself.
pub fn outer_html(doc: &BaseDocument, node_id: usize) -> String {
    let mut out = String::new();
    write_node(doc, node_id, &mut out);
    out
}

/// Serialize the children of a node.
pub fn inner_html(doc: &BaseDocument, node_id: usize) -> String {
    let mut out = String::new();
    if let Some(node) = doc.get_node(node_id) {
        for child_id in node.children.iter() {
            write_node(doc, *child_id, &mut out);
        }
    }
    out
}

fn write_node(doc: &BaseDocument, node_id: usize, out: &mut String) {
    let Some(node) = doc.get_node(node_id) else {
        return;
    };

    match &node.data {
        NodeData::Document => {
            for child_id in node.children.iter() {
                write_node(doc, *child_id, out);
            }
        }
        NodeData::Text(data) => {
            out.push_str(&html_escape::encode_text(&data.content));
        }
        NodeData::Comment => {
            out.push_str("<!---->");
        }
        NodeData::Element(data) => {
            let tag = data.name.local.as_ref();
            out.push('<');
            out.push_str(tag);
            for attr in data.attrs.iter() {
                out.push(' ');
                out.push_str(attr.name.local.as_ref());
                out.push_str("=\"");
                out.push_str(&html_escape::encode_double_quoted_attribute(&attr.value));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            for child_id in node.children.iter() {
                write_node(doc, *child_id, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}
