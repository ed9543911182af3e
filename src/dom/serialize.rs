//! HTML serialization
//!
//! Text and raw markup are written verbatim, so an untouched document
//! serializes back to its input modulo attribute quoting and implied end tags.

use super::document::HtmlDocument;
use super::node::{is_void_element, NodeId, NodeKind};

/// Serialize a node and its subtree. The document node writes only its children.
pub fn to_html(doc: &HtmlDocument, id: NodeId) -> String {
    let mut out = String::with_capacity(doc.node_count() * 16);
    write_node(doc, id, &mut out);
    out
}

fn write_node(doc: &HtmlDocument, id: NodeId, out: &mut String) {
    let Some(node) = doc.get_node(id) else {
        return;
    };

    match node.kind {
        NodeKind::Document => {
            for child in doc.children(id) {
                write_node(doc, child, out);
            }
        }
        NodeKind::Text | NodeKind::Raw => out.push_str(&node.content),
        NodeKind::Comment => {
            out.push_str("<!--");
            out.push_str(&node.content);
            out.push_str("-->");
        }
        NodeKind::Element => {
            out.push('<');
            out.push_str(&node.name);
            for attr in &node.attributes {
                out.push(' ');
                out.push_str(&attr.name);
                if let Some(value) = &attr.value {
                    out.push_str("=\"");
                    push_attribute_value(value, out);
                    out.push('"');
                }
            }

            if node.self_closing {
                out.push_str(" />");
                return;
            }
            out.push('>');
            if is_void_element(&node.name) {
                return;
            }

            for child in doc.children(id) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&node.name);
            out.push('>');
        }
    }
}

fn push_attribute_value(value: &str, out: &mut String) {
    if value.contains('"') {
        out.push_str(&value.replace('"', "&quot;"));
    } else {
        out.push_str(value);
    }
}
