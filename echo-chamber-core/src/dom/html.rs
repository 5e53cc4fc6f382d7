//! HTML serialization for [`InMemoryDocument`]

use std::fmt::Write;

use super::memory::{InMemoryDocument, NodeData};
use super::NodeId;

/// Elements serialized without a closing tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

pub(crate) fn write_node(doc: &InMemoryDocument, id: NodeId, out: &mut String) {
    let Some(node) = doc.node(id) else {
        return;
    };

    match &node.data {
        NodeData::Text(text) => escape_into(text, false, out),
        NodeData::Element {
            tag, attributes, ..
        } => {
            let tag = tag.as_str();
            out.push('<');
            out.push_str(tag);
            for (name, value) in attributes {
                write_attribute(name, value, out);
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }
            for child in &node.children {
                write_node(doc, *child, out);
            }
            let _ = write!(out, "</{tag}>");
        }
    }
}

fn write_attribute(name: &str, value: &str, out: &mut String) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_into(value, true, out);
    out.push('"');
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
