//! HTML serialization of a [`Document`] subtree.
//!
//! Live properties and listeners are not part of the markup, matching what
//! a browser's `outerHTML` shows.

use super::document::Document;
use super::DisplayTree;
use crate::types::NodeId;

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

impl Document {
    /// Markup for `node` including the node itself.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Markup for the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for child in self.children(node) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        let Some(tag) = self.tag(node) else {
            escape_into(&self.text(node), false, out);
            return;
        };

        out.push('<');
        out.push_str(&tag);
        for (name, value) in self.attributes(node) {
            out.push(' ');
            out.push_str(&name);
            out.push_str("=\"");
            escape_into(&value, true, out);
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&tag.as_str()) {
            return;
        }
        for child in self.children(node) {
            self.write_html(child, out);
        }
        out.push_str("</");
        out.push_str(&tag);
        out.push('>');
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
}
