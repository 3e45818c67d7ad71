//! HTML-to-arena conversion via the `tl` parser.

use smallvec::SmallVec;

use super::node::{ElementData, NodeData};

/// Parse `html` and append its nodes to the arena.
///
/// Returns the arena indices of the top-level nodes. A parse failure
/// degrades to a single text node holding the raw markup (the composition
/// layer treats fragment content as opaque; a broken fragment should not
/// take the page down).
pub(crate) fn append_html(nodes: &mut Vec<NodeData>, html: &str) -> SmallVec<[u32; 4]> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        nodes.push(NodeData::Text(html.to_string()));
        return SmallVec::from_elem(last_index(nodes), 1);
    };

    let parser = dom.parser();
    let mut roots = SmallVec::new();
    for handle in dom.children() {
        if let Some(index) = convert(*handle, parser, nodes) {
            roots.push(index);
        }
    }
    roots
}

/// Convert a `tl` node into an arena node. Comments and whitespace-only text
/// are dropped.
fn convert(handle: tl::NodeHandle, parser: &tl::Parser, nodes: &mut Vec<NodeData>) -> Option<u32> {
    let node = handle.get(parser)?;

    match node {
        tl::Node::Tag(tag) => {
            let tag_name = tag.name().as_utf8_str().to_lowercase();

            let mut id = None;
            let mut classes = rustc_hash::FxHashSet::default();
            let mut attrs = Vec::new();
            for (key, value) in tag.attributes().iter() {
                let key_str: &str = key.as_ref();
                let value_str = value.map(|v| v.to_string()).unwrap_or_default();
                match key_str {
                    "id" => id = Some(value_str.clone()),
                    "class" => {
                        classes.extend(value_str.split_whitespace().map(str::to_string));
                    }
                    _ => {}
                }
                attrs.push((key_str.to_string(), value_str));
            }

            let mut children = SmallVec::new();
            for child_handle in tag.children().top().iter() {
                if let Some(child_index) = convert(*child_handle, parser, nodes) {
                    children.push(child_index);
                }
            }

            nodes.push(NodeData::Element(ElementData {
                tag: tag_name,
                id,
                classes,
                attrs,
                children,
            }));
            Some(last_index(nodes))
        }
        tl::Node::Raw(bytes) => {
            let text = bytes.as_utf8_str();
            if text.trim().is_empty() {
                return None;
            }
            nodes.push(NodeData::Text(text.to_string()));
            Some(last_index(nodes))
        }
        tl::Node::Comment(_) => None,
    }
}

#[inline]
fn last_index(nodes: &[NodeData]) -> u32 {
    (nodes.len() - 1) as u32
}
