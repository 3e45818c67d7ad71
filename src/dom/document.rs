//! Shared, mutable in-memory document.

use parking_lot::RwLock;
use smallvec::SmallVec;

use super::node::{ElementData, NodeData, NodeRef};
use super::parse::append_html;
use super::Surface;

/// In-memory render tree.
///
/// Interior mutability keeps the document shareable across the runtime's
/// tasks; writers touch disjoint nodes, so a plain reader-writer lock is
/// enough.
pub struct Document {
    inner: RwLock<DocInner>,
}

struct DocInner {
    nodes: Vec<NodeData>,
    roots: SmallVec<[u32; 4]>,
}

impl Document {
    /// Parse a page into a document.
    pub fn parse(html: &str) -> Self {
        let mut nodes = Vec::new();
        let roots = append_html(&mut nodes, html);
        Self {
            inner: RwLock::new(DocInner { nodes, roots }),
        }
    }

    /// Run `visit` over elements in document order until it returns `Some`.
    fn scan<T>(&self, mut visit: impl FnMut(u32, &ElementData) -> Option<T>) -> Option<T> {
        let inner = self.inner.read();
        let mut stack: Vec<u32> = inner.roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            if let Some(NodeData::Element(element)) = inner.nodes.get(index as usize) {
                if let Some(found) = visit(index, element) {
                    return Some(found);
                }
                stack.extend(element.children.iter().rev());
            }
        }
        None
    }

    /// Like `scan`, but restricted to the subtree below `start`.
    fn scan_under<T>(
        &self,
        start: NodeRef,
        mut visit: impl FnMut(u32, &ElementData) -> Option<T>,
    ) -> Option<T> {
        let inner = self.inner.read();
        let Some(NodeData::Element(root)) = inner.nodes.get(start.0 as usize) else {
            return None;
        };
        let mut stack: Vec<u32> = root.children.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            if let Some(NodeData::Element(element)) = inner.nodes.get(index as usize) {
                if let Some(found) = visit(index, element) {
                    return Some(found);
                }
                stack.extend(element.children.iter().rev());
            }
        }
        None
    }

    fn with_element<T>(&self, node: NodeRef, edit: impl FnOnce(&mut ElementData) -> T) -> Option<T> {
        let mut inner = self.inner.write();
        match inner.nodes.get_mut(node.0 as usize) {
            Some(NodeData::Element(element)) => Some(edit(element)),
            _ => None,
        }
    }
}

impl Surface for Document {
    fn find(&self, id: &str) -> Option<NodeRef> {
        self.scan(|index, element| {
            (element.id.as_deref() == Some(id)).then_some(NodeRef(index))
        })
    }

    fn replace_content(&self, node: NodeRef, html: &str) -> bool {
        let mut inner = self.inner.write();
        if !matches!(inner.nodes.get(node.0 as usize), Some(NodeData::Element(_))) {
            return false;
        }
        // Old children stay in the arena, orphaned; handles into them go
        // stale but never dangle.
        let children = append_html(&mut inner.nodes, html);
        if let Some(NodeData::Element(element)) = inner.nodes.get_mut(node.0 as usize) {
            element.children = children;
            true
        } else {
            false
        }
    }

    fn add_class(&self, node: NodeRef, class: &str) {
        self.with_element(node, |element| {
            element.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, node: NodeRef, class: &str) {
        self.with_element(node, |element| {
            element.classes.remove(class);
        });
    }

    fn has_class(&self, node: NodeRef, class: &str) -> bool {
        let inner = self.inner.read();
        match inner.nodes.get(node.0 as usize) {
            Some(NodeData::Element(element)) => element.classes.contains(class),
            _ => false,
        }
    }

    fn marked(&self, class: &str) -> Vec<NodeRef> {
        let mut found = Vec::new();
        self.scan::<()>(|index, element| {
            if element.classes.contains(class) {
                found.push(NodeRef(index));
            }
            None
        });
        found
    }

    fn anchors_under(&self, node: NodeRef) -> Vec<(NodeRef, String)> {
        let mut anchors = Vec::new();
        self.scan_under::<()>(node, |index, element| {
            if element.tag == "a"
                && let Some(href) = element.attr("href")
            {
                anchors.push((NodeRef(index), href.to_string()));
            }
            None
        });
        anchors
    }
}
