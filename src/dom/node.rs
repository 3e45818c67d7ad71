//! Arena node types for the in-memory render tree.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

/// Handle to an element in the render tree.
///
/// Handles stay valid across mutations: the arena is append-only, and a
/// replaced subtree is orphaned rather than reused. The raw index doubles as
/// the element's identity at the host boundary (intersection notifications
/// address elements by it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) u32);

impl NodeRef {
    /// Raw arena index, for host-boundary signal payloads.
    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }

    /// Rebuild a handle from a host-boundary index.
    #[inline]
    pub fn from_index(raw: u32) -> Self {
        Self(raw)
    }
}

/// One arena slot: an element or a text run.
#[derive(Debug)]
pub(crate) enum NodeData {
    Element(ElementData),
    Text(#[allow(dead_code)] String),
}

/// Element payload: tag, identity, style classes, children.
#[derive(Debug)]
pub(crate) struct ElementData {
    pub tag: String,
    /// HTML `id` attribute, extracted for lookup.
    pub id: Option<String>,
    pub classes: FxHashSet<String>,
    pub attrs: Vec<(String, String)>,
    /// Arena indices of child nodes, in document order.
    pub children: SmallVec<[u32; 4]>,
}

impl ElementData {
    pub(crate) fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
