//! Render tree behind a small capability interface.
//!
//! Every mutator in the runtime (fragment injection, nav-highlight toggle,
//! scroll-class toggle, reveal toggle) touches the tree through [`Surface`],
//! so the composition layer is testable without a real rendering
//! environment. [`Document`] is the in-memory implementation, parsed from
//! page HTML.
//!
//! # Module Structure
//!
//! - `node` - Arena node types and the [`NodeRef`] handle
//! - `parse` - HTML-to-arena conversion
//! - `document` - The shared, mutable document

mod document;
mod node;
mod parse;

pub use document::Document;
pub use node::NodeRef;

/// Capability interface over the shared render tree.
///
/// Lookups are re-evaluated against the current tree: nodes injected after a
/// failed `find` are visible to later calls. Class operations are idempotent
/// and silently ignore unknown handles.
pub trait Surface: Send + Sync {
    /// Look up an element by HTML `id`. First match in document order wins.
    fn find(&self, id: &str) -> Option<NodeRef>;

    /// Replace the element's children with the parsed `html` subtree.
    ///
    /// Ids and anchors inside the injected markup become discoverable.
    /// Returns `false` when the handle does not address an element.
    fn replace_content(&self, node: NodeRef, html: &str) -> bool;

    /// Add a style class (no-op if already present).
    fn add_class(&self, node: NodeRef, class: &str);

    /// Remove a style class (no-op if absent).
    fn remove_class(&self, node: NodeRef, class: &str);

    /// Whether the element currently carries the class.
    fn has_class(&self, node: NodeRef, class: &str) -> bool;

    /// All elements currently carrying `class`, in document order.
    fn marked(&self, class: &str) -> Vec<NodeRef>;

    /// Anchor elements under `node` with their `href` targets, in document
    /// order. Anchors without an `href` are skipped.
    fn anchors_under(&self, node: NodeRef) -> Vec<(NodeRef, String)>;
}
