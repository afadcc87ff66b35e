//! The DOM surface the engine reads and mutates.
//!
//! Drop lists never touch a document directly: measurements, scroll
//! offsets, hit testing, node moves and inline styles all go through
//! [`Dom`]. Hosts running in a browser implement it over their bindings;
//! [`MemoryDom`] is a self-contained tree used for tests and headless runs.

mod memory;

pub use memory::{FlowLayout, MemoryDom};

use dragdrop_common::{ClientRect, NodeId, ScrollPosition, ViewportSize};

/// Something that can be scrolled by the auto-scroller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Element(NodeId),
    Viewport,
}

/// Scrollable content size versus visible size of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    pub scroll_width: f64,
    pub scroll_height: f64,
    pub client_width: f64,
    pub client_height: f64,
}

pub trait Dom {
    /// The document node. Also the key for the viewport's scroll position.
    fn document(&self) -> NodeId;

    /// The shadow root containing `node`, or the document.
    fn root_node(&self, node: NodeId) -> NodeId;

    /// Live, viewport-relative bounding box (transforms included).
    fn client_rect(&self, element: NodeId) -> ClientRect;

    fn scroll_position(&self, element: NodeId) -> ScrollPosition;

    /// `scrollY` / `scrollX` of the window.
    fn viewport_scroll_position(&self) -> ScrollPosition;

    fn scroll_extent(&self, element: NodeId) -> ScrollExtent;

    fn scroll_by(&self, target: ScrollTarget, left: f64, top: f64);

    /// Inclusive: a node contains itself.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// All child nodes, including non-element ones such as comments.
    fn child_nodes(&self, node: NodeId) -> Vec<NodeId>;

    fn next_sibling(&self, node: NodeId) -> Option<NodeId>;

    /// Moves `node` right before `reference`, under `reference`'s parent.
    fn insert_before(&self, node: NodeId, reference: NodeId);

    /// Moves `node` right after `reference`, under `reference`'s parent.
    fn insert_after(&self, node: NodeId, reference: NodeId);

    /// Moves `node` to the end of `parent`'s children.
    fn append_child(&self, parent: NodeId, node: NodeId);

    /// Top-most element at a viewport point, searched under `root`.
    fn element_from_point(&self, root: NodeId, x: f64, y: f64) -> Option<NodeId>;

    /// Inline `transform` style; empty when unset.
    fn transform(&self, element: NodeId) -> String;

    fn set_transform(&self, element: NodeId, value: &str);

    /// Inline `scroll-snap-type` style; empty when unset.
    fn scroll_snap_type(&self, element: NodeId) -> String;

    fn set_scroll_snap_type(&self, element: NodeId, value: &str);
}

/// Provides the size of the viewport.
pub trait ViewportRuler {
    fn viewport_size(&self) -> ViewportSize;
}
