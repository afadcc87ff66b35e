//! In-memory [`Dom`] with a tiny flow layout.
//!
//! Elements either sit at an explicit page-space frame or are placed by
//! their parent's [`FlowLayout`], which is recomputed after every node move.
//! Client rects subtract ancestor and viewport scroll offsets and honor a
//! leading `translate3d(...)` in the inline transform, which is enough to
//! exercise sorting, transfers and auto-scroll without a browser.

use std::cell::{Cell, RefCell};

use dragdrop_common::{ClientRect, NodeId, ScrollPosition, ViewportSize};

use super::{Dom, ScrollExtent, ScrollTarget, ViewportRuler};

/// How an element positions its visible element children.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlowLayout {
    /// Stacked top to bottom.
    Column { gap: f64 },
    /// Left to right.
    Row { gap: f64 },
    /// Left to right, wrapping onto a new row at the parent's right edge.
    Wrap { gap: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Document,
    Element,
    Comment,
}

#[derive(Debug, Clone)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Page-space box, before any scrolling or transform.
    frame: ClientRect,
    flow: Option<FlowLayout>,
    scrollable: bool,
    scroll: ScrollPosition,
    hidden: bool,
    transform: String,
    scroll_snap_type: String,
}

impl Node {
    fn new(kind: NodeKind, frame: ClientRect) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            frame,
            flow: None,
            scrollable: false,
            scroll: ScrollPosition::default(),
            hidden: false,
            transform: String::new(),
            scroll_snap_type: String::new(),
        }
    }
}

pub struct MemoryDom {
    nodes: RefCell<Vec<Node>>,
    viewport: Cell<ViewportSize>,
    viewport_scroll: Cell<ScrollPosition>,
    document_size: Cell<ViewportSize>,
}

impl MemoryDom {
    /// Creates a document whose viewport (and initial page size) is
    /// `width` x `height`.
    pub fn new(width: f64, height: f64) -> Self {
        let size = ViewportSize { width, height };
        Self {
            nodes: RefCell::new(vec![Node::new(
                NodeKind::Document,
                ClientRect::from_size(width, height),
            )]),
            viewport: Cell::new(size),
            viewport_scroll: Cell::new(ScrollPosition::default()),
            document_size: Cell::new(size),
        }
    }

    // -- Building --

    /// Appends an element with the given page-space frame. Inside a flow
    /// parent only the frame's size is kept.
    pub fn create_element(&self, parent: NodeId, frame: ClientRect) -> NodeId {
        let id = self.push_node(Node::new(NodeKind::Element, frame));
        self.append_child(parent, id);
        id
    }

    /// An element that isn't attached anywhere yet, e.g. a placeholder.
    pub fn create_detached(&self, width: f64, height: f64) -> NodeId {
        self.push_node(Node::new(
            NodeKind::Element,
            ClientRect::new(0.0, 0.0, width, height),
        ))
    }

    /// Comment nodes take no space; they model structural markers.
    pub fn create_comment(&self, parent: NodeId) -> NodeId {
        let id = self.push_node(Node::new(NodeKind::Comment, ClientRect::default()));
        self.append_child(parent, id);
        id
    }

    pub fn set_flow(&self, element: NodeId, flow: FlowLayout) {
        self.with_node(element, |node| node.flow = Some(flow));
        self.relayout(element);
    }

    /// Scrollable elements clip hit testing of their descendants.
    pub fn set_scrollable(&self, element: NodeId, scrollable: bool) {
        self.with_node(element, |node| node.scrollable = scrollable);
    }

    /// Hidden nodes take no space and can't be hit.
    pub fn set_hidden(&self, node: NodeId, hidden: bool) {
        self.with_node(node, |n| n.hidden = hidden);
        if let Some(parent) = self.parent(node) {
            self.relayout(parent);
        }
    }

    pub fn set_document_size(&self, width: f64, height: f64) {
        self.document_size.set(ViewportSize { width, height });
    }

    /// Detaches a node from its parent.
    pub fn remove(&self, node: NodeId) {
        if let Some(parent) = self.detach(node) {
            self.relayout(parent);
        }
    }

    /// Swaps an item's root element for its placeholder, the way a drag
    /// handle does when the pointer picks the item up.
    pub fn begin_drag(&self, root: NodeId, placeholder: NodeId) {
        self.insert_before(placeholder, root);
        self.set_hidden(root, true);
    }

    /// Puts the root element back where the placeholder ended up and
    /// detaches the placeholder.
    pub fn end_drag(&self, root: NodeId, placeholder: NodeId) {
        self.insert_before(root, placeholder);
        self.set_hidden(root, false);
        self.remove(placeholder);
    }

    // -- Inspection --

    /// Page-space frame, ignoring scroll and transforms.
    pub fn frame(&self, node: NodeId) -> ClientRect {
        self.nodes.borrow()[node.0 as usize].frame
    }

    pub fn is_hidden(&self, node: NodeId) -> bool {
        self.nodes.borrow()[node.0 as usize].hidden
    }

    // -- Internals --

    fn push_node(&self, node: Node) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len() as u32);
        nodes.push(node);
        id
    }

    fn with_node<R>(&self, id: NodeId, f: impl FnOnce(&mut Node) -> R) -> R {
        f(&mut self.nodes.borrow_mut()[id.0 as usize])
    }

    fn detach(&self, node: NodeId) -> Option<NodeId> {
        let mut nodes = self.nodes.borrow_mut();
        let parent = nodes[node.0 as usize].parent.take()?;
        nodes[parent.0 as usize].children.retain(|&c| c != node);
        Some(parent)
    }

    fn insert_at(&self, parent: NodeId, node: NodeId, index: impl FnOnce(&[NodeId]) -> usize) {
        if self.contains(node, parent) {
            return;
        }
        let old_parent = self.detach(node);
        {
            let mut nodes = self.nodes.borrow_mut();
            let children = &nodes[parent.0 as usize].children;
            let at = index(children.as_slice()).min(children.len());
            nodes[parent.0 as usize].children.insert(at, node);
            nodes[node.0 as usize].parent = Some(parent);
        }
        if let Some(old) = old_parent.filter(|&old| old != parent) {
            self.relayout(old);
        }
        self.relayout(parent);
    }

    /// Re-places the flow children of `element`, then recurses so nested
    /// flows follow their moved parents.
    fn relayout(&self, element: NodeId) {
        let (flow, origin, children) = {
            let nodes = self.nodes.borrow();
            let node = &nodes[element.0 as usize];
            (node.flow, node.frame, node.children.clone())
        };

        if let Some(flow) = flow {
            let mut nodes = self.nodes.borrow_mut();
            let mut x = origin.left;
            let mut y = origin.top;
            let mut row_height: f64 = 0.0;

            for &child in &children {
                let node = &mut nodes[child.0 as usize];
                if node.kind != NodeKind::Element || node.hidden {
                    continue;
                }
                let (w, h) = (node.frame.width, node.frame.height);
                match flow {
                    FlowLayout::Column { gap } => {
                        node.frame = ClientRect::new(origin.left, y, w, h);
                        y += h + gap;
                    }
                    FlowLayout::Row { gap } => {
                        node.frame = ClientRect::new(x, origin.top, w, h);
                        x += w + gap;
                    }
                    FlowLayout::Wrap { gap } => {
                        if x > origin.left && x + w > origin.right {
                            x = origin.left;
                            y += row_height + gap;
                            row_height = 0.0;
                        }
                        node.frame = ClientRect::new(x, y, w, h);
                        x += w + gap;
                        row_height = row_height.max(h);
                    }
                }
            }
        }

        for child in children {
            self.relayout(child);
        }
    }

    fn ancestor_scroll(&self, node: NodeId) -> ScrollPosition {
        let nodes = self.nodes.borrow();
        let mut total = self.viewport_scroll.get();
        let mut current = nodes[node.0 as usize].parent;
        while let Some(id) = current {
            let n = &nodes[id.0 as usize];
            if n.kind == NodeKind::Element {
                total.top += n.scroll.top;
                total.left += n.scroll.left;
            }
            current = n.parent;
        }
        total
    }

    fn hit_test(&self, node: NodeId, x: f64, y: f64, hit: &mut Option<NodeId>) {
        let (kind, hidden, scrollable, children) = {
            let nodes = self.nodes.borrow();
            let n = &nodes[node.0 as usize];
            (n.kind, n.hidden, n.scrollable, n.children.clone())
        };
        if hidden || kind == NodeKind::Comment {
            return;
        }

        if kind == NodeKind::Element {
            let rect = self.client_rect(node);
            let inside = x >= rect.left && x < rect.right && y >= rect.top && y < rect.bottom;
            if inside {
                *hit = Some(node);
            } else if scrollable {
                return;
            }
        }

        for child in children {
            self.hit_test(child, x, y, hit);
        }
    }
}

/// Offsets of a leading `translate3d(Xpx, Ypx, 0)`.
fn parse_translate(transform: &str) -> (f64, f64) {
    let Some(rest) = transform.trim_start().strip_prefix("translate3d(") else {
        return (0.0, 0.0);
    };
    let Some(end) = rest.find(')') else {
        return (0.0, 0.0);
    };
    let mut parts = rest[..end]
        .split(',')
        .map(|p| p.trim().trim_end_matches("px").parse::<f64>().unwrap_or(0.0));
    (parts.next().unwrap_or(0.0), parts.next().unwrap_or(0.0))
}

impl Dom for MemoryDom {
    fn document(&self) -> NodeId {
        NodeId(0)
    }

    fn root_node(&self, _node: NodeId) -> NodeId {
        self.document()
    }

    fn client_rect(&self, element: NodeId) -> ClientRect {
        let (frame, transform) = {
            let nodes = self.nodes.borrow();
            let n = &nodes[element.0 as usize];
            (n.frame, parse_translate(&n.transform))
        };
        let scroll = self.ancestor_scroll(element);
        ClientRect::new(
            frame.left - scroll.left + transform.0,
            frame.top - scroll.top + transform.1,
            frame.width,
            frame.height,
        )
    }

    fn scroll_position(&self, element: NodeId) -> ScrollPosition {
        self.nodes.borrow()[element.0 as usize].scroll
    }

    fn viewport_scroll_position(&self) -> ScrollPosition {
        self.viewport_scroll.get()
    }

    fn scroll_extent(&self, element: NodeId) -> ScrollExtent {
        let nodes = self.nodes.borrow();
        let node = &nodes[element.0 as usize];
        let frame = node.frame;
        let (mut right, mut bottom) = (frame.right, frame.bottom);
        for &child in &node.children {
            let c = &nodes[child.0 as usize];
            if c.kind == NodeKind::Element && !c.hidden {
                right = right.max(c.frame.right);
                bottom = bottom.max(c.frame.bottom);
            }
        }
        ScrollExtent {
            scroll_width: right - frame.left,
            scroll_height: bottom - frame.top,
            client_width: frame.width,
            client_height: frame.height,
        }
    }

    fn scroll_by(&self, target: ScrollTarget, left: f64, top: f64) {
        match target {
            ScrollTarget::Element(element) => {
                let extent = self.scroll_extent(element);
                let max_top = (extent.scroll_height - extent.client_height).max(0.0);
                let max_left = (extent.scroll_width - extent.client_width).max(0.0);
                self.with_node(element, |node| {
                    node.scroll.top = (node.scroll.top + top).clamp(0.0, max_top);
                    node.scroll.left = (node.scroll.left + left).clamp(0.0, max_left);
                });
            }
            ScrollTarget::Viewport => {
                let doc = self.document_size.get();
                let viewport = self.viewport.get();
                let max_top = (doc.height - viewport.height).max(0.0);
                let max_left = (doc.width - viewport.width).max(0.0);
                let current = self.viewport_scroll.get();
                self.viewport_scroll.set(ScrollPosition {
                    top: (current.top + top).clamp(0.0, max_top),
                    left: (current.left + left).clamp(0.0, max_left),
                });
            }
        }
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = nodes[id.0 as usize].parent;
        }
        false
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0 as usize].parent
    }

    fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0 as usize].children.clone()
    }

    fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let nodes = self.nodes.borrow();
        let siblings = &nodes[parent.0 as usize].children;
        let index = siblings.iter().position(|&c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn insert_before(&self, node: NodeId, reference: NodeId) {
        if node == reference {
            return;
        }
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.insert_at(parent, node, |children| {
            children
                .iter()
                .position(|&c| c == reference)
                .unwrap_or(children.len())
        });
    }

    fn insert_after(&self, node: NodeId, reference: NodeId) {
        if node == reference {
            return;
        }
        let Some(parent) = self.parent(reference) else {
            return;
        };
        self.insert_at(parent, node, |children| {
            children
                .iter()
                .position(|&c| c == reference)
                .map_or(children.len(), |i| i + 1)
        });
    }

    fn append_child(&self, parent: NodeId, node: NodeId) {
        self.insert_at(parent, node, |children| children.len());
    }

    fn element_from_point(&self, root: NodeId, x: f64, y: f64) -> Option<NodeId> {
        let mut hit = None;
        self.hit_test(root, x, y, &mut hit);
        hit
    }

    fn transform(&self, element: NodeId) -> String {
        self.nodes.borrow()[element.0 as usize].transform.clone()
    }

    fn set_transform(&self, element: NodeId, value: &str) {
        self.with_node(element, |node| node.transform = value.to_string());
    }

    fn scroll_snap_type(&self, element: NodeId) -> String {
        self.nodes.borrow()[element.0 as usize].scroll_snap_type.clone()
    }

    fn set_scroll_snap_type(&self, element: NodeId, value: &str) {
        self.with_node(element, |node| node.scroll_snap_type = value.to_string());
    }
}

impl ViewportRuler for MemoryDom {
    fn viewport_size(&self) -> ViewportSize {
        self.viewport.get()
    }
}
