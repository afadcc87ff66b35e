//! Cached positions of a drop list's scrollable ancestors.
//!
//! Measured once when a drag starts (or the list's membership changes) and
//! then kept current by applying scroll deltas, instead of re-measuring on
//! every pointer move.

use std::cell::Cell;
use std::rc::Rc;

use dragdrop_common::{NodeId, ScrollPosition};
use indexmap::IndexMap;
use tracing::trace;

use crate::dom::Dom;
use crate::geometry::{shift_shared_rect, SharedRect};
use crate::registry::ScrollEvent;

/// Scroll offsets of a tracked node and, for elements, its bounding rect.
/// The document entry never has a rect.
#[derive(Debug, Clone)]
pub struct CachedPosition {
    pub scroll_position: ScrollPosition,
    pub client_rect: Option<SharedRect>,
}

pub struct ParentPositionTracker {
    dom: Rc<dyn Dom>,
    /// Insertion order matters: auto-scroll picks the first eligible node.
    positions: IndexMap<NodeId, CachedPosition>,
}

impl ParentPositionTracker {
    pub fn new(dom: Rc<dyn Dom>) -> Self {
        Self {
            dom,
            positions: IndexMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Replaces the cache with fresh measurements of `elements` plus the
    /// viewport scroll position.
    pub fn cache(&mut self, elements: &[NodeId]) {
        self.clear();
        self.positions.insert(
            self.dom.document(),
            CachedPosition {
                scroll_position: self.dom.viewport_scroll_position(),
                client_rect: None,
            },
        );

        for &element in elements {
            self.positions.insert(
                element,
                CachedPosition {
                    scroll_position: self.dom.scroll_position(element),
                    client_rect: Some(Rc::new(Cell::new(self.dom.client_rect(element)))),
                },
            );
        }
    }

    /// Applies a scroll event to the cache. Returns how far the content of
    /// the scrolled node moved, or `None` if the node isn't tracked.
    pub fn handle_scroll(&mut self, event: &ScrollEvent) -> Option<ScrollPosition> {
        let target = event.target;
        let old = self.positions.get(&target)?.scroll_position;

        let new = if target == self.dom.document() {
            self.dom.viewport_scroll_position()
        } else {
            self.dom.scroll_position(target)
        };

        let top_difference = old.top - new.top;
        let left_difference = old.left - new.left;

        // Scrolling a node moves every tracked node inside it by the same amount.
        for (&node, position) in &self.positions {
            if let Some(rect) = &position.client_rect {
                if node != target && self.dom.contains(target, node) {
                    shift_shared_rect(rect, top_difference, left_difference);
                }
            }
        }

        if let Some(position) = self.positions.get_mut(&target) {
            position.scroll_position = new;
        }

        trace!(
            node = %target,
            top = top_difference,
            left = left_difference,
            "scroll applied to cached positions"
        );
        Some(ScrollPosition {
            top: top_difference,
            left: left_difference,
        })
    }

    pub fn positions(&self) -> impl Iterator<Item = (NodeId, &CachedPosition)> {
        self.positions.iter().map(|(&node, position)| (node, position))
    }

    pub fn get(&self, node: NodeId) -> Option<&CachedPosition> {
        self.positions.get(&node)
    }

    /// The shared cached rect of a tracked element.
    pub fn rect_of(&self, node: NodeId) -> Option<SharedRect> {
        self.positions.get(&node)?.client_rect.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{FlowLayout, MemoryDom, ScrollTarget};
    use dragdrop_common::ClientRect;

    fn scene() -> (Rc<MemoryDom>, NodeId, NodeId, NodeId) {
        let dom = Rc::new(MemoryDom::new(800.0, 600.0));
        let outer = dom.create_element(dom.document(), ClientRect::new(0.0, 0.0, 400.0, 300.0));
        dom.set_flow(outer, FlowLayout::Column { gap: 0.0 });
        let inner = dom.create_element(outer, ClientRect::new(0.0, 0.0, 400.0, 200.0));
        let sibling = dom.create_element(outer, ClientRect::new(0.0, 0.0, 400.0, 400.0));
        (dom, outer, inner, sibling)
    }

    #[test]
    fn cache_stores_document_and_elements() {
        let (dom, outer, inner, _) = scene();
        let mut tracker = ParentPositionTracker::new(dom.clone());
        tracker.cache(&[outer, inner]);

        let doc = tracker.get(dom.document()).unwrap();
        assert!(doc.client_rect.is_none());
        assert_eq!(tracker.rect_of(inner).unwrap().get().height, 200.0);
        let order: Vec<NodeId> = tracker.positions().map(|(n, _)| n).collect();
        assert_eq!(order, vec![dom.document(), outer, inner]);
    }

    #[test]
    fn untracked_scroll_is_ignored() {
        let (dom, outer, inner, sibling) = scene();
        let mut tracker = ParentPositionTracker::new(dom.clone());
        tracker.cache(&[inner]);
        let before = tracker.rect_of(inner).unwrap().get();

        dom.scroll_by(ScrollTarget::Element(outer), 0.0, 20.0);
        assert_eq!(tracker.handle_scroll(&ScrollEvent { target: sibling }), None);
        assert_eq!(tracker.rect_of(inner).unwrap().get(), before);
    }

    #[test]
    fn ancestor_scroll_shifts_descendants() {
        let (dom, outer, inner, _) = scene();
        let mut tracker = ParentPositionTracker::new(dom.clone());
        tracker.cache(&[outer, inner]);
        let outer_before = tracker.rect_of(outer).unwrap().get();
        let inner_before = tracker.rect_of(inner).unwrap().get();

        dom.scroll_by(ScrollTarget::Element(outer), 0.0, 30.0);
        let delta = tracker.handle_scroll(&ScrollEvent { target: outer }).unwrap();

        assert_eq!(delta, ScrollPosition { top: -30.0, left: 0.0 });
        let inner_after = tracker.rect_of(inner).unwrap().get();
        assert_eq!(inner_after.top, inner_before.top - 30.0);
        assert_eq!(inner_after, dom.client_rect(inner));
        // The scrolled node itself doesn't move.
        assert_eq!(tracker.rect_of(outer).unwrap().get(), outer_before);
        assert_eq!(tracker.get(outer).unwrap().scroll_position.top, 30.0);
    }

    #[test]
    fn viewport_scroll_shifts_everything() {
        let (dom, outer, inner, _) = scene();
        dom.set_document_size(800.0, 2000.0);
        let mut tracker = ParentPositionTracker::new(dom.clone());
        tracker.cache(&[outer, inner]);

        dom.scroll_by(ScrollTarget::Viewport, 0.0, 100.0);
        let delta = tracker
            .handle_scroll(&ScrollEvent { target: dom.document() })
            .unwrap();

        assert_eq!(delta.top, -100.0);
        assert_eq!(tracker.rect_of(outer).unwrap().get().top, -100.0);
        assert_eq!(tracker.rect_of(inner).unwrap().get().top, -100.0);
        assert_eq!(tracker.get(dom.document()).unwrap().scroll_position.top, 100.0);
    }

    #[test]
    fn shared_rect_is_seen_by_holders() {
        let (dom, outer, inner, _) = scene();
        let mut tracker = ParentPositionTracker::new(dom.clone());
        tracker.cache(&[outer, inner]);
        let held = tracker.rect_of(inner).unwrap();

        dom.scroll_by(ScrollTarget::Element(outer), 0.0, 10.0);
        tracker.handle_scroll(&ScrollEvent { target: outer });
        assert_eq!(held.get().top, -10.0);
    }

    #[test]
    fn clear_is_idempotent() {
        let (dom, outer, _, _) = scene();
        let mut tracker = ParentPositionTracker::new(dom);
        tracker.cache(&[outer]);
        tracker.clear();
        tracker.clear();
        assert!(tracker.is_empty());
    }
}
