//! Coordination between connected drop lists during a transfer.
//!
//! A list with a drag in progress offers its dragged items to every
//! connected sibling. Siblings that would accept them become "receiving":
//! they keep their geometry cached so the item can be moved into them.

use tracing::{debug, warn};

use dragdrop_common::DropListId;

use crate::geometry::is_inside_rect;
use crate::item::DragRef;

use super::{DropListEvent, DropListRef};

impl DropListRef {
    /// Whether `item` may be moved into this list with the pointer at the
    /// given point.
    pub(super) fn can_receive(&self, item: &DragRef, x: f64, y: f64) -> bool {
        let Some(rect) = &self.dom_rect else {
            return false;
        };
        if !is_inside_rect(&rect.get(), x, y) || !(self.enter_predicate)(item, self.id) {
            return false;
        }

        // The cached rect can't tell if another element covers the list or
        // the list was scrolled out of view.
        let root = self.dom.root_node(self.container);
        self.dom
            .element_from_point(root, x, y)
            .is_some_and(|hit| self.dom.contains(self.container, hit))
    }

    pub(super) fn start_receiving(&mut self, initiator: DropListId, items: &[DragRef]) {
        if self.active_siblings.contains(&initiator) {
            return;
        }

        // Items can always go back to the list they came from.
        let accepts = items
            .iter()
            .all(|item| (self.enter_predicate)(item, self.id) || self.draggables.contains(item));
        if !accepts {
            return;
        }

        self.active_siblings.push(initiator);
        self.cache_parent_positions();
        self.listen_to_scroll_events();

        debug!(list = %self.id, from = %initiator, items = items.len(), "receiving started");
        self.emit(DropListEvent::ReceivingStarted {
            initiator,
            receiver: self.id,
            items: items.to_vec(),
        });
    }

    pub(super) fn stop_receiving(&mut self, initiator: DropListId) {
        let before = self.active_siblings.len();
        self.active_siblings.retain(|&sibling| sibling != initiator);
        if self.active_siblings.len() == before {
            return;
        }

        if !self.is_dragging && self.active_siblings.is_empty() {
            self.scroll_events = None;
        }

        debug!(list = %self.id, from = %initiator, "receiving stopped");
        self.emit(DropListEvent::ReceivingStopped {
            initiator,
            receiver: self.id,
        });
    }

    /// Offers the items currently being dragged to every connected list.
    pub(super) fn notify_receiving_siblings(&mut self) {
        let dragged: Vec<DragRef> = self
            .strategy
            .active_items_snapshot()
            .iter()
            .filter(|item| item.is_dragging())
            .cloned()
            .collect();
        let id = self.id;
        self.for_each_sibling(|sibling| sibling.start_receiving(id, &dragged));
    }

    /// Runs `f` on every live sibling other than this list. A sibling that
    /// is already borrowed up the call stack is skipped.
    pub(super) fn for_each_sibling(&self, mut f: impl FnMut(&mut DropListRef)) {
        for weak in &self.siblings {
            let Some(sibling) = weak.upgrade() else {
                continue;
            };
            if std::ptr::eq(sibling.as_ptr(), self) {
                continue;
            }
            match sibling.try_borrow_mut() {
                Ok(mut sibling) => f(&mut sibling),
                Err(_) => warn!(list = %self.id, "sibling drop list is busy; notification skipped"),
            };
        }
    }
}
