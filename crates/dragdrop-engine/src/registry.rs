//! Process-wide drag bookkeeping shared by all drop lists.

use std::cell::RefCell;
use std::collections::HashMap;

use dragdrop_common::{DropListId, EventBus, NodeId};
use tokio::sync::broadcast;
use tracing::debug;

use crate::item::DragRef;

const SCROLL_CHANNEL_CAPACITY: usize = 64;

/// A `scroll` event observed somewhere under a root node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollEvent {
    /// The node that scrolled; the document for viewport scrolls.
    pub target: NodeId,
}

pub trait DragDropRegistry {
    fn register_drop_container(&self, id: DropListId);

    fn remove_drop_container(&self, id: DropListId);

    /// Scroll events under `root` (a document or shadow root).
    fn scrolled(&self, root: NodeId) -> broadcast::Receiver<ScrollEvent>;

    /// Whether `item` is part of an active drag sequence.
    fn is_dragging(&self, item: &DragRef) -> bool;
}

/// Single-threaded registry owned by the host application. The host feeds
/// it scroll events and tells it when drags start and stop.
#[derive(Default)]
pub struct LocalRegistry {
    containers: RefCell<Vec<DropListId>>,
    scroll_buses: RefCell<HashMap<NodeId, EventBus<ScrollEvent>>>,
    active_drags: RefCell<Vec<DragRef>>,
}

impl LocalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_dragging(&self, item: &DragRef) {
        let mut active = self.active_drags.borrow_mut();
        if !active.contains(item) {
            active.push(item.clone());
        }
    }

    pub fn stop_dragging(&self, item: &DragRef) {
        self.active_drags.borrow_mut().retain(|active| active != item);
    }

    /// Broadcasts a scroll of `target` to everything listening on `root`.
    /// Returns how many listeners received it.
    pub fn dispatch_scroll(&self, root: NodeId, target: NodeId) -> usize {
        self.scroll_buses
            .borrow()
            .get(&root)
            .map_or(0, |bus| bus.publish(ScrollEvent { target }))
    }

    pub fn is_registered(&self, id: DropListId) -> bool {
        self.containers.borrow().contains(&id)
    }

    pub fn container_count(&self) -> usize {
        self.containers.borrow().len()
    }
}

impl DragDropRegistry for LocalRegistry {
    fn register_drop_container(&self, id: DropListId) {
        let mut containers = self.containers.borrow_mut();
        if !containers.contains(&id) {
            debug!(list = %id, "drop list registered");
            containers.push(id);
        }
    }

    fn remove_drop_container(&self, id: DropListId) {
        self.containers.borrow_mut().retain(|&c| c != id);
        debug!(list = %id, "drop list removed");
    }

    fn scrolled(&self, root: NodeId) -> broadcast::Receiver<ScrollEvent> {
        self.scroll_buses
            .borrow_mut()
            .entry(root)
            .or_insert_with(|| EventBus::new(SCROLL_CHANNEL_CAPACITY))
            .subscribe()
    }

    fn is_dragging(&self, item: &DragRef) -> bool {
        self.active_drags.borrow().contains(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::DragHandle;

    #[test]
    fn register_and_remove() {
        let registry = LocalRegistry::new();
        registry.register_drop_container(DropListId(1));
        registry.register_drop_container(DropListId(1));
        registry.register_drop_container(DropListId(2));
        assert_eq!(registry.container_count(), 2);

        registry.remove_drop_container(DropListId(1));
        assert!(!registry.is_registered(DropListId(1)));
        assert!(registry.is_registered(DropListId(2)));
    }

    #[test]
    fn tracks_active_drags() {
        let registry = LocalRegistry::new();
        let item = DragRef::new(DragHandle::new(NodeId(1), NodeId(2)));
        assert!(!registry.is_dragging(&item));

        registry.start_dragging(&item);
        registry.start_dragging(&item);
        assert!(registry.is_dragging(&item));

        registry.stop_dragging(&item);
        assert!(!registry.is_dragging(&item));
    }

    #[test]
    fn scroll_events_reach_listeners_of_the_root() {
        let registry = LocalRegistry::new();
        let mut doc_rx = registry.scrolled(NodeId(0));
        let mut shadow_rx = registry.scrolled(NodeId(50));

        assert_eq!(registry.dispatch_scroll(NodeId(0), NodeId(7)), 1);
        assert_eq!(doc_rx.try_recv().unwrap(), ScrollEvent { target: NodeId(7) });
        assert!(shadow_rx.try_recv().is_err());
    }

    #[test]
    fn dispatch_without_listeners() {
        let registry = LocalRegistry::new();
        assert_eq!(registry.dispatch_scroll(NodeId(0), NodeId(1)), 0);
    }
}
