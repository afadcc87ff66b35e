//! Reacting to scrolling while a drag is in progress or being received.

use tokio::sync::broadcast::error::TryRecvError;
use tracing::{trace, warn};

use crate::registry::ScrollEvent;

use super::DropListRef;

impl DropListRef {
    pub(super) fn listen_to_scroll_events(&mut self) {
        let root = self.dom.root_node(self.container);
        self.scroll_events = Some(self.registry.scrolled(root));
    }

    /// Drains the scroll events received since the last call and applies
    /// them. Hosts call this after dispatching scrolls to the registry.
    /// Returns how many events were handled.
    pub fn process_scroll_events(&mut self) -> usize {
        let mut pending = Vec::new();
        if let Some(receiver) = self.scroll_events.as_mut() {
            loop {
                match receiver.try_recv() {
                    Ok(event) => pending.push(event),
                    Err(TryRecvError::Lagged(skipped)) => {
                        warn!(list = %self.id, skipped, "scroll events lagged");
                    }
                    Err(TryRecvError::Empty | TryRecvError::Closed) => break,
                }
            }
        }

        let handled = pending.len();
        for event in pending {
            self.handle_scroll_event(event);
        }
        handled
    }

    fn handle_scroll_event(&mut self, event: ScrollEvent) {
        if self.is_dragging {
            let Some(delta) = self.parent_positions.handle_scroll(&event) else {
                return;
            };
            trace!(list = %self.id, node = %event.target, top = delta.top, left = delta.left, "scrolled");

            // Scrolling moves the items under a pointer that didn't move.
            let dragged = self.strategy.update_on_scroll(delta.top, delta.left);
            for item in dragged {
                if let Some(sample) = item.last_pointer_position() {
                    self.sort_item(&item, sample.position.x, sample.position.y, sample.delta);
                }
            }
        } else if self.is_receiving() {
            self.cache_parent_positions();
        }
    }
}
