//! Drag lifecycle of a DropListRef: start, enter, sort, exit, drop, reset.

use dragdrop_common::{new_correlation_id, PointerDelta};
use tracing::{debug, trace, warn};

use crate::geometry::{is_inside_rect, is_pointer_near_rect};
use crate::item::DragRef;

use super::{DropDetails, DropListEvent, DropListRef, SharedDropList};

impl DropListRef {
    /// Starts a drag of one of this list's own items.
    pub fn start(&mut self) {
        self.dragging_started();
        self.notify_receiving_siblings();
    }

    /// Moves `item` into the list, at `index` if given, otherwise at the
    /// slot the pointer is over.
    pub fn enter(&mut self, item: &DragRef, pointer_x: f64, pointer_y: f64, index: Option<usize>) {
        self.dragging_started();

        // With sorting disabled an item can only go back to where it was.
        let index = match index {
            None if self.sorting_disabled => self.draggables.iter().position(|d| d == item),
            index => index,
        };

        self.strategy.enter(item, pointer_x, pointer_y, index);
        // Inserting the placeholder can resize the list.
        self.cache_parent_positions();
        self.notify_receiving_siblings();

        let current_index = self.get_item_index(item);
        debug!(
            list = %self.id,
            drag = self.drag_id.as_deref().unwrap_or_default(),
            index = ?current_index,
            "item entered"
        );
        self.emit(DropListEvent::Entered {
            item: item.clone(),
            container: self.id,
            current_index,
        });
    }

    /// Called when `item` leaves this list for another one.
    pub fn exit(&mut self, item: &DragRef) {
        debug!(
            list = %self.id,
            drag = self.drag_id.as_deref().unwrap_or_default(),
            "item exited"
        );
        self.reset();
        self.emit(DropListEvent::Exited {
            item: item.clone(),
            container: self.id,
        });
    }

    /// Ends the drag. The list's data isn't touched; subscribers apply the
    /// move when they see the `Dropped` event.
    pub fn drop(&mut self, item: &DragRef, details: DropDetails) {
        debug!(
            list = %self.id,
            drag = self.drag_id.as_deref().unwrap_or_default(),
            from = details.previous_index,
            to = details.current_index,
            previous_list = %details.previous_container,
            "item dropped"
        );
        self.reset();
        self.emit(DropListEvent::Dropped {
            item: item.clone(),
            container: self.id,
            details,
        });
    }

    /// Replaces the list's items. A running drag is aborted if none of the
    /// items being dragged are left.
    pub fn with_items(&mut self, items: &[DragRef]) -> &mut Self {
        let previous = std::mem::replace(&mut self.draggables, items.to_vec());
        for item in items {
            item.with_drop_container(self.id);
        }

        if self.is_dragging {
            let dragged_items_removed = previous
                .iter()
                .filter(|item| item.is_dragging())
                .all(|item| !items.contains(item));

            if dragged_items_removed {
                warn!(list = %self.id, "dragged item removed from the list; drag aborted");
                self.reset();
            } else {
                self.strategy.with_items(&self.draggables);
            }
        }
        self
    }

    /// Re-sorts `item` for a pointer at `(pointer_x, pointer_y)`. Does
    /// nothing unless sorting is enabled and the pointer is close to the list.
    pub fn sort_item(
        &mut self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
        pointer_delta: PointerDelta,
    ) {
        if self.sorting_disabled {
            return;
        }
        let Some(rect) = &self.dom_rect else {
            return;
        };
        if !is_pointer_near_rect(&rect.get(), self.drop_proximity_threshold, pointer_x, pointer_y) {
            return;
        }

        if let Some(result) = self.strategy.sort(item, pointer_x, pointer_y, pointer_delta) {
            trace!(
                list = %self.id,
                from = result.previous_index,
                to = result.current_index,
                "sorted"
            );
            self.emit(DropListEvent::Sorted {
                previous_index: result.previous_index,
                current_index: result.current_index,
                container: self.id,
                item: item.clone(),
            });
        }
    }

    /// Position of `item` in the list: its live position while dragging,
    /// its position among the draggables otherwise.
    pub fn get_item_index(&self, item: &DragRef) -> Option<usize> {
        if self.is_dragging {
            self.strategy.get_item_index(item)
        } else {
            self.draggables.iter().position(|d| d == item)
        }
    }

    /// The items taking part in the current drag, in list order.
    pub fn active_items(&self) -> &[DragRef] {
        self.strategy.active_items_snapshot()
    }

    /// Whether the point is inside the list's cached rect.
    pub fn is_over_container(&self, x: f64, y: f64) -> bool {
        self.dom_rect
            .as_ref()
            .is_some_and(|rect| is_inside_rect(&rect.get(), x, y))
    }

    /// The first connected list that would accept `item` at the point.
    pub fn sibling_container_from_position(
        &self,
        item: &DragRef,
        x: f64,
        y: f64,
    ) -> Option<SharedDropList> {
        self.siblings
            .iter()
            .filter_map(|weak| weak.upgrade())
            .find(|sibling| match sibling.try_borrow() {
                Ok(sibling) => sibling.can_receive(item, x, y),
                Err(_) => {
                    warn!(list = %self.id, "sibling drop list is busy; skipped");
                    false
                }
            })
    }

    /// Tears the list down. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        self.stop_scrolling();
        self.scroll_events = None;
        self.active_siblings.clear();
        self.scroll_node = None;
        self.parent_positions.clear();
        self.registry.remove_drop_container(self.id);
        debug!(list = %self.id, "drop list disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub(super) fn dragging_started(&mut self) {
        self.emit(DropListEvent::BeforeStarted { container: self.id });

        // Scroll snapping fights programmatic scrolling; keep the value from
        // before the first start so re-entering doesn't record "none".
        if !self.is_dragging {
            self.initial_scroll_snap = self.dom.scroll_snap_type(self.container);
        }
        self.dom.set_scroll_snap_type(self.container, "none");
        self.is_dragging = true;

        let drag_id = self.drag_id.get_or_insert_with(new_correlation_id).clone();
        self.strategy.start(&self.draggables);
        self.cache_parent_positions();
        self.listen_to_scroll_events();

        debug!(
            list = %self.id,
            drag = %drag_id,
            items = self.draggables.len(),
            "dragging started"
        );
    }

    /// Returns the list to idle without emitting anything.
    pub(super) fn reset(&mut self) {
        self.is_dragging = false;
        self.dom
            .set_scroll_snap_type(self.container, &self.initial_scroll_snap);

        let id = self.id;
        self.for_each_sibling(|sibling| sibling.stop_receiving(id));
        self.strategy.reset();
        self.stop_scrolling();
        self.scroll_events = None;
        self.parent_positions.clear();

        if let Some(drag_id) = self.drag_id.take() {
            debug!(list = %self.id, drag = %drag_id, "drag reset");
        }
    }

    pub(super) fn cache_parent_positions(&mut self) {
        self.parent_positions.cache(&self.scrollable_elements);
        self.dom_rect = self.parent_positions.rect_of(self.container);
    }
}
