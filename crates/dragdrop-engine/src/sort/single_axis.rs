//! Reordering along a single axis by translating items.
//!
//! Item rects are measured once when the drag starts or the membership
//! changes, kept sorted by their leading edge and then shifted in place as
//! items are moved, so a sort never re-measures mid-animation.

use std::rc::Rc;

use dragdrop_common::{ClientRect, Direction, NodeId, Orientation, PointerDelta};
use tracing::trace;

use crate::array::move_in_array;
use crate::dom::Dom;
use crate::geometry::{combine_transforms, is_inside_rect, shift_rect, translate3d};
use crate::item::{DragItem, DragRef};
use crate::registry::DragDropRegistry;

use super::{IndexPredicate, PreviousSwap, SortResult};

/// Cached geometry of one item.
#[derive(Debug, Clone)]
struct ItemPosition {
    drag: DragRef,
    /// Rect measured at cache time, shifted as the item is moved.
    client_rect: ClientRect,
    /// Total translation applied since the drag started.
    offset: f64,
    /// Inline transform the item had before the drag.
    initial_transform: String,
}

pub struct SingleAxisSortStrategy {
    dom: Rc<dyn Dom>,
    registry: Rc<dyn DragDropRegistry>,
    /// Element placeholders are appended to when no reference item exists.
    container: NodeId,
    orientation: Orientation,
    direction: Direction,
    /// Sorted by leading edge on the active axis.
    item_positions: Vec<ItemPosition>,
    /// DOM order of the items taking part in the drag.
    active_draggables: Vec<DragRef>,
    previous_swap: PreviousSwap,
    sort_predicate: Option<IndexPredicate>,
}

impl SingleAxisSortStrategy {
    /// Anything other than [`Orientation::Horizontal`] sorts vertically.
    pub fn new(
        dom: Rc<dyn Dom>,
        registry: Rc<dyn DragDropRegistry>,
        container: NodeId,
        orientation: Orientation,
        direction: Direction,
    ) -> Self {
        Self {
            dom,
            registry,
            container,
            orientation,
            direction,
            item_positions: Vec::new(),
            active_draggables: Vec::new(),
            previous_swap: PreviousSwap::default(),
            sort_predicate: None,
        }
    }

    fn is_horizontal(&self) -> bool {
        self.orientation == Orientation::Horizontal
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn with_sort_predicate(&mut self, predicate: IndexPredicate) {
        self.sort_predicate = Some(predicate);
    }

    pub fn with_element_container(&mut self, container: NodeId) {
        self.container = container;
    }

    pub fn start(&mut self, items: &[DragRef]) {
        self.with_items(items);
    }

    pub fn with_items(&mut self, items: &[DragRef]) {
        self.active_draggables = items.to_vec();
        self.cache_item_positions();
    }

    pub fn sort(
        &mut self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
        pointer_delta: PointerDelta,
    ) -> Option<SortResult> {
        let new_index =
            self.item_index_from_pointer_position(item, pointer_x, pointer_y, Some(pointer_delta))?;
        let current_index = self.item_positions.iter().position(|p| &p.drag == item)?;
        let horizontal = self.is_horizontal();

        let target = self.item_positions[new_index].drag.clone();
        let current_position = self.item_positions[current_index].client_rect;
        let new_position = self.item_positions[new_index].client_rect;
        let delta: i8 = if current_index > new_index { 1 } else { -1 };

        let item_offset = self.item_offset_px(&current_position, &new_position, delta);
        let sibling_offset = self.sibling_offset_px(current_index, delta);

        let old_order: Vec<DragRef> = self.item_positions.iter().map(|p| p.drag.clone()).collect();
        move_in_array(&mut self.item_positions, current_index, new_index);

        for (index, sibling) in self.item_positions.iter_mut().enumerate() {
            if old_order[index] == sibling.drag {
                continue;
            }

            let is_dragged_item = &sibling.drag == item;
            let offset = if is_dragged_item { item_offset } else { sibling_offset };
            let element_to_offset = if is_dragged_item {
                item.placeholder_element()
            } else {
                sibling.drag.root_element()
            };

            sibling.offset += offset;
            let transform_amount = (sibling.offset / sibling.drag.scale()).round();

            if horizontal {
                let transform = combine_transforms(
                    &translate3d(transform_amount, 0.0),
                    &sibling.initial_transform,
                );
                self.dom.set_transform(element_to_offset, &transform);
                shift_rect(&mut sibling.client_rect, 0.0, offset);
            } else {
                let transform = combine_transforms(
                    &translate3d(0.0, transform_amount),
                    &sibling.initial_transform,
                );
                self.dom.set_transform(element_to_offset, &transform);
                shift_rect(&mut sibling.client_rect, offset, 0.0);
            }
        }

        // The swapped-with item has moved; test overlap against where it is now.
        let target_rect = self
            .item_positions
            .iter()
            .find(|p| p.drag == target)
            .map_or(new_position, |p| p.client_rect);
        self.previous_swap.overlaps = is_inside_rect(&target_rect, pointer_x, pointer_y);
        self.previous_swap.drag = Some(target);
        self.previous_swap.delta = pointer_delta;

        trace!(
            from = current_index,
            to = new_index,
            item_offset,
            sibling_offset,
            "item sorted"
        );
        Some(SortResult {
            previous_index: current_index,
            current_index: new_index,
        })
    }

    pub fn enter(&mut self, item: &DragRef, pointer_x: f64, pointer_y: f64, index: Option<usize>) {
        let new_index = match index {
            Some(index) => Some(index.min(self.active_draggables.len())),
            None => self.item_index_from_pointer_position(item, pointer_x, pointer_y, None),
        };

        let current_index = self.active_draggables.iter().position(|d| d == item);
        let placeholder = item.placeholder_element();

        let mut reference = new_index.and_then(|i| self.active_draggables.get(i).cloned());
        if reference.as_ref() == Some(item) {
            reference = new_index.and_then(|i| self.active_draggables.get(i + 1).cloned());
        }

        let mut insert_at = new_index;
        let below_last = new_index.map_or(true, |i| i + 1 < self.active_draggables.len());
        if reference.is_none() && below_last && self.should_enter_as_first_child(pointer_x, pointer_y) {
            reference = self.active_draggables.first().cloned();
            insert_at = Some(0);
        }

        if let Some(current_index) = current_index {
            self.active_draggables.remove(current_index);
        }

        match reference.filter(|r| !self.registry.is_dragging(r)) {
            Some(reference) => {
                self.dom.insert_before(placeholder, reference.root_element());
                let at = insert_at.unwrap_or(0).min(self.active_draggables.len());
                self.active_draggables.insert(at, item.clone());
            }
            None => {
                self.dom.append_child(self.container, placeholder);
                self.active_draggables.push(item.clone());
            }
        }

        self.dom.set_transform(placeholder, "");
        self.cache_item_positions();
    }

    pub fn reset(&mut self) {
        for item in &self.active_draggables {
            let initial = self
                .item_positions
                .iter()
                .find(|p| &p.drag == item)
                .map_or("", |p| p.initial_transform.as_str());
            self.dom.set_transform(item.root_element(), initial);
        }

        self.item_positions.clear();
        self.active_draggables.clear();
        self.previous_swap.clear();
    }

    pub fn active_items_snapshot(&self) -> &[DragRef] {
        &self.active_draggables
    }

    /// Index in visual order. Horizontal RTL lists run right to left while
    /// the cache is always sorted left to right.
    pub fn get_item_index(&self, item: &DragRef) -> Option<usize> {
        let index = self.item_positions.iter().position(|p| &p.drag == item)?;
        if self.is_horizontal() && self.direction == Direction::Rtl {
            Some(self.item_positions.len() - 1 - index)
        } else {
            Some(index)
        }
    }

    pub fn update_on_scroll(&mut self, top_difference: f64, left_difference: f64) -> Vec<DragRef> {
        // All rects must be current before anything re-sorts against them.
        for position in &mut self.item_positions {
            shift_rect(&mut position.client_rect, top_difference, left_difference);
        }

        self.item_positions
            .iter()
            .filter(|p| self.registry.is_dragging(&p.drag))
            .map(|p| p.drag.clone())
            .collect()
    }

    fn cache_item_positions(&mut self) {
        let horizontal = self.is_horizontal();
        let mut positions: Vec<ItemPosition> = self
            .active_draggables
            .iter()
            .map(|drag| {
                let element = drag.visible_element();
                ItemPosition {
                    drag: drag.clone(),
                    client_rect: self.dom.client_rect(element),
                    offset: 0.0,
                    initial_transform: self.dom.transform(element),
                }
            })
            .collect();

        if horizontal {
            positions.sort_by(|a, b| a.client_rect.left.total_cmp(&b.client_rect.left));
        } else {
            positions.sort_by(|a, b| a.client_rect.top.total_cmp(&b.client_rect.top));
        }
        self.item_positions = positions;
    }

    /// How far the dragged item moves to take the slot of the item at the
    /// new position.
    fn item_offset_px(&self, current: &ClientRect, new: &ClientRect, delta: i8) -> f64 {
        if self.is_horizontal() {
            let mut offset = new.left - current.left;
            if delta == -1 {
                offset += new.width - current.width;
            }
            offset
        } else {
            let mut offset = new.top - current.top;
            if delta == -1 {
                offset += new.height - current.height;
            }
            offset
        }
    }

    /// How far the items between the old and new slot move, keeping the gap
    /// to the dragged item's neighbour.
    fn sibling_offset_px(&self, current_index: usize, delta: i8) -> f64 {
        let horizontal = self.is_horizontal();
        let current = &self.item_positions[current_index].client_rect;
        let size = if horizontal { current.width } else { current.height };
        let mut offset = size * f64::from(delta);

        let neighbour_index = if delta == -1 {
            Some(current_index + 1)
        } else {
            current_index.checked_sub(1)
        };
        if let Some(neighbour) = neighbour_index.and_then(|i| self.item_positions.get(i)) {
            let neighbour = &neighbour.client_rect;
            let (start, end) = if horizontal {
                (neighbour.left, current.right)
            } else {
                (neighbour.top, current.bottom)
            };
            let (current_start, neighbour_end) = if horizontal {
                (current.left, neighbour.right)
            } else {
                (current.top, neighbour.bottom)
            };

            if delta == -1 {
                offset -= start - end;
            } else {
                offset += current_start - neighbour_end;
            }
        }
        offset
    }

    /// Whether an item entering without an index should go before the first
    /// item. The cached order can run opposite to the DOM order.
    fn should_enter_as_first_child(&self, pointer_x: f64, pointer_y: f64) -> bool {
        let (Some(first_active), Some(first), Some(last)) = (
            self.active_draggables.first(),
            self.item_positions.first(),
            self.item_positions.last(),
        ) else {
            return false;
        };

        let horizontal = self.is_horizontal();
        let reversed = &first.drag != first_active;
        if reversed {
            let rect = &last.client_rect;
            if horizontal {
                pointer_x >= rect.right
            } else {
                pointer_y >= rect.bottom
            }
        } else {
            let rect = &first.client_rect;
            if horizontal {
                pointer_x <= rect.left
            } else {
                pointer_y <= rect.top
            }
        }
    }

    fn item_index_from_pointer_position(
        &self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
        delta: Option<PointerDelta>,
    ) -> Option<usize> {
        let horizontal = self.is_horizontal();
        let index = self.item_positions.iter().position(|position| {
            if &position.drag == item {
                return false;
            }

            if let Some(delta) = delta {
                let direction = if horizontal { delta.x } else { delta.y };
                let previous = &self.previous_swap;
                let previous_direction = if horizontal { previous.delta.x } else { previous.delta.y };
                if previous.drag.as_ref() == Some(&position.drag)
                    && previous.overlaps
                    && direction == previous_direction
                {
                    return false;
                }
            }

            // Rects can be fractional while pointer coordinates are whole pixels.
            let rect = &position.client_rect;
            if horizontal {
                pointer_x >= rect.left.floor() && pointer_x < rect.right.floor()
            } else {
                pointer_y >= rect.top.floor() && pointer_y < rect.bottom.floor()
            }
        })?;

        match &self.sort_predicate {
            Some(predicate) if !predicate(index, item) => None,
            _ => Some(index),
        }
    }
}
