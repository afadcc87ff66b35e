//! Reordering for wrapping layouts (flex-wrap, grids) by moving DOM nodes.
//!
//! Positions in a wrapping layout can't be derived from one axis, so this
//! strategy hit-tests the DOM instead of caching rects and moves the
//! placeholder node itself. No transforms are applied, so nothing animates.

use std::rc::Rc;

use dragdrop_common::{NodeId, PointerDelta};
use tracing::trace;

use crate::array::move_in_array;
use crate::dom::Dom;
use crate::item::{DragItem, DragRef};
use crate::registry::DragDropRegistry;

use super::{IndexPredicate, PreviousSwap, SortResult};

pub struct MixedSortStrategy {
    dom: Rc<dyn Dom>,
    registry: Rc<dyn DragDropRegistry>,
    container: NodeId,
    /// Items in DOM order.
    active_items: Vec<DragRef>,
    /// Every child of the container with its next sibling at drag start,
    /// including non-item nodes, so `reset` can restore the exact order.
    related_nodes: Vec<(NodeId, Option<NodeId>)>,
    previous_swap: PreviousSwap,
    sort_predicate: Option<IndexPredicate>,
}

impl MixedSortStrategy {
    pub fn new(dom: Rc<dyn Dom>, registry: Rc<dyn DragDropRegistry>, container: NodeId) -> Self {
        Self {
            dom,
            registry,
            container,
            active_items: Vec::new(),
            related_nodes: Vec::new(),
            previous_swap: PreviousSwap::default(),
            sort_predicate: None,
        }
    }

    pub fn with_sort_predicate(&mut self, predicate: IndexPredicate) {
        self.sort_predicate = Some(predicate);
    }

    pub fn with_element_container(&mut self, container: NodeId) {
        self.container = container;
    }

    pub fn start(&mut self, items: &[DragRef]) {
        self.related_nodes = self
            .dom
            .child_nodes(self.container)
            .into_iter()
            .map(|node| (node, self.dom.next_sibling(node)))
            .collect();
        self.with_items(items);
    }

    pub fn with_items(&mut self, items: &[DragRef]) {
        self.active_items = items.to_vec();
    }

    pub fn sort(
        &mut self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
        pointer_delta: PointerDelta,
    ) -> Option<SortResult> {
        let new_index = self.item_index_from_pointer_position(item, pointer_x, pointer_y)?;
        let to_swap_with = self.active_items[new_index].clone();
        if &to_swap_with == item {
            return None;
        }

        let previous = &self.previous_swap;
        if previous.drag.as_ref() == Some(&to_swap_with)
            && previous.overlaps
            && previous.delta == pointer_delta
        {
            return None;
        }

        let previous_index = self.get_item_index(item)?;
        let current = item.placeholder_element();
        let overlap_element = to_swap_with.root_element();

        if new_index > previous_index {
            self.dom.insert_after(current, overlap_element);
        } else {
            self.dom.insert_before(current, overlap_element);
        }
        move_in_array(&mut self.active_items, previous_index, new_index);

        // Remember whether the swapped-with element is still under the
        // pointer now that the DOM has changed.
        let root = self.dom.root_node(self.container);
        let new_overlap = self.dom.element_from_point(root, pointer_x, pointer_y);
        self.previous_swap.overlaps =
            new_overlap.is_some_and(|node| self.dom.contains(overlap_element, node));
        self.previous_swap.drag = Some(to_swap_with);
        self.previous_swap.delta = pointer_delta;

        trace!(from = previous_index, to = new_index, "item moved in DOM");
        Some(SortResult {
            previous_index,
            current_index: new_index,
        })
    }

    pub fn enter(&mut self, item: &DragRef, pointer_x: f64, pointer_y: f64, index: Option<usize>) {
        let enter_index = index
            .or_else(|| self.item_index_from_pointer_position(item, pointer_x, pointer_y))
            .or_else(|| self.closest_item_index_to_pointer(item, pointer_x, pointer_y));

        let target = enter_index.and_then(|i| self.active_items.get(i).cloned());
        if let Some(current_index) = self.active_items.iter().position(|i| i == item) {
            self.active_items.remove(current_index);
        }

        let placeholder = item.placeholder_element();
        match (target, enter_index) {
            (Some(target), Some(enter_index)) if !self.registry.is_dragging(&target) => {
                let at = enter_index.min(self.active_items.len());
                self.active_items.insert(at, item.clone());
                self.dom.insert_before(placeholder, target.root_element());
            }
            _ => {
                self.active_items.push(item.clone());
                self.dom.append_child(self.container, placeholder);
            }
        }
    }

    pub fn reset(&mut self) {
        let root = self.container;

        // Reverse order so restored nodes are already in place by the time
        // an earlier node is inserted before them.
        for &(node, next_sibling) in self.related_nodes.iter().rev() {
            if self.dom.parent(node) != Some(root) || self.dom.next_sibling(node) == next_sibling {
                continue;
            }
            match next_sibling {
                None => self.dom.append_child(root, node),
                Some(next) if self.dom.parent(next) == Some(root) => {
                    self.dom.insert_before(node, next);
                }
                Some(_) => {}
            }
        }

        self.related_nodes.clear();
        self.active_items.clear();
        self.previous_swap.clear();
    }

    pub fn active_items_snapshot(&self) -> &[DragRef] {
        &self.active_items
    }

    pub fn get_item_index(&self, item: &DragRef) -> Option<usize> {
        self.active_items.iter().position(|i| i == item)
    }

    /// Nothing is cached, so only the dragged items need re-sorting.
    pub fn update_on_scroll(&self) -> Vec<DragRef> {
        self.active_items
            .iter()
            .filter(|item| self.registry.is_dragging(item))
            .cloned()
            .collect()
    }

    fn item_index_from_pointer_position(
        &self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Option<usize> {
        let root = self.dom.root_node(self.container);
        let element_at_point =
            self.dom
                .element_from_point(root, pointer_x.floor(), pointer_y.floor())?;
        let index = self
            .active_items
            .iter()
            .position(|candidate| self.dom.contains(candidate.root_element(), element_at_point))?;

        match &self.sort_predicate {
            Some(predicate) if !predicate(index, item) => None,
            _ => Some(index),
        }
    }

    /// Nearest item by distance from the pointer to each item's top-left
    /// corner. Only an approximation for rects, which is fine for grids.
    fn closest_item_index_to_pointer(
        &self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
    ) -> Option<usize> {
        match self.active_items.len() {
            0 => return None,
            1 => return Some(0),
            _ => {}
        }

        let mut min_distance = f64::INFINITY;
        let mut min_index = None;
        for (index, current) in self.active_items.iter().enumerate() {
            if current == item {
                continue;
            }
            let rect = self.dom.client_rect(current.root_element());
            let distance = (pointer_x - rect.left).hypot(pointer_y - rect.top);
            if distance < min_distance {
                min_distance = distance;
                min_index = Some(index);
            }
        }
        min_index
    }
}
