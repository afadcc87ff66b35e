//! Sort strategies: how a drop list reorders its items while one of them is
//! dragged over it.
//!
//! [`SingleAxisSortStrategy`] moves items along one axis with transforms,
//! so the reorder can be animated. [`MixedSortStrategy`] moves DOM nodes
//! instead and works for wrapping layouts. A drop list owns one
//! [`SortStrategy`] and swaps it wholesale when its orientation changes.

mod mixed;
mod single_axis;

pub use mixed::MixedSortStrategy;
pub use single_axis::SingleAxisSortStrategy;

use std::rc::Rc;

use dragdrop_common::{Direction, NodeId, PointerDelta};

use crate::item::DragRef;

/// Sort predicate already bound to its drop list: may `item` be placed at
/// `index`?
pub type IndexPredicate = Rc<dyn Fn(usize, &DragRef) -> bool>;

/// Outcome of a swap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortResult {
    pub previous_index: usize,
    pub current_index: usize,
}

/// Anti-oscillation memo: the item swapped with last, the pointer direction
/// at the time and whether the pointer still overlapped it after the swap.
#[derive(Debug, Clone, Default)]
pub(crate) struct PreviousSwap {
    pub drag: Option<DragRef>,
    pub delta: PointerDelta,
    pub overlaps: bool,
}

impl PreviousSwap {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub enum SortStrategy {
    SingleAxis(SingleAxisSortStrategy),
    Mixed(MixedSortStrategy),
}

impl SortStrategy {
    /// Called when a drag starts in, or enters, the list.
    pub fn start(&mut self, items: &[DragRef]) {
        match self {
            Self::SingleAxis(s) => s.start(items),
            Self::Mixed(s) => s.start(items),
        }
    }

    pub fn sort(
        &mut self,
        item: &DragRef,
        pointer_x: f64,
        pointer_y: f64,
        pointer_delta: PointerDelta,
    ) -> Option<SortResult> {
        match self {
            Self::SingleAxis(s) => s.sort(item, pointer_x, pointer_y, pointer_delta),
            Self::Mixed(s) => s.sort(item, pointer_x, pointer_y, pointer_delta),
        }
    }

    pub fn enter(&mut self, item: &DragRef, pointer_x: f64, pointer_y: f64, index: Option<usize>) {
        match self {
            Self::SingleAxis(s) => s.enter(item, pointer_x, pointer_y, index),
            Self::Mixed(s) => s.enter(item, pointer_x, pointer_y, index),
        }
    }

    pub fn with_items(&mut self, items: &[DragRef]) {
        match self {
            Self::SingleAxis(s) => s.with_items(items),
            Self::Mixed(s) => s.with_items(items),
        }
    }

    pub fn with_sort_predicate(&mut self, predicate: IndexPredicate) {
        match self {
            Self::SingleAxis(s) => s.with_sort_predicate(predicate),
            Self::Mixed(s) => s.with_sort_predicate(predicate),
        }
    }

    pub fn with_element_container(&mut self, container: NodeId) {
        match self {
            Self::SingleAxis(s) => s.with_element_container(container),
            Self::Mixed(s) => s.with_element_container(container),
        }
    }

    /// Only meaningful for single-axis sorting; mixed layouts ignore it.
    pub fn set_direction(&mut self, direction: Direction) {
        if let Self::SingleAxis(s) = self {
            s.set_direction(direction);
        }
    }

    pub fn reset(&mut self) {
        match self {
            Self::SingleAxis(s) => s.reset(),
            Self::Mixed(s) => s.reset(),
        }
    }

    /// The items taking part in the current drag, in list order.
    pub fn active_items_snapshot(&self) -> &[DragRef] {
        match self {
            Self::SingleAxis(s) => s.active_items_snapshot(),
            Self::Mixed(s) => s.active_items_snapshot(),
        }
    }

    pub fn get_item_index(&self, item: &DragRef) -> Option<usize> {
        match self {
            Self::SingleAxis(s) => s.get_item_index(item),
            Self::Mixed(s) => s.get_item_index(item),
        }
    }

    /// Adjusts cached geometry after a scroll. Returns the items that are
    /// being dragged, which the caller re-sorts from their last pointer
    /// position since scrolling doesn't produce pointer moves.
    pub fn update_on_scroll(&mut self, top_difference: f64, left_difference: f64) -> Vec<DragRef> {
        match self {
            Self::SingleAxis(s) => s.update_on_scroll(top_difference, left_difference),
            Self::Mixed(s) => s.update_on_scroll(),
        }
    }

    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed(_))
    }
}
