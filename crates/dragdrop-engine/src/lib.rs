//! Drop lists for pointer-driven drag and drop.
//!
//! A [`DropListRef`] sorts the items dragged over it, hands items over to
//! connected lists and auto-scrolls its scrollable parents. All document
//! access goes through the [`Dom`] trait; [`MemoryDom`] backs tests and
//! headless runs.

pub mod array;
pub mod dom;
pub mod drop_list;
pub mod geometry;
pub mod item;
pub mod position_tracker;
pub mod registry;
pub mod sort;

pub use array::{copy_item, move_in_array, transfer_item};
pub use dom::{Dom, FlowLayout, MemoryDom, ScrollExtent, ScrollTarget, ViewportRuler};
pub use drop_list::{
    DropDetails, DropListEvent, DropListRef, EnterPredicate, HorizontalScrollDirection,
    SharedDropList, SortPredicate, VerticalScrollDirection,
};
pub use item::{DragHandle, DragItem, DragRef, PointerSample};
pub use position_tracker::{CachedPosition, ParentPositionTracker};
pub use registry::{DragDropRegistry, LocalRegistry, ScrollEvent};
pub use sort::{MixedSortStrategy, SingleAxisSortStrategy, SortResult, SortStrategy};
