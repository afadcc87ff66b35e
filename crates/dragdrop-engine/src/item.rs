//! The draggable item as seen by drop lists.
//!
//! Drop lists don't track the pointer themselves; whatever does (a drag
//! handle wired to pointer events) implements [`DragItem`] and is passed
//! around as a [`DragRef`].

use std::cell::Cell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use dragdrop_common::{DropListId, NodeId, Point, PointerDelta};

/// Last pointer position seen by a drag, with the direction it moved in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerSample {
    pub position: Point,
    pub delta: PointerDelta,
}

pub trait DragItem: fmt::Debug {
    /// The element the item is rendered as when not dragged.
    fn root_element(&self) -> NodeId;

    /// The element that holds the item's slot in the list while dragging.
    fn placeholder_element(&self) -> NodeId;

    /// The element currently occupying the item's slot: the placeholder
    /// while dragging, the root element otherwise.
    fn visible_element(&self) -> NodeId;

    fn is_dragging(&self) -> bool;

    /// Scale applied to the item's ancestors; offsets are divided by it.
    fn scale(&self) -> f64 {
        1.0
    }

    /// Where the pointer was on the last move event, if the item is being
    /// dragged. Used to re-sort when scrolling moves the list under a
    /// stationary pointer.
    fn last_pointer_position(&self) -> Option<PointerSample>;

    /// Tells the item which drop list currently owns it.
    fn with_drop_container(&self, container: DropListId);
}

/// Shared handle to a [`DragItem`], compared by identity.
#[derive(Clone)]
pub struct DragRef(Rc<dyn DragItem>);

impl DragRef {
    pub fn new(item: impl DragItem + 'static) -> Self {
        Self(Rc::new(item))
    }
}

impl<T: DragItem + 'static> From<Rc<T>> for DragRef {
    fn from(item: Rc<T>) -> Self {
        Self(item)
    }
}

impl Deref for DragRef {
    type Target = dyn DragItem;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl PartialEq for DragRef {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.0), Rc::as_ptr(&other.0))
    }
}

impl Eq for DragRef {}

impl fmt::Debug for DragRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

/// A [`DragItem`] whose state is pushed in by the host: it flips the
/// dragging flag and records pointer samples as events arrive.
#[derive(Debug)]
pub struct DragHandle {
    root: NodeId,
    placeholder: NodeId,
    dragging: Cell<bool>,
    scale: Cell<f64>,
    last_pointer: Cell<Option<PointerSample>>,
    container: Cell<Option<DropListId>>,
}

impl DragHandle {
    pub fn new(root: NodeId, placeholder: NodeId) -> Self {
        Self {
            root,
            placeholder,
            dragging: Cell::new(false),
            scale: Cell::new(1.0),
            last_pointer: Cell::new(None),
            container: Cell::new(None),
        }
    }

    pub fn set_dragging(&self, dragging: bool) {
        self.dragging.set(dragging);
        if !dragging {
            self.last_pointer.set(None);
        }
    }

    pub fn set_scale(&self, scale: f64) {
        self.scale.set(scale);
    }

    pub fn record_pointer(&self, position: Point, delta: PointerDelta) {
        self.last_pointer.set(Some(PointerSample { position, delta }));
    }

    pub fn drop_container(&self) -> Option<DropListId> {
        self.container.get()
    }
}

impl DragItem for DragHandle {
    fn root_element(&self) -> NodeId {
        self.root
    }

    fn placeholder_element(&self) -> NodeId {
        self.placeholder
    }

    fn visible_element(&self) -> NodeId {
        if self.dragging.get() {
            self.placeholder
        } else {
            self.root
        }
    }

    fn is_dragging(&self) -> bool {
        self.dragging.get()
    }

    fn scale(&self) -> f64 {
        self.scale.get()
    }

    fn last_pointer_position(&self) -> Option<PointerSample> {
        if self.dragging.get() {
            self.last_pointer.get()
        } else {
            None
        }
    }

    fn with_drop_container(&self, container: DropListId) {
        self.container.set(Some(container));
    }
}
