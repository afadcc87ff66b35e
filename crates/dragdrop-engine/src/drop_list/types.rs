//! Core types and constructors for DropListRef.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use dragdrop_common::{
    Direction, DropListId, EventBus, NodeId, Orientation, Point, PointerEvent,
};
use dragdrop_config::DropListConfig;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::dom::{Dom, ScrollTarget, ViewportRuler};
use crate::geometry::SharedRect;
use crate::item::DragRef;
use crate::position_tracker::ParentPositionTracker;
use crate::registry::{DragDropRegistry, ScrollEvent};
use crate::sort::{MixedSortStrategy, SingleAxisSortStrategy, SortStrategy};

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A drop list shared between the host and its connected siblings.
pub type SharedDropList = Rc<RefCell<DropListRef>>;

/// May `item` enter the list?
pub type EnterPredicate = Rc<dyn Fn(&DragRef, DropListId) -> bool>;

/// May `item` be placed at `index` in the list?
pub type SortPredicate = Rc<dyn Fn(usize, &DragRef, DropListId) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerticalScrollDirection {
    #[default]
    None,
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalScrollDirection {
    #[default]
    None,
    Left,
    Right,
}

/// Where an item was dropped and where it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropDetails {
    pub current_index: usize,
    pub previous_index: usize,
    pub previous_container: DropListId,
    pub is_pointer_over_container: bool,
    /// How far the pointer travelled since the drag started.
    pub distance: Point,
    pub drop_point: Point,
    pub event: Option<PointerEvent>,
}

/// Everything a drop list reports to its subscribers.
#[derive(Debug, Clone)]
pub enum DropListEvent {
    /// Emitted right before dragging starts or an item enters.
    BeforeStarted { container: DropListId },
    Entered {
        item: DragRef,
        container: DropListId,
        current_index: Option<usize>,
    },
    Exited {
        item: DragRef,
        container: DropListId,
    },
    Dropped {
        item: DragRef,
        container: DropListId,
        details: DropDetails,
    },
    Sorted {
        previous_index: usize,
        current_index: usize,
        container: DropListId,
        item: DragRef,
    },
    ReceivingStarted {
        initiator: DropListId,
        receiver: DropListId,
        items: Vec<DragRef>,
    },
    ReceivingStopped {
        initiator: DropListId,
        receiver: DropListId,
    },
}

impl DropListEvent {
    /// Short name, used for logging and by the simulator.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeforeStarted { .. } => "before_started",
            Self::Entered { .. } => "entered",
            Self::Exited { .. } => "exited",
            Self::Dropped { .. } => "dropped",
            Self::Sorted { .. } => "sorted",
            Self::ReceivingStarted { .. } => "receiving_started",
            Self::ReceivingStopped { .. } => "receiving_stopped",
        }
    }
}

/// A container that items can be dragged within, into and out of.
///
/// Owns the active sort strategy, the cached geometry of its scrollable
/// parents and the auto-scroll state. The host forwards pointer moves
/// (`sort_item`, `start_scrolling_if_necessary`), animation frames and
/// scroll events to it.
pub struct DropListRef {
    pub(super) id: DropListId,
    /// The drop list element.
    pub(super) element: NodeId,
    /// Element the items live in; the drop list element unless overridden.
    pub(super) container: NodeId,
    pub(super) dom: Rc<dyn Dom>,
    pub(super) viewport: Rc<dyn ViewportRuler>,
    pub(super) registry: Rc<dyn DragDropRegistry>,

    pub(super) disabled: bool,
    pub(super) sorting_disabled: bool,
    pub(super) auto_scroll_disabled: bool,
    pub(super) auto_scroll_step: f64,
    pub(super) drop_proximity_threshold: f64,
    pub(super) scroll_proximity_threshold: f64,
    pub(super) enter_predicate: EnterPredicate,
    pub(super) sort_predicate: SortPredicate,
    pub(super) orientation: Orientation,
    pub(super) direction: Direction,

    pub(super) strategy: SortStrategy,
    pub(super) draggables: Vec<DragRef>,
    pub(super) siblings: Vec<Weak<RefCell<DropListRef>>>,
    /// Siblings with a drag in progress that may end up in this list.
    pub(super) active_siblings: Vec<DropListId>,
    pub(super) scrollable_elements: Vec<NodeId>,
    pub(super) parent_positions: ParentPositionTracker,
    /// Cached rect of the drop list element, shared with the tracker.
    pub(super) dom_rect: Option<SharedRect>,

    pub(super) is_dragging: bool,
    pub(super) initial_scroll_snap: String,
    /// Correlates the log lines of the current drag.
    pub(super) drag_id: Option<String>,

    pub(super) vertical_scroll_direction: VerticalScrollDirection,
    pub(super) horizontal_scroll_direction: HorizontalScrollDirection,
    pub(super) scroll_node: Option<ScrollTarget>,
    /// Generation of the running auto-scroll loop, if any.
    pub(super) scroll_loop: Option<u64>,
    pub(super) scroll_generation: u64,

    pub(super) scroll_events: Option<broadcast::Receiver<ScrollEvent>>,
    pub(super) events: EventBus<DropListEvent>,
    pub(super) disposed: bool,
}

impl DropListRef {
    /// Creates a drop list for `element` and registers it.
    pub fn new(
        element: NodeId,
        config: &DropListConfig,
        dom: Rc<dyn Dom>,
        viewport: Rc<dyn ViewportRuler>,
        registry: Rc<dyn DragDropRegistry>,
    ) -> SharedDropList {
        let id = DropListId::next();
        let strategy = SortStrategy::SingleAxis(SingleAxisSortStrategy::new(
            Rc::clone(&dom),
            Rc::clone(&registry),
            element,
            Orientation::Vertical,
            Direction::Ltr,
        ));

        let mut list = Self {
            id,
            element,
            container: element,
            parent_positions: ParentPositionTracker::new(Rc::clone(&dom)),
            dom,
            viewport,
            registry,
            disabled: false,
            sorting_disabled: false,
            auto_scroll_disabled: false,
            auto_scroll_step: 2.0,
            drop_proximity_threshold: config.drop_proximity_threshold,
            scroll_proximity_threshold: config.scroll_proximity_threshold,
            enter_predicate: Rc::new(|_, _| true),
            sort_predicate: Rc::new(|_, _, _| true),
            orientation: Orientation::Vertical,
            direction: Direction::Ltr,
            strategy,
            draggables: Vec::new(),
            siblings: Vec::new(),
            active_siblings: Vec::new(),
            scrollable_elements: vec![element],
            dom_rect: None,
            is_dragging: false,
            initial_scroll_snap: String::new(),
            drag_id: None,
            vertical_scroll_direction: VerticalScrollDirection::None,
            horizontal_scroll_direction: HorizontalScrollDirection::None,
            scroll_node: None,
            scroll_loop: None,
            scroll_generation: 0,
            scroll_events: None,
            events: EventBus::new(EVENT_CHANNEL_CAPACITY),
            disposed: false,
        };
        list.apply_config(config);
        list.registry.register_drop_container(id);
        debug!(list = %id, element = %element, "drop list created");

        Rc::new(RefCell::new(list))
    }

    /// Applies every setting of `config`, replacing the sort strategy if
    /// the orientation changed.
    pub fn apply_config(&mut self, config: &DropListConfig) -> &mut Self {
        self.disabled = config.disabled;
        self.sorting_disabled = config.sorting_disabled;
        self.auto_scroll_disabled = config.auto_scroll_disabled;
        self.auto_scroll_step = config.auto_scroll_step;
        self.drop_proximity_threshold = config.drop_proximity_threshold;
        self.scroll_proximity_threshold = config.scroll_proximity_threshold;
        self.with_direction(config.direction);
        self.with_orientation(config.orientation)
    }

    // -- Accessors --

    pub fn id(&self) -> DropListId {
        self.id
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    /// Whether a connected sibling is dragging an item that may enter here.
    pub fn is_receiving(&self) -> bool {
        !self.active_siblings.is_empty()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn is_sorting_disabled(&self) -> bool {
        self.sorting_disabled
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn draggables(&self) -> &[DragRef] {
        &self.draggables
    }

    pub fn scrollable_parents(&self) -> &[NodeId] {
        &self.scrollable_elements
    }

    pub fn vertical_scroll_direction(&self) -> VerticalScrollDirection {
        self.vertical_scroll_direction
    }

    pub fn horizontal_scroll_direction(&self) -> HorizontalScrollDirection {
        self.horizontal_scroll_direction
    }

    /// The node being auto-scrolled, while auto-scroll is running.
    pub fn scroll_target(&self) -> Option<ScrollTarget> {
        self.scroll_loop.and(self.scroll_node)
    }

    pub fn is_auto_scrolling(&self) -> bool {
        self.scroll_loop.is_some()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DropListEvent> {
        self.events.subscribe()
    }

    // -- Configuration --

    pub fn set_disabled(&mut self, disabled: bool) -> &mut Self {
        self.disabled = disabled;
        self
    }

    pub fn set_sorting_disabled(&mut self, sorting_disabled: bool) -> &mut Self {
        self.sorting_disabled = sorting_disabled;
        self
    }

    pub fn set_auto_scroll_disabled(&mut self, auto_scroll_disabled: bool) -> &mut Self {
        self.auto_scroll_disabled = auto_scroll_disabled;
        self
    }

    pub fn set_auto_scroll_step(&mut self, step: f64) -> &mut Self {
        self.auto_scroll_step = step;
        self
    }

    pub fn set_enter_predicate(
        &mut self,
        predicate: impl Fn(&DragRef, DropListId) -> bool + 'static,
    ) -> &mut Self {
        self.enter_predicate = Rc::new(predicate);
        self
    }

    pub fn set_sort_predicate(
        &mut self,
        predicate: impl Fn(usize, &DragRef, DropListId) -> bool + 'static,
    ) -> &mut Self {
        self.sort_predicate = Rc::new(predicate);
        self.attach_sort_predicate();
        self
    }

    /// Lists items can be transferred to and from.
    pub fn connected_to(&mut self, siblings: &[SharedDropList]) -> &mut Self {
        self.siblings = siblings.iter().map(Rc::downgrade).collect();
        self
    }

    pub fn with_direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self.strategy.set_direction(direction);
        self
    }

    /// Replaces the sort strategy to match `orientation`.
    pub fn with_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.orientation = orientation;
        self.strategy = match orientation {
            Orientation::Mixed => SortStrategy::Mixed(MixedSortStrategy::new(
                Rc::clone(&self.dom),
                Rc::clone(&self.registry),
                self.container,
            )),
            Orientation::Vertical | Orientation::Horizontal => {
                SortStrategy::SingleAxis(SingleAxisSortStrategy::new(
                    Rc::clone(&self.dom),
                    Rc::clone(&self.registry),
                    self.container,
                    orientation,
                    self.direction,
                ))
            }
        };
        self.attach_sort_predicate();
        self
    }

    /// Ancestors whose scrolling moves the list. The items' container is
    /// always tracked, first unless listed explicitly.
    pub fn with_scrollable_parents(&mut self, elements: &[NodeId]) -> &mut Self {
        self.scrollable_elements = if elements.contains(&self.container) {
            elements.to_vec()
        } else {
            std::iter::once(self.container)
                .chain(elements.iter().copied())
                .collect()
        };
        self
    }

    /// Uses a descendant of the list element as the items' parent. Ignored
    /// if `container` isn't inside the list element.
    pub fn with_element_container(&mut self, container: NodeId) -> &mut Self {
        if container == self.container {
            return self;
        }
        if !self.dom.contains(self.element, container) {
            warn!(
                list = %self.id,
                container = %container,
                "element container is outside the drop list; ignored"
            );
            return self;
        }

        self.scrollable_elements
            .retain(|&node| node != self.container && node != container);
        self.strategy.with_element_container(container);
        self.scrollable_elements.insert(0, container);
        self.container = container;
        self
    }

    /// Binds the list's sort predicate to its id for the strategy.
    fn attach_sort_predicate(&mut self) {
        let predicate = Rc::clone(&self.sort_predicate);
        let id = self.id;
        self.strategy
            .with_sort_predicate(Rc::new(move |index, item| predicate(index, item, id)));
    }

    pub(super) fn emit(&self, event: DropListEvent) {
        self.events.publish(event);
    }
}
