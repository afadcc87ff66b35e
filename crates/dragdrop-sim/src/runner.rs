//! Replays a [`Script`] against a headless drop list.

use std::rc::Rc;

use dragdrop_common::{ClientRect, DragDropError, Orientation, Point, PointerDelta};
use dragdrop_config::DropListConfig;
use dragdrop_engine::{
    move_in_array, Dom, DragHandle, DragItem, DragRef, DropDetails, DropListRef, FlowLayout,
    LocalRegistry, MemoryDom, ScrollTarget,
};
use tracing::{debug, info};

use crate::record::EventRecord;
use crate::script::Script;

/// Unit direction of travel from `from` to `to` on one axis.
fn direction(from: f64, to: f64) -> i8 {
    if to > from {
        1
    } else if to < from {
        -1
    } else {
        0
    }
}

fn flow_for(orientation: Orientation) -> FlowLayout {
    match orientation {
        Orientation::Vertical => FlowLayout::Column { gap: 0.0 },
        Orientation::Horizontal => FlowLayout::Row { gap: 0.0 },
        Orientation::Mixed => FlowLayout::Wrap { gap: 0.0 },
    }
}

/// Builds the list, drags the script's item through every move, drops it
/// and returns the events followed by a summary record.
pub fn run(script: &Script, config: &DropListConfig) -> Result<Vec<EventRecord>, DragDropError> {
    let dragged_index = script
        .drag_index()
        .ok_or_else(|| DragDropError::Script(format!("no item named {}", script.drag)))?;

    let [viewport_width, viewport_height] = script.viewport;
    let dom = Rc::new(MemoryDom::new(viewport_width, viewport_height));
    let registry = Rc::new(LocalRegistry::new());

    let frame = script.list;
    let element = dom.create_element(
        dom.document(),
        ClientRect::new(frame.left, frame.top, frame.width, frame.height),
    );
    dom.set_flow(element, flow_for(config.orientation));
    dom.set_scrollable(element, script.scrollable);

    let [item_width, item_height] = script.item_size;
    let handles: Vec<Rc<DragHandle>> = script
        .items
        .iter()
        .map(|_| {
            let root = dom.create_element(element, ClientRect::new(0.0, 0.0, item_width, item_height));
            Rc::new(DragHandle::new(root, dom.create_detached(item_width, item_height)))
        })
        .collect();
    let items: Vec<DragRef> = handles.iter().map(|h| DragRef::from(Rc::clone(h))).collect();
    let name_of = |item: &DragRef| {
        items
            .iter()
            .position(|candidate| candidate == item)
            .map(|index| script.items[index].clone())
    };

    let list = DropListRef::new(element, config, dom.clone(), dom.clone(), registry.clone());
    let mut list = list.borrow_mut();
    list.with_items(&items);
    let mut events = list.subscribe();

    let handle = &handles[dragged_index];
    let item = &items[dragged_index];
    let start_rect = dom.client_rect(handle.root_element());
    let mut pointer = Point::new(
        start_rect.left + start_rect.width / 2.0,
        start_rect.top + start_rect.height / 2.0,
    );

    info!(item = %script.drag, items = items.len(), moves = script.moves.len(), "drag started");
    dom.begin_drag(handle.root_element(), handle.placeholder_element());
    handle.set_dragging(true);
    registry.start_dragging(item);
    list.start();
    let origin = pointer;

    for step in &script.moves {
        let delta = PointerDelta::new(direction(pointer.x, step.x), direction(pointer.y, step.y));
        pointer = Point::new(step.x, step.y);
        handle.record_pointer(pointer, delta);

        list.sort_item(item, pointer.x, pointer.y, delta);
        list.start_scrolling_if_necessary(pointer.x, pointer.y);

        for _ in 0..step.frames {
            if !list.animation_frame() {
                break;
            }
            let scrolled = match list.scroll_target() {
                Some(ScrollTarget::Element(node)) => node,
                _ => dom.document(),
            };
            registry.dispatch_scroll(dom.root_node(element), scrolled);
            list.process_scroll_events();
        }
        debug!(x = pointer.x, y = pointer.y, index = ?list.get_item_index(item), "pointer moved");
    }

    let current_index = list.get_item_index(item).unwrap_or(dragged_index);
    let details = DropDetails {
        current_index,
        previous_index: dragged_index,
        previous_container: list.id(),
        is_pointer_over_container: list.is_over_container(pointer.x, pointer.y),
        distance: Point::new(pointer.x - origin.x, pointer.y - origin.y),
        drop_point: pointer,
        event: None,
    };
    list.drop(item, details);

    dom.end_drag(handle.root_element(), handle.placeholder_element());
    handle.set_dragging(false);
    registry.stop_dragging(item);

    let mut order = script.items.clone();
    move_in_array(&mut order, dragged_index, current_index);
    let reordered: Vec<DragRef> = order
        .iter()
        .filter_map(|name| script.items.iter().position(|n| n == name))
        .map(|index| items[index].clone())
        .collect();
    list.with_items(&reordered);
    info!(from = dragged_index, to = current_index, "drag ended");

    let mut records = Vec::new();
    while let Ok(event) = events.try_recv() {
        records.push(EventRecord::from_event(&event, name_of));
    }
    records.push(EventRecord::summary(order, dom.scroll_position(element)));
    list.dispose();
    Ok(records)
}
