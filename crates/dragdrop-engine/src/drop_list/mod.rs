//! The drop list: a container that items can be sorted within and moved
//! between.

mod auto_scroll;
mod lifecycle;
mod receiving;
mod scroll_events;
mod types;

pub use auto_scroll::{
    get_element_scroll_directions, get_horizontal_scroll_direction, get_vertical_scroll_direction,
};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    use dragdrop_common::{ClientRect, DropListId, NodeId, Orientation, Point, PointerDelta};
    use dragdrop_config::DropListConfig;
    use tokio::sync::broadcast;

    use crate::dom::{Dom, FlowLayout, MemoryDom, ScrollTarget};
    use crate::item::{DragHandle, DragItem, DragRef};
    use crate::registry::LocalRegistry;

    const DOWN: PointerDelta = PointerDelta { x: 0, y: 1 };

    struct Fixture {
        dom: Rc<MemoryDom>,
        registry: Rc<LocalRegistry>,
        element: NodeId,
        list: SharedDropList,
        handles: Vec<Rc<DragHandle>>,
        items: Vec<DragRef>,
    }

    impl Fixture {
        /// A 200x300 column at the origin holding `count` 50px tall items.
        fn new(count: usize, config: DropListConfig) -> Self {
            let dom = Rc::new(MemoryDom::new(1000.0, 800.0));
            let registry = Rc::new(LocalRegistry::new());
            let element =
                dom.create_element(dom.document(), ClientRect::new(0.0, 0.0, 200.0, 300.0));
            dom.set_flow(element, FlowLayout::Column { gap: 0.0 });

            let mut handles = Vec::new();
            let mut items = Vec::new();
            for _ in 0..count {
                let root = dom.create_element(element, ClientRect::new(0.0, 0.0, 200.0, 50.0));
                let handle = Rc::new(DragHandle::new(root, dom.create_detached(200.0, 50.0)));
                items.push(DragRef::from(Rc::clone(&handle)));
                handles.push(handle);
            }

            let list = DropListRef::new(
                element,
                &config,
                dom.clone(),
                dom.clone(),
                registry.clone(),
            );
            list.borrow_mut().with_items(&items);

            Self {
                dom,
                registry,
                element,
                list,
                handles,
                items,
            }
        }

        fn pick_up(&self, index: usize) {
            let handle = &self.handles[index];
            self.dom
                .begin_drag(handle.root_element(), handle.placeholder_element());
            handle.set_dragging(true);
            self.registry.start_dragging(&self.items[index]);
        }
    }

    fn drain(rx: &mut broadcast::Receiver<DropListEvent>) -> Vec<DropListEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn details(current_index: usize, previous_index: usize, previous_container: DropListId) -> DropDetails {
        DropDetails {
            current_index,
            previous_index,
            previous_container,
            is_pointer_over_container: true,
            distance: Point::new(0.0, 75.0),
            drop_point: Point::new(10.0, 75.0),
            event: None,
        }
    }

    #[test]
    fn new_list_registers_itself() {
        let fx = Fixture::new(0, DropListConfig::default());
        let id = fx.list.borrow().id();
        assert!(fx.registry.is_registered(id));
        assert_eq!(fx.list.borrow().scrollable_parents(), &[fx.element]);
    }

    #[test]
    fn with_items_assigns_container() {
        let fx = Fixture::new(2, DropListConfig::default());
        let id = fx.list.borrow().id();
        assert_eq!(fx.handles[0].drop_container(), Some(id));
        assert_eq!(fx.list.borrow().get_item_index(&fx.items[1]), Some(1));
    }

    #[test]
    fn dragging_past_a_sibling_emits_sorted() {
        let fx = Fixture::new(3, DropListConfig::default());
        let mut rx = fx.list.borrow().subscribe();
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        assert!(list.is_dragging());
        list.sort_item(&fx.items[0], 10.0, 75.0, DOWN);

        let events = drain(&mut rx);
        assert!(matches!(events[0], DropListEvent::BeforeStarted { .. }));
        match &events[1] {
            DropListEvent::Sorted {
                previous_index,
                current_index,
                item,
                ..
            } => {
                assert_eq!((*previous_index, *current_index), (0, 1));
                assert_eq!(item, &fx.items[0]);
            }
            other => panic!("expected sorted, got {other:?}"),
        }
        assert_eq!(list.get_item_index(&fx.items[0]), Some(1));
    }

    #[test]
    fn sorting_ignores_pointer_far_from_list() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.pick_up(0);
        let mut rx = fx.list.borrow().subscribe();

        let mut list = fx.list.borrow_mut();
        list.start();
        list.sort_item(&fx.items[0], 600.0, 75.0, DOWN);

        assert!(drain(&mut rx)
            .iter()
            .all(|e| !matches!(e, DropListEvent::Sorted { .. })));
        assert_eq!(list.get_item_index(&fx.items[0]), Some(0));
    }

    #[test]
    fn sorting_disabled_keeps_order() {
        let config = DropListConfig {
            sorting_disabled: true,
            ..DropListConfig::default()
        };
        let fx = Fixture::new(3, config);
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        list.sort_item(&fx.items[0], 10.0, 75.0, DOWN);
        assert_eq!(list.get_item_index(&fx.items[0]), Some(0));
    }

    #[test]
    fn sorting_disabled_enter_returns_item_home() {
        let config = DropListConfig {
            sorting_disabled: true,
            ..DropListConfig::default()
        };
        let fx = Fixture::new(3, config);
        fx.pick_up(1);
        let mut rx = fx.list.borrow().subscribe();

        let mut list = fx.list.borrow_mut();
        // Pointer over the last item, but the item goes back to slot 1.
        list.enter(&fx.items[1], 10.0, 125.0, None);

        let entered = drain(&mut rx)
            .into_iter()
            .find_map(|e| match e {
                DropListEvent::Entered { current_index, .. } => Some(current_index),
                _ => None,
            })
            .flatten();
        assert_eq!(entered, Some(1));
    }

    #[test]
    fn start_suspends_scroll_snap_until_drop() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.dom.set_scroll_snap_type(fx.element, "y mandatory");
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        assert_eq!(fx.dom.scroll_snap_type(fx.element), "none");

        // Re-entering must not record "none" as the value to restore.
        let a = fx.items[0].clone();
        list.enter(&a, 10.0, 10.0, Some(0));
        let id = list.id();
        list.drop(&a, details(0, 0, id));
        assert_eq!(fx.dom.scroll_snap_type(fx.element), "y mandatory");
    }

    #[test]
    fn drop_resets_and_reports_details() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.pick_up(0);
        let mut rx = fx.list.borrow().subscribe();

        let mut list = fx.list.borrow_mut();
        let id = list.id();
        list.start();
        list.sort_item(&fx.items[0], 10.0, 75.0, DOWN);
        list.drop(&fx.items[0], details(1, 0, id));

        assert!(!list.is_dragging());
        // Transforms are cleared so the host can re-render the new order.
        assert_eq!(fx.dom.transform(fx.items[1].root_element()), "");

        let dropped = drain(&mut rx).into_iter().last();
        match dropped {
            Some(DropListEvent::Dropped {
                container, details, ..
            }) => {
                assert_eq!(container, id);
                assert_eq!(details.current_index, 1);
                assert_eq!(details.previous_index, 0);
                assert_eq!(details.drop_point, Point::new(10.0, 75.0));
            }
            other => panic!("expected dropped, got {other:?}"),
        }
    }

    #[test]
    fn exit_emits_exited() {
        let fx = Fixture::new(2, DropListConfig::default());
        fx.pick_up(0);
        let mut rx = fx.list.borrow().subscribe();

        let mut list = fx.list.borrow_mut();
        list.start();
        list.exit(&fx.items[0]);

        assert!(!list.is_dragging());
        assert_eq!(drain(&mut rx).last().map(DropListEvent::name), Some("exited"));
    }

    #[test]
    fn removing_the_dragged_item_aborts_the_drag() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        list.with_items(&fx.items[1..]);
        assert!(!list.is_dragging());
    }

    #[test]
    fn new_items_join_a_running_drag() {
        let mut fx = Fixture::new(2, DropListConfig::default());
        fx.pick_up(0);
        fx.list.borrow_mut().start();

        let root = fx
            .dom
            .create_element(fx.element, ClientRect::new(0.0, 0.0, 200.0, 50.0));
        let extra = DragRef::new(DragHandle::new(root, fx.dom.create_detached(200.0, 50.0)));
        fx.items.push(extra.clone());

        let mut list = fx.list.borrow_mut();
        list.with_items(&fx.items);
        assert!(list.is_dragging());
        assert_eq!(list.get_item_index(&extra), Some(2));
    }

    #[test]
    fn sort_predicate_sees_list_id() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.pick_up(0);
        let mut rx = fx.list.borrow().subscribe();

        let mut list = fx.list.borrow_mut();
        let own_id = list.id();
        list.set_sort_predicate(move |index, _, id| id == own_id && index != 1);
        list.start();
        list.sort_item(&fx.items[0], 10.0, 75.0, DOWN);
        list.sort_item(&fx.items[0], 10.0, 125.0, DOWN);

        let sorted: Vec<usize> = drain(&mut rx)
            .into_iter()
            .filter_map(|e| match e {
                DropListEvent::Sorted { current_index, .. } => Some(current_index),
                _ => None,
            })
            .collect();
        assert_eq!(sorted, vec![2]);
    }

    #[test]
    fn orientation_switches_strategy() {
        let fx = Fixture::new(0, DropListConfig::default());
        let mut list = fx.list.borrow_mut();
        list.with_orientation(Orientation::Mixed);
        assert!(list.strategy.is_mixed());
        assert_eq!(list.orientation(), Orientation::Mixed);
        list.with_orientation(Orientation::Horizontal);
        assert!(!list.strategy.is_mixed());
    }

    #[test]
    fn scrollable_parents_always_include_the_list() {
        let fx = Fixture::new(0, DropListConfig::default());
        let parent = fx.dom.document();
        let mut list = fx.list.borrow_mut();

        list.with_scrollable_parents(&[NodeId(42)]);
        assert_eq!(list.scrollable_parents(), &[fx.element, NodeId(42)]);

        list.with_scrollable_parents(&[parent, fx.element]);
        assert_eq!(list.scrollable_parents(), &[parent, fx.element]);
    }

    #[test]
    fn element_container_must_be_inside_list() {
        let fx = Fixture::new(0, DropListConfig::default());
        let inner = fx
            .dom
            .create_element(fx.element, ClientRect::new(0.0, 0.0, 200.0, 300.0));
        let outside = fx
            .dom
            .create_element(fx.dom.document(), ClientRect::new(400.0, 0.0, 10.0, 10.0));

        let mut list = fx.list.borrow_mut();
        list.with_element_container(outside);
        assert_eq!(list.scrollable_parents(), &[fx.element]);

        list.with_element_container(inner);
        assert_eq!(list.scrollable_parents(), &[inner]);
    }

    #[test]
    fn is_over_container_uses_cached_rect() {
        let fx = Fixture::new(1, DropListConfig::default());
        let mut list = fx.list.borrow_mut();
        assert!(!list.is_over_container(10.0, 10.0));

        fx.pick_up(0);
        list.start();
        assert!(list.is_over_container(10.0, 10.0));
        assert!(list.is_over_container(200.0, 300.0));
        assert!(!list.is_over_container(201.0, 10.0));
    }

    #[test]
    fn auto_scrolls_list_near_its_bottom_edge() {
        let config = DropListConfig {
            auto_scroll_step: 5.0,
            ..DropListConfig::default()
        };
        let fx = Fixture::new(10, config);
        fx.dom.set_scrollable(fx.element, true);
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        list.start_scrolling_if_necessary(100.0, 295.0);

        assert_eq!(list.vertical_scroll_direction(), VerticalScrollDirection::Down);
        assert_eq!(list.scroll_target(), Some(ScrollTarget::Element(fx.element)));
        assert!(list.animation_frame());
        assert!(list.animation_frame());
        assert_eq!(fx.dom.scroll_position(fx.element).top, 10.0);

        list.start_scrolling_if_necessary(100.0, 150.0);
        assert!(!list.is_auto_scrolling());
        assert!(!list.animation_frame());
    }

    #[test]
    fn element_that_cannot_scroll_falls_back_to_viewport() {
        let fx = Fixture::new(10, DropListConfig::default());
        fx.dom.set_scrollable(fx.element, true);
        fx.dom.set_document_size(1000.0, 2000.0);
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        // Already at the top of the list.
        list.start_scrolling_if_necessary(100.0, 5.0);
        assert_eq!(list.vertical_scroll_direction(), VerticalScrollDirection::Up);
        assert_eq!(list.scroll_target(), Some(ScrollTarget::Viewport));
    }

    #[test]
    fn retargeting_restarts_the_loop() {
        let fx = Fixture::new(10, DropListConfig::default());
        fx.dom.set_scrollable(fx.element, true);
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        list.start_scrolling_if_necessary(100.0, 295.0);
        let first = list.scroll_loop;
        list.start_scrolling_if_necessary(100.0, 296.0);
        assert_eq!(list.scroll_loop, first);

        list.start_scrolling_if_necessary(100.0, 790.0);
        assert_eq!(list.scroll_target(), Some(ScrollTarget::Viewport));
        assert_ne!(list.scroll_loop, first);
        assert!(list.scroll_loop.is_some());
    }

    #[test]
    fn auto_scroll_can_be_disabled() {
        let config = DropListConfig {
            auto_scroll_disabled: true,
            ..DropListConfig::default()
        };
        let fx = Fixture::new(10, config);
        fx.dom.set_scrollable(fx.element, true);
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        list.start();
        list.start_scrolling_if_necessary(100.0, 295.0);
        assert!(!list.is_auto_scrolling());
    }

    #[test]
    fn drop_stops_auto_scroll() {
        let fx = Fixture::new(10, DropListConfig::default());
        fx.dom.set_scrollable(fx.element, true);
        fx.pick_up(0);

        let mut list = fx.list.borrow_mut();
        let id = list.id();
        list.start();
        list.start_scrolling_if_necessary(100.0, 295.0);
        assert!(list.is_auto_scrolling());

        list.drop(&fx.items[0], details(0, 0, id));
        assert!(!list.is_auto_scrolling());
    }

    #[test]
    fn scrolling_resorts_from_last_pointer_position() {
        let fx = Fixture::new(10, DropListConfig::default());
        fx.dom.set_scrollable(fx.element, true);
        fx.pick_up(0);
        fx.handles[0].record_pointer(Point::new(100.0, 60.0), DOWN);
        let mut rx = fx.list.borrow().subscribe();

        let mut list = fx.list.borrow_mut();
        list.start();
        fx.dom.scroll_by(ScrollTarget::Element(fx.element), 0.0, 50.0);
        assert_eq!(fx.registry.dispatch_scroll(fx.dom.document(), fx.element), 1);
        assert_eq!(list.process_scroll_events(), 1);

        let sorted = drain(&mut rx).into_iter().find_map(|e| match e {
            DropListEvent::Sorted {
                previous_index,
                current_index,
                ..
            } => Some((previous_index, current_index)),
            _ => None,
        });
        assert_eq!(sorted, Some((0, 2)));
    }

    #[test]
    fn untracked_scroll_is_ignored() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.pick_up(0);
        let mut list = fx.list.borrow_mut();
        list.start();

        fx.registry.dispatch_scroll(fx.dom.document(), NodeId(999));
        assert_eq!(list.process_scroll_events(), 1);
        assert_eq!(list.get_item_index(&fx.items[0]), Some(0));
    }

    #[test]
    fn idle_list_does_not_listen_for_scrolls() {
        let fx = Fixture::new(3, DropListConfig::default());
        fx.registry.dispatch_scroll(fx.dom.document(), fx.element);
        assert_eq!(fx.list.borrow_mut().process_scroll_events(), 0);
    }

    #[test]
    fn dispose_is_idempotent() {
        let fx = Fixture::new(3, DropListConfig::default());
        let mut list = fx.list.borrow_mut();
        let id = list.id();
        list.dispose();
        list.dispose();
        assert!(list.is_disposed());
        assert!(!fx.registry.is_registered(id));
    }

    #[test]
    fn drop_details_serialize_for_hosts() {
        let details = details(2, 0, DropListId(7));
        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["current_index"], 2);
        assert_eq!(json["previous_container"], 7);
        assert_eq!(json["drop_point"]["y"], 75.0);
        assert!(json["event"].is_null());
    }

    #[test]
    fn apply_config_updates_behavior() {
        let fx = Fixture::new(0, DropListConfig::default());
        let config = DropListConfig {
            disabled: true,
            orientation: Orientation::Mixed,
            ..DropListConfig::default()
        };
        let mut list = fx.list.borrow_mut();
        list.apply_config(&config);
        assert!(list.is_disabled());
        assert!(list.strategy.is_mixed());
    }
}
