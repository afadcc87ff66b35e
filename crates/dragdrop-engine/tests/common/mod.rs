#![allow(dead_code)]

use std::rc::Rc;

use dragdrop_common::{ClientRect, NodeId};
use dragdrop_config::DropListConfig;
use dragdrop_engine::{
    Dom, DragHandle, DragItem, DragRef, DropListEvent, DropListRef, FlowLayout, LocalRegistry,
    MemoryDom, SharedDropList,
};
use tokio::sync::broadcast;

/// A 1000x800 viewport with one registry shared by every list.
pub struct Scene {
    pub dom: Rc<MemoryDom>,
    pub registry: Rc<LocalRegistry>,
}

pub struct List {
    pub element: NodeId,
    pub list: SharedDropList,
    pub handles: Vec<Rc<DragHandle>>,
    pub items: Vec<DragRef>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            dom: Rc::new(MemoryDom::new(1000.0, 800.0)),
            registry: Rc::new(LocalRegistry::new()),
        }
    }

    /// A list at `frame` holding `count` items of `item_width` by
    /// `item_height`.
    pub fn list(
        &self,
        frame: ClientRect,
        flow: FlowLayout,
        config: &DropListConfig,
        count: usize,
        (item_width, item_height): (f64, f64),
    ) -> List {
        let element = self.dom.create_element(self.dom.document(), frame);
        self.dom.set_flow(element, flow);

        let mut handles = Vec::new();
        let mut items = Vec::new();
        for _ in 0..count {
            let root = self.dom.create_element(
                element,
                ClientRect::new(0.0, 0.0, item_width, item_height),
            );
            let placeholder = self.dom.create_detached(item_width, item_height);
            let handle = Rc::new(DragHandle::new(root, placeholder));
            items.push(DragRef::from(Rc::clone(&handle)));
            handles.push(handle);
        }

        let list = DropListRef::new(
            element,
            config,
            self.dom.clone(),
            self.dom.clone(),
            self.registry.clone(),
        );
        list.borrow_mut().with_items(&items);

        List {
            element,
            list,
            handles,
            items,
        }
    }

    pub fn pick_up(&self, handle: &Rc<DragHandle>) {
        self.dom
            .begin_drag(handle.root_element(), handle.placeholder_element());
        handle.set_dragging(true);
        self.registry
            .start_dragging(&DragRef::from(Rc::clone(handle)));
    }

    pub fn release(&self, handle: &Rc<DragHandle>) {
        self.dom
            .end_drag(handle.root_element(), handle.placeholder_element());
        handle.set_dragging(false);
        self.registry
            .stop_dragging(&DragRef::from(Rc::clone(handle)));
    }
}

pub fn drain(rx: &mut broadcast::Receiver<DropListEvent>) -> Vec<DropListEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

pub fn names(events: &[DropListEvent]) -> Vec<&'static str> {
    events.iter().map(DropListEvent::name).collect()
}
