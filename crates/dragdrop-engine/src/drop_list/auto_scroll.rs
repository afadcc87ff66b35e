//! Scrolling the list, its scrollable parents or the viewport while the
//! pointer is near one of their edges.
//!
//! The loop doesn't own a timer: once started, the host calls
//! [`DropListRef::animation_frame`] every frame until the loop is stopped.

use dragdrop_common::{ClientRect, Direction, NodeId};
use tracing::debug;

use crate::dom::{Dom, ScrollTarget};
use crate::geometry::is_pointer_near_rect;

use super::{DropListRef, HorizontalScrollDirection, VerticalScrollDirection};

/// Which way to scroll for a pointer at `pointer_y`, given bands of
/// `threshold` times the rect's height around its top and bottom edges.
pub fn get_vertical_scroll_direction(
    rect: &ClientRect,
    threshold: f64,
    pointer_y: f64,
) -> VerticalScrollDirection {
    let y_threshold = rect.height * threshold;

    if pointer_y >= rect.top - y_threshold && pointer_y <= rect.top + y_threshold {
        VerticalScrollDirection::Up
    } else if pointer_y >= rect.bottom - y_threshold && pointer_y <= rect.bottom + y_threshold {
        VerticalScrollDirection::Down
    } else {
        VerticalScrollDirection::None
    }
}

pub fn get_horizontal_scroll_direction(
    rect: &ClientRect,
    threshold: f64,
    pointer_x: f64,
) -> HorizontalScrollDirection {
    let x_threshold = rect.width * threshold;

    if pointer_x >= rect.left - x_threshold && pointer_x <= rect.left + x_threshold {
        HorizontalScrollDirection::Left
    } else if pointer_x >= rect.right - x_threshold && pointer_x <= rect.right + x_threshold {
        HorizontalScrollDirection::Right
    } else {
        HorizontalScrollDirection::None
    }
}

/// Edge directions for an element, dropping any the element can't scroll
/// in any further.
pub fn get_element_scroll_directions(
    dom: &dyn Dom,
    element: NodeId,
    rect: &ClientRect,
    direction: Direction,
    threshold: f64,
    pointer_x: f64,
    pointer_y: f64,
) -> (VerticalScrollDirection, HorizontalScrollDirection) {
    let computed_vertical = get_vertical_scroll_direction(rect, threshold, pointer_y);
    let computed_horizontal = get_horizontal_scroll_direction(rect, threshold, pointer_x);
    let scroll = dom.scroll_position(element);
    let extent = dom.scroll_extent(element);

    let vertical = match computed_vertical {
        VerticalScrollDirection::Up if scroll.top > 0.0 => VerticalScrollDirection::Up,
        VerticalScrollDirection::Down
            if extent.scroll_height - scroll.top > extent.client_height =>
        {
            VerticalScrollDirection::Down
        }
        _ => VerticalScrollDirection::None,
    };

    // In RTL, scrollLeft starts at 0 and goes negative towards the left.
    let horizontal = match (direction, computed_horizontal) {
        (Direction::Rtl, HorizontalScrollDirection::Right) if scroll.left < 0.0 => {
            HorizontalScrollDirection::Right
        }
        (Direction::Rtl, HorizontalScrollDirection::Left)
            if extent.scroll_width + scroll.left > extent.client_width =>
        {
            HorizontalScrollDirection::Left
        }
        (Direction::Ltr, HorizontalScrollDirection::Left) if scroll.left > 0.0 => {
            HorizontalScrollDirection::Left
        }
        (Direction::Ltr, HorizontalScrollDirection::Right)
            if extent.scroll_width - scroll.left > extent.client_width =>
        {
            HorizontalScrollDirection::Right
        }
        _ => HorizontalScrollDirection::None,
    };

    (vertical, horizontal)
}

impl DropListRef {
    /// Starts, retargets or stops auto-scrolling for a pointer at the
    /// given point. The first tracked element that can scroll towards the
    /// edge the pointer is near wins; the viewport is the fallback.
    pub fn start_scrolling_if_necessary(&mut self, pointer_x: f64, pointer_y: f64) {
        if self.auto_scroll_disabled {
            return;
        }

        let document = self.dom.document();
        let mut vertical = VerticalScrollDirection::None;
        let mut horizontal = HorizontalScrollDirection::None;
        let mut scroll_node = ScrollTarget::Viewport;

        for (node, position) in self.parent_positions.positions() {
            if node == document {
                continue;
            }
            let Some(rect) = &position.client_rect else {
                continue;
            };
            let rect = rect.get();
            if !is_pointer_near_rect(&rect, self.drop_proximity_threshold, pointer_x, pointer_y) {
                continue;
            }

            let (v, h) = get_element_scroll_directions(
                self.dom.as_ref(),
                node,
                &rect,
                self.direction,
                self.scroll_proximity_threshold,
                pointer_x,
                pointer_y,
            );
            if v != VerticalScrollDirection::None || h != HorizontalScrollDirection::None {
                vertical = v;
                horizontal = h;
                scroll_node = ScrollTarget::Element(node);
                break;
            }
        }

        if vertical == VerticalScrollDirection::None && horizontal == HorizontalScrollDirection::None {
            let size = self.viewport.viewport_size();
            let rect = ClientRect::from_size(size.width, size.height);
            vertical = get_vertical_scroll_direction(&rect, self.scroll_proximity_threshold, pointer_y);
            horizontal =
                get_horizontal_scroll_direction(&rect, self.scroll_proximity_threshold, pointer_x);
            scroll_node = ScrollTarget::Viewport;
        }

        if vertical != self.vertical_scroll_direction
            || horizontal != self.horizontal_scroll_direction
            || Some(scroll_node) != self.scroll_node
        {
            self.vertical_scroll_direction = vertical;
            self.horizontal_scroll_direction = horizontal;
            self.scroll_node = Some(scroll_node);

            if vertical != VerticalScrollDirection::None
                || horizontal != HorizontalScrollDirection::None
            {
                self.start_scroll_interval();
            } else {
                self.stop_scrolling();
            }
        }
    }

    /// One tick of the auto-scroll loop. Returns whether the loop is
    /// running.
    pub fn animation_frame(&mut self) -> bool {
        let (Some(_), Some(target)) = (self.scroll_loop, self.scroll_node) else {
            return false;
        };
        let step = self.auto_scroll_step;

        match self.vertical_scroll_direction {
            VerticalScrollDirection::Up => self.dom.scroll_by(target, 0.0, -step),
            VerticalScrollDirection::Down => self.dom.scroll_by(target, 0.0, step),
            VerticalScrollDirection::None => {}
        }
        match self.horizontal_scroll_direction {
            HorizontalScrollDirection::Left => self.dom.scroll_by(target, -step, 0.0),
            HorizontalScrollDirection::Right => self.dom.scroll_by(target, step, 0.0),
            HorizontalScrollDirection::None => {}
        }
        true
    }

    pub fn stop_scrolling(&mut self) {
        if let Some(generation) = self.scroll_loop.take() {
            debug!(list = %self.id, generation, "auto-scroll stopped");
        }
    }

    /// A list runs at most one loop; starting always stops the previous one.
    pub(super) fn start_scroll_interval(&mut self) {
        self.stop_scrolling();
        self.scroll_generation += 1;
        self.scroll_loop = Some(self.scroll_generation);
        debug!(
            list = %self.id,
            generation = self.scroll_generation,
            target = ?self.scroll_node,
            vertical = ?self.vertical_scroll_direction,
            horizontal = ?self.horizontal_scroll_direction,
            "auto-scroll started"
        );
    }
}
