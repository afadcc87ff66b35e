//! Rect tests and in-place rect adjustments.

use std::cell::Cell;
use std::rc::Rc;

use dragdrop_common::ClientRect;

/// A cached rect read by several owners and shifted in place as things
/// scroll. The position tracker is the only writer.
pub type SharedRect = Rc<Cell<ClientRect>>;

/// Whether `(x, y)` lies within `rect`, edges included.
pub fn is_inside_rect(rect: &ClientRect, x: f64, y: f64) -> bool {
    y >= rect.top && y <= rect.bottom && x >= rect.left && x <= rect.right
}

/// Whether `(x, y)` lies within `rect` grown on each side by `threshold`
/// times its width (left/right) or height (top/bottom).
pub fn is_pointer_near_rect(rect: &ClientRect, threshold: f64, x: f64, y: f64) -> bool {
    let x_threshold = rect.width * threshold;
    let y_threshold = rect.height * threshold;

    y > rect.top - y_threshold
        && y < rect.bottom + y_threshold
        && x > rect.left - x_threshold
        && x < rect.right + x_threshold
}

/// Shifts a rect by the given deltas, keeping its size.
pub fn shift_rect(rect: &mut ClientRect, top: f64, left: f64) {
    rect.top += top;
    rect.bottom = rect.top + rect.height;
    rect.left += left;
    rect.right = rect.left + rect.width;
}

pub fn shift_shared_rect(rect: &SharedRect, top: f64, left: f64) {
    let mut value = rect.get();
    shift_rect(&mut value, top, left);
    rect.set(value);
}

/// `translate3d` value for an offset along one or both axes.
pub fn translate3d(x: f64, y: f64) -> String {
    format!("translate3d({x}px, {y}px, 0)")
}

/// Applies `transform` on top of the transform an element had before the
/// drag started.
pub fn combine_transforms(transform: &str, initial: &str) -> String {
    if initial.is_empty() || initial == "none" {
        transform.to_string()
    } else {
        format!("{transform} {initial}")
    }
}
