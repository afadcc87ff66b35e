use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewport-relative bounding box of an element, in CSS pixels.
///
/// Cached copies are shifted in place as things scroll or get moved with a
/// transform, so the edges and the size are all kept rather than derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientRect {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Rect anchored at the origin, e.g. the viewport itself.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Scroll offsets of a node (`scrollTop` / `scrollLeft`).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub top: f64,
    pub left: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Direction the pointer last moved in on each axis: -1, 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PointerDelta {
    pub x: i8,
    pub y: i8,
}

impl PointerDelta {
    pub fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

/// Handle to a node owned by a DOM backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
    /// Items wrap (flex-wrap, grids); sorted by moving DOM nodes.
    Mixed,
}

/// Layout direction of the content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// The pointer event that ended a drag, forwarded untouched in `dropped`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub client: Point,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_new_derives_edges() {
        let r = ClientRect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right, 110.0);
        assert_eq!(r.bottom, 70.0);
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn rect_from_size_is_at_origin() {
        let r = ClientRect::from_size(800.0, 600.0);
        assert_eq!(r.top, 0.0);
        assert_eq!(r.left, 0.0);
        assert_eq!(r.right, 800.0);
        assert_eq!(r.bottom, 600.0);
    }

    #[test]
    fn rect_serialization() {
        let r = ClientRect::new(0.0, 0.0, 1920.0, 1080.0);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: ClientRect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn orientation_serializes_lowercase() {
        let json = serde_json::to_string(&Orientation::Mixed).unwrap();
        assert_eq!(json, "\"mixed\"");
        let parsed: Orientation = serde_json::from_str("\"horizontal\"").unwrap();
        assert_eq!(parsed, Orientation::Horizontal);
    }

    #[test]
    fn direction_default_is_ltr() {
        assert_eq!(Direction::default(), Direction::Ltr);
        let parsed: Direction = serde_json::from_str("\"rtl\"").unwrap();
        assert_eq!(parsed, Direction::Rtl);
    }

    #[test]
    fn node_id_display() {
        assert_eq!(NodeId(12).to_string(), "node-12");
    }
}
