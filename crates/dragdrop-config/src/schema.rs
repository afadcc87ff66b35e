//! Drop list configuration schema.

use dragdrop_common::{Direction, Orientation};
use serde::{Deserialize, Serialize};

/// Fraction of a rect's size used as the proximity margin around it, both
/// for "is the pointer over this list" and "should this edge auto-scroll".
pub const DEFAULT_PROXIMITY_THRESHOLD: f64 = 0.05;

/// Behavior switches of a single drop list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropListConfig {
    /// Items of a disabled list can't be dragged.
    pub disabled: bool,
    /// Keep the list order fixed while an item is dragged over it.
    pub sorting_disabled: bool,
    /// Don't scroll the list, its scrollable parents or the viewport when
    /// the pointer nears their edges.
    pub auto_scroll_disabled: bool,
    /// Pixels scrolled per animation frame while auto-scrolling (valid range: 0-100).
    pub auto_scroll_step: f64,
    pub orientation: Orientation,
    pub direction: Direction,
    /// Margin around the list rect inside which sorting happens (valid range: 0.0-0.5).
    pub drop_proximity_threshold: f64,
    /// Band along each edge that triggers auto-scroll (valid range: 0.0-0.5).
    pub scroll_proximity_threshold: f64,
}

impl Default for DropListConfig {
    fn default() -> Self {
        Self {
            disabled: false,
            sorting_disabled: false,
            auto_scroll_disabled: false,
            auto_scroll_step: 2.0,
            orientation: Orientation::Vertical,
            direction: Direction::Ltr,
            drop_proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
            scroll_proximity_threshold: DEFAULT_PROXIMITY_THRESHOLD,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
