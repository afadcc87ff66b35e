//! The TOML script format replayed by the simulator.
//!
//! ```toml
//! items = ["a", "b", "c"]
//! drag = "a"
//!
//! [[moves]]
//! x = 100.0
//! y = 75.0
//! ```

use std::collections::HashSet;

use dragdrop_common::DragDropError;
use dragdrop_config::DropListConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Item names, in list order.
    pub items: Vec<String>,
    /// Name of the item to drag.
    pub drag: String,
    #[serde(default)]
    pub list: ListFrame,
    #[serde(default = "default_item_size")]
    pub item_size: [f64; 2],
    #[serde(default = "default_viewport")]
    pub viewport: [f64; 2],
    /// Whether the list element scrolls its overflow.
    #[serde(default)]
    pub scrollable: bool,
    #[serde(default)]
    pub moves: Vec<Move>,
    /// Inline drop list config; `--config` takes precedence.
    #[serde(default)]
    pub config: Option<DropListConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ListFrame {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for ListFrame {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 200.0,
            height: 300.0,
        }
    }
}

/// One pointer move, followed by `frames` animation frames.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Move {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub frames: u32,
}

fn default_item_size() -> [f64; 2] {
    [200.0, 50.0]
}

fn default_viewport() -> [f64; 2] {
    [1000.0, 800.0]
}

impl Script {
    pub fn parse(content: &str) -> Result<Self, DragDropError> {
        let script: Script = toml::from_str(content)
            .map_err(|e| DragDropError::Script(format!("failed to parse script: {e}")))?;
        script.check()?;
        Ok(script)
    }

    /// Position of the dragged item in `items`.
    pub fn drag_index(&self) -> Option<usize> {
        self.items.iter().position(|name| name == &self.drag)
    }

    fn check(&self) -> Result<(), DragDropError> {
        if self.items.is_empty() {
            return Err(DragDropError::Script("script has no items".into()));
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.items.iter().find(|name| !seen.insert(name.as_str())) {
            return Err(DragDropError::Script(format!("duplicate item name {dup}")));
        }

        if self.drag_index().is_none() {
            return Err(DragDropError::Script(format!(
                "no item named {}",
                self.drag
            )));
        }

        let [w, h] = self.item_size;
        if w <= 0.0 || h <= 0.0 {
            return Err(DragDropError::Script(format!("item_size {w}x{h} must be positive")));
        }
        Ok(())
    }
}
