//! JSON-line records printed by the simulator.

use dragdrop_common::{DropListId, ScrollPosition};
use dragdrop_engine::{DragRef, DropDetails, DropListEvent};
use serde::Serialize;

/// One line of output: a drop list event, or the closing summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventRecord {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<DropListId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<DropDetails>,
    /// Item names after the drop was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll: Option<ScrollPosition>,
}

impl EventRecord {
    fn named(event: &'static str) -> Self {
        Self {
            event,
            list: None,
            item: None,
            previous_index: None,
            current_index: None,
            details: None,
            order: None,
            scroll: None,
        }
    }

    /// Converts an engine event, resolving items to their script names.
    pub fn from_event(event: &DropListEvent, name_of: impl Fn(&DragRef) -> Option<String>) -> Self {
        let mut record = Self::named(event.name());
        match event {
            DropListEvent::BeforeStarted { container } => {
                record.list = Some(*container);
            }
            DropListEvent::Entered {
                item,
                container,
                current_index,
            } => {
                record.list = Some(*container);
                record.item = name_of(item);
                record.current_index = *current_index;
            }
            DropListEvent::Exited { item, container } => {
                record.list = Some(*container);
                record.item = name_of(item);
            }
            DropListEvent::Dropped {
                item,
                container,
                details,
            } => {
                record.list = Some(*container);
                record.item = name_of(item);
                record.previous_index = Some(details.previous_index);
                record.current_index = Some(details.current_index);
                record.details = Some(details.clone());
            }
            DropListEvent::Sorted {
                previous_index,
                current_index,
                container,
                item,
            } => {
                record.list = Some(*container);
                record.item = name_of(item);
                record.previous_index = Some(*previous_index);
                record.current_index = Some(*current_index);
            }
            DropListEvent::ReceivingStarted { receiver, .. }
            | DropListEvent::ReceivingStopped { receiver, .. } => {
                record.list = Some(*receiver);
            }
        }
        record
    }

    pub fn summary(order: Vec<String>, scroll: ScrollPosition) -> Self {
        Self {
            order: Some(order),
            scroll: Some(scroll),
            ..Self::named("summary")
        }
    }
}
