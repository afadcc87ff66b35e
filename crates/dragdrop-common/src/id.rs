use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_DROP_LIST_ID: AtomicU32 = AtomicU32::new(0);

/// Short id used to correlate the log lines of one drag sequence.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Process-unique identifier of a drop list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropListId(pub u32);

impl DropListId {
    pub fn next() -> Self {
        Self(NEXT_DROP_LIST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for DropListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "drop-list-{}", self.0)
    }
}
