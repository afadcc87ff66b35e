pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use errors::{ConfigError, DragDropError};
pub use events::EventBus;
pub use id::{new_correlation_id, DropListId};
pub use types::{
    ClientRect, Direction, NodeId, Orientation, Point, PointerDelta, PointerEvent, PointerKind,
    ScrollPosition, ViewportSize,
};

pub type Result<T> = std::result::Result<T, DragDropError>;
