pub mod deal;
pub mod drag;
pub mod editing;
pub mod host;

// Re-export key types for easier usage
pub use deal::{DealEditors, EditorSlot};
pub use drag::{
    BlockDragEngine, BlockHandle, DragError, DraggableNodeRef, DropFeedback, DropOutcome,
    InvalidDrop, MovePlan, Point, Rect,
};
pub use editing::{Cmd, Document, DocumentError, Node, NodeType, Patch};
pub use host::{EditorHost, MemoryHost};

pub use dealdesk_config::{Config, DragSettings};
