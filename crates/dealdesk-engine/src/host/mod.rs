//! The editor surface the drag engine runs against
//!
//! A host owns the rendered document. The engine only reads through it and
//! only writes through [`EditorHost::apply_atomic_edit`].

mod memory;

pub use memory::MemoryHost;

use crate::drag::{BlockHandle, DraggableNodeRef, Point, block_at};
use crate::editing::{AncestorFrame, Cmd, Document, DocumentError};

pub trait EditorHost {
    /// The document as currently rendered
    fn document(&self) -> &Document;

    /// Apply `steps` as one edit; true only when the document changed
    fn apply_atomic_edit(&mut self, steps: Vec<Cmd>) -> bool;

    /// Inverse rendering lookup; `None` when the point is over no position
    fn resolve_position_at(&self, point: Point) -> Option<usize>;

    /// Draggable blocks with their current on-screen rectangles
    fn visible_blocks(&self) -> Vec<BlockHandle>;

    fn element_at(&self, y: f32) -> Option<BlockHandle> {
        block_at(&self.visible_blocks(), y).cloned()
    }

    fn ancestor_chain(&self, pos: usize) -> Result<Vec<AncestorFrame>, DocumentError> {
        self.document().ancestor_chain(pos)
    }

    fn document_size(&self) -> usize {
        self.document().size()
    }

    fn show_ghost(&mut self, _source: &DraggableNodeRef) {}

    fn clear_ghost(&mut self) {}

    fn show_drop_indicator(&mut self, _offset: f32) {}

    fn hide_drop_indicator(&mut self) {}
}
