use crate::editing::NodeType;

/// One level of the ancestor chain of a resolved position
#[derive(Debug, Clone, PartialEq)]
pub struct AncestorFrame {
    pub node_type: NodeType,
    /// Position of this node's first content slot
    pub start_offset: usize,
    /// Position of this node's last content slot (`start_offset + content_size`)
    pub end_offset: usize,
    /// Offset of the resolved position relative to `start_offset`
    pub parent_offset: usize,
    pub content_size: usize,
    /// Child index the resolved position points at (or into)
    pub index: usize,
    pub child_count: usize,
}

/// A document position together with its ancestor chain, outermost first
///
/// Frame 0 is always the document root. Positions inside a text run resolve
/// to the enclosing text-bearing block, never to the text node itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPos {
    pub pos: usize,
    frames: Vec<AncestorFrame>,
    text_offset: usize,
}

impl ResolvedPos {
    pub(crate) fn new(pos: usize, frames: Vec<AncestorFrame>, text_offset: usize) -> Self {
        debug_assert!(!frames.is_empty());
        Self {
            pos,
            frames,
            text_offset,
        }
    }

    /// True when the position sits between two children of its parent
    /// rather than inside a text run
    pub fn is_boundary(&self) -> bool {
        self.text_offset == 0
    }

    /// Depth of the innermost ancestor (0 = document root)
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    pub fn frames(&self) -> &[AncestorFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<AncestorFrame> {
        self.frames
    }

    /// Innermost ancestor
    pub fn parent(&self) -> &AncestorFrame {
        &self.frames[self.frames.len() - 1]
    }

    pub fn frame(&self, depth: usize) -> Option<&AncestorFrame> {
        self.frames.get(depth)
    }

    /// Position just before the ancestor at `depth` (its open token)
    pub fn before(&self, depth: usize) -> Option<usize> {
        if depth == 0 {
            return None;
        }
        Some(self.frames.get(depth)?.start_offset - 1)
    }

    /// Position just after the ancestor at `depth` (past its close token)
    pub fn after(&self, depth: usize) -> Option<usize> {
        if depth == 0 {
            return None;
        }
        Some(self.frames.get(depth)?.end_offset + 1)
    }

    /// Child indices leading from the root to the ancestor at `depth`
    pub fn path(&self, depth: usize) -> Vec<usize> {
        self.frames[..depth.min(self.depth())]
            .iter()
            .map(|frame| frame.index)
            .collect()
    }

    /// Does any ancestor (innermost included) wrap the position in a list?
    pub fn inside_list(&self) -> bool {
        self.frames.iter().any(|frame| frame.node_type.is_list())
    }
}
