use std::ops::Range;

use crate::drag::{BlockHandle, DraggableNodeRef, Point, Rect};
use crate::editing::{Cmd, Document, DocumentError, Node, NodeType, Patch};
use crate::host::EditorHost;

pub const LINE_HEIGHT: f32 = 20.0;
pub const CHAR_WIDTH: f32 = 8.0;
pub const LEFT_MARGIN: f32 = 40.0;
pub const LIST_INDENT: f32 = 24.0;
pub const SURFACE_WIDTH: f32 = 640.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum LineKind {
    /// Text-bearing block whose content starts at `start`
    Text { start: usize, len: usize },
    /// Block-level atom occupying `before..before + 1`
    Atom { before: usize },
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    x: f32,
    y: f32,
    kind: LineKind,
}

#[derive(Debug, Clone, Default)]
struct Layout {
    lines: Vec<Line>,
    blocks: Vec<BlockHandle>,
}

impl Layout {
    fn of(doc: &Document) -> Self {
        let mut layout = Self::default();
        let mut pos = 0;
        for block in doc.blocks() {
            layout.place(block, pos, 0, true);
            pos += block.node_size();
        }
        layout
    }

    fn bottom(&self) -> f32 {
        self.lines.len() as f32 * LINE_HEIGHT
    }

    fn place(&mut self, node: &Node, before: usize, list_depth: usize, top_level: bool) {
        let top = self.bottom();
        let x = LEFT_MARGIN + list_depth as f32 * LIST_INDENT;

        let handle = (top_level || *node.kind() == NodeType::ListItem).then(|| {
            self.blocks.push(BlockHandle {
                range: before..before + node.node_size(),
                kind: node.kind().clone(),
                depth: list_depth,
                rect: Rect {
                    x,
                    y: top,
                    width: SURFACE_WIDTH - x,
                    height: 0.0,
                },
            });
            self.blocks.len() - 1
        });

        if node.kind().is_textblock() {
            self.lines.push(Line {
                x,
                y: top,
                kind: LineKind::Text {
                    start: before + 1,
                    len: node.content_size(),
                },
            });
        } else if node.kind().is_atom() {
            self.lines.push(Line {
                x,
                y: top,
                kind: LineKind::Atom { before },
            });
        } else {
            let child_depth = list_depth + usize::from(node.kind().is_list());
            let mut child_pos = before + 1;
            for child in node.children() {
                self.place(child, child_pos, child_depth, false);
                child_pos += child.node_size();
            }
        }

        if let Some(index) = handle {
            self.blocks[index].rect.height = self.bottom() - top;
        }
    }
}

/// Headless editor surface with a fixed-metric layout
///
/// Every text-bearing block and block-level atom is one line of
/// `LINE_HEIGHT`; characters are `CHAR_WIDTH` wide; list content is indented
/// `LIST_INDENT` per level. The layout is rebuilt after every applied edit.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    document: Document,
    layout: Layout,
    ghost: Option<Range<usize>>,
    indicator: Option<f32>,
    last_patch: Option<Patch>,
}

impl MemoryHost {
    pub fn new(document: Document) -> Self {
        let layout = Layout::of(&document);
        Self {
            document,
            layout,
            ghost: None,
            indicator: None,
            last_patch: None,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(Self::new(Document::from_json(json)?))
    }

    pub fn ghost(&self) -> Option<Range<usize>> {
        self.ghost.clone()
    }

    pub fn indicator(&self) -> Option<f32> {
        self.indicator
    }

    pub fn last_patch(&self) -> Option<&Patch> {
        self.last_patch.as_ref()
    }

    /// Screen point of a document position (the middle of its line)
    pub fn coords_at_pos(&self, pos: usize) -> Option<Point> {
        self.layout.lines.iter().find_map(|line| {
            let mid = line.y + LINE_HEIGHT / 2.0;
            match line.kind {
                LineKind::Text { start, len } if (start..=start + len).contains(&pos) => Some(
                    Point::new(line.x + (pos - start) as f32 * CHAR_WIDTH, mid),
                ),
                LineKind::Atom { before } if pos == before => Some(Point::new(line.x, mid)),
                LineKind::Atom { before } if pos == before + 1 => {
                    Some(Point::new(line.x + CHAR_WIDTH, mid))
                }
                _ => None,
            }
        })
    }

    /// Screen point at the vertical middle of the block starting at `pos`
    pub fn block_point(&self, pos: usize) -> Option<Point> {
        self.layout
            .blocks
            .iter()
            .rev()
            .find(|block| block.range.start == pos)
            .map(|block| Point::new(block.rect.x, block.rect.y + LINE_HEIGHT / 2.0))
    }
}

impl EditorHost for MemoryHost {
    fn document(&self) -> &Document {
        &self.document
    }

    fn apply_atomic_edit(&mut self, steps: Vec<Cmd>) -> bool {
        match self.document.apply(steps) {
            Ok(Some(patch)) => {
                self.layout = Layout::of(&self.document);
                self.last_patch = Some(patch);
                true
            }
            Ok(None) => false,
            Err(e) => {
                log::warn!("Rejected atomic edit: {e}");
                false
            }
        }
    }

    fn resolve_position_at(&self, point: Point) -> Option<usize> {
        if point.y < 0.0 {
            return None;
        }
        let line = self.layout.lines.get((point.y / LINE_HEIGHT) as usize)?;
        match line.kind {
            LineKind::Text { start, len } => {
                let column = ((point.x - line.x) / CHAR_WIDTH).round();
                Some(start + column.clamp(0.0, len as f32) as usize)
            }
            LineKind::Atom { before } if point.x < line.x + CHAR_WIDTH / 2.0 => Some(before),
            LineKind::Atom { before } => Some(before + 1),
        }
    }

    fn visible_blocks(&self) -> Vec<BlockHandle> {
        self.layout.blocks.clone()
    }

    fn show_ghost(&mut self, source: &DraggableNodeRef) {
        self.ghost = Some(source.from..source.to);
    }

    fn clear_ghost(&mut self) {
        self.ghost = None;
    }

    fn show_drop_indicator(&mut self, offset: f32) {
        self.indicator = Some(offset);
    }

    fn hide_drop_indicator(&mut self) {
        self.indicator = None;
    }
}
