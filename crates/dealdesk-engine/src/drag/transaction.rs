use std::ops::Range;

use crate::drag::{DragError, DraggableNodeRef, DropTarget, InvalidDrop, resolve_drop};
use crate::editing::{Cmd, Document, DocumentError, Node, Patch};

/// The atomic edit that realises one block move
#[derive(Debug, Clone, PartialEq)]
pub struct MovePlan {
    pub steps: Vec<Cmd>,
    pub target: DropTarget,
    /// A list item left every list and was given a wrapper of its old list type
    pub rewrapped: bool,
    /// The source was the only item of its list and the empty wrapper goes too
    pub collapsed_wrapper: bool,
}

impl MovePlan {
    /// Net change in document size once applied
    pub fn size_delta(&self) -> isize {
        match (self.rewrapped, self.collapsed_wrapper) {
            (true, false) => 2,
            (false, true) => -2,
            _ => 0,
        }
    }
}

/// Compute the delete/insert pair that moves `source` to `raw_drop`
///
/// Everything is checked against `doc` as it is now: the source must still be
/// the node it was when picked up, and the drop target is re-resolved. No
/// step is produced unless the whole move is valid.
pub fn build_move(
    doc: &Document,
    source: &DraggableNodeRef,
    raw_drop: usize,
) -> Result<MovePlan, DragError> {
    let size = doc.size();
    if source.from >= source.to || source.to > size {
        return Err(DocumentError::OutOfRange {
            pos: source.to,
            size,
        }
        .into());
    }
    if doc.node_at(source.from) != Some(&source.node) {
        return Err(DragError::StructuralConflict(format!(
            "dragged {} no longer sits at {}",
            source.node.kind().name(),
            source.from
        )));
    }

    let target = resolve_drop(doc, raw_drop, source)?;
    let rewrap = source.parent_list_type.is_some() && !target.inside_list;

    let (range, node, rewrapped, collapsed_wrapper) =
        match (emptied_wrapper(doc, source)?, &source.parent_list_type) {
            // The whole single-item list travels as it is
            (Some((range, wrapper)), _) if rewrap => {
                if target.pos == range.start || target.pos == range.end {
                    return Err(InvalidDrop::AdjacentNoOp.into());
                }
                (range, wrapper, true, true)
            }
            (Some((range, _)), _) => (range, source.node.clone(), false, true),
            (None, Some(list_type)) if rewrap => (
                source.from..source.to,
                Node::element(list_type.clone(), vec![source.node.clone()]),
                true,
                false,
            ),
            (None, _) => (source.from..source.to, source.node.clone(), false, false),
        };

    if !target.parent.allows_child(node.kind()) {
        return Err(DragError::StructuralConflict(format!(
            "{} cannot be dropped into {}",
            node.kind().name(),
            target.parent.name()
        )));
    }

    let node_size = range.len();
    let inserted = node.node_size();
    let steps = if target.pos > range.end {
        vec![
            Cmd::DeleteRange {
                range: range.clone(),
            },
            Cmd::InsertNode {
                at: target.pos - node_size,
                node,
            },
        ]
    } else if target.pos < range.start {
        vec![
            Cmd::InsertNode {
                at: target.pos,
                node,
            },
            Cmd::DeleteRange {
                range: range.start + inserted..range.end + inserted,
            },
        ]
    } else {
        return Err(InvalidDrop::InsideSource.into());
    };

    Ok(MovePlan {
        steps,
        target,
        rewrapped,
        collapsed_wrapper,
    })
}

/// Build and apply a move directly against a document
pub fn move_block(
    doc: &mut Document,
    source: &DraggableNodeRef,
    raw_drop: usize,
) -> Result<Option<Patch>, DragError> {
    let plan = build_move(doc, source, raw_drop)?;
    Ok(doc.apply(plan.steps)?)
}

/// Range and node of the list that would be left empty by moving `source` out
fn emptied_wrapper(
    doc: &Document,
    source: &DraggableNodeRef,
) -> Result<Option<(Range<usize>, Node)>, DragError> {
    if !source.is_list_item() {
        return Ok(None);
    }
    let resolved = doc.resolve(source.from)?;
    let list = resolved.parent();
    if !list.node_type.is_list() || list.child_count != 1 {
        return Ok(None);
    }

    let start = source.from - 1;
    let wrapper = doc
        .node_at(start)
        .cloned()
        .ok_or_else(|| DragError::StructuralConflict(format!("no list wrapper at {start}")))?;
    Ok(Some((start..source.to + 1, wrapper)))
}
