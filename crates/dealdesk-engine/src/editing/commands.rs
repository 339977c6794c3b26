use std::ops::Range;

use crate::editing::document::resolve_in;
use crate::editing::{DocumentError, Node};

/// Structural steps that make up an atomic edit
///
/// Every step addresses the document as it stands after the previous steps
/// of the same edit have been applied.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Remove exactly one whole node spanning `range`
    DeleteRange { range: Range<usize> },
    /// Insert `node` at the child boundary `at`
    InsertNode { at: usize, node: Node },
}

impl Cmd {
    /// Apply this step to a document root in place
    pub(crate) fn apply_to(&self, root: &mut Node) -> Result<(), DocumentError> {
        match self {
            Cmd::DeleteRange { range } => delete_node(root, range.clone()),
            Cmd::InsertNode { at, node } => insert_node(root, *at, node.clone()),
        }
    }
}

fn delete_node(root: &mut Node, range: Range<usize>) -> Result<(), DocumentError> {
    let size = root.content_size();
    if range.end > size {
        return Err(DocumentError::OutOfRange {
            pos: range.end,
            size,
        });
    }
    if range.start >= range.end {
        return Err(DocumentError::InvalidStep(format!(
            "empty delete range {range:?}"
        )));
    }

    let resolved = resolve_in(root, range.start)?;
    if !resolved.is_boundary() {
        return Err(DocumentError::InvalidStep(format!(
            "delete at {} splits inline content",
            range.start
        )));
    }
    let depth = resolved.depth();
    let path = resolved.path(depth);
    let index = resolved.parent().index;

    let covered = root
        .descendant(&path)
        .and_then(|parent| parent.child(index))
        .map(Node::node_size);
    if covered != Some(range.len()) {
        return Err(DocumentError::InvalidStep(format!(
            "delete range {range:?} does not cover exactly one node"
        )));
    }

    root.remove_at(&path, index)
        .map(|_| ())
        .ok_or_else(|| DocumentError::InvalidStep(format!("no node at {}", range.start)))
}

fn insert_node(root: &mut Node, at: usize, node: Node) -> Result<(), DocumentError> {
    let resolved = resolve_in(root, at)?;
    if !resolved.is_boundary() {
        return Err(DocumentError::InvalidStep(format!(
            "insert at {at} splits inline content"
        )));
    }
    let parent = resolved.parent();
    if !parent.node_type.allows_child(node.kind()) {
        return Err(DocumentError::InvalidStep(format!(
            "{} cannot contain {}",
            parent.node_type.name(),
            node.kind().name()
        )));
    }

    let depth = resolved.depth();
    let path = resolved.path(depth);
    if root.insert_at(&path, parent.index, node) {
        Ok(())
    } else {
        Err(DocumentError::InvalidStep(format!("cannot insert at {at}")))
    }
}
