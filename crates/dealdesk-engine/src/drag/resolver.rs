use crate::drag::{DragError, DraggableNodeRef, InvalidDrop};
use crate::editing::{Document, NodeType, ResolvedPos};

/// A drop position that passed every structural check
#[derive(Debug, Clone, PartialEq)]
pub struct DropTarget {
    /// Snapped block boundary
    pub pos: usize,
    /// Some ancestor of `pos` is a list
    pub inside_list: bool,
    /// Type of the node a drop at `pos` inserts into
    pub parent: NodeType,
}

/// Snap a raw position onto a block boundary
///
/// Positions inside a text-bearing block move to whichever of its two
/// boundaries is nearer (ties go to the start, so an empty block snaps to
/// its start). Positions inside a list item then always move to just after
/// that item.
pub fn snap_to_boundary(doc: &Document, raw: usize) -> Result<ResolvedPos, DragError> {
    let resolved = doc.resolve(raw)?;
    let depth = resolved.depth();
    let frame = resolved.parent();

    let pos = if frame.node_type.is_textblock() {
        let offset = frame.parent_offset;
        let nearer = if offset <= frame.content_size - offset {
            resolved.before(depth)
        } else {
            resolved.after(depth)
        };
        nearer.unwrap_or(raw)
    } else {
        raw
    };

    let mut resolved = doc.resolve(pos)?;
    if resolved.parent().node_type == NodeType::ListItem
        && let Some(after) = resolved.after(resolved.depth())
    {
        resolved = doc.resolve(after)?;
    }

    let frame = resolved.parent();
    if frame.node_type.is_textblock()
        && frame.parent_offset != 0
        && frame.parent_offset != frame.content_size
    {
        return Err(InvalidDrop::MidText.into());
    }
    Ok(resolved)
}

/// Resolve a raw pointer position into a drop target for `source`
///
/// Rejects targets inside the source and the two positions directly around
/// it, where a move would change nothing. A list item leaving every list is
/// the exception: it gains a fresh wrapper, so its neighbours are real moves.
pub fn resolve_drop(
    doc: &Document,
    raw: usize,
    source: &DraggableNodeRef,
) -> Result<DropTarget, DragError> {
    let snapped = snap_to_boundary(doc, raw)?;
    let pos = snapped.pos;

    if (source.from..=source.to).contains(&pos) {
        return Err(InvalidDrop::InsideSource.into());
    }

    let inside_list = snapped.inside_list();
    let leaves_lists = source.parent_list_type.is_some() && !inside_list;
    if !leaves_lists && (pos + 1 == source.from || pos == source.to + 1) {
        return Err(InvalidDrop::AdjacentNoOp.into());
    }

    log::trace!("Drop at {raw} resolved to {pos} (inside list: {inside_list})");
    Ok(DropTarget {
        pos,
        inside_list,
        parent: snapped.parent().node_type.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::Node;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn paragraphs(texts: &[&str]) -> Document {
        Document::from_blocks(texts.iter().map(|t| Node::paragraph(t)).collect()).unwrap()
    }

    fn bullet_xy() -> Document {
        Document::from_blocks(vec![Node::element(
            NodeType::BulletList,
            vec![Node::list_item("x", vec![]), Node::list_item("y", vec![])],
        )])
        .unwrap()
    }

    fn pick(doc: &Document, from: usize) -> DraggableNodeRef {
        DraggableNodeRef::from_position(doc, from).unwrap()
    }

    // "hello" sits at 6..13 with its text at 7..12
    #[rstest]
    #[case(7, 6)]
    #[case(8, 6)]
    #[case(9, 6)]
    #[case(10, 13)]
    #[case(12, 13)]
    #[case(6, 6)]
    #[case(13, 13)]
    fn test_snap_to_nearer_boundary(#[case] raw: usize, #[case] expected: usize) {
        let doc = paragraphs(&["a", "x", "hello"]);
        assert_eq!(snap_to_boundary(&doc, raw).unwrap().pos, expected);
    }

    #[rstest]
    #[case(2, 6)]
    #[case(3, 6)]
    #[case(5, 6)]
    #[case(8, 11)]
    #[case(9, 11)]
    #[case(6, 6)]
    #[case(12, 12)]
    fn test_list_item_snaps_after_item(#[case] raw: usize, #[case] expected: usize) {
        let doc = bullet_xy();
        let snapped = snap_to_boundary(&doc, raw).unwrap();

        assert_eq!(snapped.pos, expected);
        assert_eq!(snapped.inside_list(), expected != 12);
    }

    #[test]
    fn test_empty_paragraph_snaps_to_its_start() {
        let doc = paragraphs(&["a", ""]);
        let snapped = snap_to_boundary(&doc, 4).unwrap();

        assert_eq!(snapped.pos, 3);
        assert_eq!(snapped.parent().node_type, NodeType::Doc);
    }

    #[test]
    fn test_empty_paragraph_in_list_item_snaps_after_item() {
        let doc = Document::from_blocks(vec![Node::element(
            NodeType::BulletList,
            vec![Node::list_item("", vec![])],
        )])
        .unwrap();
        // list 0..6, item 1..5, empty paragraph 2..4
        let snapped = snap_to_boundary(&doc, 3).unwrap();

        assert_eq!(snapped.pos, 5);
        assert_eq!(snapped.parent().node_type, NodeType::BulletList);
    }

    #[test]
    fn test_out_of_range() {
        let doc = paragraphs(&["a"]);
        assert!(matches!(
            snap_to_boundary(&doc, 4),
            Err(DragError::Document(_))
        ));
    }

    // a 0..3, b 3..6, c 6..9; dragging b
    #[rstest]
    #[case(0, None)]
    #[case(1, None)]
    #[case(2, Some(InvalidDrop::InsideSource))]
    #[case(3, Some(InvalidDrop::InsideSource))]
    #[case(5, Some(InvalidDrop::InsideSource))]
    #[case(7, Some(InvalidDrop::InsideSource))]
    #[case(8, None)]
    #[case(9, None)]
    fn test_top_level_targets(#[case] raw: usize, #[case] rejected: Option<InvalidDrop>) {
        let doc = paragraphs(&["a", "b", "c"]);
        let source = pick(&doc, 3);

        match (resolve_drop(&doc, raw, &source), rejected) {
            (Ok(_), None) => {}
            (Err(DragError::InvalidDropTarget(reason)), Some(expected)) => {
                assert_eq!(reason, expected)
            }
            (other, _) => panic!("raw {raw}: unexpected {other:?}"),
        }
    }

    #[test]
    fn test_adjacent_positions_are_no_ops() {
        // Nested so that from-1 and to+1 are real boundaries
        let doc = Document::from_blocks(vec![
            Node::element(NodeType::Blockquote, vec![Node::paragraph("a")]),
            Node::paragraph("b"),
        ])
        .unwrap();
        // blockquote 0..5, paragraph a 1..4, paragraph b 5..8
        let source = pick(&doc, 1);

        assert!(matches!(
            resolve_drop(&doc, 0, &source),
            Err(DragError::InvalidDropTarget(InvalidDrop::AdjacentNoOp))
        ));
        assert!(matches!(
            resolve_drop(&doc, 5, &source),
            Err(DragError::InvalidDropTarget(InvalidDrop::AdjacentNoOp))
        ));
        assert_eq!(resolve_drop(&doc, 8, &source).unwrap().pos, 8);
    }

    #[test]
    fn test_list_item_leaving_lists_may_drop_next_to_itself() {
        let doc = bullet_xy();
        let y = pick(&doc, 6);

        let target = resolve_drop(&doc, 12, &y).unwrap();
        assert_eq!(target.pos, 12);
        assert!(!target.inside_list);
        assert_eq!(target.parent, NodeType::Doc);

        let x = pick(&doc, 1);
        assert_eq!(resolve_drop(&doc, 0, &x).unwrap().pos, 0);
    }

    #[test]
    fn test_list_item_inside_list_neighbours_are_no_ops() {
        let doc = bullet_xy();
        let x = pick(&doc, 1);

        // Mid "y" snaps to after y, which is a real move
        let target = resolve_drop(&doc, 9, &x).unwrap();
        assert_eq!(target.pos, 11);
        assert!(target.inside_list);
        assert_eq!(target.parent, NodeType::BulletList);

        // Inside x itself
        assert!(matches!(
            resolve_drop(&doc, 3, &x),
            Err(DragError::InvalidDropTarget(InvalidDrop::InsideSource))
        ));
    }

    #[test]
    fn test_drop_into_itself() {
        let doc = bullet_xy();
        let list = pick(&doc, 0);

        for raw in 0..=12 {
            let result = resolve_drop(&doc, raw, &list);
            assert!(
                matches!(
                    result,
                    Err(DragError::InvalidDropTarget(InvalidDrop::InsideSource))
                ),
                "raw {raw}"
            );
        }
    }
}
