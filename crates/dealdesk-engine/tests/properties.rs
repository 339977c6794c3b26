//! Invariants checked exhaustively over every source and every raw position
//! of a handful of representative documents

mod common;

use common::{bullet, has_empty_list, sample_documents};
use dealdesk_engine::drag::{build_move, move_block, resolve_drop, snap_to_boundary};
use dealdesk_engine::{Document, DragError, DraggableNodeRef, InvalidDrop, Node};
use pretty_assertions::assert_eq;

fn sources(doc: &Document) -> Vec<DraggableNodeRef> {
    (0..=doc.size())
        .filter_map(|pos| DraggableNodeRef::from_position(doc, pos).ok())
        .collect()
}

#[test]
fn applied_moves_preserve_size_and_validity() {
    for doc in sample_documents() {
        for source in sources(&doc) {
            for raw in 0..=doc.size() {
                let Ok(plan) = build_move(&doc, &source, raw) else {
                    continue;
                };
                let mut moved = doc.clone();
                let patch = moved
                    .apply(plan.steps.clone())
                    .unwrap_or_else(|e| panic!("{} {source:?} -> {raw}: {e}", doc.outline()));

                assert!(patch.is_some(), "{} {source:?} -> {raw}", doc.outline());
                assert_eq!(
                    moved.size() as isize,
                    doc.size() as isize + plan.size_delta(),
                    "{} {source:?} -> {raw}",
                    doc.outline()
                );
                assert!(Document::new(moved.root().clone()).is_ok());
                assert!(!has_empty_list(moved.root()), "{}", moved.outline());
            }
        }
    }
}

#[test]
fn rejected_moves_leave_the_document_untouched() {
    for doc in sample_documents() {
        for source in sources(&doc) {
            for raw in 0..=doc.size() + 1 {
                let mut attempt = doc.clone();
                if move_block(&mut attempt, &source, raw).is_err() {
                    assert_eq!(attempt, doc);
                    assert_eq!(attempt.version(), 0);
                }
            }
        }
    }
}

#[test]
fn source_and_neighbours_are_always_rejected() {
    for doc in sample_documents() {
        for source in sources(&doc) {
            for raw in 0..=doc.size() {
                let Ok(target) = resolve_drop(&doc, raw, &source) else {
                    continue;
                };
                let leaves_lists = source.parent_list_type.is_some() && !target.inside_list;
                let touching = target.pos + 1 >= source.from && target.pos <= source.to + 1;

                assert!(
                    !touching || leaves_lists,
                    "{} {source:?}: {raw} resolved to {}",
                    doc.outline(),
                    target.pos
                );
            }

            // Inside a list item both ends snap past the item instead
            for pos in [source.from, source.to] {
                if snap_to_boundary(&doc, pos).map(|s| s.pos).ok() != Some(pos) {
                    continue;
                }
                assert!(matches!(
                    resolve_drop(&doc, pos, &source),
                    Err(DragError::InvalidDropTarget(InvalidDrop::InsideSource))
                ));
            }
        }
    }
}

#[test]
fn rejection_is_idempotent() {
    for doc in sample_documents() {
        for source in sources(&doc) {
            for raw in 0..=doc.size() {
                let first = resolve_drop(&doc, raw, &source).map_err(|e| e.to_string());
                let second = resolve_drop(&doc, raw, &source).map_err(|e| e.to_string());
                assert_eq!(first, second);
            }
        }
    }
}

#[test]
fn snapped_positions_never_split_text() {
    for doc in sample_documents() {
        for raw in 0..=doc.size() {
            let Ok(snapped) = snap_to_boundary(&doc, raw) else {
                continue;
            };
            let frame = snapped.parent();
            let mid_text = frame.node_type.is_textblock()
                && frame.parent_offset != 0
                && frame.parent_offset != frame.content_size;

            assert!(!mid_text, "{} {raw} -> {}", doc.outline(), snapped.pos);
            // Snapping an already snapped position changes nothing
            assert_eq!(
                snap_to_boundary(&doc, snapped.pos).map(|r| r.pos).ok(),
                Some(snapped.pos)
            );
        }
    }
}

#[test]
fn list_item_leaving_every_list_gets_its_old_list_type() {
    for doc in sample_documents() {
        for source in sources(&doc) {
            let Some(list_type) = source.parent_list_type.clone() else {
                continue;
            };
            for raw in 0..=doc.size() {
                let Ok(plan) = build_move(&doc, &source, raw) else {
                    continue;
                };
                if plan.target.inside_list {
                    continue;
                }

                assert!(plan.rewrapped);
                let mut moved = doc.clone();
                let patch = moved.apply(plan.steps).unwrap().unwrap();
                let landed = moved.node_at(patch.new_selection.start).unwrap();

                assert_eq!(landed.kind(), &list_type);
                assert_eq!(landed.child_count(), 1);
                assert_eq!(landed.children()[0], source.node);
            }
        }
    }
}

#[test]
fn moving_back_restores_the_original() {
    for doc in sample_documents() {
        for source in sources(&doc) {
            // Top-level blocks only: their old boundary survives the move
            if doc.resolve(source.from).unwrap().depth() != 0 {
                continue;
            }
            for raw in 0..=doc.size() {
                let Ok(plan) = build_move(&doc, &source, raw) else {
                    continue;
                };
                let mut moved = doc.clone();
                let patch = moved.apply(plan.steps.clone()).unwrap().unwrap();

                let back = DraggableNodeRef::from_position(&moved, patch.new_selection.start)
                    .unwrap();
                let home = if plan.target.pos > source.to {
                    source.from
                } else {
                    source.to
                };
                move_block(&mut moved, &back, home).unwrap();

                assert_eq!(moved, doc, "{source:?} -> {raw}");
            }
        }
    }
}

#[test]
fn list_item_round_trip_through_rewrap() {
    let original = Document::from_blocks(vec![bullet(&["x", "y"]), Node::paragraph("p")]).unwrap();
    let mut doc = original.clone();

    let y = DraggableNodeRef::from_position(&doc, 6).unwrap();
    move_block(&mut doc, &y, 12).unwrap();
    assert_eq!(doc.size(), original.size() + 2);

    // [bulletList[x] 0..7, bulletList[y] 7..14, p]; put y back after x
    let y = DraggableNodeRef::from_position(&doc, 8).unwrap();
    move_block(&mut doc, &y, 6).unwrap();

    assert_eq!(doc, original);
}
