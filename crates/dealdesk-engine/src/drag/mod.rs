/*!
 * # Block Drag Module
 *
 * Lets a user grab a block (paragraph, heading, list item, list) and drop
 * it somewhere else in the same document without ever producing an invalid
 * tree.
 *
 * ## Pipeline
 *
 * - **`hit_test`**: pointer coordinates to the block under the pointer
 *   (vertical containment only) and to the affordance anchor
 * - **`hover`**: affordance visibility with a grace period on leave
 * - **`resolver`**: raw position to a snapped block boundary, or a reason
 *   the position cannot take a drop
 * - **`transaction`**: source plus target to one atomic delete/insert edit,
 *   re-wrapping list items that leave every list
 * - **`session`**: the single in-flight gesture and its scoped cleanup
 * - **`engine`**: `BlockDragEngine`, the host-facing event API
 *
 * ## State Machine
 *
 * `Idle -> Dragging -> Idle`. A drop either applies the whole edit or
 * changes nothing; either way the session, ghost and indicator are released.
 */

pub mod engine;
pub mod error;
pub mod hover;
pub mod resolver;
pub mod session;
pub mod transaction;

pub use engine::{BlockDragEngine, DropFeedback, DropOutcome};
pub use error::{DragError, InvalidDrop};
pub use hit_test::{
    BlockHandle, Point, Rect, affordance_anchor, block_at, boundary_offset, enclosing_list, grip_at,
};
pub use hover::HoverTracker;
pub use resolver::{DropTarget, resolve_drop, snap_to_boundary};
pub use session::{DragSession, DraggableNodeRef, GestureGuard};
pub use transaction::{MovePlan, build_move, move_block};
