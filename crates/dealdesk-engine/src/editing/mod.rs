/*!
 * # Editing Core Module
 *
 * The block document that the drag subsystem reorders, and the only way to
 * change it.
 *
 * ## Architecture Overview
 *
 * ### 1. Offset Addressing
 * - The document is a tree of typed **`Node`**s under a single `doc` root
 * - Every location is an integer position: containers occupy their content
 *   size plus an open and a close token, text one position per character,
 *   atoms exactly one
 * - **`ResolvedPos`** exposes the ancestor chain of a position (outermost
 *   first) with each ancestor's offsets, child index and content size
 *
 * ### 2. Command-Based Editing
 * - Structural edits are lists of **Commands** (`Cmd` enum): whole-node
 *   deletes and inserts at child boundaries
 * - `Document::apply` runs the list against a scratch copy and commits it
 *   only when every step succeeded, so a failed edit leaves no trace
 * - Successful edits return a **`Patch`** and bump the document version
 *
 * ### 3. Editor JSON
 * - Documents load from and save to the editor's JSON node tree
 * - Attributes and marks are carried through opaquely; unknown leaf types
 *   become one-position atoms
 *
 * ## Usage Pattern
 *
 * ```rust
 * use dealdesk_engine::editing::*;
 *
 * let mut doc = Document::from_blocks(vec![
 *     Node::paragraph("a"),
 *     Node::paragraph("b"),
 * ])
 * .unwrap();
 *
 * let patch = doc
 *     .apply(vec![
 *         Cmd::DeleteRange { range: 0..3 },
 *         Cmd::InsertNode { at: 3, node: Node::paragraph("a") },
 *     ])
 *     .unwrap();
 *
 * assert!(patch.is_some());
 * assert_eq!(doc.outline(), r#"[paragraph("b"), paragraph("a")]"#);
 * ```
 */

// Module exports
pub mod commands;
pub mod document;
mod json;
pub mod node;
pub mod patch;
pub mod resolve;

// Public API re-exports
pub use commands::Cmd;
pub use document::{Document, DocumentError};
pub use node::{Node, NodeType};
pub use patch::Patch;
pub use resolve::{AncestorFrame, ResolvedPos};
