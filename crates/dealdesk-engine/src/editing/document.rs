use std::ops::Range;

use crate::editing::json::JsonNode;
use crate::editing::{AncestorFrame, Cmd, Node, NodeType, Patch, ResolvedPos};

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Position {pos} is outside the document (size {size})")]
    OutOfRange { pos: usize, size: usize },
    #[error("Invalid step: {0}")]
    InvalidStep(String),
    #[error("Schema violation: {parent} cannot contain {child}")]
    Schema { parent: String, child: String },
    #[error("Unknown node type with content: {0}")]
    UnknownNodeType(String),
    #[error("Root node must be a doc, found {0}")]
    NotADocument(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Offset-addressed block document
///
/// The document owns a tree of [`Node`]s rooted at a `doc` node. Every
/// structural query goes through integer positions:
///
/// - position `0` sits before the first block, `size()` after the last
/// - a container occupies `content_size + 2` positions (its open and close
///   tokens), text occupies one position per character, atoms occupy one
/// - [`Document::resolve`] turns a position into its ancestor chain in
///   O(depth) sibling scans
///
/// The tree is only ever mutated through [`Document::apply`], which runs a
/// list of [`Cmd`]s against a scratch copy and swaps it in only when every
/// step succeeded. Positions are meaningful for one version of the
/// document; anything computed before an edit must be recomputed after it.
#[derive(Debug, Clone)]
pub struct Document {
    root: Node,
    /// Range of the most recently moved block
    selection: Range<usize>,
    /// Incremented once per emitted edit
    version: u64,
}

impl Document {
    /// Wrap a `doc` root after checking it against the block schema
    pub fn new(root: Node) -> Result<Self, DocumentError> {
        if *root.kind() != NodeType::Doc {
            return Err(DocumentError::NotADocument(root.kind().name().to_string()));
        }
        validate(&root)?;
        Ok(Self {
            root,
            selection: 0..0,
            version: 0,
        })
    }

    pub fn from_blocks(blocks: Vec<Node>) -> Result<Self, DocumentError> {
        Self::new(Node::doc(blocks))
    }

    /// Parse the editor's JSON node tree (`{"type": "doc", "content": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let raw: JsonNode = serde_json::from_str(json)?;
        Self::new(Node::try_from(raw)?)
    }

    /// Serialize back to the editor's JSON node tree
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string(&JsonNode::from(&self.root))?)
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Top-level blocks
    pub fn blocks(&self) -> &[Node] {
        self.root.children()
    }

    /// Number of addressable positions after position 0
    pub fn size(&self) -> usize {
        self.root.content_size()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    pub fn resolve(&self, pos: usize) -> Result<ResolvedPos, DocumentError> {
        resolve_in(&self.root, pos)
    }

    /// Ancestor chain of `pos`, outermost (the document) first
    pub fn ancestor_chain(&self, pos: usize) -> Result<Vec<AncestorFrame>, DocumentError> {
        Ok(self.resolve(pos)?.into_frames())
    }

    /// The node starting at `pos` (or the text node containing it)
    pub fn node_at(&self, pos: usize) -> Option<&Node> {
        let mut node = &self.root;
        let mut pos = pos;
        loop {
            if pos > node.content_size() {
                return None;
            }
            let (index, offset) = node.find_index(pos);
            let child = node.child(index)?;
            if offset == pos || child.is_text() {
                return Some(child);
            }
            pos -= offset + 1;
            node = child;
        }
    }

    /// Apply `cmds` as one indivisible edit
    ///
    /// Either every step applies or the document is left untouched. An edit
    /// that leaves the tree structurally identical is not emitted: the
    /// version stays the same and `Ok(None)` is returned.
    pub fn apply(&mut self, cmds: Vec<Cmd>) -> Result<Option<Patch>, DocumentError> {
        let mut next = self.root.clone();
        let mut changed: Vec<Range<usize>> = Vec::new();
        let mut last_delete = None;

        for cmd in &cmds {
            cmd.apply_to(&mut next)?;
            match cmd {
                Cmd::InsertNode { at, node } => {
                    let len = node.node_size();
                    for range in changed.iter_mut() {
                        *range = map_through_insert(range, *at, len);
                    }
                    changed.push(*at..*at + len);
                }
                Cmd::DeleteRange { range: deleted } => {
                    for range in changed.iter_mut() {
                        *range = map_through_delete(range, deleted);
                    }
                    last_delete = Some(deleted.start);
                }
            }
        }

        if next == self.root {
            return Ok(None);
        }

        let new_selection = changed
            .last()
            .cloned()
            .or_else(|| last_delete.map(|at| at..at))
            .unwrap_or(0..0);

        self.root = next;
        self.selection = new_selection.clone();
        self.version += 1;

        Ok(Some(Patch {
            changed,
            new_selection,
            version: self.version,
        }))
    }

    /// One-line structural rendering of the top-level blocks
    ///
    /// `[paragraph("b"), bulletList[listItem[paragraph("x")]]]`
    pub fn outline(&self) -> String {
        let mut out = String::from("[");
        for (i, block) in self.blocks().iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            block.write_outline(&mut out);
        }
        out.push(']');
        out
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // Structural equality; bookkeeping (version, selection) is ignored
        self.root == other.root
    }
}

/// Resolve `pos` against an arbitrary root (used on scratch copies during edits)
pub(crate) fn resolve_in(root: &Node, pos: usize) -> Result<ResolvedPos, DocumentError> {
    let size = root.content_size();
    if pos > size {
        return Err(DocumentError::OutOfRange { pos, size });
    }

    let mut frames = Vec::new();
    let mut node = root;
    let mut start = 0;
    let mut parent_offset = pos;

    loop {
        let (index, offset) = node.find_index(parent_offset);
        let rem = parent_offset - offset;
        frames.push(AncestorFrame {
            node_type: node.kind().clone(),
            start_offset: start,
            end_offset: start + node.content_size(),
            parent_offset,
            content_size: node.content_size(),
            index,
            child_count: node.child_count(),
        });
        if rem == 0 {
            return Ok(ResolvedPos::new(pos, frames, 0));
        }
        let Some(child) = node.child(index) else {
            return Ok(ResolvedPos::new(pos, frames, rem));
        };
        if child.is_text() || child.kind().is_atom() {
            return Ok(ResolvedPos::new(pos, frames, rem));
        }
        parent_offset = rem - 1;
        start += offset + 1;
        node = child;
    }
}

fn validate(node: &Node) -> Result<(), DocumentError> {
    for child in node.children() {
        if !node.kind().allows_child(child.kind()) {
            return Err(DocumentError::Schema {
                parent: node.kind().name().to_string(),
                child: child.kind().name().to_string(),
            });
        }
        validate(child)?;
    }
    Ok(())
}

fn map_through_insert(range: &Range<usize>, at: usize, len: usize) -> Range<usize> {
    let map = |p: usize| if p >= at { p + len } else { p };
    if range.start >= at {
        map(range.start)..map(range.end)
    } else {
        range.start..map(range.end)
    }
}

fn map_through_delete(range: &Range<usize>, deleted: &Range<usize>) -> Range<usize> {
    let map = |p: usize| {
        if p <= deleted.start {
            p
        } else if p >= deleted.end {
            p - deleted.len()
        } else {
            deleted.start
        }
    };
    map(range.start)..map(range.end)
}
