use serde_json::{Map, Value};

/// Node types understood by the block editors
///
/// Atoms (`HardBreak`, `HorizontalRule`, `Atom`) occupy exactly one position.
/// `Text` occupies one position per character. Everything else is a container
/// whose size is its content size plus its open and close tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// Document root (never draggable, no open/close tokens of its own)
    Doc,
    Paragraph,
    Heading { level: u8 },
    ListItem,
    BulletList,
    OrderedList,
    TaskList,
    Blockquote,
    CodeBlock,
    HorizontalRule,
    HardBreak,
    Text,
    /// Leaf content owned by another collaborator (variables, mentions, images)
    Atom(String),
}

impl NodeType {
    /// Name used in the serialized node tree
    pub fn name(&self) -> &str {
        match self {
            NodeType::Doc => "doc",
            NodeType::Paragraph => "paragraph",
            NodeType::Heading { .. } => "heading",
            NodeType::ListItem => "listItem",
            NodeType::BulletList => "bulletList",
            NodeType::OrderedList => "orderedList",
            NodeType::TaskList => "taskList",
            NodeType::Blockquote => "blockquote",
            NodeType::CodeBlock => "codeBlock",
            NodeType::HorizontalRule => "horizontalRule",
            NodeType::HardBreak => "hardBreak",
            NodeType::Text => "text",
            NodeType::Atom(name) => name,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(
            self,
            NodeType::BulletList | NodeType::OrderedList | NodeType::TaskList
        )
    }

    /// Blocks whose content is inline text
    pub fn is_textblock(&self) -> bool {
        matches!(
            self,
            NodeType::Paragraph | NodeType::Heading { .. } | NodeType::CodeBlock
        )
    }

    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            NodeType::HorizontalRule | NodeType::HardBreak | NodeType::Atom(_)
        )
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, NodeType::Text | NodeType::HardBreak | NodeType::Atom(_))
    }

    /// Block-level nodes that may sit directly in the document, a blockquote or a list item
    pub fn is_block(&self) -> bool {
        self.is_textblock()
            || self.is_list()
            || matches!(self, NodeType::Blockquote | NodeType::HorizontalRule)
    }

    /// Structural blocks a user can grab and move
    pub fn is_draggable(&self) -> bool {
        self.is_block() || *self == NodeType::ListItem
    }

    /// Schema check: may a node of type `child` be a direct child of `self`?
    pub fn allows_child(&self, child: &NodeType) -> bool {
        match self {
            NodeType::Doc | NodeType::Blockquote | NodeType::ListItem => {
                child.is_block() || matches!(child, NodeType::Atom(_))
            }
            NodeType::BulletList | NodeType::OrderedList | NodeType::TaskList => {
                *child == NodeType::ListItem
            }
            NodeType::Paragraph | NodeType::Heading { .. } | NodeType::CodeBlock => {
                child.is_inline()
            }
            NodeType::HorizontalRule | NodeType::HardBreak | NodeType::Text | NodeType::Atom(_) => {
                false
            }
        }
    }
}

/// A node in the document tree
///
/// Sizes are cached on construction and refreshed along the edited path, so
/// position arithmetic never walks a whole subtree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    kind: NodeType,
    content: Vec<Node>,
    text: String,
    attrs: Option<Map<String, Value>>,
    marks: Vec<Value>,
    content_size: usize,
}

impl Node {
    /// Create a container (or atom when `content` is empty and the type is an atom)
    pub fn element(kind: NodeType, content: Vec<Node>) -> Self {
        let content_size = content.iter().map(Node::node_size).sum();
        Self {
            kind,
            content,
            text: String::new(),
            attrs: None,
            marks: Vec::new(),
            content_size,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        let text = text.into();
        let content_size = text.chars().count();
        Self {
            kind: NodeType::Text,
            content: Vec::new(),
            text,
            attrs: None,
            marks: Vec::new(),
            content_size,
        }
    }

    pub fn doc(content: Vec<Node>) -> Self {
        Self::element(NodeType::Doc, content)
    }

    /// Paragraph holding a single text run (empty text gives an empty paragraph)
    pub fn paragraph(text: &str) -> Self {
        Self::textblock(NodeType::Paragraph, text)
    }

    pub fn heading(level: u8, text: &str) -> Self {
        Self::textblock(NodeType::Heading { level }, text)
    }

    /// List item wrapping one paragraph, plus any nested lists
    pub fn list_item(text: &str, nested: Vec<Node>) -> Self {
        let mut content = vec![Self::paragraph(text)];
        content.extend(nested);
        Self::element(NodeType::ListItem, content)
    }

    pub fn textblock(kind: NodeType, text: &str) -> Self {
        let content = if text.is_empty() {
            Vec::new()
        } else {
            vec![Self::text(text)]
        };
        Self::element(kind, content)
    }

    pub fn with_attrs(mut self, attrs: Map<String, Value>) -> Self {
        self.attrs = Some(attrs);
        self
    }

    pub fn with_marks(mut self, marks: Vec<Value>) -> Self {
        self.marks = marks;
        self
    }

    pub fn kind(&self) -> &NodeType {
        &self.kind
    }

    pub fn children(&self) -> &[Node] {
        &self.content
    }

    pub fn child(&self, index: usize) -> Option<&Node> {
        self.content.get(index)
    }

    pub fn child_count(&self) -> usize {
        self.content.len()
    }

    pub fn attrs(&self) -> Option<&Map<String, Value>> {
        self.attrs.as_ref()
    }

    pub fn marks(&self) -> &[Value] {
        &self.marks
    }

    /// Raw text of a text node (empty for every other type)
    pub fn text_str(&self) -> &str {
        &self.text
    }

    pub fn is_text(&self) -> bool {
        self.kind == NodeType::Text
    }

    /// Size of everything strictly between this node's open and close tokens
    pub fn content_size(&self) -> usize {
        self.content_size
    }

    /// Number of positions this node occupies inside its parent
    pub fn node_size(&self) -> usize {
        if self.is_text() {
            self.content_size
        } else if self.kind.is_atom() {
            1
        } else {
            self.content_size + 2
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self) -> String {
        if self.is_text() {
            return self.text.clone();
        }
        self.content.iter().map(Node::text_content).collect()
    }

    /// Locate the child boundary for an offset into this node's content
    ///
    /// Returns `(index, offset)`: the index of the child the offset falls in
    /// (or after, when it sits exactly on a boundary) and that child's start
    /// offset. Callers guarantee `pos <= content_size`.
    pub(crate) fn find_index(&self, pos: usize) -> (usize, usize) {
        if pos == 0 {
            return (0, 0);
        }
        if pos == self.content_size {
            return (self.content.len(), pos);
        }
        let mut cur = 0;
        for (i, child) in self.content.iter().enumerate() {
            let end = cur + child.node_size();
            if end >= pos {
                return if end == pos { (i + 1, end) } else { (i, cur) };
            }
            cur = end;
        }
        (self.content.len(), cur)
    }

    pub(crate) fn descendant(&self, path: &[usize]) -> Option<&Node> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.content.get(*first)?.descendant(rest),
        }
    }

    /// Insert `node` at child `index` of the descendant at `path`
    pub(crate) fn insert_at(&mut self, path: &[usize], index: usize, node: Node) -> bool {
        let inserted = match path.split_first() {
            None if index <= self.content.len() => {
                self.content.insert(index, node);
                true
            }
            None => false,
            Some((first, rest)) => match self.content.get_mut(*first) {
                Some(child) => child.insert_at(rest, index, node),
                None => false,
            },
        };
        if inserted {
            self.refresh_size();
        }
        inserted
    }

    /// Remove child `index` of the descendant at `path`
    pub(crate) fn remove_at(&mut self, path: &[usize], index: usize) -> Option<Node> {
        let removed = match path.split_first() {
            None if index < self.content.len() => Some(self.content.remove(index)),
            None => None,
            Some((first, rest)) => self.content.get_mut(*first)?.remove_at(rest, index),
        };
        if removed.is_some() {
            self.refresh_size();
        }
        removed
    }

    fn refresh_size(&mut self) {
        self.content_size = self.content.iter().map(Node::node_size).sum();
    }

    /// Compact structural rendering, e.g. `bulletList[listItem[paragraph("x")]]`
    pub(crate) fn write_outline(&self, out: &mut String) {
        match &self.kind {
            NodeType::Text => {
                out.push_str(&format!("{:?}", self.text));
                return;
            }
            NodeType::Heading { level } => out.push_str(&format!("heading{level}")),
            kind => out.push_str(kind.name()),
        }
        if self.kind.is_textblock() {
            out.push('(');
            out.push_str(&format!("{:?}", self.text_content()));
            out.push(')');
        } else if !self.content.is_empty() {
            out.push('[');
            for (i, child) in self.content.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                child.write_outline(out);
            }
            out.push(']');
        }
    }
}
