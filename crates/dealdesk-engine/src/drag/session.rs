use uuid::Uuid;

use crate::drag::{DragError, Point};
use crate::editing::{Document, Node, NodeType};
use crate::host::EditorHost;

/// The node being dragged, addressed in the document version it was picked from
#[derive(Debug, Clone, PartialEq)]
pub struct DraggableNodeRef {
    pub node: Node,
    pub from: usize,
    pub to: usize,
    /// List type of the enclosing list, set only for list items
    pub parent_list_type: Option<NodeType>,
}

impl DraggableNodeRef {
    /// Pick up the node starting at boundary `from`
    pub fn from_position(doc: &Document, from: usize) -> Result<Self, DragError> {
        let resolved = doc.resolve(from)?;
        if !resolved.is_boundary() {
            return Err(DragError::StructuralConflict(format!(
                "position {from} is not a node boundary"
            )));
        }
        let node = doc
            .node_at(from)
            .filter(|node| !node.is_text())
            .ok_or_else(|| DragError::StructuralConflict(format!("no block starts at {from}")))?;
        if !node.kind().is_draggable() {
            return Err(DragError::StructuralConflict(format!(
                "{} cannot be dragged",
                node.kind().name()
            )));
        }

        let parent_list_type = (*node.kind() == NodeType::ListItem)
            .then(|| resolved.parent().node_type.clone())
            .filter(NodeType::is_list);

        Ok(Self {
            node: node.clone(),
            from,
            to: from + node.node_size(),
            parent_list_type,
        })
    }

    pub fn size(&self) -> usize {
        self.to - self.from
    }

    pub fn is_list_item(&self) -> bool {
        *self.node.kind() == NodeType::ListItem
    }
}

/// The single in-flight drag gesture of an editor surface
#[derive(Debug, Clone)]
pub struct DragSession {
    id: Uuid,
    source: DraggableNodeRef,
    pointer: Point,
    active: bool,
}

impl DragSession {
    pub fn new(source: DraggableNodeRef, pointer: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            source,
            pointer,
            active: true,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn source(&self) -> &DraggableNodeRef {
        &self.source
    }

    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Latest pointer sample wins
    pub fn track(&mut self, pointer: Point) {
        self.pointer = pointer;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

/// Ends a gesture: owns the taken session and releases the host's transient
/// visuals when dropped, whichever way the gesture finished
pub struct GestureGuard<'h, H: EditorHost> {
    host: &'h mut H,
    session: DragSession,
}

impl<'h, H: EditorHost> GestureGuard<'h, H> {
    pub fn new(host: &'h mut H, session: DragSession) -> Self {
        Self { host, session }
    }

    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }
}

impl<H: EditorHost> Drop for GestureGuard<'_, H> {
    fn drop(&mut self) {
        self.session.active = false;
        self.host.hide_drop_indicator();
        self.host.clear_ghost();
        log::debug!("Released drag session {}", self.session.id);
    }
}
