use crate::editing::DocumentError;

/// Why a candidate drop position cannot be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDrop {
    /// The position lies within the dragged node's own range
    InsideSource,
    /// Dropping here would leave the document as it is
    AdjacentNoOp,
    /// The position is strictly inside a text-bearing block
    MidText,
    /// The pointer is not over any document position
    NoPosition,
}

impl std::fmt::Display for InvalidDrop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidDrop::InsideSource => write!(f, "target lies inside the dragged node"),
            InvalidDrop::AdjacentNoOp => write!(f, "target is adjacent to the dragged node"),
            InvalidDrop::MidText => write!(f, "target splits a text block"),
            InvalidDrop::NoPosition => write!(f, "pointer is outside the document"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DragError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error("Invalid drop target: {0}")]
    InvalidDropTarget(InvalidDrop),
    #[error("Structural conflict: {0}")]
    StructuralConflict(String),
}

impl DragError {
    pub fn is_invalid_target(&self) -> bool {
        matches!(self, DragError::InvalidDropTarget(_))
    }
}

impl From<InvalidDrop> for DragError {
    fn from(reason: InvalidDrop) -> Self {
        DragError::InvalidDropTarget(reason)
    }
}
