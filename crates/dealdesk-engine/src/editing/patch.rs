/// Result of applying an atomic edit that changed the document
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Ranges of inserted content, in post-edit positions
    pub changed: Vec<std::ops::Range<usize>>,
    /// Range of the last inserted node (empty at the edit point for pure deletions)
    pub new_selection: std::ops::Range<usize>,
    pub version: u64,
}
