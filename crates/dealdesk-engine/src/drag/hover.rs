use std::time::{Duration, Instant};

use crate::drag::BlockHandle;

/// Tracks which block shows the drag affordance
///
/// Leaving every block does not hide the affordance immediately: a hide is
/// scheduled `grace` into the future so the pointer can travel from the text
/// to the affordance sitting in the margin. Reaching the affordance cancels
/// the pending hide.
#[derive(Debug, Clone)]
pub struct HoverTracker {
    grace: Duration,
    hovered: Option<BlockHandle>,
    on_affordance: bool,
    hide_at: Option<Instant>,
}

impl HoverTracker {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            hovered: None,
            on_affordance: false,
            hide_at: None,
        }
    }

    pub fn hovered(&self) -> Option<&BlockHandle> {
        self.hovered.as_ref()
    }

    pub fn hide_pending(&self) -> bool {
        self.hide_at.is_some()
    }

    /// Pointer moved over `block` (or over no block at all)
    pub fn pointer_moved(&mut self, block: Option<BlockHandle>, now: Instant) {
        match block {
            Some(block) => {
                self.hovered = Some(block);
                self.hide_at = None;
            }
            None if self.on_affordance => {}
            None => {
                if self.hovered.is_some() && self.hide_at.is_none() {
                    self.hide_at = Some(now + self.grace);
                }
            }
        }
    }

    pub fn enter_affordance(&mut self) {
        self.on_affordance = true;
        self.hide_at = None;
    }

    pub fn leave_affordance(&mut self, now: Instant) {
        self.on_affordance = false;
        if self.hovered.is_some() {
            self.hide_at = Some(now + self.grace);
        }
    }

    /// Run the pending hide if its deadline has passed; true when it hid
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.hide_at {
            Some(deadline) if now >= deadline => {
                self.clear();
                true
            }
            _ => false,
        }
    }

    /// Forget the hovered block (its range is stale after an edit)
    pub fn clear(&mut self) {
        self.hovered = None;
        self.hide_at = None;
    }
}
