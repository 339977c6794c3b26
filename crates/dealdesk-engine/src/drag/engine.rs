use std::time::Instant;

use dealdesk_config::DragSettings;

use crate::drag::{
    BlockHandle, DragError, DragSession, DraggableNodeRef, GestureGuard, HoverTracker,
    InvalidDrop, MovePlan, Point, affordance_anchor, boundary_offset, build_move, enclosing_list,
    grip_at,
};
use crate::host::EditorHost;

/// What the host should show while the pointer moves during a drag
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropFeedback {
    pub valid: bool,
    /// Snapped boundary a drop would land on
    pub target: Option<usize>,
    /// Vertical offset for the drop indicator
    pub indicator_offset: Option<f32>,
}

impl DropFeedback {
    pub fn invalid() -> Self {
        Self::default()
    }
}

/// How a drop gesture ended
#[derive(Debug)]
pub enum DropOutcome {
    /// The edit was applied
    Moved(MovePlan),
    /// The edit was valid but the host did not apply it
    Unchanged,
    /// The target failed validation; nothing changed
    Rejected(DragError),
    /// The gesture was abandoned (e.g. released over another editor)
    Cancelled,
    /// There was no drag in progress
    NoSession,
}

impl DropOutcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, DropOutcome::Moved(_))
    }
}

/// Drag-to-reorder for one editor surface
///
/// Owns the host adapter, the hover state and at most one [`DragSession`].
/// Every pointer event recomputes its result from the host's current
/// document; nothing position-based survives an edit.
pub struct BlockDragEngine<H: EditorHost> {
    host: H,
    settings: DragSettings,
    hover: HoverTracker,
    session: Option<DragSession>,
}

impl<H: EditorHost> BlockDragEngine<H> {
    pub fn new(host: H, settings: DragSettings) -> Self {
        let hover = HoverTracker::new(settings.hover_grace());
        Self {
            host,
            settings,
            hover,
            session: None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn settings(&self) -> &DragSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    // ============ Hover affordance ============

    /// Pointer moved while no button is held; returns the affordance anchor
    pub fn on_hover(&mut self, point: Point, now: Instant) -> Option<Point> {
        let block = self.host.element_at(point.y);
        self.hover.pointer_moved(block, now);
        self.affordance()
    }

    pub fn on_affordance_enter(&mut self) {
        self.hover.enter_affordance();
    }

    pub fn on_affordance_leave(&mut self, now: Instant) {
        self.hover.leave_affordance(now);
    }

    /// Timer tick; true when the affordance was hidden
    pub fn on_tick(&mut self, now: Instant) -> bool {
        self.hover.tick(now)
    }

    pub fn hovered_block(&self) -> Option<&BlockHandle> {
        self.hover.hovered()
    }

    pub fn affordance(&self) -> Option<Point> {
        self.hover
            .hovered()
            .map(|block| affordance_anchor(block, &self.settings))
    }

    /// Second affordance on the first row of a list, for grabbing the list
    pub fn list_affordance(&self) -> Option<Point> {
        let hovered = self.hover.hovered()?;
        enclosing_list(&self.host.visible_blocks(), hovered)
            .map(|list| affordance_anchor(list, &self.settings))
    }

    /// Block a press at `point` picks up
    ///
    /// A press on the hovered block's row belongs to one of the affordances
    /// shown there; anywhere else the block under the pointer is used.
    fn grab_target(&self, point: Point) -> Option<BlockHandle> {
        if let Some(hovered) = self.hover.hovered()
            && hovered.rect.contains_y(point.y)
        {
            let blocks = self.host.visible_blocks();
            let mut candidates = vec![hovered];
            candidates.extend(enclosing_list(&blocks, hovered));
            return grip_at(&candidates, point, &self.settings).cloned();
        }

        self.host
            .element_at(point.y)
            .or_else(|| self.hover.hovered().cloned())
    }

    // ============ Drag gesture ============

    /// Pick up the block whose affordance was pressed at `point`; false when
    /// no drag was started
    pub fn on_drag_start(&mut self, point: Point) -> bool {
        if let Some(session) = &self.session {
            log::debug!(
                "Ignoring drag start: session {} still active",
                session.id()
            );
            return false;
        }

        let Some(block) = self.grab_target(point) else {
            log::debug!("Ignoring drag start: no block at y={}", point.y);
            return false;
        };

        let source = match DraggableNodeRef::from_position(self.host.document(), block.range.start)
        {
            Ok(source) => source,
            Err(e) => {
                log::debug!("Ignoring drag start at {}: {e}", block.range.start);
                return false;
            }
        };

        self.host.show_ghost(&source);
        let session = DragSession::new(source, point);
        log::debug!(
            "Started drag session {} for {} at {}..{}",
            session.id(),
            session.source().node.kind().name(),
            session.source().from,
            session.source().to
        );
        self.session = Some(session);
        true
    }

    /// Recompute the drop target for the latest pointer sample
    pub fn on_drag_over(&mut self, point: Point) -> DropFeedback {
        let Some(session) = self.session.as_mut() else {
            return DropFeedback::invalid();
        };
        session.track(point);

        match plan_drop(&self.host, session.source(), point) {
            Ok(plan) => {
                let indicator_offset = boundary_offset(&self.host.visible_blocks(), plan.target.pos);
                match indicator_offset {
                    Some(offset) => self.host.show_drop_indicator(offset),
                    None => self.host.hide_drop_indicator(),
                }
                DropFeedback {
                    valid: true,
                    target: Some(plan.target.pos),
                    indicator_offset,
                }
            }
            Err(e) => {
                log::trace!("No drop target at ({}, {}): {e}", point.x, point.y);
                self.host.hide_drop_indicator();
                DropFeedback::invalid()
            }
        }
    }

    /// Finish the gesture at `point`, applying the move if it is valid
    pub fn on_drop(&mut self, point: Point) -> DropOutcome {
        let Some(session) = self.session.take() else {
            return DropOutcome::NoSession;
        };
        // Ranges of the hovered block are stale once the drop is processed
        self.hover.clear();

        let mut guard = GestureGuard::new(&mut self.host, session);
        let source = guard.session().source().clone();

        match plan_drop(guard.host(), &source, point) {
            Ok(plan) => {
                if guard.host().apply_atomic_edit(plan.steps.clone()) {
                    log::debug!(
                        "Session {} moved {}..{} to {}",
                        guard.session().id(),
                        source.from,
                        source.to,
                        plan.target.pos
                    );
                    DropOutcome::Moved(plan)
                } else {
                    log::warn!(
                        "Host did not apply move of {}..{} to {}",
                        source.from,
                        source.to,
                        plan.target.pos
                    );
                    DropOutcome::Unchanged
                }
            }
            Err(e) => {
                log::debug!("Session {} drop rejected: {e}", guard.session().id());
                DropOutcome::Rejected(e)
            }
        }
    }

    /// Abandon the gesture; false when there was nothing to cancel
    pub fn on_drag_cancel(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                log::debug!("Cancelled drag session {}", session.id());
                let _guard = GestureGuard::new(&mut self.host, session);
                true
            }
            None => false,
        }
    }
}

fn plan_drop<H: EditorHost>(
    host: &H,
    source: &DraggableNodeRef,
    point: Point,
) -> Result<MovePlan, DragError> {
    let raw = host
        .resolve_position_at(point)
        .ok_or(DragError::InvalidDropTarget(InvalidDrop::NoPosition))?;
    build_move(host.document(), source, raw)
}
