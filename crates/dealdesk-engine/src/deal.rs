//! The two rich-text surfaces of a deal: its description and its nutshell

use dealdesk_config::DragSettings;

use crate::drag::{BlockDragEngine, DropFeedback, DropOutcome, Point};
use crate::host::EditorHost;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorSlot {
    Description,
    Nutshell,
}

impl EditorSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EditorSlot::Description => "description",
            EditorSlot::Nutshell => "nutshell",
        }
    }
}

/// One drag engine per deal editor, with at most one drag in flight overall
///
/// Blocks never move between the two documents: releasing a drag over the
/// other editor cancels it.
pub struct DealEditors<H: EditorHost> {
    description: BlockDragEngine<H>,
    nutshell: BlockDragEngine<H>,
}

impl<H: EditorHost> DealEditors<H> {
    pub fn new(description: H, nutshell: H, settings: DragSettings) -> Self {
        Self {
            description: BlockDragEngine::new(description, settings.clone()),
            nutshell: BlockDragEngine::new(nutshell, settings),
        }
    }

    pub fn editor(&self, slot: EditorSlot) -> &BlockDragEngine<H> {
        match slot {
            EditorSlot::Description => &self.description,
            EditorSlot::Nutshell => &self.nutshell,
        }
    }

    pub fn editor_mut(&mut self, slot: EditorSlot) -> &mut BlockDragEngine<H> {
        match slot {
            EditorSlot::Description => &mut self.description,
            EditorSlot::Nutshell => &mut self.nutshell,
        }
    }

    /// Editor that owns the drag in flight, if any
    pub fn active_slot(&self) -> Option<EditorSlot> {
        [EditorSlot::Description, EditorSlot::Nutshell]
            .into_iter()
            .find(|slot| self.editor(*slot).is_dragging())
    }

    pub fn on_drag_start(&mut self, slot: EditorSlot, point: Point) -> bool {
        if let Some(active) = self.active_slot() {
            log::debug!(
                "Ignoring drag start in {}: {} editor is dragging",
                slot.name(),
                active.name()
            );
            return false;
        }
        self.editor_mut(slot).on_drag_start(point)
    }

    pub fn on_drag_over(&mut self, slot: EditorSlot, point: Point) -> DropFeedback {
        match self.active_slot() {
            Some(active) if active == slot => self.editor_mut(slot).on_drag_over(point),
            Some(active) => {
                // Hovering the other editor: nothing there can take the drop
                self.editor_mut(active).host_mut().hide_drop_indicator();
                DropFeedback::invalid()
            }
            None => DropFeedback::invalid(),
        }
    }

    pub fn on_drop(&mut self, slot: EditorSlot, point: Point) -> DropOutcome {
        match self.active_slot() {
            Some(active) if active == slot => self.editor_mut(slot).on_drop(point),
            Some(active) => {
                self.editor_mut(active).on_drag_cancel();
                DropOutcome::Cancelled
            }
            None => DropOutcome::NoSession,
        }
    }

    pub fn on_drag_cancel(&mut self) -> bool {
        match self.active_slot() {
            Some(active) => self.editor_mut(active).on_drag_cancel(),
            None => false,
        }
    }
}
