use nbmerge_core::{InputEvent, ItemCoord, MergeViewError, PaneRole, Rect, Vec2};
use nbmerge_input::{DragAction, DragController, DragState, MoveOutcome, PaneSet, ReorderEngine};
use nbmerge_model::{OutputItem, ReorderableCollection};

use crate::options::ViewOptions;

/// Reorderable outputs comparison: read-only local/base/remote panes next
/// to the mutable merged pane, or the merged pane alone.
pub struct OutputsMergeView {
    panes: PaneSet<OutputItem>,
    controller: DragController,
    pointer: Vec2,
}

impl OutputsMergeView {
    /// `base`, `local` and `remote` must be all present or all absent.
    pub fn new(
        base: Option<Vec<OutputItem>>,
        local: Option<Vec<OutputItem>>,
        remote: Option<Vec<OutputItem>>,
        merged: &ReorderableCollection<OutputItem>,
        options: &ViewOptions,
    ) -> Result<Self, MergeViewError> {
        let merged = merged.to_vec();
        let contents = match (local, base, remote) {
            (Some(local), Some(base), Some(remote)) => vec![
                (PaneRole::Local, local),
                (PaneRole::Base, base),
                (PaneRole::Remote, remote),
                (PaneRole::Merged, merged),
            ],
            (None, None, None) => vec![(PaneRole::Merged, merged)],
            _ => return Err(MergeViewError::PartialSides { what: "outputs" }),
        };
        let merge_pane = contents.len() - 1;
        let panes = PaneSet::new(
            contents,
            merge_pane,
            options.columns(Vec2::new(0.0, 0.0)),
            options.handle_height,
        )?;
        Ok(Self {
            panes,
            controller: DragController::with_threshold(options.drag_threshold),
            pointer: Vec2::new(0.0, 0.0),
        })
    }

    pub fn panes(&self) -> &PaneSet<OutputItem> {
        &self.panes
    }

    pub fn bounds(&self) -> Rect {
        self.panes.bounds()
    }

    pub fn set_origin(&mut self, origin: Vec2) {
        self.panes.set_origin(origin);
    }

    /// True while a press or drag started in this view is unresolved.
    pub fn owns_pointer(&self) -> bool {
        !matches!(self.controller.state(), DragState::Idle)
    }

    /// Snapshot rect under the pointer and the current drop gap, while
    /// dragging.
    pub fn drag_preview(&self) -> Option<(Rect, Option<ItemCoord>)> {
        match self.controller.state() {
            DragState::Dragging {
                image, drop_target, ..
            } => Some((image.rect_at(self.pointer), *drop_target)),
            _ => None,
        }
    }

    /// Feed a pointer event. Returns the applied or rejected outcome when
    /// the event completed a drop.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        merged: &mut ReorderableCollection<OutputItem>,
    ) -> Result<Option<MoveOutcome>, MergeViewError> {
        self.pointer = event.position();
        match self.controller.process(event, &self.panes) {
            DragAction::Drop { from, to } => self.apply_move(from, to, merged).map(Some),
            _ => Ok(None),
        }
    }

    /// Apply a resolved `(pane, item)` move against the merged outputs.
    pub fn apply_move(
        &mut self,
        from: ItemCoord,
        to: ItemCoord,
        merged: &mut ReorderableCollection<OutputItem>,
    ) -> Result<MoveOutcome, MergeViewError> {
        ReorderEngine::apply(&mut self.panes, merged, from, to)
    }
}
