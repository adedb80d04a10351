use nbmerge_core::{
    CollectionChange, ContentRenderer, InputEvent, ItemCoord, MergeViewError,
    OrderedItemContainer, Rect, Vec2,
};
use nbmerge_input::{adjusted_destination, MoveOutcome, RejectReason};
use nbmerge_layout::CellLayoutSelector;
use nbmerge_model::{MergedNotebook, NotebookMergeModel};

use crate::cell::{CellBody, CellMergeView};
use crate::metadata::MetadataMergeView;
use crate::options::ViewOptions;

/// A composed cell, or the reason it could not be composed.
pub enum CellSlot {
    Ready(CellMergeView),
    Failed(MergeViewError),
}

impl CellSlot {
    pub fn view(&self) -> Option<&CellMergeView> {
        match self {
            CellSlot::Ready(view) => Some(view),
            CellSlot::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&MergeViewError> {
        match self {
            CellSlot::Ready(_) => None,
            CellSlot::Failed(err) => Some(err),
        }
    }
}

/// Root of the view tree: notebook metadata (when it has decisions) followed
/// by one view per cell, in model order. Owns the merge model so that every
/// mutation of order or deletion state goes through here.
pub struct NotebookMergeView {
    model: NotebookMergeModel,
    metadata: Option<MetadataMergeView>,
    cells: Vec<CellSlot>,
    cell_rects: Vec<Rect>,
    metadata_rect: Option<Rect>,
    options: ViewOptions,
    /// Cell whose outputs view holds an unresolved press or drag.
    pointer_owner: Option<usize>,
}

impl NotebookMergeView {
    pub fn compose(
        model: NotebookMergeModel,
        renderer: &dyn ContentRenderer,
        options: ViewOptions,
    ) -> Self {
        let selector = CellLayoutSelector::new(options.selector_options());
        let metadata = MetadataMergeView::new(&model.metadata, renderer);
        let cells = model
            .cells()
            .iter()
            .enumerate()
            .map(|(i, unit)| match CellMergeView::new(unit, &selector, renderer, &options) {
                Ok(view) => CellSlot::Ready(view),
                Err(err) => {
                    log::error!("cell {} cannot be displayed: {}", i, err);
                    CellSlot::Failed(err)
                }
            })
            .collect();
        let mut view = Self {
            model,
            metadata,
            cells,
            cell_rects: Vec::new(),
            metadata_rect: None,
            options,
            pointer_owner: None,
        };
        view.relayout();
        view
    }

    pub fn model(&self) -> &NotebookMergeModel {
        &self.model
    }

    pub fn options(&self) -> &ViewOptions {
        &self.options
    }

    pub fn metadata(&self) -> Option<&MetadataMergeView> {
        self.metadata.as_ref()
    }

    pub fn metadata_rect(&self) -> Option<Rect> {
        self.metadata_rect
    }

    pub fn cells(&self) -> &[CellSlot] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&CellSlot> {
        self.cells.get(index)
    }

    pub fn cell_rect(&self, index: usize) -> Option<Rect> {
        self.cell_rects.get(index).copied()
    }

    /// Total extent of the composed tree.
    pub fn size(&self) -> Rect {
        let bottom = self
            .cell_rects
            .last()
            .map(Rect::bottom)
            .or(self.metadata_rect.map(|r| r.bottom()))
            .unwrap_or(0.0);
        Rect::new(0.0, 0.0, self.options.row_width(), bottom)
    }

    pub fn merged_result(&self) -> MergedNotebook {
        self.model.merged_result()
    }

    /// Move the cell at `from` into gap `to`, reordering the model and the
    /// views in one step.
    pub fn reorder_cell(&mut self, from: usize, to: usize) -> Result<MoveOutcome, MergeViewError> {
        if from >= self.cells.len() {
            return Ok(MoveOutcome::Rejected(RejectReason::UnknownSource));
        }
        let Some(dest) = adjusted_destination(from, to) else {
            return Ok(MoveOutcome::Rejected(RejectReason::SamePosition));
        };
        if self.model.cells_mut().move_item(from, dest)?.is_none() {
            return Ok(MoveOutcome::Rejected(RejectReason::SamePosition));
        }
        // Reposition views from the change records before anyone else runs.
        for change in self.model.cells_mut().drain_changes() {
            if let CollectionChange::Moved {
                old_index,
                new_index,
            } = change
            {
                let slot = self.cells.remove(old_index);
                self.cells.insert(new_index, slot);
            }
        }
        self.pointer_owner = None;
        self.relayout();
        log::info!("cell {} moved to {}", from, dest);
        Ok(MoveOutcome::Moved { from, to: dest })
    }

    /// Toggle a cell's delete flag. Returns the new flag, or `None` when the
    /// cell does not exist or failed to compose.
    pub fn toggle_delete(&mut self, index: usize) -> Option<bool> {
        let unit = self.model.cells_mut().get_mut(index)?;
        let CellSlot::Ready(view) = self.cells.get_mut(index)? else {
            return None;
        };
        view.toggle_delete(unit);
        Some(unit.delete_cell())
    }

    pub fn toggle_outputs(&mut self, index: usize) -> Option<bool> {
        let CellSlot::Ready(view) = self.cells.get_mut(index)? else {
            return None;
        };
        let row = view.outputs_mut()?;
        row.container.toggle();
        let expanded = row.container.expanded;
        self.relayout();
        Some(expanded)
    }

    pub fn toggle_metadata(&mut self, index: usize) -> Option<bool> {
        let CellSlot::Ready(view) = self.cells.get_mut(index)? else {
            return None;
        };
        let CellBody::FourWay {
            metadata: Some(row),
            ..
        } = &mut view.body
        else {
            return None;
        };
        row.container.toggle();
        let expanded = row.container.expanded;
        self.relayout();
        Some(expanded)
    }

    /// Apply a resolved output move inside one cell.
    pub fn move_output(
        &mut self,
        cell: usize,
        from: ItemCoord,
        to: ItemCoord,
    ) -> Result<MoveOutcome, MergeViewError> {
        let (Some(unit), Some(CellSlot::Ready(view))) =
            (self.model.cells_mut().get_mut(cell), self.cells.get_mut(cell))
        else {
            return Ok(MoveOutcome::Rejected(RejectReason::UnknownSource));
        };
        let Some(row) = view.outputs_mut() else {
            return Ok(MoveOutcome::Rejected(RejectReason::UnknownSource));
        };
        let outcome = row.view.apply_move(from, to, unit.merged_outputs_mut())?;
        if outcome.is_applied() {
            log_changes(cell, unit.merged_outputs_mut().drain_changes());
            self.relayout();
        }
        Ok(outcome)
    }

    /// Route a pointer event to the outputs view under it (or the one that
    /// owns the current drag).
    pub fn handle_event(&mut self, event: InputEvent) -> Result<Option<MoveOutcome>, MergeViewError> {
        let position = event.position();
        let is_press = matches!(event, InputEvent::MouseClick { .. });
        let target = match self.pointer_owner {
            Some(owner) => Some(owner),
            None if is_press => self.outputs_cell_at(position),
            None => None,
        };
        let Some(index) = target else {
            return Ok(None);
        };

        let (Some(unit), Some(CellSlot::Ready(view))) =
            (self.model.cells_mut().get_mut(index), self.cells.get_mut(index))
        else {
            self.pointer_owner = None;
            return Ok(None);
        };
        let Some(row) = view.outputs_mut() else {
            self.pointer_owner = None;
            return Ok(None);
        };
        let result = row.view.handle_event(event, unit.merged_outputs_mut());
        self.pointer_owner = row.view.owns_pointer().then_some(index);

        let outcome = result?;
        if outcome.is_some_and(|o| o.is_applied()) {
            log_changes(index, unit.merged_outputs_mut().drain_changes());
            self.relayout();
        }
        Ok(outcome)
    }

    fn outputs_cell_at(&self, position: Vec2) -> Option<usize> {
        self.cells.iter().position(|slot| {
            slot.view()
                .and_then(CellMergeView::outputs)
                .is_some_and(|row| row.container.expanded && row.view.bounds().contains(position))
        })
    }

    fn relayout(&mut self) {
        let width = self.options.row_width();
        let mut y = 0.0;
        self.metadata_rect = self.metadata.as_ref().map(|m| {
            let rect = Rect::new(0.0, y, width, m.height());
            y += m.height() + 1.0;
            rect
        });
        self.cell_rects.clear();
        for slot in &mut self.cells {
            let height = match slot {
                CellSlot::Ready(view) => view.place(Vec2::new(0.0, y)),
                CellSlot::Failed(_) => 1.0,
            };
            self.cell_rects.push(Rect::new(0.0, y, width, height));
            y += height + 1.0;
        }
    }
}

fn log_changes(cell: usize, changes: Vec<CollectionChange>) {
    for change in changes {
        log::debug!("cell {} merged outputs: {:?}", cell, change);
    }
}
