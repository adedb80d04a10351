use nbmerge_core::{ChangeCategory, ContentRenderer, MergeViewError, Vec2};
use nbmerge_layout::{CellLayout, CellLayoutSelector, CollapsibleRow, SourceRowMode};
use nbmerge_model::CellMergeUnit;

use crate::options::ViewOptions;
use crate::outputs::OutputsMergeView;
use crate::text::TextPanes;

// ──────────────────────────────────────────────
// Collapsible container
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Collapsible {
    pub header: &'static str,
    pub expanded: bool,
}

impl Collapsible {
    pub fn toggle(&mut self) {
        self.expanded = !self.expanded;
    }
}

// ──────────────────────────────────────────────
// Rows
// ──────────────────────────────────────────────

pub struct MetadataRow {
    pub container: Collapsible,
    pub panes: TextPanes,
}

pub struct OutputsRow {
    pub container: Collapsible,
    pub view: OutputsMergeView,
}

pub enum SourceRow {
    /// Source unchanged everywhere: only the merged source is shown.
    Unchanged(TextPanes),
    FourWay(TextPanes),
}

impl SourceRow {
    pub fn panes(&self) -> &TextPanes {
        match self {
            SourceRow::Unchanged(p) | SourceRow::FourWay(p) => p,
        }
    }
}

pub enum CellBody {
    Collapsed {
        header: Option<&'static str>,
        category: Option<ChangeCategory>,
        source: TextPanes,
    },
    FourWay {
        source: SourceRow,
        metadata: Option<MetadataRow>,
        outputs: Option<OutputsRow>,
    },
}

// ──────────────────────────────────────────────
// CellMergeView
// ──────────────────────────────────────────────

pub struct CellMergeView {
    pub layout: CellLayout,
    pub body: CellBody,
    /// Mirrors the unit's `delete_cell` flag; drawn as a deletion marker.
    marked_for_deletion: bool,
}

impl CellMergeView {
    /// Build the view for one cell. Any construction failure fails the
    /// whole cell; no partial rows are produced.
    pub fn new(
        unit: &CellMergeUnit,
        selector: &CellLayoutSelector,
        renderer: &dyn ContentRenderer,
        options: &ViewOptions,
    ) -> Result<Self, MergeViewError> {
        if unit.has_partial_sides() {
            return Err(MergeViewError::PartialSides { what: "cell" });
        }
        let layout = selector.select(unit);
        let body = match (layout, &unit.local, &unit.remote) {
            (CellLayout::Collapsed { header, category }, _, _) => CellBody::Collapsed {
                header,
                category,
                source: TextPanes::merged_source(&unit.merged, renderer)?,
            },
            (CellLayout::FourWay(plan), Some(local), Some(remote)) => {
                let source = match plan.source {
                    SourceRowMode::Collapsed => {
                        SourceRow::Unchanged(TextPanes::merged_source(&unit.merged, renderer)?)
                    }
                    SourceRowMode::FourWay => SourceRow::FourWay(TextPanes::source(
                        local,
                        remote,
                        &unit.merged,
                        renderer,
                    )?),
                };
                let metadata = plan.metadata.map(|row| MetadataRow {
                    container: container(row, "Metadata changed", "Metadata unchanged"),
                    panes: TextPanes::json(
                        local.metadata.value.as_ref(),
                        local.metadata.base.as_ref().or(remote.metadata.base.as_ref()),
                        remote.metadata.value.as_ref(),
                        unit.merged.metadata.value.as_ref(),
                        renderer,
                    ),
                });
                let outputs = match plan.outputs {
                    Some(row) => Some(OutputsRow {
                        container: container(row, "Outputs changed", "Outputs unchanged"),
                        view: OutputsMergeView::new(
                            Some(local.base_outputs()),
                            Some(local.side_outputs()),
                            Some(remote.side_outputs()),
                            unit.merged_outputs(),
                            options,
                        )?,
                    }),
                    None => None,
                };
                CellBody::FourWay {
                    source,
                    metadata,
                    outputs,
                }
            }
            // The selector only picks a four-way layout when both sides exist.
            (CellLayout::FourWay(_), _, _) => {
                return Err(MergeViewError::PartialSides { what: "cell" })
            }
        };
        Ok(Self {
            layout,
            body,
            marked_for_deletion: unit.delete_cell(),
        })
    }

    pub fn marked_for_deletion(&self) -> bool {
        self.marked_for_deletion
    }

    /// Flip the unit's delete flag, then reflect the model in the marker.
    pub fn toggle_delete(&mut self, unit: &mut CellMergeUnit) {
        unit.set_delete_cell(!unit.delete_cell());
        self.sync_from_model(unit);
        log::info!("cell delete flag set to {}", unit.delete_cell());
    }

    pub fn sync_from_model(&mut self, unit: &CellMergeUnit) {
        self.marked_for_deletion = unit.delete_cell();
    }

    pub fn category(&self) -> Option<ChangeCategory> {
        match self.body {
            CellBody::Collapsed { category, .. } => category,
            CellBody::FourWay { .. } => None,
        }
    }

    pub fn header(&self) -> Option<&'static str> {
        match self.body {
            CellBody::Collapsed { header, .. } => header,
            CellBody::FourWay { .. } => None,
        }
    }

    pub fn outputs(&self) -> Option<&OutputsRow> {
        match &self.body {
            CellBody::FourWay { outputs, .. } => outputs.as_ref(),
            CellBody::Collapsed { .. } => None,
        }
    }

    pub fn outputs_mut(&mut self) -> Option<&mut OutputsRow> {
        match &mut self.body {
            CellBody::FourWay { outputs, .. } => outputs.as_mut(),
            CellBody::Collapsed { .. } => None,
        }
    }

    pub fn metadata(&self) -> Option<&MetadataRow> {
        match &self.body {
            CellBody::FourWay { metadata, .. } => metadata.as_ref(),
            CellBody::Collapsed { .. } => None,
        }
    }

    /// Lay the cell out starting at `origin`; returns the rows used.
    pub fn place(&mut self, origin: Vec2) -> f32 {
        // Header line with the delete toggle.
        let mut y = origin.y + 1.0;
        match &mut self.body {
            CellBody::Collapsed { source, .. } => {
                y += source.height() as f32;
            }
            CellBody::FourWay {
                source,
                metadata,
                outputs,
            } => {
                y += source.panes().height() as f32;
                if let Some(row) = metadata {
                    y += 1.0;
                    if row.container.expanded {
                        y += row.panes.height() as f32;
                    }
                }
                if let Some(row) = outputs {
                    y += 1.0;
                    row.view.set_origin(Vec2::new(origin.x, y));
                    if row.container.expanded {
                        y += row.view.bounds().height;
                    }
                }
            }
        }
        y - origin.y
    }
}

fn container(row: CollapsibleRow, changed: &'static str, unchanged: &'static str) -> Collapsible {
    Collapsible {
        header: if row.changed { changed } else { unchanged },
        expanded: row.expanded,
    }
}
