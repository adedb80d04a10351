use nbmerge_core::ContentRenderer;
use nbmerge_model::MetadataMergeUnit;

use crate::text::TextPanes;

/// Four-pane comparison of the notebook-level metadata.
pub struct MetadataMergeView {
    pub header: String,
    pub panes: TextPanes,
}

impl MetadataMergeView {
    /// `None` when the unit carries no decisions to review.
    pub fn new(unit: &MetadataMergeUnit, renderer: &dyn ContentRenderer) -> Option<Self> {
        if !unit.has_pending_decisions() {
            return None;
        }
        let conflicts = unit.conflict_count();
        let header = if conflicts > 0 {
            format!("Notebook metadata changed ({conflicts} conflicted)")
        } else {
            "Notebook metadata changed".to_string()
        };
        Some(Self {
            header,
            panes: TextPanes::json(
                unit.local.as_ref(),
                unit.base.as_ref(),
                unit.remote.as_ref(),
                Some(&unit.merged),
                renderer,
            ),
        })
    }

    pub fn height(&self) -> f32 {
        1.0 + self.panes.height() as f32
    }
}
