use nbmerge_core::MergeViewError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collection::ReorderableCollection;
use crate::diff::{CellDiffModel, OutputItem};

// ──────────────────────────────────────────────
// Cell merge unit
// ──────────────────────────────────────────────

/// Wire shape of a cell merge unit before its merged outputs are lifted
/// into a reorderable collection. Partial sides load as-is; the view
/// rejects them per cell.
#[derive(Debug, Clone, Deserialize)]
struct CellMergeUnitRepr {
    #[serde(default)]
    local: Option<CellDiffModel>,
    #[serde(default)]
    remote: Option<CellDiffModel>,
    merged: CellDiffModel,
    #[serde(default)]
    delete_cell: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "CellMergeUnitRepr")]
pub struct CellMergeUnit {
    pub local: Option<CellDiffModel>,
    pub remote: Option<CellDiffModel>,
    pub merged: CellDiffModel,
    delete_cell: bool,
    merged_outputs: ReorderableCollection<OutputItem>,
}

impl CellMergeUnit {
    /// `local` and `remote` must be both present or both absent.
    pub fn new(
        local: Option<CellDiffModel>,
        remote: Option<CellDiffModel>,
        merged: CellDiffModel,
    ) -> Result<Self, MergeViewError> {
        if local.is_some() != remote.is_some() {
            return Err(MergeViewError::PartialSides { what: "cell" });
        }
        let merged_outputs = ReorderableCollection::from_vec(merged.side_outputs());
        Ok(Self {
            local,
            remote,
            merged,
            delete_cell: false,
            merged_outputs,
        })
    }

    pub fn delete_cell(&self) -> bool {
        self.delete_cell
    }

    pub fn set_delete_cell(&mut self, delete: bool) {
        self.delete_cell = delete;
    }

    /// The merged pane's output list. Mutated only by the reorder engine.
    pub fn merged_outputs(&self) -> &ReorderableCollection<OutputItem> {
        &self.merged_outputs
    }

    pub fn merged_outputs_mut(&mut self) -> &mut ReorderableCollection<OutputItem> {
        &mut self.merged_outputs
    }

    pub fn has_both_sides(&self) -> bool {
        self.local.is_some() && self.remote.is_some()
    }

    /// Exactly one of local and remote is present. Only reachable through
    /// deserialisation; such a unit cannot be displayed.
    pub fn has_partial_sides(&self) -> bool {
        self.local.is_some() != self.remote.is_some()
    }
}

impl From<CellMergeUnitRepr> for CellMergeUnit {
    fn from(repr: CellMergeUnitRepr) -> Self {
        let merged_outputs = ReorderableCollection::from_vec(repr.merged.side_outputs());
        Self {
            local: repr.local,
            remote: repr.remote,
            merged: repr.merged,
            delete_cell: repr.delete_cell,
            merged_outputs,
        }
    }
}

// ──────────────────────────────────────────────
// Document metadata
// ──────────────────────────────────────────────

/// One pre-computed merge decision at the document-metadata level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeDecision {
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub conflict: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataMergeUnit {
    #[serde(default)]
    pub base: Option<Value>,
    #[serde(default)]
    pub local: Option<Value>,
    #[serde(default)]
    pub remote: Option<Value>,
    #[serde(default)]
    pub merged: Value,
    #[serde(default)]
    pub decisions: Vec<MergeDecision>,
}

impl MetadataMergeUnit {
    pub fn has_pending_decisions(&self) -> bool {
        !self.decisions.is_empty()
    }

    pub fn conflict_count(&self) -> usize {
        self.decisions.iter().filter(|d| d.conflict).count()
    }
}
