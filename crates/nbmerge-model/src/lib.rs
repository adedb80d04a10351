// nbmerge-model: the in-memory three-way merge model of a notebook.
// Built once from an upstream diff/merge result; user interaction only
// touches ordering and deletion flags on the merged side.

pub mod cell;
pub mod collection;
pub mod diff;

use nbmerge_core::{MergeViewError, OrderedItemContainer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use cell::{CellMergeUnit, MergeDecision, MetadataMergeUnit};
pub use collection::ReorderableCollection;
pub use diff::{CellDiffModel, DiffModel, OutputDiffModel, OutputItem};

#[derive(Debug, Deserialize)]
struct NotebookMergeModelRepr {
    #[serde(default)]
    metadata: MetadataMergeUnit,
    #[serde(default)]
    cells: Vec<CellMergeUnit>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotebookMergeModel {
    pub metadata: MetadataMergeUnit,
    cells: ReorderableCollection<CellMergeUnit>,
}

impl NotebookMergeModel {
    pub fn new(metadata: MetadataMergeUnit, cells: Vec<CellMergeUnit>) -> Self {
        Self {
            metadata,
            cells: ReorderableCollection::from_vec(cells),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, MergeViewError> {
        let repr: NotebookMergeModelRepr =
            serde_json::from_str(json).map_err(|e| MergeViewError::Model(e.to_string()))?;
        log::debug!("loaded merge model with {} cells", repr.cells.len());
        Ok(Self::new(repr.metadata, repr.cells))
    }

    pub fn cells(&self) -> &ReorderableCollection<CellMergeUnit> {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut ReorderableCollection<CellMergeUnit> {
        &mut self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&CellMergeUnit> {
        self.cells.get(index)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The notebook as it would be written out: deleted cells dropped,
    /// outputs in the merged pane's current order.
    pub fn merged_result(&self) -> MergedNotebook {
        let cells = self
            .cells
            .iter()
            .filter(|unit| !unit.delete_cell())
            .map(|unit| MergedCell {
                source: unit.merged.source.value_text().unwrap_or_default(),
                metadata: unit.merged.metadata.value.clone().unwrap_or(Value::Null),
                outputs: unit.merged_outputs().to_vec(),
            })
            .collect();
        MergedNotebook {
            metadata: self.metadata.merged.clone(),
            cells,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedCell {
    pub source: String,
    pub metadata: Value,
    pub outputs: Vec<OutputItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedNotebook {
    pub metadata: Value,
    pub cells: Vec<MergedCell>,
}
