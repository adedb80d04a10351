// Composed merge view for a notebook: per-cell views built from the merge
// model by the layout selector, the reorderable outputs comparison, and the
// document-level metadata view, all owned by `NotebookMergeView`.

pub mod cell;
pub mod metadata;
pub mod notebook;
pub mod options;
pub mod outputs;
mod paint;
pub mod text;

pub use cell::{CellBody, CellMergeView, Collapsible, MetadataRow, OutputsRow, SourceRow};
pub use metadata::MetadataMergeView;
pub use notebook::{CellSlot, NotebookMergeView};
pub use options::ViewOptions;
pub use outputs::OutputsMergeView;
pub use text::{TextPane, TextPanes};
