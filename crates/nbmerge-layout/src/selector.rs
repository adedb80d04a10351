use nbmerge_core::{ChangeCategory, OrderedItemContainer};
use nbmerge_model::{CellDiffModel, CellMergeUnit};

// ──────────────────────────────────────────────
// Flags
// ──────────────────────────────────────────────

/// Everything the cell-level decision depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellFlags {
    pub has_local: bool,
    pub has_remote: bool,
    pub local_added: bool,
    pub local_deleted: bool,
    pub remote_added: bool,
    pub remote_deleted: bool,
    pub local_unchanged: bool,
    pub remote_unchanged: bool,
    /// Local, remote and merged are all unchanged.
    pub both_unchanged: bool,
    /// Both sides added the cell and agree on its content.
    pub identical_additions: bool,
}

impl CellFlags {
    pub fn from_unit(unit: &CellMergeUnit) -> Self {
        let (local, remote) = match (&unit.local, &unit.remote) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                return Self {
                    has_local: unit.local.is_some(),
                    has_remote: unit.remote.is_some(),
                    ..Self::default()
                }
            }
        };
        Self {
            has_local: true,
            has_remote: true,
            local_added: local.added,
            local_deleted: local.deleted,
            remote_added: remote.added,
            remote_deleted: remote.deleted,
            local_unchanged: local.unchanged,
            remote_unchanged: remote.unchanged,
            both_unchanged: local.unchanged && remote.unchanged && unit.merged.unchanged,
            identical_additions: local.added
                && remote.added
                && local.source.value == remote.source.value,
        }
    }

    /// Exactly one side added the cell, or one side deleted it while the
    /// other left it alone.
    fn one_sided(&self) -> bool {
        self.local_added != self.remote_added
            || (self.local_deleted && !self.remote_deleted && self.remote_unchanged)
            || (self.remote_deleted && !self.local_deleted && self.local_unchanged)
    }
}

// ──────────────────────────────────────────────
// Cell-level classification
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellClassification {
    /// Only the merged source is shown.
    Collapsed {
        header: Option<&'static str>,
        category: Option<ChangeCategory>,
    },
    /// Base, local, remote and merged are compared row by row.
    FourWay,
}

/// Pure function of the flags: same input, same answer.
pub fn classify(flags: &CellFlags) -> CellClassification {
    let collapsed = !flags.has_local
        || !flags.has_remote
        || flags.both_unchanged
        || flags.one_sided()
        || (flags.local_deleted && flags.remote_deleted)
        || flags.identical_additions;
    if !collapsed {
        return CellClassification::FourWay;
    }

    let (ladd, ldel, radd, rdel) = (
        flags.local_added,
        flags.local_deleted,
        flags.remote_added,
        flags.remote_deleted,
    );
    let (header, category) = if (ladd && !radd) || (ldel && !rdel) {
        let header = if ladd { "Cell added locally" } else { "Cell deleted locally" };
        (Some(header), Some(ChangeCategory::OnewayLocal))
    } else if (radd && !ladd) || (rdel && !ldel) {
        let header = if radd { "Cell added remotely" } else { "Cell deleted remotely" };
        (Some(header), Some(ChangeCategory::OnewayRemote))
    } else if ldel && rdel {
        (Some("Deleted on both sides"), Some(ChangeCategory::TwowayDeletion))
    } else if ladd && radd {
        (Some("Added on both sides"), Some(ChangeCategory::TwowayAddition))
    } else {
        (None, None)
    };
    CellClassification::Collapsed { header, category }
}

// ──────────────────────────────────────────────
// Row plan for four-way cells
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRowMode {
    Collapsed,
    FourWay,
}

/// A row shown inside a collapsible container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapsibleRow {
    pub changed: bool,
    pub expanded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowPlan {
    pub source: SourceRowMode,
    /// `None` when the row is omitted.
    pub metadata: Option<CollapsibleRow>,
    pub outputs: Option<CollapsibleRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLayout {
    Collapsed {
        header: Option<&'static str>,
        category: Option<ChangeCategory>,
    },
    FourWay(RowPlan),
}

impl CellLayout {
    pub fn is_collapsed(&self) -> bool {
        matches!(self, CellLayout::Collapsed { .. })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SelectorOptions {
    /// Show unchanged output rows expanded instead of collapsed.
    pub expand_unchanged_outputs: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CellLayoutSelector {
    options: SelectorOptions,
}

impl CellLayoutSelector {
    pub fn new(options: SelectorOptions) -> Self {
        Self { options }
    }

    pub fn select(&self, unit: &CellMergeUnit) -> CellLayout {
        let flags = CellFlags::from_unit(unit);
        let layout = match classify(&flags) {
            CellClassification::Collapsed { header, category } => {
                CellLayout::Collapsed { header, category }
            }
            CellClassification::FourWay => CellLayout::FourWay(self.row_plan(unit)),
        };
        log::debug!("cell layout {:?} for flags {:?}", layout, flags);
        layout
    }

    fn row_plan(&self, unit: &CellMergeUnit) -> RowPlan {
        let sides: Vec<&CellDiffModel> = [unit.local.as_ref(), unit.remote.as_ref(), Some(&unit.merged)]
            .into_iter()
            .flatten()
            .collect();

        let source = if sides.iter().all(|s| s.source.unchanged) {
            SourceRowMode::Collapsed
        } else {
            SourceRowMode::FourWay
        };

        let live = || sides.iter().filter(|s| !s.deleted);

        let metadata_changed = live().any(|s| !s.metadata.unchanged);
        let metadata = metadata_changed.then_some(CollapsibleRow {
            changed: true,
            expanded: true,
        });

        let outputs_changed = live().any(|s| !s.outputs_unchanged());
        let outputs = (outputs_changed || !unit.merged_outputs().is_empty()).then(|| {
            CollapsibleRow {
                changed: outputs_changed,
                expanded: outputs_changed || self.options.expand_unchanged_outputs,
            }
        });

        RowPlan {
            source,
            metadata,
            outputs,
        }
    }
}
