use nbmerge_core::{DragCoordinateResolver, ItemCoord, MergeViewError, OrderedItemContainer};

use crate::pane_set::PaneSet;

/// Why an interaction was absorbed without touching the merge model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The destination is not the merge pane.
    NotMergePane,
    /// The item would land where it already is.
    SamePosition,
    /// The source coordinate addresses no item.
    UnknownSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// An item was copied from a read-only pane into the merge pane.
    Inserted { index: usize },
    /// An item was relocated inside the merge pane.
    Moved { from: usize, to: usize },
    Rejected(RejectReason),
}

impl MoveOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, MoveOutcome::Rejected(_))
    }
}

/// Translate a requested insertion gap into the index the item must
/// occupy after it has been removed from `from`. `None` means the item
/// would not move.
///
/// Dropping into gap `to > from` lands the item at `to - 1`, because the
/// source slot closes up before reinsertion. Gaps `from` and `from + 1`
/// both border the item itself.
pub fn adjusted_destination(from: usize, to: usize) -> Option<usize> {
    let adjusted = if to > from { to - 1 } else { to };
    (adjusted != from).then_some(adjusted)
}

/// Applies drag results to a merge pane and its backing collection. The
/// collection is only ever mutated here, so pane order and collection
/// order stay in lockstep.
pub struct ReorderEngine;

impl ReorderEngine {
    pub fn apply<T, C>(
        panes: &mut PaneSet<T>,
        collection: &mut C,
        from: ItemCoord,
        to: ItemCoord,
    ) -> Result<MoveOutcome, MergeViewError>
    where
        T: Clone,
        C: OrderedItemContainer<Item = T>,
    {
        let merge = panes.merge_pane_index();
        if to.pane != merge {
            log::debug!("drop rejected: pane {} is not the merge pane", to.pane);
            return Ok(MoveOutcome::Rejected(RejectReason::NotMergePane));
        }

        let outcome = if from.pane == to.pane {
            if from.item >= collection.len() {
                return Ok(MoveOutcome::Rejected(RejectReason::UnknownSource));
            }
            let Some(dest) = adjusted_destination(from.item, to.item) else {
                log::debug!("move of item {} onto itself ignored", from.item);
                return Ok(MoveOutcome::Rejected(RejectReason::SamePosition));
            };
            match collection.move_item(from.item, dest)? {
                Some(_) => MoveOutcome::Moved {
                    from: from.item,
                    to: dest,
                },
                None => return Ok(MoveOutcome::Rejected(RejectReason::SamePosition)),
            }
        } else {
            let Some(source) = panes.target_from_key(from) else {
                log::debug!("drag source {:?} no longer exists", from);
                return Ok(MoveOutcome::Rejected(RejectReason::UnknownSource));
            };
            let item = source.item.clone();
            collection.insert(to.item, item)?;
            MoveOutcome::Inserted { index: to.item }
        };

        panes.sync_merge_pane(collection);
        log::info!("merge pane updated: {:?}", outcome);
        Ok(outcome)
    }
}
