use nbmerge_core::{CollectionChange, MergeViewError, OrderedItemContainer};

/// An ordered item list whose only mutations are positional insert and
/// atomic move. Every applied mutation bumps `generation` and queues a
/// change record after the list is already in its post-state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReorderableCollection<T> {
    items: Vec<T>,
    generation: u64,
    changes: Vec<CollectionChange>,
}

impl<T> ReorderableCollection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            generation: 0,
            changes: Vec::new(),
        }
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items,
            generation: 0,
            changes: Vec::new(),
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// In-place access to an item. Positions can only change through
    /// `insert` and `move_item`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Monotonic counter bumped once per applied mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Take the pending change records, oldest first.
    pub fn drain_changes(&mut self) -> Vec<CollectionChange> {
        std::mem::take(&mut self.changes)
    }

    fn notify(&mut self, change: CollectionChange) -> CollectionChange {
        self.generation += 1;
        self.changes.push(change);
        change
    }
}

impl<T: Clone> ReorderableCollection<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.items.clone()
    }
}

impl<T> OrderedItemContainer for ReorderableCollection<T> {
    type Item = T;

    fn len(&self) -> usize {
        self.items.len()
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    fn insert(&mut self, index: usize, item: T) -> Result<CollectionChange, MergeViewError> {
        if index > self.items.len() {
            return Err(MergeViewError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item);
        Ok(self.notify(CollectionChange::Added { index }))
    }

    fn move_item(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<Option<CollectionChange>, MergeViewError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(MergeViewError::IndexOutOfRange { index, len });
            }
        }
        if from == to {
            return Ok(None);
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
        Ok(Some(self.notify(CollectionChange::Moved {
            old_index: from,
            new_index: to,
        })))
    }
}

impl<T> FromIterator<T> for ReorderableCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}
