use nbmerge_core::{
    DragCoordinateResolver, ItemCoord, MergeViewError, OrderedItemContainer, PaneRole, Rect, Vec2,
};
use nbmerge_layout::PaneColumns;

// ──────────────────────────────────────────────
// Views
// ──────────────────────────────────────────────

/// One laid-out item inside a pane.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemView<T> {
    pub item: T,
    pub rect: Rect,
    /// The strip that starts a drag.
    pub handle: Rect,
    pub draggable: bool,
    /// Registration epoch the drag affordance was last attached in.
    pub registration: u64,
}

impl<T> ItemView<T> {
    /// A view that has not been laid out or registered yet.
    fn unplaced(item: T) -> Self {
        Self {
            item,
            rect: Rect::new(0.0, 0.0, 0.0, 0.0),
            handle: Rect::new(0.0, 0.0, 0.0, 0.0),
            draggable: false,
            registration: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pane<T> {
    pub role: PaneRole,
    pub rect: Rect,
    pub items: Vec<ItemView<T>>,
}

impl<T> Pane<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_values(&self) -> impl Iterator<Item = &T> {
        self.items.iter().map(|v| &v.item)
    }
}

// ──────────────────────────────────────────────
// PaneSet
// ──────────────────────────────────────────────

/// Side-by-side panes of the same item type. Read-only panes are drag
/// sources; the single merge pane is the only drop target.
#[derive(Debug, Clone)]
pub struct PaneSet<T> {
    panes: Vec<Pane<T>>,
    merge_pane: usize,
    columns: PaneColumns,
    handle_height: f32,
    registration: u64,
}

impl<T: Clone> PaneSet<T> {
    /// Build a pane set from `(role, items)` columns. `merge_pane` indexes
    /// into `contents`. Every item in every pane starts out draggable.
    pub fn new(
        contents: Vec<(PaneRole, Vec<T>)>,
        merge_pane: usize,
        columns: PaneColumns,
        handle_height: f32,
    ) -> Result<Self, MergeViewError> {
        if merge_pane >= contents.len() {
            return Err(MergeViewError::InvalidPane { index: merge_pane });
        }
        let panes = contents
            .into_iter()
            .map(|(role, items)| Pane {
                role,
                rect: Rect::new(0.0, 0.0, 0.0, 0.0),
                items: items.into_iter().map(ItemView::unplaced).collect(),
            })
            .collect();
        let mut set = Self {
            panes,
            merge_pane,
            columns,
            handle_height,
            registration: 0,
        };
        set.relayout();
        for pane in 0..set.panes.len() {
            set.register_drag_sources(pane);
        }
        Ok(set)
    }

    /// Replace the merge pane's items with the collection's current order,
    /// then re-attach drag affordances to all of them.
    pub fn sync_merge_pane<C>(&mut self, collection: &C)
    where
        C: OrderedItemContainer<Item = T>,
    {
        let items: Vec<T> = (0..collection.len())
            .filter_map(|i| collection.get(i).cloned())
            .collect();
        let pane = &mut self.panes[self.merge_pane];
        pane.items = items.into_iter().map(ItemView::unplaced).collect();
        self.relayout();
        self.register_drag_sources(self.merge_pane);
    }
}

impl<T> PaneSet<T> {
    pub fn panes(&self) -> &[Pane<T>] {
        &self.panes
    }

    pub fn pane(&self, index: usize) -> Option<&Pane<T>> {
        self.panes.get(index)
    }

    pub fn merge_pane_index(&self) -> usize {
        self.merge_pane
    }

    pub fn merge_pane(&self) -> &Pane<T> {
        &self.panes[self.merge_pane]
    }

    pub fn index_of_role(&self, role: PaneRole) -> Option<usize> {
        self.panes.iter().position(|p| p.role == role)
    }

    pub fn registration(&self) -> u64 {
        self.registration
    }

    pub fn columns(&self) -> PaneColumns {
        self.columns
    }

    /// Move the whole set so its top-left corner sits at `origin`.
    pub fn set_origin(&mut self, origin: Vec2) {
        self.columns.origin = origin;
        self.relayout();
    }

    /// Total on-screen size of the set.
    pub fn bounds(&self) -> Rect {
        let height = self.panes.first().map_or(0.0, |p| p.rect.height);
        Rect::new(
            self.columns.origin.x,
            self.columns.origin.y,
            self.columns.total_width(self.panes.len()),
            height,
        )
    }

    /// Attach the drag affordance to every item of a pane under a fresh
    /// registration epoch.
    pub fn register_drag_sources(&mut self, pane: usize) {
        self.registration += 1;
        let epoch = self.registration;
        if let Some(pane) = self.panes.get_mut(pane) {
            for view in &mut pane.items {
                view.draggable = true;
                view.registration = epoch;
            }
        }
    }

    fn relayout(&mut self) {
        let counts: Vec<usize> = self.panes.iter().map(|p| p.items.len()).collect();
        let geometry = self.columns.compute_uniform(&counts);
        for (pane, geom) in self.panes.iter_mut().zip(geometry) {
            pane.rect = geom.rect;
            for (view, rect) in pane.items.iter_mut().zip(geom.items) {
                view.rect = rect;
                view.handle = rect.top_strip(self.handle_height);
            }
        }
    }
}

impl<T> DragCoordinateResolver for PaneSet<T> {
    type ItemView = ItemView<T>;

    fn find_drag_target(&self, point: Vec2) -> Option<ItemCoord> {
        self.panes.iter().enumerate().find_map(|(p, pane)| {
            pane.items
                .iter()
                .position(|v| v.draggable && v.handle.contains(point))
                .map(|i| ItemCoord::new(p, i))
        })
    }

    fn index_of_child_node(&self, point: Vec2) -> Option<ItemCoord> {
        self.panes.iter().enumerate().find_map(|(p, pane)| {
            pane.items
                .iter()
                .position(|v| v.rect.contains(point))
                .map(|i| ItemCoord::new(p, i))
        })
    }

    fn target_from_key(&self, key: ItemCoord) -> Option<&ItemView<T>> {
        self.panes.get(key.pane)?.items.get(key.item)
    }

    fn find_drop_target(&self, point: Vec2) -> Option<ItemCoord> {
        let pane = &self.panes[self.merge_pane];
        if !pane.rect.contains(point) {
            return None;
        }
        let gap = pane
            .items
            .iter()
            .position(|v| v.rect.contains(point))
            .map(|i| {
                let rect = pane.items[i].rect;
                if point.y < rect.y + rect.height / 2.0 {
                    i
                } else {
                    i + 1
                }
            })
            .unwrap_or(pane.items.len());
        Some(ItemCoord::new(self.merge_pane, gap))
    }
}
