// Layout for the merge view: which shape each cell takes, and where each
// pane and item sits on screen so interactions can be mapped back to
// (pane, item) coordinates.

pub mod selector;
mod tests;

use nbmerge_core::{Rect, Vec2};

pub use selector::{
    classify, CellClassification, CellFlags, CellLayout, CellLayoutSelector, CollapsibleRow,
    RowPlan, SelectorOptions, SourceRowMode,
};

// ──────────────────────────────────────────────
// PaneColumns
// ──────────────────────────────────────────────

/// Minimum pane width so labels and handles stay hittable.
const MIN_PANE_WIDTH: f32 = 8.0;

/// Geometry of one pane: its full rect and one rect per stacked item.
#[derive(Debug, Clone, PartialEq)]
pub struct PaneGeometry {
    pub rect: Rect,
    pub items: Vec<Rect>,
}

impl PaneGeometry {
    /// Index of the item containing `point`.
    pub fn item_at(&self, point: Vec2) -> Option<usize> {
        self.items.iter().position(|r| r.contains(point))
    }
}

/// Lays panes out side by side, left to right, with items stacked top to
/// bottom inside each pane. Every pane gets the same height: the tallest
/// stack plus one trailing slot, so there is always room to drop past the
/// last item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneColumns {
    pub origin: Vec2,
    pub pane_width: f32,
    pub gap: f32,
    pub item_height: f32,
}

impl PaneColumns {
    pub fn new(origin: Vec2, pane_width: f32, gap: f32, item_height: f32) -> Self {
        Self {
            origin,
            pane_width: pane_width.max(MIN_PANE_WIDTH),
            gap: gap.max(0.0),
            item_height: item_height.max(1.0),
        }
    }

    /// Compute pane and item rects for panes whose items have the given heights.
    pub fn compute(&self, item_heights: &[Vec<f32>]) -> Vec<PaneGeometry> {
        let tallest = item_heights
            .iter()
            .map(|heights| heights.iter().map(|h| h.max(1.0)).sum::<f32>())
            .fold(0.0_f32, f32::max);
        let pane_height = tallest + self.item_height;

        item_heights
            .iter()
            .enumerate()
            .map(|(i, heights)| {
                let x = self.origin.x + i as f32 * (self.pane_width + self.gap);
                let rect = Rect::new(x, self.origin.y, self.pane_width, pane_height);
                let mut y = self.origin.y;
                let items = heights
                    .iter()
                    .map(|h| {
                        let h = h.max(1.0);
                        let r = Rect::new(x, y, self.pane_width, h);
                        y += h;
                        r
                    })
                    .collect();
                PaneGeometry { rect, items }
            })
            .collect()
    }

    /// Compute geometry when every item has the default item height.
    pub fn compute_uniform(&self, item_counts: &[usize]) -> Vec<PaneGeometry> {
        let heights: Vec<Vec<f32>> = item_counts
            .iter()
            .map(|&n| vec![self.item_height; n])
            .collect();
        self.compute(&heights)
    }

    /// Total width covered by `panes` columns.
    pub fn total_width(&self, panes: usize) -> f32 {
        if panes == 0 {
            return 0.0;
        }
        panes as f32 * self.pane_width + (panes - 1) as f32 * self.gap
    }
}
