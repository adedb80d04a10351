use nbmerge_core::Vec2;
use nbmerge_layout::{PaneColumns, SelectorOptions};

/// Geometry and behaviour knobs for a composed merge view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub pane_width: f32,
    pub pane_gap: f32,
    pub item_height: f32,
    pub handle_height: f32,
    pub drag_threshold: f32,
    pub expand_unchanged_outputs: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            pane_width: 40.0,
            pane_gap: 1.0,
            item_height: 3.0,
            handle_height: 1.0,
            drag_threshold: 4.0,
            expand_unchanged_outputs: false,
        }
    }
}

impl ViewOptions {
    pub fn columns(&self, origin: Vec2) -> PaneColumns {
        PaneColumns::new(origin, self.pane_width, self.pane_gap, self.item_height)
    }

    pub fn selector_options(&self) -> SelectorOptions {
        SelectorOptions {
            expand_unchanged_outputs: self.expand_unchanged_outputs,
        }
    }

    /// Width of a full four-pane row.
    pub fn row_width(&self) -> f32 {
        self.columns(Vec2::new(0.0, 0.0)).total_width(4)
    }
}
