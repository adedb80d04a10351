// Painting the composed tree through the `Renderer` trait.

use nbmerge_core::{Color, ContentRenderer, Rect, Renderer, Size, TextStyle, Vec2};
use nbmerge_model::OutputItem;

use crate::cell::{CellBody, CellMergeView, Collapsible, SourceRow};
use crate::notebook::{CellSlot, NotebookMergeView};
use crate::options::ViewOptions;
use crate::outputs::OutputsMergeView;
use crate::text::TextPanes;

const ERROR_COLOR: Color = Color::rgb(0.90, 0.35, 0.35);
const DIM_COLOR: Color = Color::rgb(0.55, 0.55, 0.60);
const MARKER_WIDTH: f32 = 4.0;

impl NotebookMergeView {
    /// Paint one frame. Output items are drawn through `content`, clipped
    /// to their item boxes.
    pub fn paint(&self, renderer: &mut dyn Renderer, content: &dyn ContentRenderer) {
        let size = self.size();
        renderer.begin_frame(Size::new(size.width, size.height));
        let options = self.options();

        if let (Some(view), Some(rect)) = (self.metadata(), self.metadata_rect()) {
            text(renderer, &view.header, Vec2::new(0.0, rect.y), bold(Color::WHITE), rect);
            paint_text_panes(renderer, &view.panes, rect.y + 1.0, options);
        }

        for (index, slot) in self.cells().iter().enumerate() {
            let Some(rect) = self.cell_rect(index) else {
                continue;
            };
            match slot {
                CellSlot::Ready(view) => paint_cell(renderer, content, view, rect, options),
                CellSlot::Failed(err) => {
                    let line = format!("Cell {index} cannot be displayed: {err}");
                    text(renderer, &line, Vec2::new(0.0, rect.y), plain(ERROR_COLOR), rect);
                }
            }
        }

        renderer.end_frame();
    }
}

fn paint_cell(
    renderer: &mut dyn Renderer,
    content: &dyn ContentRenderer,
    view: &CellMergeView,
    rect: Rect,
    options: &ViewOptions,
) {
    let marker = if view.marked_for_deletion() { "[x]" } else { "[ ]" };
    text(renderer, marker, Vec2::new(rect.x, rect.y), plain(Color::WHITE), rect);

    let mut y = rect.y + 1.0;
    match &view.body {
        CellBody::Collapsed {
            header,
            category,
            source,
        } => {
            let color = category.map(|c| c.color()).unwrap_or(DIM_COLOR);
            let title = header.unwrap_or("Unchanged");
            text(renderer, title, Vec2::new(rect.x + MARKER_WIDTH, rect.y), bold(color), rect);
            paint_text_panes(renderer, source, y, options);
        }
        CellBody::FourWay {
            source,
            metadata,
            outputs,
        } => {
            if let SourceRow::FourWay(panes) = source {
                for (i, pane) in panes.panes.iter().enumerate() {
                    let x = column_x(i, options) + if i == 0 { MARKER_WIDTH } else { 0.0 };
                    text(renderer, pane.role.label(), Vec2::new(x, rect.y), bold(pane.role.color()), rect);
                }
            }
            paint_text_panes(renderer, source.panes(), y, options);
            y += source.panes().height() as f32;

            if let Some(row) = metadata {
                paint_container(renderer, &row.container, y, options);
                y += 1.0;
                if row.container.expanded {
                    paint_text_panes(renderer, &row.panes, y, options);
                    y += row.panes.height() as f32;
                }
            }
            if let Some(row) = outputs {
                paint_container(renderer, &row.container, y, options);
                if row.container.expanded {
                    paint_outputs(renderer, content, &row.view, options);
                }
            }
        }
    }
}

fn paint_container(renderer: &mut dyn Renderer, container: &Collapsible, y: f32, options: &ViewOptions) {
    let arrow = if container.expanded { "▾" } else { "▸" };
    let line = format!("{arrow} {}", container.header);
    let clip = Rect::new(0.0, y, options.row_width(), 1.0);
    text(renderer, &line, Vec2::new(0.0, y), plain(DIM_COLOR), clip);
}

fn paint_text_panes(renderer: &mut dyn Renderer, panes: &TextPanes, y: f32, options: &ViewOptions) {
    let height = panes.height() as f32;
    let single = panes.panes.len() == 1;
    for (i, pane) in panes.panes.iter().enumerate() {
        let width = if single { options.row_width() } else { options.pane_width };
        let clip = Rect::new(column_x(i, options), y, width, height);
        renderer.draw_rect(clip, pane.role.color());
        for (row, line) in pane.lines.iter().enumerate() {
            let position = Vec2::new(clip.x, y + row as f32);
            text(renderer, line, position, plain(Color::WHITE), clip);
        }
    }
}

fn paint_outputs(
    renderer: &mut dyn Renderer,
    content: &dyn ContentRenderer,
    view: &OutputsMergeView,
    options: &ViewOptions,
) {
    let panes = view.panes();
    for pane in panes.panes() {
        renderer.draw_rect(pane.rect, pane.role.color());
        for item in &pane.items {
            paint_output_item(renderer, content, &item.item, item.rect, item.draggable, options);
        }
    }

    let Some((image, drop_target)) = view.drag_preview() else {
        return;
    };
    renderer.draw_rect(image, Color::WHITE);
    let Some(target) = drop_target else {
        return;
    };
    // Drop indicator at the top of the target gap.
    let merge = panes.merge_pane();
    let y = merge
        .items
        .get(target.item)
        .map(|v| v.rect.y)
        .or(merge.items.last().map(|v| v.rect.bottom()))
        .unwrap_or(merge.rect.y);
    let marker = "─".repeat(merge.rect.width.max(1.0) as usize);
    let clip = Rect::new(merge.rect.x, y, merge.rect.width, 1.0);
    text(renderer, &marker, Vec2::new(merge.rect.x, y), bold(Color::WHITE), clip);
}

fn paint_output_item(
    renderer: &mut dyn Renderer,
    content: &dyn ContentRenderer,
    item: &OutputItem,
    rect: Rect,
    draggable: bool,
    options: &ViewOptions,
) {
    let mimetype = item.mimetype();
    let grip = if draggable { "≡" } else { " " };
    let handle = format!("{grip} {}", item.output_type().unwrap_or(mimetype.as_str()));
    text(renderer, &handle, Vec2::new(rect.x, rect.y), plain(DIM_COLOR), rect);
    let body_top = rect.y + options.handle_height;
    for (row, line) in content.render(item.content(), &mimetype).iter().enumerate() {
        let y = body_top + row as f32;
        if y >= rect.bottom() {
            break;
        }
        text(renderer, line, Vec2::new(rect.x, y), plain(Color::WHITE), rect);
    }
}

fn column_x(index: usize, options: &ViewOptions) -> f32 {
    index as f32 * (options.pane_width + options.pane_gap)
}

fn text(renderer: &mut dyn Renderer, s: &str, position: Vec2, style: TextStyle, clip: Rect) {
    renderer.draw_text(s, position, style, clip);
}

fn plain(foreground: Color) -> TextStyle {
    TextStyle {
        foreground,
        ..TextStyle::default()
    }
}

fn bold(foreground: Color) -> TextStyle {
    TextStyle {
        foreground,
        background: None,
        bold: true,
    }
}
