// Character-grid renderer: paints the view tree into rows of text for
// terminal output. Column accounting follows display width, so wide
// glyphs take two cells.

use nbmerge_core::{Color, ContentRenderer, Rect, Renderer, Size, TextStyle, Vec2};
use serde_json::Value;
use unicode_width::UnicodeWidthChar;

/// Marks the trailing cell of a wide glyph.
const CONTINUATION: char = '\0';

#[derive(Debug, Default)]
pub struct TextGridRenderer {
    width: usize,
    rows: Vec<Vec<char>>,
}

impl TextGridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last painted frame, one line per row, trailing blanks trimmed.
    pub fn contents(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            let line: String = row.iter().filter(|&&c| c != CONTINUATION).collect();
            out.push_str(line.trim_end());
            out.push('\n');
        }
        out
    }

    fn put(&mut self, row: usize, col: usize, ch: char) {
        if let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = ch;
        }
    }
}

impl Renderer for TextGridRenderer {
    fn begin_frame(&mut self, size: Size) {
        self.width = size.width.max(0.0) as usize;
        let height = size.height.max(0.0).ceil() as usize;
        self.rows = vec![vec![' '; self.width]; height];
    }

    // The grid has no colour channel.
    fn draw_rect(&mut self, _rect: Rect, _color: Color) {}

    fn draw_text(&mut self, text: &str, position: Vec2, _style: TextStyle, clip: Rect) {
        if position.y < clip.y || position.y >= clip.bottom() || position.y < 0.0 {
            return;
        }
        let row = position.y as usize;
        let right = (clip.right().max(0.0) as usize).min(self.width);
        let mut col = position.x.max(clip.x).max(0.0) as usize;
        for ch in text.chars() {
            if ch == '\n' {
                break;
            }
            let w = UnicodeWidthChar::width(ch).unwrap_or(0);
            if w == 0 {
                continue;
            }
            if col + w > right {
                break;
            }
            self.put(row, col, ch);
            for extra in 1..w {
                self.put(row, col + extra, CONTINUATION);
            }
            col += w;
        }
    }

    fn end_frame(&mut self) {}
}

/// Renders notebook content as plain text lines.
pub struct PlainContentRenderer;

impl ContentRenderer for PlainContentRenderer {
    fn render(&self, content: &Value, mimetype: &str) -> Vec<String> {
        if mimetype.starts_with("image/") {
            return vec![format!("<{mimetype}>")];
        }
        match content {
            Value::String(s) => s.lines().map(str::to_string).collect(),
            Value::Array(parts) if parts.iter().all(Value::is_string) => {
                let joined: String = parts.iter().filter_map(Value::as_str).collect();
                joined.lines().map(str::to_string).collect()
            }
            Value::Null => Vec::new(),
            other => serde_json::to_string_pretty(other)
                .map(|s| s.lines().map(str::to_string).collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn frame(width: f32, height: f32) -> TextGridRenderer {
        let mut r = TextGridRenderer::new();
        r.begin_frame(Size::new(width, height));
        r
    }

    #[test]
    fn text_is_clipped_to_rect() {
        let mut r = frame(10.0, 2.0);
        let clip = Rect::new(2.0, 0.0, 4.0, 1.0);
        r.draw_text("abcdefgh", Vec2::new(2.0, 0.0), TextStyle::default(), clip);
        r.draw_text("hidden", Vec2::new(2.0, 1.0), TextStyle::default(), clip);
        r.end_frame();
        assert_eq!(r.contents(), "  abcd\n\n");
    }

    #[test]
    fn wide_glyphs_take_two_columns() {
        let mut r = frame(6.0, 1.0);
        let clip = Rect::new(0.0, 0.0, 5.0, 1.0);
        r.draw_text("漢字x", Vec2::new(0.0, 0.0), TextStyle::default(), clip);
        assert_eq!(r.contents(), "漢字x\n");

        let mut r = frame(6.0, 1.0);
        r.draw_text("漢字", Vec2::new(0.0, 0.0), TextStyle::default(), Rect::new(0.0, 0.0, 3.0, 1.0));
        assert_eq!(r.contents(), "漢\n");
    }

    #[test]
    fn content_renderer_splits_sources_into_lines() {
        let r = PlainContentRenderer;
        assert_eq!(r.render(&json!("a\nb\n"), "text/plain"), vec!["a", "b"]);
        assert_eq!(r.render(&json!(["a\n", "b"]), "text/plain"), vec!["a", "b"]);
        assert_eq!(r.render(&json!("iVBOR"), "image/png"), vec!["<image/png>"]);
        assert_eq!(r.render(&json!({"k": 1}), "application/json").len(), 3);
    }
}
