use serde_json::Value;

// ──────────────────────────────────────────────
// Geometry
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Half-open containment: a point on the bottom or right edge belongs
    /// to the next rect in a stack, never to two rects at once.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// The top strip of this rect with the given height (clamped).
    pub fn top_strip(&self, height: f32) -> Rect {
        Rect::new(self.x, self.y, self.width, height.min(self.height))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

// ──────────────────────────────────────────────
// Colors
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
}

// ──────────────────────────────────────────────
// Text Styling
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub foreground: Color,
    pub background: Option<Color>,
    pub bold: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            foreground: Color::WHITE,
            background: None,
            bold: false,
        }
    }
}

// ──────────────────────────────────────────────
// Input
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    /// Aborts a drag in progress.
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    MouseClick { position: Vec2, button: MouseButton },
    MouseMove { position: Vec2 },
    MouseDrag { position: Vec2, button: MouseButton },
    MouseRelease { position: Vec2, button: MouseButton },
}

impl InputEvent {
    pub fn position(&self) -> Vec2 {
        match *self {
            InputEvent::MouseClick { position, .. }
            | InputEvent::MouseMove { position }
            | InputEvent::MouseDrag { position, .. }
            | InputEvent::MouseRelease { position, .. } => position,
        }
    }
}

// ──────────────────────────────────────────────
// Pane roles and change categories
// ──────────────────────────────────────────────

/// The four columns of a merge comparison. Only `Merged` accepts drops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaneRole {
    Local,
    Base,
    Remote,
    Merged,
}

impl PaneRole {
    /// Column order of a full four-way comparison.
    pub const FOUR_WAY: [PaneRole; 4] = [
        PaneRole::Local,
        PaneRole::Base,
        PaneRole::Remote,
        PaneRole::Merged,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PaneRole::Local => "Local",
            PaneRole::Base => "Base",
            PaneRole::Remote => "Remote",
            PaneRole::Merged => "Merged",
        }
    }

    pub fn is_mutable(self) -> bool {
        self == PaneRole::Merged
    }

    pub fn color(self) -> Color {
        match self {
            PaneRole::Local => Color::rgb(0.35, 0.55, 0.95),
            PaneRole::Base => Color::rgb(0.6, 0.6, 0.6),
            PaneRole::Remote => Color::rgb(0.95, 0.6, 0.3),
            PaneRole::Merged => Color::rgb(0.4, 0.8, 0.45),
        }
    }
}

/// How a collapsed cell came to be collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeCategory {
    OnewayLocal,
    OnewayRemote,
    TwowayAddition,
    TwowayDeletion,
}

impl ChangeCategory {
    pub fn class_name(self) -> &'static str {
        match self {
            ChangeCategory::OnewayLocal => "oneway-local",
            ChangeCategory::OnewayRemote => "oneway-remote",
            ChangeCategory::TwowayAddition => "twoway-addition",
            ChangeCategory::TwowayDeletion => "twoway-deletion",
        }
    }

    pub fn color(self) -> Color {
        match self {
            ChangeCategory::OnewayLocal => PaneRole::Local.color(),
            ChangeCategory::OnewayRemote => PaneRole::Remote.color(),
            ChangeCategory::TwowayAddition => Color::rgb(0.4, 0.8, 0.45),
            ChangeCategory::TwowayDeletion => Color::rgb(0.9, 0.35, 0.35),
        }
    }
}

// ──────────────────────────────────────────────
// Coordinates and change records
// ──────────────────────────────────────────────

/// Logical address of one item inside a pane set: `[paneIndex, itemIndex]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemCoord {
    pub pane: usize,
    pub item: usize,
}

impl ItemCoord {
    pub fn new(pane: usize, item: usize) -> Self {
        Self { pane, item }
    }
}

/// Emitted by an ordered container after a mutation has been fully applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Added { index: usize },
    Moved { old_index: usize, new_index: usize },
}

// ──────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────

/// Construction-time contract violations. Invalid user interactions are
/// not errors; they surface as rejected outcomes at the point of detection.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeViewError {
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("cannot build a {row} merge view for non-text content ({mimetype})")]
    IncompatibleContent { row: &'static str, mimetype: String },

    #[error("{what}: either none or all of base/local/remote must be supplied")]
    PartialSides { what: &'static str },

    #[error("merge pane index {index} is not part of the pane set")]
    InvalidPane { index: usize },

    #[error("invalid merge model: {0}")]
    Model(String),
}

// ──────────────────────────────────────────────
// Trait: OrderedItemContainer
// ──────────────────────────────────────────────

/// An ordered sequence supporting positional insert and atomic move.
/// Neither operation merges or drops items.
pub trait OrderedItemContainer {
    type Item;

    fn len(&self) -> usize;
    fn get(&self, index: usize) -> Option<&Self::Item>;

    /// `index` must lie in `0..=len`.
    fn insert(&mut self, index: usize, item: Self::Item)
        -> Result<CollectionChange, MergeViewError>;

    /// Both indices must address existing items. Returns `None` when
    /// `from == to`; nothing is mutated or notified in that case.
    fn move_item(
        &mut self,
        from: usize,
        to: usize,
    ) -> Result<Option<CollectionChange>, MergeViewError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ──────────────────────────────────────────────
// Trait: DragCoordinateResolver
// ──────────────────────────────────────────────

/// Maps interaction points to `(pane, item)` coordinates across a set of
/// side-by-side panes, and back.
pub trait DragCoordinateResolver {
    type ItemView;

    /// The item whose drag handle lies under `point`, in any pane.
    fn find_drag_target(&self, point: Vec2) -> Option<ItemCoord>;

    /// The item under `point`, in any pane.
    fn index_of_child_node(&self, point: Vec2) -> Option<ItemCoord>;

    /// The live item view stored at `key`.
    fn target_from_key(&self, key: ItemCoord) -> Option<&Self::ItemView>;

    /// The insertion gap under `point`. Only the merge pane yields targets.
    fn find_drop_target(&self, point: Vec2) -> Option<ItemCoord>;
}

// ──────────────────────────────────────────────
// Trait: ContentRenderer
// ──────────────────────────────────────────────

/// Produces displayable lines for one content item given a mime-type hint.
pub trait ContentRenderer {
    fn render(&self, content: &Value, mimetype: &str) -> Vec<String>;
}

// ──────────────────────────────────────────────
// Trait: Renderer
// ──────────────────────────────────────────────

/// Draws primitives for a composed view tree.
pub trait Renderer {
    fn begin_frame(&mut self, size: Size);
    fn draw_rect(&mut self, rect: Rect, color: Color);
    fn draw_text(&mut self, text: &str, position: Vec2, style: TextStyle, clip: Rect);
    fn end_frame(&mut self);
}
