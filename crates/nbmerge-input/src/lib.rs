// Drag-and-drop targeting for merge panes: resolve pointer positions to
// (pane, item) coordinates, track the drag session, and apply drops to the
// merge pane through the reorder engine.

pub mod engine;
pub mod pane_set;

use nbmerge_core::{DragCoordinateResolver, InputEvent, ItemCoord, MouseButton, Rect, Vec2};

pub use engine::{adjusted_destination, MoveOutcome, RejectReason, ReorderEngine};
pub use pane_set::{ItemView, Pane, PaneSet};

/// Pointer travel before a press on a handle turns into a drag.
const DEFAULT_DRAG_THRESHOLD: f32 = 4.0;

// ──────────────────────────────────────────────
// Drag image
// ──────────────────────────────────────────────

/// Snapshot of the dragged item's box, taken when the drag starts at the
/// item's current on-screen width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragImage {
    pub source: ItemCoord,
    pub rect: Rect,
    /// Pointer offset from the snapshot's top-left corner.
    pub grab_offset: Vec2,
}

impl DragImage {
    /// Where the snapshot should be drawn for the current pointer position.
    pub fn rect_at(&self, pointer: Vec2) -> Rect {
        Rect::new(
            pointer.x - self.grab_offset.x,
            pointer.y - self.grab_offset.y,
            self.rect.width,
            self.rect.height,
        )
    }
}

// ──────────────────────────────────────────────
// Drag state machine
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    Pending {
        source: ItemCoord,
        press: Vec2,
    },
    Dragging {
        source: ItemCoord,
        image: DragImage,
        drop_target: Option<ItemCoord>,
    },
}

/// What the host should do after feeding an input event to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum DragAction {
    None,
    /// A drag started; draw `image` under the pointer.
    Started(DragImage),
    /// The pointer moved during a drag; `None` means no valid drop here.
    Hover(Option<ItemCoord>),
    /// Apply this move through the reorder engine.
    Drop { from: ItemCoord, to: ItemCoord },
    /// The drag ended without a valid target.
    Cancelled,
}

pub struct DragController {
    state: DragState,
    threshold: f32,
}

impl DragController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            threshold: DEFAULT_DRAG_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn process<T>(&mut self, event: InputEvent, panes: &PaneSet<T>) -> DragAction {
        match event {
            InputEvent::MouseClick {
                position,
                button: MouseButton::Left,
            } => self.press(position, panes),
            InputEvent::MouseDrag {
                position,
                button: MouseButton::Left,
            }
            | InputEvent::MouseMove { position } => self.motion(position, panes),
            InputEvent::MouseRelease {
                position,
                button: MouseButton::Left,
            } => self.release(position, panes),
            InputEvent::MouseClick {
                button: MouseButton::Right,
                ..
            } => self.abort(),
            _ => DragAction::None,
        }
    }

    fn abort(&mut self) -> DragAction {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => DragAction::None,
            state => {
                log::debug!("drag aborted from {:?}", state);
                DragAction::Cancelled
            }
        }
    }

    fn press<T>(&mut self, position: Vec2, panes: &PaneSet<T>) -> DragAction {
        self.state = match panes.find_drag_target(position) {
            Some(source) => DragState::Pending {
                source,
                press: position,
            },
            None => DragState::Idle,
        };
        DragAction::None
    }

    fn motion<T>(&mut self, position: Vec2, panes: &PaneSet<T>) -> DragAction {
        match self.state {
            DragState::Idle => DragAction::None,
            DragState::Pending { source, press } => {
                if press.distance(position) < self.threshold {
                    return DragAction::None;
                }
                let Some(view) = panes.target_from_key(source) else {
                    self.state = DragState::Idle;
                    return DragAction::Cancelled;
                };
                let image = DragImage {
                    source,
                    rect: view.rect,
                    grab_offset: Vec2::new(press.x - view.rect.x, press.y - view.rect.y),
                };
                self.state = DragState::Dragging {
                    source,
                    image,
                    drop_target: panes.find_drop_target(position),
                };
                DragAction::Started(image)
            }
            DragState::Dragging {
                ref mut drop_target,
                ..
            } => {
                *drop_target = panes.find_drop_target(position);
                DragAction::Hover(*drop_target)
            }
        }
    }

    fn release<T>(&mut self, position: Vec2, panes: &PaneSet<T>) -> DragAction {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Dragging { source, .. } => match panes.find_drop_target(position) {
                Some(to) => DragAction::Drop { from: source, to },
                None => {
                    log::debug!("drop of {:?} rejected: no target under pointer", source);
                    DragAction::Cancelled
                }
            },
            // A press and release without travel is a click, not a drag.
            DragState::Pending { .. } | DragState::Idle => DragAction::None,
        }
    }
}

impl Default for DragController {
    fn default() -> Self {
        Self::new()
    }
}
