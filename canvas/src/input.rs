//! Input model: modifier keys, mouse buttons, selection, and the drag state machine.
//!
//! `Modifiers` and `Button` capture the user's intent at the time of a pointer
//! event. `UiState` is what the renderer needs between events (the selection
//! and any live guide lines). `InputState` is the gesture being tracked between
//! pointer-down and pointer-up; a `DragSession` carries everything needed to
//! recompute the group position from the start of the drag on every move.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::ElementId;
use crate::snap::SnapGuide;

/// Keyboard/mouse modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether a click should toggle membership instead of replacing the selection.
    #[must_use]
    pub fn additive(self) -> bool {
        self.shift || self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the host (e.g. `"Delete"`, `"ArrowUp"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// UI state visible to the renderer and the properties panel.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Selected element ids in the order they were selected.
    pub selection: Vec<ElementId>,
    /// Guide lines for the drag in progress; empty when idle.
    pub guides: Vec<SnapGuide>,
}

impl UiState {
    #[must_use]
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selection.contains(id)
    }

    /// Add `id` if absent, remove it if present. Returns true if it is now selected.
    pub fn toggle(&mut self, id: ElementId) -> bool {
        if let Some(index) = self.selection.iter().position(|s| *s == id) {
            self.selection.remove(index);
            false
        } else {
            self.selection.push(id);
            true
        }
    }

    /// Replace the selection with just `id`.
    pub fn select_only(&mut self, id: ElementId) {
        self.selection.clear();
        self.selection.push(id);
    }

    /// Drop `id` from the selection. Returns true if it was selected.
    pub fn deselect(&mut self, id: &ElementId) -> bool {
        let before = self.selection.len();
        self.selection.retain(|s| s != id);
        self.selection.len() != before
    }

    /// Clear the selection. Returns true if anything was selected.
    pub fn clear_selection(&mut self) -> bool {
        let had_any = !self.selection.is_empty();
        self.selection.clear();
        had_any
    }
}

/// Snapshot taken at pointer-down for a group move.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Page-space pointer position at pointer-down.
    pub start_page: Point,
    /// Every selected element's position at pointer-down, in selection order.
    /// The first entry is the primary element that snapping is computed for.
    pub origins: Vec<(ElementId, Point)>,
}

impl DragSession {
    /// The element whose candidate position is snapped.
    #[must_use]
    pub fn primary(&self) -> Option<(ElementId, Point)> {
        self.origins.first().copied()
    }

    /// Whether `id` is part of the moving group.
    #[must_use]
    pub fn moves(&self, id: &ElementId) -> bool {
        self.origins.iter().any(|(origin_id, _)| origin_id == id)
    }

    /// Every origin shifted by `delta`.
    #[must_use]
    pub fn positions_for(&self, delta: Point) -> Vec<(ElementId, Point)> {
        self.origins.iter().map(|(id, origin)| (*id, origin.offset(delta))).collect()
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the view with the middle button.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is moving the selected elements as a rigid group.
    Dragging(DragSession),
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
