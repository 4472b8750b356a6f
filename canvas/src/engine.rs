use tracing::debug;

use crate::camera::{Camera, Point};
use crate::consts::{NUDGE_STEP, NUDGE_STEP_LARGE, SNAP_THRESHOLD, WHEEL_ZOOM_SENSITIVITY};
use crate::doc::{
    Element, ElementId, ElementKind, ElementPatch, ElementProperty, Orientation, Page, PagePatch, Template,
    TemplateDoc,
};
use crate::hit::hit_test;
use crate::input::{Button, DragSession, InputState, Key, Modifiers, UiState, WheelDelta};
use crate::snap::{Bounds, SnapGuide, snap_position};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers and mutations for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ElementCreated(Element),
    ElementUpdated { id: ElementId, fields: ElementPatch },
    /// Live positions for every element in a group move, as one batch.
    ElementsMoved(Vec<(ElementId, Point)>),
    ElementDeleted { id: ElementId },
    PageUpdated(Page),
    SelectionChanged(Vec<ElementId>),
    GuidesChanged(Vec<SnapGuide>),
    RenderNeeded,
}

/// Core engine state for one open template.
///
/// All state transitions happen synchronously inside the `on_*` handlers and
/// the mutation methods; nothing here blocks or spawns work.
#[derive(Debug, Clone)]
pub struct EngineCore {
    doc: TemplateDoc,
    pub camera: Camera,
    ui: UiState,
    input: InputState,
    pub snap_threshold: f64,
}

impl EngineCore {
    /// Start editing `template`. The engine owns it from here on.
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self {
            doc: TemplateDoc::new(template),
            camera: Camera::default(),
            ui: UiState::default(),
            input: InputState::default(),
            snap_threshold: SNAP_THRESHOLD,
        }
    }

    /// Override the snap distance (page units).
    #[must_use]
    pub fn with_snap_threshold(mut self, threshold: f64) -> Self {
        self.snap_threshold = threshold;
        self
    }

    // --- Model mutations ---

    /// Create an element of `kind` on top of the page and select it.
    pub fn add_element(&mut self, kind: ElementKind) -> Vec<Action> {
        let element = self.doc.add_element(kind).clone();
        debug!(id = %element.id, kind = kind.as_str(), "element added");
        self.ui.select_only(element.id);
        vec![
            Action::ElementCreated(element),
            Action::SelectionChanged(self.ui.selection.clone()),
            Action::RenderNeeded,
        ]
    }

    /// Merge `patch` into an element. Missing ids and empty patches do nothing.
    pub fn update_element(&mut self, id: &ElementId, patch: ElementPatch) -> Vec<Action> {
        if patch.is_empty() || !self.doc.update_element(id, &patch) {
            return Vec::new();
        }
        vec![Action::ElementUpdated { id: *id, fields: patch }, Action::RenderNeeded]
    }

    /// Apply raw property-editor input to one element property.
    pub fn set_property(&mut self, id: &ElementId, property: ElementProperty, raw: &str) -> Vec<Action> {
        self.update_element(id, property.patch_from_input(raw))
    }

    /// [`EngineCore::set_property`] with the property given by schema name
    /// (`"fontSize"`, `"textAlign"`, ...). Unknown names do nothing.
    pub fn set_property_named(&mut self, id: &ElementId, name: &str, raw: &str) -> Vec<Action> {
        let Some(property) = ElementProperty::from_name(name) else {
            debug!(name, "unknown element property");
            return Vec::new();
        };
        self.set_property(id, property, raw)
    }

    /// Remove an element and drop it from the selection.
    pub fn delete_element(&mut self, id: &ElementId) -> Vec<Action> {
        if self.doc.delete_element(id).is_none() {
            return Vec::new();
        }
        debug!(%id, "element deleted");
        let mut actions = vec![Action::ElementDeleted { id: *id }];
        if self.ui.deselect(id) {
            actions.push(Action::SelectionChanged(self.ui.selection.clone()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.doc.set_name(name);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.doc.set_category(category);
    }

    pub fn set_page(&mut self, patch: &PagePatch) -> Vec<Action> {
        self.doc.set_page(patch);
        self.page_changed()
    }

    pub fn clear_background(&mut self) -> Vec<Action> {
        self.doc.clear_background();
        self.page_changed()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> Vec<Action> {
        if !self.doc.set_orientation(orientation) {
            return Vec::new();
        }
        self.page_changed()
    }

    fn page_changed(&self) -> Vec<Action> {
        vec![Action::PageUpdated(self.doc.page().clone()), Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Middle => {
                self.input = InputState::Panning { last_screen: screen_pt };
                return Vec::new();
            }
            Button::Secondary => return Vec::new(),
            Button::Primary => {}
        }

        let page_pt = self.camera.screen_to_page(screen_pt);
        let Some(id) = hit_test(page_pt, &self.doc) else {
            if self.ui.clear_selection() {
                return vec![Action::SelectionChanged(Vec::new()), Action::RenderNeeded];
            }
            return Vec::new();
        };

        let before = self.ui.selection.clone();
        if modifiers.additive() {
            self.ui.toggle(id);
        } else if !self.ui.is_selected(&id) {
            self.ui.select_only(id);
        }

        let mut actions = Vec::new();
        if self.ui.selection != before {
            actions.push(Action::SelectionChanged(self.ui.selection.clone()));
        }

        let origins: Vec<(ElementId, Point)> = self
            .ui
            .selection
            .iter()
            .filter_map(|sid| self.doc.element(sid).map(|el| (*sid, el.position())))
            .collect();
        if !origins.is_empty() {
            debug!(count = origins.len(), "drag started");
            self.input = InputState::Dragging(DragSession { start_page: page_pt, origins });
        }

        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        if self.is_dragging() {
            let page_pt = self.camera.screen_to_page(screen_pt);
            return self.drag_to(page_pt);
        }
        match &mut self.input {
            InputState::Panning { last_screen } => {
                self.camera.pan_x += screen_pt.x - last_screen.x;
                self.camera.pan_y += screen_pt.y - last_screen.y;
                *last_screen = screen_pt;
                vec![Action::RenderNeeded]
            }
            InputState::Idle | InputState::Dragging(_) => Vec::new(),
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.finish_gesture()
    }

    /// The pointer left the canvas: treated like a release.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        self.finish_gesture()
    }

    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if modifiers.ctrl || modifiers.meta {
            self.camera.zoom_about(screen_pt, (-delta.dy * WHEEL_ZOOM_SENSITIVITY).exp());
        } else {
            self.camera.pan_x -= delta.dx;
            self.camera.pan_y -= delta.dy;
        }
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        let step = if modifiers.shift { NUDGE_STEP_LARGE } else { NUDGE_STEP };
        match key.0.as_str() {
            "Delete" | "Backspace" => self.delete_selection(),
            "Escape" => {
                if self.ui.clear_selection() {
                    vec![Action::SelectionChanged(Vec::new()), Action::RenderNeeded]
                } else {
                    Vec::new()
                }
            }
            "ArrowLeft" => self.nudge_selection(Point::new(-step, 0.0)),
            "ArrowRight" => self.nudge_selection(Point::new(step, 0.0)),
            "ArrowUp" => self.nudge_selection(Point::new(0.0, -step)),
            "ArrowDown" => self.nudge_selection(Point::new(0.0, step)),
            _ => Vec::new(),
        }
    }

    // --- Drag internals ---

    fn drag_to(&mut self, page_pt: Point) -> Vec<Action> {
        let Some((positions, guides)) = self.compute_drag(page_pt) else {
            return self.abort_drag();
        };

        self.doc.move_elements(&positions);
        let mut actions = vec![Action::ElementsMoved(positions)];
        if guides != self.ui.guides {
            self.ui.guides.clone_from(&guides);
            actions.push(Action::GuidesChanged(guides));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Positions for every still-present member of the drag group, plus the
    /// guides that produced them. `None` when the primary element is gone.
    fn compute_drag(&self, page_pt: Point) -> Option<(Vec<(ElementId, Point)>, Vec<SnapGuide>)> {
        let InputState::Dragging(session) = &self.input else {
            return None;
        };
        let (primary_id, primary_origin) = session.primary()?;
        let primary = self.doc.element(&primary_id)?;

        let candidate = primary_origin.offset(page_pt.delta_from(session.start_page));
        let statics = self
            .doc
            .elements()
            .iter()
            .filter(|el| !session.moves(&el.id))
            .map(Bounds::from);
        let snapped = snap_position(candidate, primary.width, primary.height, statics, self.snap_threshold);

        let delta = snapped.position.delta_from(primary_origin);
        let mut positions = session.positions_for(delta);
        positions.retain(|(id, _)| self.doc.element(id).is_some());
        Some((positions, snapped.guides))
    }

    fn abort_drag(&mut self) -> Vec<Action> {
        debug!("drag aborted: primary element no longer exists");
        self.input = InputState::Idle;
        let mut actions = Vec::new();
        if !self.ui.guides.is_empty() {
            self.ui.guides.clear();
            actions.push(Action::GuidesChanged(Vec::new()));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// End whatever gesture is in progress. A drag is committed: positions are
    /// already in the model, so only elements that ended up somewhere new are
    /// reported.
    fn finish_gesture(&mut self) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Idle => Vec::new(),
            InputState::Panning { .. } => vec![Action::RenderNeeded],
            InputState::Dragging(session) => {
                let mut actions: Vec<Action> = session
                    .origins
                    .iter()
                    .filter_map(|(id, origin)| {
                        let el = self.doc.element(id)?;
                        let pos = el.position();
                        (pos != *origin).then(|| Action::ElementUpdated { id: *id, fields: ElementPatch::position(pos) })
                    })
                    .collect();
                debug!(moved = actions.len(), "drag committed");
                if !self.ui.guides.is_empty() {
                    self.ui.guides.clear();
                    actions.push(Action::GuidesChanged(Vec::new()));
                }
                actions.push(Action::RenderNeeded);
                actions
            }
        }
    }

    // --- Keyboard internals ---

    fn delete_selection(&mut self) -> Vec<Action> {
        let ids = self.ui.selection.clone();
        if ids.is_empty() {
            return Vec::new();
        }
        let mut actions = Vec::new();
        for id in &ids {
            if self.doc.delete_element(id).is_some() {
                actions.push(Action::ElementDeleted { id: *id });
            }
        }
        self.ui.selection.clear();
        actions.push(Action::SelectionChanged(Vec::new()));
        actions.push(Action::RenderNeeded);
        actions
    }

    fn nudge_selection(&mut self, delta: Point) -> Vec<Action> {
        let positions: Vec<(ElementId, Point)> = self
            .ui
            .selection
            .iter()
            .filter_map(|id| self.doc.element(id).map(|el| (*id, el.position().offset(delta))))
            .collect();
        if positions.is_empty() {
            return Vec::new();
        }
        self.doc.move_elements(&positions);
        let mut actions: Vec<Action> = positions
            .into_iter()
            .map(|(id, pos)| Action::ElementUpdated { id, fields: ElementPatch::position(pos) })
            .collect();
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Queries ---

    /// Selected element ids in selection order.
    #[must_use]
    pub fn selection(&self) -> &[ElementId] {
        &self.ui.selection
    }

    /// Guide lines for the drag in progress.
    #[must_use]
    pub fn guides(&self) -> &[SnapGuide] {
        &self.ui.guides
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.doc.element(id)
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        self.doc.template()
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.input, InputState::Dragging(_))
    }
}
