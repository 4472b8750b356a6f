//! Properties panel descriptor.
//!
//! The panel itself is drawn by the host. This module decides *what* it shows
//! for the current selection: page controls when nothing is selected, a
//! per-type property editor for exactly one element, and a count for several
//! (bulk edits are not supported, only bulk moves).

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use template_canvas::doc::{ElementId, ElementKind, ElementProperty, Orientation, Page};
use template_canvas::engine::EngineCore;

/// What the panel shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelView {
    Page(PageControls),
    Element(ElementControls),
    Multiple { count: usize },
}

/// Page-level controls shown with an empty selection.
#[derive(Debug, Clone, PartialEq)]
pub struct PageControls {
    pub orientation: Orientation,
    pub has_background: bool,
    pub background_opacity: f64,
    /// One add-element action per kind.
    pub add_actions: Vec<ElementKind>,
}

/// How an element's `content` is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentEditor {
    /// Free text (literal text, field token, signature, stamp text, QR payload).
    Text,
    /// Image file upload producing a data URI.
    ImageUpload,
}

/// Controls for a single selected element.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementControls {
    pub id: ElementId,
    pub kind: ElementKind,
    pub content: ContentEditor,
    /// Editable properties in display order; geometry first.
    pub properties: Vec<ElementProperty>,
}

/// Describe the panel for the engine's current selection.
#[must_use]
pub fn panel_for(engine: &EngineCore) -> PanelView {
    match engine.selection() {
        [] => PanelView::Page(page_controls(&engine.template().page)),
        [id] => match engine.element(id) {
            Some(el) => PanelView::Element(element_controls(*id, el.kind)),
            None => PanelView::Page(page_controls(&engine.template().page)),
        },
        many => PanelView::Multiple { count: many.len() },
    }
}

fn page_controls(page: &Page) -> PageControls {
    PageControls {
        orientation: page.orientation(),
        has_background: page.background_image.is_some(),
        background_opacity: page.background_opacity,
        add_actions: ElementKind::ALL.to_vec(),
    }
}

/// Controls for one element of `kind`.
#[must_use]
pub fn element_controls(id: ElementId, kind: ElementKind) -> ElementControls {
    let content = if kind.is_image() { ContentEditor::ImageUpload } else { ContentEditor::Text };

    let mut properties = vec![ElementProperty::X, ElementProperty::Y, ElementProperty::Width, ElementProperty::Height];
    if shows_font(kind) {
        properties.extend([ElementProperty::FontFamily, ElementProperty::FontSize, ElementProperty::FontWeight]);
    }
    if shows_color(kind) {
        properties.push(ElementProperty::Color);
    }
    if matches!(kind, ElementKind::Text | ElementKind::Field) {
        properties.push(ElementProperty::TextAlign);
    }

    ElementControls { id, kind, content, properties }
}

fn shows_font(kind: ElementKind) -> bool {
    !matches!(kind, ElementKind::Logo | ElementKind::Qrcode | ElementKind::Stamp)
}

fn shows_color(kind: ElementKind) -> bool {
    !matches!(kind, ElementKind::Logo | ElementKind::Qrcode)
}
