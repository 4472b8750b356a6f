#![allow(clippy::float_cmp)]

use template_canvas::camera::Point;
use template_canvas::doc::Template;
use template_canvas::input::{Button, Modifiers};
use uuid::Uuid;

use super::*;

fn core() -> EngineCore {
    EngineCore::new(Template::blank("Payroll slip", "payroll"))
}

#[test]
fn empty_selection_shows_page_controls() {
    let engine = core();
    let PanelView::Page(controls) = panel_for(&engine) else {
        panic!("expected page controls");
    };
    assert_eq!(controls.orientation, Orientation::Portrait);
    assert!(!controls.has_background);
    assert_eq!(controls.background_opacity, 1.0);
    assert_eq!(controls.add_actions, ElementKind::ALL.to_vec());
}

#[test]
fn landscape_page_reports_landscape() {
    let mut engine = core();
    engine.set_orientation(Orientation::Landscape);
    let PanelView::Page(controls) = panel_for(&engine) else {
        panic!("expected page controls");
    };
    assert_eq!(controls.orientation, Orientation::Landscape);
}

#[test]
fn single_selection_shows_element_editor() {
    let mut engine = core();
    engine.add_element(ElementKind::Field);
    let id = engine.selection()[0];
    let PanelView::Element(controls) = panel_for(&engine) else {
        panic!("expected element controls");
    };
    assert_eq!(controls.id, id);
    assert_eq!(controls.kind, ElementKind::Field);
    assert_eq!(controls.content, ContentEditor::Text);
    assert!(controls.properties.contains(&ElementProperty::TextAlign));
    assert!(controls.properties.contains(&ElementProperty::FontSize));
}

#[test]
fn multiple_selection_shows_count() {
    let mut engine = core();
    engine.add_element(ElementKind::Text);
    let text = engine.selection()[0];
    engine.set_property(&text, ElementProperty::X, "300");
    engine.add_element(ElementKind::Logo);

    let shift = Modifiers { shift: true, ..Default::default() };
    engine.on_pointer_down(Point::new(310.0, 25.0), Button::Primary, shift);
    engine.on_pointer_up(Point::new(310.0, 25.0), Button::Primary, shift);

    assert_eq!(engine.selection().len(), 2);
    assert_eq!(panel_for(&engine), PanelView::Multiple { count: 2 });
}

#[test]
fn deleting_selected_element_returns_to_page() {
    let mut engine = core();
    engine.add_element(ElementKind::Stamp);
    let id = engine.selection()[0];
    engine.delete_element(&id);
    assert!(matches!(panel_for(&engine), PanelView::Page(_)));
}

#[test]
fn logo_gets_image_upload_and_no_font_or_color() {
    let controls = element_controls(Uuid::new_v4(), ElementKind::Logo);
    assert_eq!(controls.content, ContentEditor::ImageUpload);
    assert_eq!(
        controls.properties,
        vec![ElementProperty::X, ElementProperty::Y, ElementProperty::Width, ElementProperty::Height]
    );
}

#[test]
fn qrcode_edits_payload_as_text_without_font() {
    let controls = element_controls(Uuid::new_v4(), ElementKind::Qrcode);
    assert_eq!(controls.content, ContentEditor::Text);
    assert!(!controls.properties.contains(&ElementProperty::FontFamily));
    assert!(!controls.properties.contains(&ElementProperty::Color));
}

#[test]
fn stamp_shows_color_only() {
    let controls = element_controls(Uuid::new_v4(), ElementKind::Stamp);
    let style: Vec<_> = controls.properties.iter().filter(|p| !p.is_numeric()).copied().collect();
    assert_eq!(style, vec![ElementProperty::Color]);
}

#[test]
fn signature_has_font_but_no_alignment() {
    let controls = element_controls(Uuid::new_v4(), ElementKind::Signature);
    assert!(controls.properties.contains(&ElementProperty::FontFamily));
    assert!(!controls.properties.contains(&ElementProperty::TextAlign));
}

#[test]
fn geometry_always_comes_first() {
    for kind in ElementKind::ALL {
        let controls = element_controls(Uuid::new_v4(), kind);
        assert_eq!(
            &controls.properties[..4],
            &[ElementProperty::X, ElementProperty::Y, ElementProperty::Width, ElementProperty::Height]
        );
    }
}
