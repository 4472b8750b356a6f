use super::*;
use crate::doc::{ElementKind, ElementPatch, Template};

fn doc_with_boxes(boxes: &[(f64, f64, f64, f64)]) -> (TemplateDoc, Vec<ElementId>) {
    let mut doc = TemplateDoc::new(Template::blank("hit", "test"));
    let mut ids = Vec::new();
    for &(x, y, w, h) in boxes {
        let id = doc.add_element(ElementKind::Text).id;
        let patch = ElementPatch { x: Some(x), y: Some(y), width: Some(w), height: Some(h), ..Default::default() };
        doc.update_element(&id, &patch);
        ids.push(id);
    }
    (doc, ids)
}

#[test]
fn empty_doc_hits_nothing() {
    let doc = TemplateDoc::new(Template::blank("hit", "test"));
    assert_eq!(hit_test(Point::new(10.0, 10.0), &doc), None);
}

#[test]
fn point_inside_hits_element() {
    let (doc, ids) = doc_with_boxes(&[(0.0, 0.0, 100.0, 50.0)]);
    assert_eq!(hit_test(Point::new(50.0, 25.0), &doc), Some(ids[0]));
}

#[test]
fn point_outside_misses() {
    let (doc, _) = doc_with_boxes(&[(0.0, 0.0, 100.0, 50.0)]);
    assert_eq!(hit_test(Point::new(150.0, 25.0), &doc), None);
}

#[test]
fn overlap_prefers_topmost() {
    let (doc, ids) = doc_with_boxes(&[(0.0, 0.0, 100.0, 100.0), (50.0, 50.0, 100.0, 100.0)]);
    assert_eq!(hit_test(Point::new(75.0, 75.0), &doc), Some(ids[1]));
    assert_eq!(hit_test(Point::new(25.0, 25.0), &doc), Some(ids[0]));
}

#[test]
fn zero_size_element_hit_on_its_corner() {
    let (doc, ids) = doc_with_boxes(&[(40.0, 40.0, 0.0, 0.0)]);
    assert_eq!(hit_test(Point::new(40.0, 40.0), &doc), Some(ids[0]));
    assert_eq!(hit_test(Point::new(41.0, 40.0), &doc), None);
}
