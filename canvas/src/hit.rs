#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::Point;
use crate::doc::{ElementId, TemplateDoc};

/// Return the topmost element whose box contains `page_pt`.
///
/// Elements are tested in reverse paint order, so the one drawn last wins
/// where boxes overlap.
#[must_use]
pub fn hit_test(page_pt: Point, doc: &TemplateDoc) -> Option<ElementId> {
    doc.elements()
        .iter()
        .rev()
        .find(|el| el.contains(page_pt))
        .map(|el| el.id)
}
