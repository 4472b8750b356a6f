//! Alignment snapping for dragged elements.
//!
//! A dragged box snaps to a stationary box when one of its three checkpoints
//! on an axis (leading edge, center, trailing edge) comes within the threshold
//! of the matching checkpoint on the stationary box. X and Y are handled
//! independently. Within one stationary box the checks run leading, center,
//! trailing against the progressively corrected position, so the last match
//! wins; every match still contributes a guide line.
//!
//! Guides span the union of both boxes on the other axis, measured at the
//! final corrected position.

#[cfg(test)]
#[path = "snap_test.rs"]
mod snap_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::Element;

/// An axis-aligned box in page units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl From<&Element> for Bounds {
    fn from(el: &Element) -> Self {
        Self { x: el.x, y: el.y, width: el.width, height: el.height }
    }
}

/// A guide line to draw while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "orientation", rename_all = "lowercase")]
pub enum SnapGuide {
    /// Vertical line at `x`, spanning `[y, y + length]`.
    Vertical { x: f64, y: f64, length: f64 },
    /// Horizontal line at `y`, spanning `[x, x + length]`.
    Horizontal { y: f64, x: f64, length: f64 },
}

/// Corrected position and the guides that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapResult {
    pub position: Point,
    pub guides: Vec<SnapGuide>,
}

impl SnapResult {
    #[must_use]
    pub fn is_snapped(&self) -> bool {
        !self.guides.is_empty()
    }
}

/// Snap a box of `width` x `height` whose top-left is at `candidate` against
/// every box in `statics`.
#[must_use]
pub fn snap_position<I>(candidate: Point, width: f64, height: f64, statics: I, threshold: f64) -> SnapResult
where
    I: IntoIterator<Item = Bounds>,
{
    let statics: Vec<Bounds> = statics.into_iter().collect();

    let (x, x_hits) = snap_axis(candidate.x, width, statics.iter().map(|s| (s.x, s.width)), threshold);
    let (y, y_hits) = snap_axis(candidate.y, height, statics.iter().map(|s| (s.y, s.height)), threshold);

    let mut guides = Vec::with_capacity(x_hits.len() + y_hits.len());
    for (line_x, index) in x_hits {
        let s = &statics[index];
        let (top, bottom) = union_span((y, height), (s.y, s.height));
        guides.push(SnapGuide::Vertical { x: line_x, y: top, length: bottom - top });
    }
    for (line_y, index) in y_hits {
        let s = &statics[index];
        let (left, right) = union_span((x, width), (s.x, s.width));
        guides.push(SnapGuide::Horizontal { y: line_y, x: left, length: right - left });
    }

    SnapResult { position: Point::new(x, y), guides }
}

/// One axis of [`snap_position`]. Returns the corrected start and, for each
/// match, the aligned coordinate and the index of the static box it came from.
fn snap_axis<I>(start: f64, size: f64, statics: I, threshold: f64) -> (f64, Vec<(f64, usize)>)
where
    I: Iterator<Item = (f64, f64)>,
{
    let offsets = [0.0, size / 2.0, size];
    let mut pos = start;
    let mut hits = Vec::new();

    for (index, (s_start, s_size)) in statics.enumerate() {
        let targets = [s_start, s_start + s_size / 2.0, s_start + s_size];
        for (target, offset) in targets.into_iter().zip(offsets) {
            let diff = target - (pos + offset);
            if diff.abs() < threshold {
                pos += diff;
                hits.push((target, index));
            }
        }
    }

    (pos, hits)
}

fn union_span(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    let lo = a.0.min(a.0 + a.1).min(b.0).min(b.0 + b.1);
    let hi = a.0.max(a.0 + a.1).max(b.0).max(b.0 + b.1);
    (lo, hi)
}
