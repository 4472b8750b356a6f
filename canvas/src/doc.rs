//! Document model: templates, pages, placed elements, and the editable store.
//!
//! This module defines the record types that make up a template (`Template`,
//! `Page`, `Element` and its `ElementKind` tag), sparse-update types for
//! incremental edits (`ElementPatch`, `PagePatch`), the property-editor entry
//! point that turns raw text into typed values (`ElementProperty`), and the
//! owned store that every mutation goes through (`TemplateDoc`).
//!
//! All records serialize to the camelCase schema the template list is stored
//! in. The engine reads element geometry from `TemplateDoc` for hit-testing and
//! snapping, and writes drag results back through `move_elements`.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::{
    DEFAULT_BACKGROUND_OPACITY, DEFAULT_COLOR, DEFAULT_FONT_FAMILY, NEW_ELEMENT_OFFSET, PAGE_HEIGHT, PAGE_WIDTH,
    SIGNATURE_FONT_FAMILY, STAMP_COLOR,
};

/// Unique identifier for a placed element.
pub type ElementId = Uuid;

/// Unique identifier for a template.
pub type TemplateId = Uuid;

/// The kind of a placed element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Literal text.
    Text,
    /// A `{{Name}}` placeholder resolved by the document generator.
    Field,
    /// An image; `content` holds a data URI or URL.
    Logo,
    /// Display text rendered in a script-style font.
    Signature,
    /// Short text inside a circular badge drawn in `color`.
    Stamp,
    /// A QR symbol; `content` is the encoded payload.
    Qrcode,
}

impl ElementKind {
    /// Every kind, in the order the add-element actions are offered.
    pub const ALL: [ElementKind; 6] = [
        ElementKind::Text,
        ElementKind::Field,
        ElementKind::Logo,
        ElementKind::Signature,
        ElementKind::Stamp,
        ElementKind::Qrcode,
    ];

    /// Schema name of the kind (`"text"`, `"qrcode"`, ...).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Field => "field",
            Self::Logo => "logo",
            Self::Signature => "signature",
            Self::Stamp => "stamp",
            Self::Qrcode => "qrcode",
        }
    }

    /// Whether `content` holds an image reference rather than text.
    #[must_use]
    pub fn is_image(self) -> bool {
        matches!(self, Self::Logo)
    }
}

/// Font weight of an element's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim() {
            "normal" => Some(Self::Normal),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }
}

/// Horizontal text alignment inside an element's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        match raw.trim() {
            "left" => Some(Self::Left),
            "center" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }
}

/// Page orientation. Derived from the page's dimensions, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// A placed element as stored in a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Unique identifier within the template.
    pub id: ElementId,
    /// Variant tag; decides how `content` is interpreted.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Left edge in page units.
    pub x: f64,
    /// Top edge in page units.
    pub y: f64,
    /// Box width in page units.
    pub width: f64,
    /// Box height in page units.
    pub height: f64,
    pub font_family: String,
    pub font_size: f64,
    pub font_weight: FontWeight,
    /// Hex color; text color, and border color for stamps.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    /// Literal text, placeholder token, image reference, or QR payload.
    pub content: String,
}

impl Element {
    /// Build an element of `kind` with its type-specific defaults, placed at
    /// the standard new-element offset.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self::with_id(Uuid::new_v4(), kind)
    }

    /// Same as [`Element::new`] with a caller-chosen id.
    #[must_use]
    fn with_id(id: ElementId, kind: ElementKind) -> Self {
        let (width, height, content) = match kind {
            ElementKind::Text => (150.0, 20.0, "New Text"),
            ElementKind::Field => (150.0, 20.0, "{{FieldName}}"),
            ElementKind::Logo => (80.0, 80.0, ""),
            ElementKind::Signature => (150.0, 40.0, "Signature"),
            ElementKind::Stamp => (80.0, 80.0, "APPROVED"),
            ElementKind::Qrcode => (80.0, 80.0, "https://portal.example/verify"),
        };
        let font_family = match kind {
            ElementKind::Signature => SIGNATURE_FONT_FAMILY,
            _ => DEFAULT_FONT_FAMILY,
        };
        let font_size = match kind {
            ElementKind::Signature => 20.0,
            ElementKind::Stamp => 10.0,
            _ => 12.0,
        };
        let font_weight = match kind {
            ElementKind::Stamp => FontWeight::Bold,
            _ => FontWeight::Normal,
        };
        let color = match kind {
            ElementKind::Stamp => STAMP_COLOR,
            _ => DEFAULT_COLOR,
        };
        let text_align = match kind {
            ElementKind::Text | ElementKind::Field => Some(TextAlign::Left),
            _ => None,
        };
        Self {
            id,
            kind,
            x: NEW_ELEMENT_OFFSET,
            y: NEW_ELEMENT_OFFSET,
            width,
            height,
            font_family: font_family.to_owned(),
            font_size,
            font_weight,
            color: color.to_owned(),
            text_align,
            content: content.to_owned(),
        }
    }

    /// Top-left corner.
    #[must_use]
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Whether `pt` lies inside the box, edges inclusive. Negative sizes are
    /// treated as extending left/up from the stored corner.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        let (left, right) = ordered(self.x, self.x + self.width);
        let (top, bottom) = ordered(self.y, self.y + self.height);
        pt.x >= left && pt.x <= right && pt.y >= top && pt.y <= bottom
    }
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl ElementPatch {
    /// Patch that only moves the element.
    #[must_use]
    pub fn position(pt: Point) -> Self {
        Self { x: Some(pt.x), y: Some(pt.y), ..Default::default() }
    }

    /// Patch that only replaces `content`.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    /// Returns `true` when no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn apply_to(&self, el: &mut Element) {
        if let Some(x) = self.x {
            el.x = x;
        }
        if let Some(y) = self.y {
            el.y = y;
        }
        if let Some(w) = self.width {
            el.width = w;
        }
        if let Some(h) = self.height {
            el.height = h;
        }
        if let Some(ref family) = self.font_family {
            el.font_family.clone_from(family);
        }
        if let Some(size) = self.font_size {
            el.font_size = size;
        }
        if let Some(weight) = self.font_weight {
            el.font_weight = weight;
        }
        if let Some(ref color) = self.color {
            el.color.clone_from(color);
        }
        if let Some(align) = self.text_align {
            el.text_align = Some(align);
        }
        if let Some(ref content) = self.content {
            el.content.clone_from(content);
        }
    }
}

/// An editable element property, named as in the element schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementProperty {
    X,
    Y,
    Width,
    Height,
    FontFamily,
    FontSize,
    FontWeight,
    Color,
    TextAlign,
    Content,
}

impl ElementProperty {
    /// Parse a schema field name (`"fontSize"`, `"x"`, ...).
    #[must_use]
    pub fn from_name(raw: &str) -> Option<Self> {
        let prop = match raw {
            "x" => Self::X,
            "y" => Self::Y,
            "width" => Self::Width,
            "height" => Self::Height,
            "fontFamily" => Self::FontFamily,
            "fontSize" => Self::FontSize,
            "fontWeight" => Self::FontWeight,
            "color" => Self::Color,
            "textAlign" => Self::TextAlign,
            "content" => Self::Content,
            _ => return None,
        };
        Some(prop)
    }

    /// Whether the property holds a number.
    #[must_use]
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::X | Self::Y | Self::Width | Self::Height | Self::FontSize)
    }

    /// Turn raw editor input into a patch for this property.
    ///
    /// Numeric input goes through [`parse_number`]. Unknown weights and
    /// alignments produce an empty patch.
    #[must_use]
    pub fn patch_from_input(self, raw: &str) -> ElementPatch {
        let mut patch = ElementPatch::default();
        match self {
            Self::X => patch.x = Some(parse_number(raw)),
            Self::Y => patch.y = Some(parse_number(raw)),
            Self::Width => patch.width = Some(parse_number(raw)),
            Self::Height => patch.height = Some(parse_number(raw)),
            Self::FontSize => patch.font_size = Some(parse_number(raw)),
            Self::FontFamily => patch.font_family = Some(raw.to_owned()),
            Self::Color => patch.color = Some(raw.to_owned()),
            Self::Content => patch.content = Some(raw.to_owned()),
            Self::FontWeight => patch.font_weight = FontWeight::from_name(raw),
            Self::TextAlign => patch.text_align = TextAlign::from_name(raw),
        }
        patch
    }
}

/// Parse numeric editor input. Empty, malformed, and non-finite input all
/// become `0.0`.
#[must_use]
pub fn parse_number(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// The page every element is placed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub width: f64,
    pub height: f64,
    /// Data URI or URL drawn behind all elements.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    /// Background opacity in `[0, 1]`.
    pub background_opacity: f64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            width: PAGE_WIDTH,
            height: PAGE_HEIGHT,
            background_image: None,
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
        }
    }
}

impl Page {
    /// Landscape when wider than tall, portrait otherwise.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        if self.width > self.height { Orientation::Landscape } else { Orientation::Portrait }
    }
}

/// Sparse update for the page. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_opacity: Option<f64>,
}

/// A document template: one page and its ordered elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub name: String,
    pub category: String,
    pub page: Page,
    /// Paint order; later elements are drawn on top.
    pub elements: Vec<Element>,
}

impl Template {
    /// A new template with a fresh id, the default portrait page, and no elements.
    #[must_use]
    pub fn blank(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            category: category.into(),
            page: Page::default(),
            elements: Vec::new(),
        }
    }
}

/// The open template. Every read and write of page and elements goes through here.
///
/// The store owns its `Template` outright, so the persisted copy it was cloned
/// from is untouched until the caller hands the result back.
#[derive(Debug, Clone)]
pub struct TemplateDoc {
    template: Template,
}

impl TemplateDoc {
    #[must_use]
    pub fn new(template: Template) -> Self {
        Self { template }
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Consume the store, returning the edited template.
    #[must_use]
    pub fn into_template(self) -> Template {
        self.template
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.template.page
    }

    /// Elements in paint order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.template.elements
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.template.elements.iter().find(|el| el.id == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.template.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.elements.is_empty()
    }

    /// Rename the template.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.template.name = name.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.template.category = category.into();
    }

    /// Create an element of `kind` with its defaults and put it on top.
    pub fn add_element(&mut self, kind: ElementKind) -> &Element {
        let index = self.template.elements.len();
        self.template.elements.push(Element::new(kind));
        &self.template.elements[index]
    }

    /// Merge `patch` into the element with `id`. Returns false if it doesn't exist.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> bool {
        let Some(el) = self.template.elements.iter_mut().find(|el| el.id == *id) else {
            return false;
        };
        patch.apply_to(el);
        true
    }

    /// Remove an element, returning it if it was present.
    pub fn delete_element(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.template.elements.iter().position(|el| el.id == *id)?;
        Some(self.template.elements.remove(index))
    }

    /// Write a batch of positions. Ids that no longer exist are skipped.
    /// Returns the number of elements moved.
    pub fn move_elements(&mut self, positions: &[(ElementId, Point)]) -> usize {
        let mut moved = 0;
        for (id, pos) in positions {
            if let Some(el) = self.template.elements.iter_mut().find(|el| el.id == *id) {
                el.x = pos.x;
                el.y = pos.y;
                moved += 1;
            }
        }
        moved
    }

    /// Merge `patch` into the page. Opacity is clamped into `[0, 1]`.
    pub fn set_page(&mut self, patch: &PagePatch) {
        let page = &mut self.template.page;
        if let Some(w) = patch.width {
            page.width = w;
        }
        if let Some(h) = patch.height {
            page.height = h;
        }
        if let Some(ref image) = patch.background_image {
            page.background_image = Some(image.clone());
        }
        if let Some(opacity) = patch.background_opacity {
            page.background_opacity = if opacity.is_nan() { 0.0 } else { opacity.clamp(0.0, 1.0) };
        }
    }

    /// Remove the page background image.
    pub fn clear_background(&mut self) {
        self.template.page.background_image = None;
    }

    /// Resize the page to the A4 pair for `orientation`: 595×842 portrait,
    /// 842×595 landscape. Returns true if the size changed.
    pub fn set_orientation(&mut self, orientation: Orientation) -> bool {
        let (width, height) = match orientation {
            Orientation::Portrait => (PAGE_WIDTH, PAGE_HEIGHT),
            Orientation::Landscape => (PAGE_HEIGHT, PAGE_WIDTH),
        };
        let page = &mut self.template.page;
        if (page.width, page.height) == (width, height) {
            return false;
        }
        page.width = width;
        page.height = height;
        true
    }
}
