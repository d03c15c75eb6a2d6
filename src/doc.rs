//! Element model: canvas elements, their sparse style, and the ordered store.
//!
//! This module defines what sits on the slide (`Element`, `ElementKind`), the
//! sparse style bag every element carries (`ElementStyle`), the partial-update
//! type used by the geometry engine and by style widgets (`PartialElement`),
//! and the runtime collection that owns all live elements (`ElementStore`).
//!
//! Updates are immutable: [`Element::patched`] returns a new value. Top-level
//! fields are replaced when present in the patch and `style` is merged key by
//! key, so independent style edits compose without clobbering each other.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::{Point, Rect};

/// Unique identifier for an element. Assigned at creation, never reused.
pub type ElementId = Uuid;

/// The closed set of element variants. This is the render discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Free text, editable inline.
    Text,
    /// Filled geometric shape; `subtype` picks the outline.
    Shape,
    /// Horizontal rule; `subtype` picks straight, arrow or dotted.
    Line,
    /// Named pictogram; `subtype` is the icon name.
    Icon,
    /// Bitmap from a URL or data URI held in `content`.
    Image,
    /// Grid of strings serialized into `content`.
    Table,
}

impl ElementKind {
    /// Every variant, in toolbar order.
    pub const ALL: [ElementKind; 6] = [Self::Text, Self::Shape, Self::Line, Self::Icon, Self::Image, Self::Table];

    /// Parse a lowercase type name. Returns `None` for names outside the closed set.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "shape" => Some(Self::Shape),
            "line" => Some(Self::Line),
            "icon" => Some(Self::Icon),
            "image" => Some(Self::Image),
            "table" => Some(Self::Table),
            _ => None,
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Shape => "shape",
            Self::Line => "line",
            Self::Icon => "icon",
            Self::Image => "image",
            Self::Table => "table",
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// CSS-style border line pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    Solid,
    Dashed,
    Dotted,
    Double,
    Groove,
    Ridge,
    Inset,
    Outset,
    None,
}

/// How image content fills its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    Cover,
    Contain,
    Fill,
    ScaleDown,
    None,
}

/// Sparse visual attributes. Unset fields fall back to per-kind rendering
/// defaults. Keys outside the typed set are kept verbatim in `extra`.
///
/// The same type doubles as a style patch: present keys override, absent
/// keys are preserved (see [`ElementStyle::merged`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_style: Option<BorderStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_fit: Option<ObjectFit>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ElementStyle {
    /// Returns a new style where every key present in `patch` overrides the
    /// corresponding key of `self` and every other key is preserved.
    #[must_use]
    pub fn merged(&self, patch: &ElementStyle) -> ElementStyle {
        fn pick<T: Clone>(base: &Option<T>, over: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        let mut extra = self.extra.clone();
        extra.extend(patch.extra.iter().map(|(k, v)| (k.clone(), v.clone())));

        ElementStyle {
            font_size: pick(&self.font_size, &patch.font_size),
            font_family: pick(&self.font_family, &patch.font_family),
            font_weight: pick(&self.font_weight, &patch.font_weight),
            font_style: pick(&self.font_style, &patch.font_style),
            text_decoration: pick(&self.text_decoration, &patch.text_decoration),
            color: pick(&self.color, &patch.color),
            background_color: pick(&self.background_color, &patch.background_color),
            text_align: pick(&self.text_align, &patch.text_align),
            line_height: pick(&self.line_height, &patch.line_height),
            border_color: pick(&self.border_color, &patch.border_color),
            border_width: pick(&self.border_width, &patch.border_width),
            border_radius: pick(&self.border_radius, &patch.border_radius),
            border_style: pick(&self.border_style, &patch.border_style),
            opacity: pick(&self.opacity, &patch.opacity),
            padding: pick(&self.padding, &patch.padding),
            object_fit: pick(&self.object_fit, &patch.object_fit),
            extra,
        }
    }

    /// Patch flipping `fontWeight` between bold and normal.
    #[must_use]
    pub fn toggle_bold(&self) -> ElementStyle {
        let next = if self.font_weight.as_deref() == Some("bold") { "normal" } else { "bold" };
        ElementStyle { font_weight: Some(next.to_string()), ..Default::default() }
    }

    /// Patch flipping `fontStyle` between italic and normal.
    #[must_use]
    pub fn toggle_italic(&self) -> ElementStyle {
        let next = if self.font_style.as_deref() == Some("italic") { "normal" } else { "italic" };
        ElementStyle { font_style: Some(next.to_string()), ..Default::default() }
    }

    /// Patch flipping `textDecoration` between `decoration` and none.
    #[must_use]
    pub fn toggle_decoration(&self, decoration: &str) -> ElementStyle {
        let next = if self.text_decoration.as_deref() == Some(decoration) { "none" } else { decoration };
        ElementStyle { text_decoration: Some(next.to_string()), ..Default::default() }
    }
}

/// A placeable, styleable object on the slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Unique identifier for this element.
    pub id: ElementId,
    /// Variant tag.
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Refines `kind` (shape outline, line style, icon name).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Variant-dependent payload: text, image source, serialized table, or empty.
    pub content: String,
    /// Left edge in canvas pixels.
    pub x: f64,
    /// Top edge in canvas pixels.
    pub y: f64,
    /// Width in canvas pixels.
    pub width: f64,
    /// Height in canvas pixels.
    pub height: f64,
    #[serde(default)]
    pub style: ElementStyle,
}

impl Element {
    /// Bounding box in canvas coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Top-left corner in canvas coordinates.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns a new element with `patch` applied: present top-level fields
    /// replace the current ones, `style` is merged key by key. The id and
    /// kind are never touched.
    #[must_use]
    pub fn patched(&self, patch: &PartialElement) -> Element {
        Element {
            id: self.id,
            kind: self.kind,
            subtype: patch.subtype.clone().or_else(|| self.subtype.clone()),
            content: patch.content.clone().unwrap_or_else(|| self.content.clone()),
            x: patch.x.unwrap_or(self.x),
            y: patch.y.unwrap_or(self.y),
            width: patch.width.unwrap_or(self.width),
            height: patch.height.unwrap_or(self.height),
            style: match &patch.style {
                Some(style) => self.style.merged(style),
                None => self.style.clone(),
            },
        }
    }
}

/// Sparse update for an element. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialElement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Style keys to merge into the element's style.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<ElementStyle>,
}

impl PartialElement {
    /// Patch that only moves the element.
    #[must_use]
    pub fn position(x: f64, y: f64) -> Self {
        Self { x: Some(x), y: Some(y), ..Default::default() }
    }

    /// Patch that replaces the whole geometry.
    #[must_use]
    pub fn geometry(rect: Rect) -> Self {
        Self {
            x: Some(rect.x),
            y: Some(rect.y),
            width: Some(rect.width),
            height: Some(rect.height),
            ..Default::default()
        }
    }

    /// Patch that only replaces the content payload.
    #[must_use]
    pub fn content(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()), ..Default::default() }
    }

    /// Patch that only merges style keys.
    #[must_use]
    pub fn style(style: ElementStyle) -> Self {
        Self { style: Some(style), ..Default::default() }
    }

    /// Copy with present geometry fields held to `x, y >= 0` and
    /// `width, height >= min_size`. Absent fields stay absent.
    #[must_use]
    pub fn clamped(&self, min_size: f64) -> Self {
        Self {
            x: self.x.map(|v| v.max(0.0)),
            y: self.y.map(|v| v.max(0.0)),
            width: self.width.map(|v| v.max(min_size)),
            height: self.height.map(|v| v.max(min_size)),
            ..self.clone()
        }
    }
}

/// Ordered in-memory collection of elements. Order is z-order: later
/// elements are drawn on top.
#[derive(Debug, Clone, Default)]
pub struct ElementStore {
    elements: Vec<Element>,
}

impl ElementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Append an element on top of all others. An element whose id is
    /// already present replaces the existing one in place.
    pub fn push(&mut self, element: Element) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(slot) => *slot = element,
            None => self.elements.push(element),
        }
    }

    /// Return a reference to an element by id.
    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == *id)
    }

    /// Replace the element with `id` by its patched copy. Returns the new
    /// value, or `None` if no such element exists.
    pub fn apply_patch(&mut self, id: &ElementId, patch: &PartialElement) -> Option<&Element> {
        let slot = self.elements.iter_mut().find(|e| e.id == *id)?;
        *slot = slot.patched(patch);
        Some(slot)
    }

    /// All elements in z-order (bottom first).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter()
    }

    /// Number of elements currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the store contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
