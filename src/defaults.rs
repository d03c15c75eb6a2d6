//! Per-kind creation defaults.
//!
//! `create_default` never fails: an unknown subtype gets the generic defaults
//! of its kind, and an unknown type name (only reachable through the
//! string-facing [`create_default_named`]) gets a plain grey box.

#[cfg(test)]
#[path = "defaults_test.rs"]
mod defaults_test;

use uuid::Uuid;

use crate::camera::Point;
use crate::doc::{BorderStyle, Element, ElementKind, ElementStyle, ObjectFit, TextAlign};
use crate::table::TableContent;

/// Content given to a new text element when the caller supplies none.
pub const DEFAULT_TEXT: &str = "New text element";

/// Image source used when an image is added without content.
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/200x150?text=Image";

/// Icon shown when none is named or the name is unknown.
pub const DEFAULT_ICON: &str = "smile";

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// Build a fully populated element of `kind` at `position`.
///
/// `content`, when given, always wins over the kind's default payload.
#[must_use]
pub fn create_default(kind: ElementKind, subtype: Option<&str>, content: Option<&str>, position: Point) -> Element {
    let (width, height, default_content, style) = match kind {
        ElementKind::Text => (200.0, 40.0, DEFAULT_TEXT.to_string(), text_style()),
        ElementKind::Shape => shape_defaults(subtype),
        ElementKind::Line => line_defaults(subtype),
        ElementKind::Icon => (
            60.0,
            60.0,
            subtype.unwrap_or(DEFAULT_ICON).to_string(),
            ElementStyle {
                color: s("#3B82F6"),
                background_color: s("transparent"),
                font_size: s("48px"),
                ..Default::default()
            },
        ),
        ElementKind::Image => (
            200.0,
            150.0,
            PLACEHOLDER_IMAGE.to_string(),
            ElementStyle { border_radius: s("8px"), object_fit: Some(ObjectFit::Cover), ..Default::default() },
        ),
        ElementKind::Table => (
            300.0,
            150.0,
            table_content(),
            ElementStyle {
                background_color: s("#ffffff"),
                border_color: s("#D1D5DB"),
                border_width: s("1px"),
                border_radius: s("8px"),
                ..Default::default()
            },
        ),
    };

    Element {
        id: Uuid::new_v4(),
        kind,
        subtype: subtype.map(str::to_string),
        content: content.map_or(default_content, str::to_string),
        x: position.x,
        y: position.y,
        width,
        height,
        style,
    }
}

/// String-facing variant of [`create_default`] for collaborators that pass
/// type names. Names outside the closed set fall back to a generic box.
#[must_use]
pub fn create_default_named(type_name: &str, subtype: Option<&str>, content: Option<&str>, position: Point) -> Element {
    match ElementKind::from_name(type_name) {
        Some(kind) => create_default(kind, subtype, content, position),
        None => {
            tracing::warn!(type_name, "unknown element type, using generic defaults");
            generic(subtype, content, position)
        }
    }
}

fn generic(subtype: Option<&str>, content: Option<&str>, position: Point) -> Element {
    Element {
        id: Uuid::new_v4(),
        kind: ElementKind::Shape,
        subtype: subtype.map(str::to_string),
        content: content.unwrap_or_default().to_string(),
        x: position.x,
        y: position.y,
        width: 100.0,
        height: 100.0,
        style: ElementStyle {
            background_color: s("#E5E7EB"),
            border_color: s("#9CA3AF"),
            border_width: s("1px"),
            border_radius: s("4px"),
            ..Default::default()
        },
    }
}

fn text_style() -> ElementStyle {
    ElementStyle {
        font_size: s("16px"),
        font_family: s("Inter"),
        font_weight: s("normal"),
        color: s("#000000"),
        background_color: s("transparent"),
        text_align: Some(TextAlign::Left),
        line_height: s("1.5"),
        padding: s("8px"),
        ..Default::default()
    }
}

fn shape_defaults(subtype: Option<&str>) -> (f64, f64, String, ElementStyle) {
    let circle = subtype == Some("circle");
    let radius = match subtype {
        Some("circle") => "50%",
        Some("rectangle") => "8px",
        _ => "0px",
    };
    let mut style = ElementStyle {
        background_color: s("#3B82F6"),
        border_color: s("#1E40AF"),
        border_width: s("2px"),
        border_radius: s(radius),
        ..Default::default()
    };
    if subtype == Some("triangle") {
        style.background_color = s("transparent");
        style.border_color = s("#3B82F6");
        style.border_width = s("0px");
    }
    let width = if circle { 100.0 } else { 150.0 };
    (width, 100.0, String::new(), style)
}

fn line_defaults(subtype: Option<&str>) -> (f64, f64, String, ElementStyle) {
    let dotted = subtype == Some("dotted");
    let height = if subtype == Some("straight") { 2.0 } else { 4.0 };
    let style = ElementStyle {
        background_color: s(if dotted { "transparent" } else { "#000000" }),
        border_color: s(if dotted { "#000000" } else { "transparent" }),
        border_width: s(if dotted { "2px" } else { "0px" }),
        border_style: Some(if dotted { BorderStyle::Dotted } else { BorderStyle::Solid }),
        border_radius: s("0px"),
        ..Default::default()
    };
    (200.0, height, String::new(), style)
}

fn table_content() -> String {
    match TableContent::default().to_content() {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize default table");
            String::new()
        }
    }
}
