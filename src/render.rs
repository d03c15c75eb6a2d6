//! Render model: what the rendering layer should draw for each element.
//!
//! This module never draws. It turns the element collection plus selection
//! state into an ordered list of [`RenderItem`]s, each carrying a
//! [`ContentView`] selected by the element's kind. The host's renderer only
//! has to match on the view.
//!
//! Malformed table payloads become [`ContentView::InvalidTable`] here and are
//! never propagated further.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use serde::Serialize;

use crate::consts::{LAYER_DEFAULT, LAYER_SELECTED};
use crate::doc::{Element, ElementKind, ElementStore};
use crate::selection::{EditTarget, Selection};
use crate::table::{INVALID_TABLE_PLACEHOLDER, TableContent};

/// Icon names the renderer knows how to draw.
pub const KNOWN_ICONS: [&str; 14] = [
    "zap",
    "smile",
    "flag",
    "cloud",
    "moon",
    "sun",
    "star",
    "heart",
    "square",
    "circle",
    "triangle",
    "minus",
    "arrowright",
    "morehorizontal",
];

/// Icon drawn for names outside [`KNOWN_ICONS`].
pub const FALLBACK_ICON: &str = "smile";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
    Triangle,
    Star,
    Heart,
}

impl ShapeKind {
    /// Unknown or missing subtypes draw as a plain rectangle.
    #[must_use]
    pub fn from_subtype(subtype: Option<&str>) -> Self {
        match subtype {
            Some("circle") => Self::Circle,
            Some("triangle") => Self::Triangle,
            Some("star") => Self::Star,
            Some("heart") => Self::Heart,
            _ => Self::Rectangle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    Straight,
    Arrow,
    Dotted,
}

impl LineKind {
    #[must_use]
    pub fn from_subtype(subtype: Option<&str>) -> Self {
        match subtype {
            Some("arrow") => Self::Arrow,
            Some("dotted") => Self::Dotted,
            _ => Self::Straight,
        }
    }
}

/// Resolve an icon name case-insensitively, falling back to [`FALLBACK_ICON`].
#[must_use]
pub fn resolve_icon(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    KNOWN_ICONS.iter().copied().find(|known| *known == lower).unwrap_or(FALLBACK_ICON)
}

/// Tag-selected content view for one element.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum ContentView {
    Text {
        text: String,
        /// Whether the inline caret is open.
        editing: bool,
    },
    Shape {
        shape: ShapeKind,
    },
    Line {
        line: LineKind,
    },
    Icon {
        name: &'static str,
    },
    Image {
        src: String,
    },
    Table {
        table: TableContent,
        /// The cell currently showing an input, if any.
        editing_cell: Option<(usize, usize)>,
    },
    InvalidTable {
        placeholder: &'static str,
    },
}

impl ContentView {
    /// Build the view for `element`. `edit` is the active edit target when
    /// this element is the one being edited.
    #[must_use]
    pub fn for_element(element: &Element, edit: Option<EditTarget>) -> Self {
        let subtype = element.subtype.as_deref();
        match element.kind {
            ElementKind::Text => Self::Text {
                text: element.content.clone(),
                editing: edit == Some(EditTarget::Text),
            },
            ElementKind::Shape => Self::Shape { shape: ShapeKind::from_subtype(subtype) },
            ElementKind::Line => Self::Line { line: LineKind::from_subtype(subtype) },
            ElementKind::Icon => Self::Icon { name: resolve_icon(subtype.unwrap_or(FALLBACK_ICON)) },
            ElementKind::Image => Self::Image { src: element.content.clone() },
            ElementKind::Table => match TableContent::parse(&element.content) {
                Ok(table) => {
                    let editing_cell = match edit {
                        Some(EditTarget::Cell { row, col }) => Some((row, col)),
                        _ => None,
                    };
                    Self::Table { table, editing_cell }
                }
                Err(e) => {
                    tracing::warn!(id = %element.id, error = %e, "malformed table content");
                    Self::InvalidTable { placeholder: INVALID_TABLE_PLACEHOLDER }
                }
            },
        }
    }
}

/// Style controls the floating toolbar offers for an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarControls {
    /// Font family, size, bold/italic/underline/strikethrough, alignment, colours.
    Text,
    /// Fill and border colour, border width, radius.
    Shape,
    /// Replace source, opacity.
    Image,
    None,
}

impl ToolbarControls {
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Text => Self::Text,
            ElementKind::Shape => Self::Shape,
            ElementKind::Image | ElementKind::Icon => Self::Image,
            ElementKind::Line | ElementKind::Table => Self::None,
        }
    }
}

/// What an element kind supports beyond move and resize.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Double-click opens an inline caret.
    pub inline_text: bool,
    /// Clicking a cell of the selected element opens a cell editor.
    pub cell_edit: bool,
    pub toolbar: ToolbarControls,
}

impl Capabilities {
    #[must_use]
    pub fn for_kind(kind: ElementKind) -> Self {
        Self {
            inline_text: kind == ElementKind::Text,
            cell_edit: kind == ElementKind::Table,
            toolbar: ToolbarControls::for_kind(kind),
        }
    }
}

/// One element ready to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderItem<'a> {
    pub element: &'a Element,
    pub selected: bool,
    /// Visual raise; the underlying order is never changed.
    pub layer: u8,
    pub view: ContentView,
}

/// Every element in collection order (bottom first), with its view.
#[must_use]
pub fn render_list<'a>(store: &'a ElementStore, selection: &Selection) -> Vec<RenderItem<'a>> {
    let selected = selection.selected();
    let editing = selection.editing();
    store
        .iter()
        .map(|element| {
            let is_selected = selected == Some(element.id);
            let edit = editing.and_then(|(id, target)| (id == element.id).then_some(target));
            RenderItem {
                element,
                selected: is_selected,
                layer: if is_selected { LAYER_SELECTED } else { LAYER_DEFAULT },
                view: ContentView::for_element(element, edit),
            }
        })
        .collect()
}
