#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use serde::{Deserialize, Serialize};

use crate::camera::{Point, Rect, Viewport};
use crate::doc::{ElementId, ElementStore};

/// One of the eight resize handles around a selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeHandle {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [Self::N, Self::Ne, Self::E, Self::Se, Self::S, Self::Sw, Self::W, Self::Nw];

    /// Parse a handle name such as `"se"`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "n" => Some(Self::N),
            "ne" => Some(Self::Ne),
            "e" => Some(Self::E),
            "se" => Some(Self::Se),
            "s" => Some(Self::S),
            "sw" => Some(Self::Sw),
            "w" => Some(Self::W),
            "nw" => Some(Self::Nw),
            _ => None,
        }
    }

    #[must_use]
    pub fn touches_top(self) -> bool {
        matches!(self, Self::N | Self::Ne | Self::Nw)
    }

    #[must_use]
    pub fn touches_bottom(self) -> bool {
        matches!(self, Self::S | Self::Se | Self::Sw)
    }

    #[must_use]
    pub fn touches_left(self) -> bool {
        matches!(self, Self::W | Self::Nw | Self::Sw)
    }

    #[must_use]
    pub fn touches_right(self) -> bool {
        matches!(self, Self::E | Self::Ne | Self::Se)
    }

    /// Canvas-space centre of this handle on `bounds`.
    #[must_use]
    pub fn position(self, bounds: Rect) -> Point {
        let x = if self.touches_left() {
            bounds.x
        } else if self.touches_right() {
            bounds.right()
        } else {
            bounds.x + bounds.width / 2.0
        };
        let y = if self.touches_top() {
            bounds.y
        } else if self.touches_bottom() {
            bounds.bottom()
        } else {
            bounds.y + bounds.height / 2.0
        };
        Point::new(x, y)
    }
}

/// Which part of an element was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitPart {
    Body,
    Handle(ResizeHandle),
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub element_id: ElementId,
    pub part: HitPart,
}

/// Find what lies under `canvas_pt`.
///
/// The selected element is drawn raised, so its handles and then its body
/// are tested first. The remaining elements are tested top-down in
/// collection order. Handle hit squares are `handle_radius_px` screen pixels
/// in half extent regardless of zoom.
#[must_use]
pub fn hit_test(
    canvas_pt: Point,
    store: &ElementStore,
    viewport: &Viewport,
    selected: Option<ElementId>,
    handle_radius_px: f64,
) -> Option<Hit> {
    let selected_element = selected.and_then(|id| store.get(&id));

    if let Some(element) = selected_element {
        let radius = viewport.screen_dist_to_canvas(handle_radius_px);
        let bounds = element.bounds();
        let handle = ResizeHandle::ALL.into_iter().find(|handle| {
            let centre = handle.position(bounds);
            (canvas_pt.x - centre.x).abs() <= radius && (canvas_pt.y - centre.y).abs() <= radius
        });
        if let Some(handle) = handle {
            return Some(Hit { element_id: element.id, part: HitPart::Handle(handle) });
        }
        if bounds.contains(canvas_pt) {
            return Some(Hit { element_id: element.id, part: HitPart::Body });
        }
    }

    store
        .iter()
        .rev()
        .find(|e| Some(e.id) != selected && e.bounds().contains(canvas_pt))
        .map(|e| Hit { element_id: e.id, part: HitPart::Body })
}
