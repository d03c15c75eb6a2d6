//! Geometry engine: pure functions turning pointer positions into new
//! element geometry or viewport state.
//!
//! Nothing here touches the element store or the selection. Every function
//! is deterministic: the same inputs always produce the same output, so a
//! caller may re-apply the latest pointer position as often as it likes.
//!
//! Element math works in canvas coordinates; the host converts container
//! pointer positions with the viewport before calling in. Pan and zoom work
//! in container coordinates.

#[cfg(test)]
#[path = "geometry_test.rs"]
mod geometry_test;

use crate::camera::{Point, Rect, Viewport};
use crate::config::ZoomLimits;
use crate::consts::ZOOM_DEFAULT_PERCENT;
use crate::hit::ResizeHandle;

// =============================================================================
// MOVE
// =============================================================================

/// Offset between the pointer and the element origin, captured once when a
/// drag starts so the element does not jump to the cursor.
#[must_use]
pub fn grab_offset(pointer: Point, origin: Point) -> Point {
    Point::new(pointer.x - origin.x, pointer.y - origin.y)
}

/// New element origin for a drag. Both coordinates are clamped to `>= 0`.
#[must_use]
pub fn drag_to(pointer: Point, grab: Point) -> Point {
    Point::new((pointer.x - grab.x).max(0.0), (pointer.y - grab.y).max(0.0))
}

// =============================================================================
// RESIZE
// =============================================================================

/// New geometry when `handle` is dragged to `pointer`.
///
/// `bounds` is the element's live bounding box. Edges on the bottom/right
/// follow the pointer directly. Edges on the top/left move by
/// `edge - pointer` while the opposite edge stays put. Width and height
/// never drop below `min_size` and the origin never goes negative.
#[must_use]
pub fn resize(handle: ResizeHandle, bounds: Rect, pointer: Point, min_size: f64) -> Rect {
    let (x, width) = if handle.touches_right() {
        (bounds.x, trailing(bounds.x, pointer.x, min_size))
    } else if handle.touches_left() {
        leading(bounds.x, bounds.width, pointer.x, min_size)
    } else {
        (bounds.x, bounds.width)
    };
    let (y, height) = if handle.touches_bottom() {
        (bounds.y, trailing(bounds.y, pointer.y, min_size))
    } else if handle.touches_top() {
        leading(bounds.y, bounds.height, pointer.y, min_size)
    } else {
        (bounds.y, bounds.height)
    };
    Rect::new(x, y, width, height)
}

fn trailing(origin: f64, pointer: f64, min_size: f64) -> f64 {
    (pointer - origin).max(min_size)
}

fn leading(origin: f64, size: f64, pointer: f64, min_size: f64) -> (f64, f64) {
    let far = origin + size;
    let delta = origin - pointer;
    let new_size = (size + delta).max(min_size);
    let new_origin = far - new_size;
    if new_origin < 0.0 {
        (0.0, far.max(min_size))
    } else {
        (new_origin, new_size)
    }
}

// =============================================================================
// PAN
// =============================================================================

/// Offset captured when a pan starts: `pointer - pan`.
#[must_use]
pub fn pan_start_offset(pointer: Point, viewport: &Viewport) -> Point {
    Point::new(pointer.x - viewport.pan_x, pointer.y - viewport.pan_y)
}

/// Viewport after panning to `pointer`. Unclamped.
#[must_use]
pub fn pan_to(viewport: &Viewport, pointer: Point, start_offset: Point) -> Viewport {
    Viewport { pan_x: pointer.x - start_offset.x, pan_y: pointer.y - start_offset.y, ..*viewport }
}

// =============================================================================
// ZOOM
// =============================================================================

/// Viewport after one wheel notch.
///
/// Positive `wheel_dy` (scrolling down) zooms out, negative zooms in, zero
/// leaves the zoom unchanged. With an `anchor` (the pointer, in container
/// coordinates) the pan is adjusted so the canvas point under the anchor
/// stays on the same screen pixel. Without one only the zoom changes.
#[must_use]
pub fn wheel_zoom(viewport: &Viewport, wheel_dy: f64, anchor: Option<Point>, limits: ZoomLimits) -> Viewport {
    let direction = if wheel_dy > 0.0 {
        -1
    } else if wheel_dy < 0.0 {
        1
    } else {
        0
    };
    let zoom_percent = step_zoom(viewport.zoom_percent, direction, limits);
    let Some(anchor) = anchor else {
        return Viewport { zoom_percent, ..*viewport };
    };
    let ratio = f64::from(zoom_percent) / f64::from(viewport.zoom_percent);
    Viewport {
        pan_x: viewport.pan_x * ratio + anchor.x * (1.0 - ratio),
        pan_y: viewport.pan_y * ratio + anchor.y * (1.0 - ratio),
        zoom_percent,
    }
}

/// Viewport zoomed one step in, clamped. Pan is unchanged.
#[must_use]
pub fn zoom_in(viewport: &Viewport, limits: ZoomLimits) -> Viewport {
    Viewport { zoom_percent: step_zoom(viewport.zoom_percent, 1, limits), ..*viewport }
}

/// Viewport zoomed one step out, clamped. Pan is unchanged.
#[must_use]
pub fn zoom_out(viewport: &Viewport, limits: ZoomLimits) -> Viewport {
    Viewport { zoom_percent: step_zoom(viewport.zoom_percent, -1, limits), ..*viewport }
}

/// Zoom 100%, pan (0, 0).
#[must_use]
pub fn reset_view() -> Viewport {
    Viewport { pan_x: 0.0, pan_y: 0.0, zoom_percent: ZOOM_DEFAULT_PERCENT }
}

fn step_zoom(current: u16, direction: i32, limits: ZoomLimits) -> u16 {
    limits.clamp(i32::from(current) + direction * i32::from(limits.step))
}
