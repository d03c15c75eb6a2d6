use serde::Serialize;

use crate::camera::{Point, Rect, Viewport};
use crate::config::EditorConfig;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::defaults::{create_default, create_default_named};
use crate::doc::{Element, ElementId, ElementKind, ElementStore, PartialElement};
use crate::error::EditorError;
use crate::geometry;
use crate::hit::{self, HitPart, ResizeHandle};
use crate::input::{Button, InputEvent, Key, Modifiers, WheelDelta};
use crate::render::{self, RenderItem};
use crate::selection::{EditTarget, FloatingToolbar, Mode, Selection};
use crate::table::{self, TableContent};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    ElementAdded { id: ElementId },
    ElementUpdated { id: ElementId, fields: PartialElement },
    SelectionChanged { id: Option<ElementId> },
    EditStarted { id: ElementId, target: EditTarget },
    EditEnded { id: ElementId },
    ToolbarShown { id: ElementId, anchor: Point },
    ToolbarHidden,
    ViewportChanged { viewport: Viewport },
    /// Install document-wide pointer move/up listeners.
    CapturePointer,
    /// Remove the listeners installed for [`Action::CapturePointer`].
    ReleasePointer,
    RenderNeeded,
}

/// What the current pointer press started on. Consumed by the click that
/// follows it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Press {
    Pan,
    Background,
    Element { id: ElementId, was_selected: bool, on_handle: bool, moved: bool },
}

/// Serializable view of the whole editor state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSnapshot {
    /// The slide surface in canvas coordinates.
    pub canvas: Rect,
    pub elements: Vec<Element>,
    pub selected: Option<ElementId>,
    pub mode: Mode,
    pub toolbar: FloatingToolbar,
    pub viewport: Viewport,
}

/// The canvas host: owns the element collection, the viewport and the
/// selection state machine, and routes input into the geometry engine.
pub struct Engine {
    store: ElementStore,
    viewport: Viewport,
    selection: Selection,
    config: EditorConfig,
    /// Pan start offset while a pan gesture is active.
    pan: Option<Point>,
    press: Option<Press>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EditorConfig::default())
    }
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            store: ElementStore::new(),
            viewport: Viewport::default(),
            selection: Selection::new(config.toolbar_offset),
            config,
            pan: None,
            press: None,
        }
    }

    // --- Element operations ---

    /// Create an element with per-kind defaults, append it on top and
    /// select it. Returns the new id for the caller's bookkeeping.
    pub fn add_element(
        &mut self,
        kind: ElementKind,
        subtype: Option<&str>,
        content: Option<&str>,
    ) -> (ElementId, Vec<Action>) {
        let element = create_default(kind, subtype, content, self.config.default_position);
        self.insert(element)
    }

    /// Same as [`Engine::add_element`] for callers holding a type name.
    /// Unknown names produce a generic box.
    pub fn add_element_named(
        &mut self,
        type_name: &str,
        subtype: Option<&str>,
        content: Option<&str>,
    ) -> (ElementId, Vec<Action>) {
        let element = create_default_named(type_name, subtype, content, self.config.default_position);
        self.insert(element)
    }

    fn insert(&mut self, element: Element) -> (ElementId, Vec<Action>) {
        let id = element.id;
        tracing::info!(%id, kind = element.kind.name(), "element added");
        self.store.push(element);
        let mut out = vec![Action::ElementAdded { id }];
        self.selection.select(id, &mut out);
        (id, finish(out))
    }

    /// Apply a partial update: top-level fields replaced, style merged.
    /// Geometry fields are clamped to a non-negative origin and the minimum
    /// element size before they are stored and reported.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has `id`.
    pub fn update_element(&mut self, id: ElementId, fields: &PartialElement) -> Result<Vec<Action>, EditorError> {
        let fields = fields.clamped(self.config.min_element_size);
        if self.store.apply_patch(&id, &fields).is_none() {
            tracing::warn!(%id, "update for unknown element");
            return Err(EditorError::ElementNotFound(id));
        }
        Ok(finish(vec![Action::ElementUpdated { id, fields }]))
    }

    /// Live text edit from the inline caret.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` or `NotText`.
    pub fn edit_text(&mut self, id: ElementId, text: &str) -> Result<Vec<Action>, EditorError> {
        let element = self.store.get(&id).ok_or(EditorError::ElementNotFound(id))?;
        if element.kind != ElementKind::Text {
            return Err(EditorError::NotText(id));
        }
        self.update_element(id, &PartialElement::content(text))
    }

    /// Replace one table cell; every other cell keeps its value.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound`, `NotATable`, or the table failure when the
    /// payload is malformed or the cell is out of range.
    pub fn edit_cell(&mut self, id: ElementId, row: usize, col: usize, value: &str) -> Result<Vec<Action>, EditorError> {
        let element = self.store.get(&id).ok_or(EditorError::ElementNotFound(id))?;
        if element.kind != ElementKind::Table {
            return Err(EditorError::NotATable(id));
        }
        let content = table::set_cell(&element.content, row, col, value)?;
        self.update_element(id, &PartialElement::content(content))
    }

    // --- Selection contract ---

    /// Select `id`, ending any edit or gesture in progress.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has `id`.
    pub fn select(&mut self, id: ElementId) -> Result<Vec<Action>, EditorError> {
        self.require(id)?;
        let mut out = Vec::new();
        self.selection.select(id, &mut out);
        Ok(finish(out))
    }

    pub fn deselect(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        self.selection.clear(&mut out);
        finish(out)
    }

    /// Double-click contract: select `id`, show the toolbar above `anchor`
    /// (container coordinates of the element's top-centre) and open the
    /// caret for text elements.
    ///
    /// # Errors
    ///
    /// Returns `ElementNotFound` if no element has `id`.
    pub fn request_edit(&mut self, id: ElementId, anchor: Point) -> Result<Vec<Action>, EditorError> {
        let element = self.require(id)?;
        let is_text = element.kind == ElementKind::Text;
        let mut out = Vec::new();
        self.selection.request_edit(id, anchor, is_text, &mut out);
        Ok(finish(out))
    }

    pub fn canvas_background_clicked(&mut self) -> Vec<Action> {
        self.deselect()
    }

    /// Pointer-down anywhere outside the floating toolbar.
    pub fn click_outside_toolbar(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        self.selection.hide_toolbar(&mut out);
        finish(out)
    }

    /// The owning view is going away: drop any pointer capture and pan.
    pub fn detach(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        self.selection.end_gesture(&mut out);
        self.pan = None;
        self.press = None;
        out
    }

    // --- Viewport ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        let next = geometry::zoom_in(&self.viewport, self.config.zoom);
        self.set_viewport(next)
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        let next = geometry::zoom_out(&self.viewport, self.config.zoom);
        self.set_viewport(next)
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.set_viewport(geometry::reset_view())
    }

    fn set_viewport(&mut self, next: Viewport) -> Vec<Action> {
        if next == self.viewport {
            return Vec::new();
        }
        self.viewport = next;
        tracing::debug!(zoom = next.zoom_percent, pan_x = next.pan_x, pan_y = next.pan_y, "viewport changed");
        finish(vec![Action::ViewportChanged { viewport: next }])
    }

    // --- Input events ---

    /// Dispatch one serialized input event.
    pub fn handle(&mut self, event: &InputEvent) -> Vec<Action> {
        match event {
            InputEvent::PointerDown { x, y, button, modifiers } => {
                self.on_pointer_down(Point::new(*x, *y), *button, *modifiers)
            }
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(*x, *y)),
            InputEvent::PointerUp { x, y } => self.on_pointer_up(Point::new(*x, *y)),
            InputEvent::PointerLeave => self.on_pointer_leave(),
            InputEvent::Click { x, y } => self.on_click(Point::new(*x, *y)),
            InputEvent::DoubleClick { x, y } => self.on_double_click(Point::new(*x, *y)),
            InputEvent::Wheel { delta, modifiers, .. } => self.on_wheel(event.point(), *delta, *modifiers),
            InputEvent::KeyDown { key, modifiers } => self.on_key_down(key, *modifiers),
            InputEvent::Blur => self.on_blur(),
        }
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        let mut out = Vec::new();
        self.selection.hide_toolbar(&mut out);

        if button == Button::Middle || (button == Button::Primary && modifiers.ctrl) {
            self.pan = Some(geometry::pan_start_offset(screen_pt, &self.viewport));
            self.press = Some(Press::Pan);
            tracing::debug!("pan started");
            return finish(out);
        }

        let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
        let Some(hit) = self.hit(canvas_pt) else {
            self.press = Some(Press::Background);
            return finish(out);
        };
        let id = hit.element_id;
        let was_selected = self.selection.selected() == Some(id);
        let on_handle = matches!(hit.part, HitPart::Handle(_));
        self.press = Some(Press::Element { id, was_selected, on_handle, moved: false });

        if let Some((editing_id, _)) = self.selection.editing() {
            if editing_id == id {
                // Caret placement inside the editor.
                return finish(out);
            }
        }

        match hit.part {
            HitPart::Handle(handle) => {
                self.selection.begin_resize(id, handle, &mut out);
            }
            HitPart::Body => {
                self.selection.select(id, &mut out);
                if let Some(element) = self.store.get(&id) {
                    let grab = geometry::grab_offset(canvas_pt, element.origin());
                    self.selection.begin_drag(id, grab, &mut out);
                }
            }
        }
        finish(out)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        if let Some(offset) = self.pan {
            let next = geometry::pan_to(&self.viewport, screen_pt, offset);
            return self.set_viewport(next);
        }

        let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
        let fields = match self.selection.mode() {
            Mode::Dragging { id, grab } => {
                let origin = geometry::drag_to(canvas_pt, grab);
                Some((id, PartialElement::position(origin.x, origin.y)))
            }
            Mode::Resizing { id, handle } => self.resize_fields(id, handle, canvas_pt),
            _ => None,
        };
        let Some((id, fields)) = fields else {
            return Vec::new();
        };
        if let Some(Press::Element { moved, .. }) = &mut self.press {
            *moved = true;
        }
        match self.update_element(id, &fields) {
            Ok(actions) => actions,
            Err(e) => {
                tracing::warn!(error = %e, "gesture target vanished");
                let mut out = Vec::new();
                self.selection.clear(&mut out);
                finish(out)
            }
        }
    }

    fn resize_fields(&self, id: ElementId, handle: ResizeHandle, canvas_pt: Point) -> Option<(ElementId, PartialElement)> {
        let element = self.store.get(&id)?;
        let rect = geometry::resize(handle, element.bounds(), canvas_pt, self.config.min_element_size);
        Some((id, PartialElement::geometry(rect)))
    }

    /// Global pointer-up. Ends a pan, drag or resize; a no-op otherwise.
    pub fn on_pointer_up(&mut self, _screen_pt: Point) -> Vec<Action> {
        let mut out = Vec::new();
        if self.pan.take().is_some() {
            tracing::debug!("pan ended");
        }
        self.selection.end_gesture(&mut out);
        finish(out)
    }

    /// Pointer left the canvas container. Only a pan ends here; drag and
    /// resize keep following the captured pointer.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        if self.pan.take().is_some() {
            tracing::debug!("pan ended on leave");
        }
        Vec::new()
    }

    pub fn on_click(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.press.take() {
            Some(Press::Pan) => Vec::new(),
            Some(Press::Background) | None => {
                let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
                if self.hit(canvas_pt).is_some() {
                    return Vec::new();
                }
                self.canvas_background_clicked()
            }
            Some(Press::Element { id, was_selected, on_handle, moved }) => {
                if !was_selected || on_handle || moved {
                    return Vec::new();
                }
                let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
                self.click_cell(id, canvas_pt)
            }
        }
    }

    fn click_cell(&mut self, id: ElementId, canvas_pt: Point) -> Vec<Action> {
        let Some(element) = self.store.get(&id) else {
            return Vec::new();
        };
        if element.kind != ElementKind::Table {
            return Vec::new();
        }
        let Ok(grid) = TableContent::parse(&element.content) else {
            return Vec::new();
        };
        let Some((row, col)) = table::cell_at(element.bounds(), grid.rows, grid.cols, canvas_pt) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        self.selection.begin_cell_edit(id, row, col, &mut out);
        finish(out)
    }

    pub fn on_double_click(&mut self, screen_pt: Point) -> Vec<Action> {
        let canvas_pt = self.viewport.screen_to_canvas(screen_pt);
        let Some(hit) = self.hit(canvas_pt) else {
            return Vec::new();
        };
        let Some(element) = self.store.get(&hit.element_id) else {
            return Vec::new();
        };
        let anchor = self.viewport.canvas_to_screen(element.bounds().top_center());
        let is_text = element.kind == ElementKind::Text;
        let mut out = Vec::new();
        self.selection.request_edit(hit.element_id, anchor, is_text, &mut out);
        finish(out)
    }

    /// Wheel zoom about the pointer. Ignored unless ctrl is held. Without an
    /// anchor (container box unavailable) only the zoom changes.
    pub fn on_wheel(&mut self, anchor: Option<Point>, delta: WheelDelta, modifiers: Modifiers) -> Vec<Action> {
        if !modifiers.ctrl {
            return Vec::new();
        }
        let next = geometry::wheel_zoom(&self.viewport, delta.dy, anchor, self.config.zoom);
        self.set_viewport(next)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is("Escape") {
            self.pan = None;
            let mut out = Vec::new();
            self.selection.escape(&mut out);
            return finish(out);
        }
        if key.is("Enter") {
            let mut out = Vec::new();
            match self.selection.editing() {
                Some((_, EditTarget::Text)) if !modifiers.shift => self.selection.end_edit(&mut out),
                Some((_, EditTarget::Cell { .. })) => self.selection.end_edit(&mut out),
                _ => {}
            }
            return finish(out);
        }
        if !modifiers.ctrl {
            return Vec::new();
        }
        match key.0.as_str() {
            "0" => self.reset_view(),
            "+" | "=" => self.zoom_in(),
            "-" => self.zoom_out(),
            _ => Vec::new(),
        }
    }

    /// The inline editor lost focus.
    pub fn on_blur(&mut self) -> Vec<Action> {
        let mut out = Vec::new();
        self.selection.end_edit(&mut out);
        finish(out)
    }

    // --- Queries ---

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.selection.selected()
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[must_use]
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.store.get(id)
    }

    #[must_use]
    pub fn elements(&self) -> &ElementStore {
        &self.store
    }

    /// Elements in collection order with their views and raise layers.
    #[must_use]
    pub fn render_list(&self) -> Vec<RenderItem<'_>> {
        render::render_list(&self.store, &self.selection)
    }

    #[must_use]
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            canvas: Rect::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT),
            elements: self.store.iter().cloned().collect(),
            selected: self.selection.selected(),
            mode: self.selection.mode(),
            toolbar: self.selection.toolbar(),
            viewport: self.viewport,
        }
    }

    fn hit(&self, canvas_pt: Point) -> Option<hit::Hit> {
        hit::hit_test(canvas_pt, &self.store, &self.viewport, self.selection.selected(), self.config.handle_radius_px)
    }

    fn require(&self, id: ElementId) -> Result<&Element, EditorError> {
        self.store.get(&id).ok_or(EditorError::ElementNotFound(id))
    }
}

/// Append `RenderNeeded` when anything visible changed.
fn finish(mut out: Vec<Action>) -> Vec<Action> {
    let visible = out.iter().any(|a| !matches!(a, Action::CapturePointer | Action::ReleasePointer));
    if visible {
        out.push(Action::RenderNeeded);
    }
    out
}
