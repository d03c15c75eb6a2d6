//! Selection and editing state machine.
//!
//! ARCHITECTURE
//! ============
//! `Selection` owns the single interaction mode (`Idle`, `Selected`,
//! `Editing`, `Dragging`, `Resizing`) and the floating toolbar. Every
//! transition appends the [`Action`]s the host must perform to `out`.
//!
//! Pointer capture is owned here. Entering `Dragging` or `Resizing` emits
//! `CapturePointer` (the host installs its document-wide move/up listeners)
//! and every path out of those modes emits exactly one `ReleasePointer`.
//! Listener lifetime therefore matches gesture lifetime without the host
//! tracking it.
//!
//! Drag/resize and editing are mutually exclusive: a gesture cannot start
//! while editing, and editing can only start once any gesture has ended.

#[cfg(test)]
#[path = "selection_test.rs"]
mod selection_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{TOOLBAR_HALF_WIDTH, TOOLBAR_MARGIN, TOOLBAR_OFFSET_Y};
use crate::doc::ElementId;
use crate::engine::Action;
use crate::hit::ResizeHandle;

/// What part of the selected element is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditTarget {
    /// Inline caret in a text element.
    Text,
    /// A single cell input in a table element.
    Cell { row: usize, col: usize },
}

/// The active interaction mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Mode {
    /// Nothing selected.
    Idle,
    /// One element selected; no gesture or edit in progress.
    Selected { id: ElementId },
    /// The selected element's content is live-editable.
    Editing { id: ElementId, target: EditTarget },
    /// The selected element follows the pointer.
    Dragging {
        id: ElementId,
        /// Pointer-to-origin offset captured at drag start, canvas units.
        grab: Point,
    },
    /// One handle of the selected element follows the pointer.
    Resizing { id: ElementId, handle: ResizeHandle },
}

impl Mode {
    /// The element this mode is about, if any.
    #[must_use]
    pub fn element(&self) -> Option<ElementId> {
        match *self {
            Self::Idle => None,
            Self::Selected { id }
            | Self::Editing { id, .. }
            | Self::Dragging { id, .. }
            | Self::Resizing { id, .. } => Some(id),
        }
    }

    /// Whether this mode holds the pointer capture.
    #[must_use]
    pub fn is_gesture(&self) -> bool {
        matches!(self, Self::Dragging { .. } | Self::Resizing { .. })
    }
}

/// Transient style panel shown after a double-click.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloatingToolbar {
    pub visible: bool,
    /// Container-space anchor: the target's top-centre, lifted by the offset.
    pub anchor: Point,
    pub target: Option<ElementId>,
}

impl FloatingToolbar {
    /// Top-left of the panel, kept inside the container margin.
    #[must_use]
    pub fn panel_origin(&self) -> Point {
        Point::new(
            (self.anchor.x - TOOLBAR_HALF_WIDTH).max(TOOLBAR_MARGIN),
            self.anchor.y.max(TOOLBAR_MARGIN),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Selection {
    mode: Mode,
    toolbar: FloatingToolbar,
    toolbar_offset: f64,
}

impl Default for Selection {
    fn default() -> Self {
        Self::new(TOOLBAR_OFFSET_Y)
    }
}

impl Selection {
    #[must_use]
    pub fn new(toolbar_offset: f64) -> Self {
        Self { mode: Mode::Idle, toolbar: FloatingToolbar::default(), toolbar_offset }
    }

    // --- Queries ---

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn toolbar(&self) -> FloatingToolbar {
        self.toolbar
    }

    /// The selected element, whatever the sub-mode.
    #[must_use]
    pub fn selected(&self) -> Option<ElementId> {
        self.mode.element()
    }

    /// The element being edited and how.
    #[must_use]
    pub fn editing(&self) -> Option<(ElementId, EditTarget)> {
        match self.mode {
            Mode::Editing { id, target } => Some((id, target)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing().is_some()
    }

    /// Whether a drag or resize currently holds the pointer.
    #[must_use]
    pub fn has_capture(&self) -> bool {
        self.mode.is_gesture()
    }

    // --- Transitions ---

    /// Click on an element: select it and hide the toolbar. Ends any edit or
    /// gesture that was in progress.
    pub fn select(&mut self, id: ElementId, out: &mut Vec<Action>) {
        let previous = self.selected();
        self.leave_current(out);
        self.mode = Mode::Selected { id };
        self.hide_toolbar(out);
        self.toolbar.target = None;
        if previous != Some(id) {
            tracing::debug!(%id, "element selected");
            out.push(Action::SelectionChanged { id: Some(id) });
        }
    }

    /// Double-click on an element: select it, anchor the toolbar above
    /// `top_center` and, for text elements, open the caret.
    ///
    /// An element already in text edit keeps its caret; only the toolbar
    /// is refreshed.
    pub fn request_edit(&mut self, id: ElementId, top_center: Point, is_text: bool, out: &mut Vec<Action>) {
        if self.mode == (Mode::Editing { id, target: EditTarget::Text }) {
            self.show_toolbar(id, top_center, out);
            return;
        }
        self.select(id, out);
        self.show_toolbar(id, top_center, out);
        if is_text {
            self.mode = Mode::Editing { id, target: EditTarget::Text };
            tracing::debug!(%id, "text edit started");
            out.push(Action::EditStarted { id, target: EditTarget::Text });
        }
    }

    fn show_toolbar(&mut self, id: ElementId, top_center: Point, out: &mut Vec<Action>) {
        let anchor = Point::new(top_center.x, top_center.y - self.toolbar_offset);
        self.toolbar = FloatingToolbar { visible: true, anchor, target: Some(id) };
        out.push(Action::ToolbarShown { id, anchor });
    }

    /// Open a single-cell editor on a selected table. Returns `false` when
    /// the table is not the selected element or a gesture is in progress.
    pub fn begin_cell_edit(&mut self, id: ElementId, row: usize, col: usize, out: &mut Vec<Action>) -> bool {
        let allowed = match self.mode {
            Mode::Selected { id: sel } => sel == id,
            Mode::Editing { id: sel, target: EditTarget::Cell { .. } } => sel == id,
            _ => false,
        };
        if !allowed {
            tracing::debug!(%id, "cell edit refused");
            return false;
        }
        let target = EditTarget::Cell { row, col };
        self.mode = Mode::Editing { id, target };
        tracing::debug!(%id, row, col, "cell edit started");
        out.push(Action::EditStarted { id, target });
        true
    }

    /// Blur, Enter, or commit: leave `Editing` for `Selected`. Idempotent.
    pub fn end_edit(&mut self, out: &mut Vec<Action>) {
        if let Mode::Editing { id, .. } = self.mode {
            self.mode = Mode::Selected { id };
            tracing::debug!(%id, "edit ended");
            out.push(Action::EditEnded { id });
        }
    }

    /// Start dragging the selected element. Refused while editing or when
    /// `id` is not the selected element.
    pub fn begin_drag(&mut self, id: ElementId, grab: Point, out: &mut Vec<Action>) -> bool {
        if self.mode != (Mode::Selected { id }) {
            tracing::debug!(%id, mode = ?self.mode, "drag refused");
            return false;
        }
        self.mode = Mode::Dragging { id, grab };
        tracing::debug!(%id, "drag started");
        out.push(Action::CapturePointer);
        true
    }

    /// Start resizing the selected element from `handle`. Refused while
    /// editing or when `id` is not the selected element.
    pub fn begin_resize(&mut self, id: ElementId, handle: ResizeHandle, out: &mut Vec<Action>) -> bool {
        if self.mode != (Mode::Selected { id }) {
            tracing::debug!(%id, mode = ?self.mode, "resize refused");
            return false;
        }
        self.mode = Mode::Resizing { id, handle };
        tracing::debug!(%id, ?handle, "resize started");
        out.push(Action::CapturePointer);
        true
    }

    /// Global pointer-up: end a drag or resize. Safe to call in any mode.
    pub fn end_gesture(&mut self, out: &mut Vec<Action>) {
        if let Mode::Dragging { id, .. } | Mode::Resizing { id, .. } = self.mode {
            self.mode = Mode::Selected { id };
            tracing::debug!(%id, "gesture ended");
            out.push(Action::ReleasePointer);
        }
    }

    /// Click on empty canvas: deselect and hide the toolbar.
    pub fn clear(&mut self, out: &mut Vec<Action>) {
        let had_selection = self.selected().is_some();
        self.leave_current(out);
        self.mode = Mode::Idle;
        self.hide_toolbar(out);
        if had_selection {
            tracing::debug!("selection cleared");
            out.push(Action::SelectionChanged { id: None });
        }
    }

    /// Escape: back to `Idle` from any mode, toolbar hidden.
    pub fn escape(&mut self, out: &mut Vec<Action>) {
        self.clear(out);
    }

    /// Pointer-down outside the toolbar: hide it, selection untouched.
    pub fn hide_toolbar(&mut self, out: &mut Vec<Action>) {
        if self.toolbar.visible {
            self.toolbar.visible = false;
            out.push(Action::ToolbarHidden);
        }
    }

    /// Release whatever the current mode holds before switching away.
    fn leave_current(&mut self, out: &mut Vec<Action>) {
        self.end_gesture(out);
        self.end_edit(out);
    }
}
