//! Interaction and geometry core for a slide/canvas editor.
//!
//! The crate owns everything between raw pointer, wheel and keyboard input
//! and the element collection: the element model, the pure move/resize/pan/
//! zoom math, and the selection/editing state machine that decides which
//! interaction is active. A rendering layer (the browser, through the
//! optional `wasm` feature) feeds events into [`engine::Engine`] and carries
//! out the [`engine::Action`]s it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Canvas host: element collection, viewport, event routing |
//! | [`selection`] | Selection/editing state machine and floating toolbar |
//! | [`geometry`] | Pure move, 8-handle resize, pan and zoom functions |
//! | [`doc`] | Elements, sparse styles, partial updates, the ordered store |
//! | [`defaults`] | Per-kind creation defaults |
//! | [`table`] | Table payload parsing, cell edits, cell hit mapping |
//! | [`hit`] | Resize handles and element hit-testing |
//! | [`render`] | Tag-selected content views and the render list |
//! | [`input`] | Input event types |
//! | [`camera`] | Points, rectangles, viewport conversions |
//! | [`config`] | Tunables with environment overrides |
//! | [`consts`] | Shared numeric constants |
//! | [`error`] | Error types |

pub mod camera;
pub mod config;
pub mod consts;
pub mod defaults;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod table;

#[cfg(feature = "wasm")]
pub mod wasm;
