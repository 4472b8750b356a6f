//! Layout engine for the document template editor.
//!
//! The crate owns everything that happens on the page canvas while a template
//! is open: the element model, selection and group dragging driven by pointer
//! input, and alignment snapping against the elements that stay put. It does
//! no I/O and draws nothing; the host feeds it pointer/keyboard events and
//! acts on the returned [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event-driven [`engine::EngineCore`] tying model, selection and snapping together |
//! | [`doc`] | Template, page and element types plus the mutable [`doc::TemplateDoc`] |
//! | [`snap`] | Checkpoint-based alignment snapping and guide lines |
//! | [`input`] | Modifier keys, buttons and the drag state machine |
//! | [`hit`] | Topmost-element hit-testing |
//! | [`camera`] | Pan/zoom view transform between screen and page coordinates |
//! | [`consts`] | Shared numeric constants (page size, snap threshold, defaults) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hit;
pub mod input;
pub mod snap;
