//! Editing session for document templates.
//!
//! DESIGN
//! ======
//! The layout engine (`template_canvas`) knows nothing about where templates
//! come from or go to. This crate wraps it in an editing session: a template
//! is deep-cloned out of the library when opened, edited through the engine,
//! and written back only on an explicit save. Image uploads are read on tokio
//! tasks and land in the session as later, independent updates.
//!
//! | Module | Role |
//! |--------|------|
//! | [`services::session`] | `EditorSession`: open/blank, save, discard, image results |
//! | [`services::library`] | `TemplateLibrary`: persisted list and its replace callback |
//! | [`services::image`] | Async image file to data-URI ingestion |
//! | [`panel`] | Which property controls the current selection gets |
//! | [`placeholder`] | The `{{Name}}` field-token convention |
//! | [`config`] | `EditorConfig` from environment variables |
//! | [`logging`] | tracing subscriber setup |

pub mod config;
pub mod logging;
pub mod panel;
pub mod placeholder;
pub mod services;

pub use template_canvas as canvas;
