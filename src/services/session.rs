//! Editing session: one template open in the layout engine.
//!
//! DESIGN
//! ======
//! Opening deep-clones the library's template into an `EngineCore`, so edits
//! are invisible to the library until [`EditorSession::save`]. Discarding is
//! just dropping the session. Image reads run on tokio tasks and report back
//! over the session's own channel; results are applied in arrival order and
//! each one is an independent element or page update.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::path::PathBuf;

use template_canvas::doc::{ElementPatch, PagePatch, Template, TemplateId};
use template_canvas::engine::{Action, EngineCore};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::image::{ImageLoaded, ImageTarget, spawn_image_read};
use super::library::{LibraryError, SaveOutcome, TemplateLibrary};
use crate::config::EditorConfig;

#[derive(Debug)]
pub struct EditorSession {
    engine: EngineCore,
    image_max_bytes: u64,
    image_tx: mpsc::UnboundedSender<ImageLoaded>,
    image_rx: mpsc::UnboundedReceiver<ImageLoaded>,
}

impl EditorSession {
    fn with_template(template: Template, config: &EditorConfig) -> Self {
        let (image_tx, image_rx) = mpsc::unbounded_channel();
        Self {
            engine: EngineCore::new(template).with_snap_threshold(config.snap_threshold),
            image_max_bytes: config.image_max_bytes,
            image_tx,
            image_rx,
        }
    }

    /// Start a new, unsaved template.
    #[must_use]
    pub fn new_blank(name: &str, category: &str, config: &EditorConfig) -> Self {
        let template = Template::blank(name, category);
        info!(id = %template.id, "new template session");
        Self::with_template(template, config)
    }

    /// Open a copy of a library template for editing.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::NotFound` if the library has no template `id`.
    pub fn open(library: &TemplateLibrary, id: &TemplateId, config: &EditorConfig) -> Result<Self, LibraryError> {
        let template = library.get(id).cloned().ok_or(LibraryError::NotFound(*id))?;
        info!(%id, elements = template.elements.len(), "template opened");
        Ok(Self::with_template(template, config))
    }

    #[must_use]
    pub fn engine(&self) -> &EngineCore {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut EngineCore {
        &mut self.engine
    }

    #[must_use]
    pub fn template(&self) -> &Template {
        self.engine.template()
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.engine.set_name(name);
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.engine.set_category(category);
    }

    /// Write the edited template back to `library`.
    ///
    /// The session stays open; saving again replaces the same entry.
    pub fn save(&self, library: &mut TemplateLibrary) -> SaveOutcome {
        library.save(self.engine.template().clone())
    }

    /// Close without saving. The library never saw the edits.
    pub fn discard(self) {
        info!(id = %self.engine.template().id, "session discarded");
    }

    /// Start reading an image file for `target`. Must be called inside a tokio runtime.
    pub fn request_image(&self, path: impl Into<PathBuf>, target: ImageTarget) -> JoinHandle<()> {
        spawn_image_read(path.into(), target, self.image_max_bytes, self.image_tx.clone())
    }

    /// Apply one finished image read.
    ///
    /// Failed reads leave the previous content in place. Element targets must
    /// still exist and be an image kind.
    pub fn apply_image(&mut self, loaded: ImageLoaded) -> Vec<Action> {
        let uri = match loaded.result {
            Ok(uri) => uri,
            Err(e) => {
                warn!(error = %e, target = ?loaded.target, "image upload failed");
                return Vec::new();
            }
        };

        match loaded.target {
            ImageTarget::Element(id) => match self.engine.element(&id) {
                Some(el) if el.kind.is_image() => self.engine.update_element(&id, ElementPatch::content(uri)),
                Some(el) => {
                    debug!(%id, kind = el.kind.as_str(), "image ignored for non-image element");
                    Vec::new()
                }
                None => {
                    debug!(%id, "image ignored for deleted element");
                    Vec::new()
                }
            },
            ImageTarget::Background => {
                let patch = PagePatch { background_image: Some(uri), ..PagePatch::default() };
                self.engine.set_page(&patch)
            }
        }
    }

    /// Apply every image read that has already finished, without waiting.
    pub fn apply_pending_images(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(loaded) = self.image_rx.try_recv() {
            actions.extend(self.apply_image(loaded));
        }
        actions
    }

    /// Wait for the next image read and apply it.
    pub async fn next_image(&mut self) -> Vec<Action> {
        match self.image_rx.recv().await {
            Some(loaded) => self.apply_image(loaded),
            None => Vec::new(),
        }
    }
}
