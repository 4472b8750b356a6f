//! Template library: the persisted list of templates.
//!
//! DESIGN
//! ======
//! The library is the only durable state. Editing sessions work on deep
//! clones and hand a finished template back through [`TemplateLibrary::save`].
//! Every change to the list invokes the optional replace callback with the
//! whole new list, which is how a host persists it (write a file, push to a
//! store). Listing, searching, and filtering belong to the host.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use std::fmt;

use template_canvas::doc::{Template, TemplateId};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    #[error("template not found: {0}")]
    NotFound(TemplateId),
    #[error("library decode failed: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result of [`TemplateLibrary::save`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// No template with this id existed; appended.
    Inserted,
    /// Replaced the template with the same id in place.
    Replaced,
    /// Name is empty after trimming; nothing stored.
    Refused,
}

/// Result of [`TemplateLibrary::delete`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Declined,
    NotFound,
}

type ReplaceCallback = Box<dyn FnMut(&[Template]) + Send>;

#[derive(Default)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
    on_replace: Option<ReplaceCallback>,
}

impl fmt::Debug for TemplateLibrary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateLibrary")
            .field("templates", &self.templates.len())
            .field("on_replace", &self.on_replace.is_some())
            .finish()
    }
}

impl TemplateLibrary {
    #[must_use]
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates, on_replace: None }
    }

    /// Register the callback that receives the full list after every change.
    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&[Template]) + Send + 'static,
    {
        self.on_replace = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    #[must_use]
    pub fn get(&self, id: &TemplateId) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == *id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Store `template`: replace in place when its id is present, append otherwise.
    ///
    /// Saving the same template twice leaves one entry.
    pub fn save(&mut self, template: Template) -> SaveOutcome {
        if template.name.trim().is_empty() {
            debug!(id = %template.id, "save refused: empty name");
            return SaveOutcome::Refused;
        }

        let id = template.id;
        let outcome = if let Some(slot) = self.templates.iter_mut().find(|t| t.id == id) {
            *slot = template;
            SaveOutcome::Replaced
        } else {
            self.templates.push(template);
            SaveOutcome::Inserted
        };

        info!(%id, ?outcome, count = self.templates.len(), "template saved");
        self.notify();
        outcome
    }

    /// Remove a template after `confirm` agrees. `confirm` is not called for unknown ids.
    pub fn delete<F>(&mut self, id: &TemplateId, confirm: F) -> DeleteOutcome
    where
        F: FnOnce(&Template) -> bool,
    {
        let Some(index) = self.templates.iter().position(|t| t.id == *id) else {
            return DeleteOutcome::NotFound;
        };
        if !confirm(&self.templates[index]) {
            return DeleteOutcome::Declined;
        }

        self.templates.remove(index);
        info!(%id, count = self.templates.len(), "template deleted");
        self.notify();
        DeleteOutcome::Deleted
    }

    /// Load a library from its JSON array form.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Decode` when the input is not a template array.
    pub fn from_json(raw: &str) -> Result<Self, LibraryError> {
        let templates: Vec<Template> = serde_json::from_str(raw)?;
        debug!(count = templates.len(), "library loaded");
        Ok(Self::new(templates))
    }

    /// Serialize the list as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError::Decode` if serialization fails.
    pub fn to_json(&self) -> Result<String, LibraryError> {
        Ok(serde_json::to_string(&self.templates)?)
    }

    fn notify(&mut self) {
        if let Some(callback) = self.on_replace.as_mut() {
            callback(&self.templates);
        }
    }
}
