use super::backend::StorageBackend;
use super::{DOCUMENT_KEY, THEME_KEY};
use crate::error::Result;
use crate::model::{CvDocument, SectionValue};
use crate::theme::ThemeSettings;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// Owner of the current document and theme.
///
/// Every mutation is applied in memory first and then written through to the
/// backend. If the write fails the error is returned, but the in-memory state
/// keeps the new value so reads stay consistent with what the user just did.
pub struct CvStore<B: StorageBackend> {
    backend: B,
    document: CvDocument,
    theme: ThemeSettings,
}

impl<B: StorageBackend> CvStore<B> {
    /// Rehydrates both keys from `backend`. Never fails: a key that is absent
    /// or does not decode falls back to its own default.
    pub fn initialize(backend: B) -> Self {
        let document = load_or_default(&backend, DOCUMENT_KEY);
        let theme = load_or_default(&backend, THEME_KEY);
        Self {
            backend,
            document,
            theme,
        }
    }

    pub fn document(&self) -> &CvDocument {
        &self.document
    }

    pub fn theme(&self) -> &ThemeSettings {
        &self.theme
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Replaces exactly one section and persists the whole document.
    pub fn update_section(&mut self, value: SectionValue) -> Result<()> {
        debug!(section = %value.section(), "updating section");
        self.document.set_section(value);
        self.persist_document()
    }

    pub fn replace_document(&mut self, document: CvDocument) -> Result<()> {
        self.document = document;
        self.persist_document()
    }

    /// Restores the default document if `confirm` agrees.
    ///
    /// Returns `Ok(false)` without touching anything when declined.
    pub fn reset_document(&mut self, confirm: impl FnOnce() -> bool) -> Result<bool> {
        if !confirm() {
            debug!("reset declined");
            return Ok(false);
        }
        self.replace_document(CvDocument::default())?;
        Ok(true)
    }

    pub fn update_theme(&mut self, theme: ThemeSettings) -> Result<()> {
        self.theme = theme;
        self.persist_theme()
    }

    /// Applies a fallible field-level edit to the theme.
    ///
    /// The edit runs on a copy, so an edit that fails leaves the theme (and
    /// storage) untouched.
    pub fn update_theme_with<F>(&mut self, edit: F) -> Result<()>
    where
        F: FnOnce(&mut ThemeSettings) -> Result<()>,
    {
        let mut theme = self.theme.clone();
        edit(&mut theme)?;
        self.update_theme(theme)
    }

    fn persist_document(&self) -> Result<()> {
        save(&self.backend, DOCUMENT_KEY, &self.document)
    }

    fn persist_theme(&self) -> Result<()> {
        save(&self.backend, THEME_KEY, &self.theme)
    }
}

fn load_or_default<B, T>(backend: &B, key: &str) -> T
where
    B: StorageBackend,
    T: DeserializeOwned + Default,
{
    let Some(value) = backend.load(key) else {
        debug!(key, "no stored value, using default");
        return T::default();
    };
    match serde_json::from_value(value) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!(key, error = %e, "stored value does not decode, using default");
            T::default()
        }
    }
}

fn save<B: StorageBackend, T: Serialize>(backend: &B, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_value(value)?;
    backend.save(key, &json)
}
