//! # Storage Layer
//!
//! Two pieces, split the same way as raw I/O and business logic:
//!
//! 1. [`StorageBackend`]: the persistence adapter. A namespaced key-value
//!    store of JSON values with two operations, `load` and `save`.
//! 2. [`CvStore`]: the document store. It owns the current document and
//!    theme in memory, rehydrates them once at startup and writes through to
//!    the backend on every change.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `cv-data` | the [`CvDocument`](crate::model::CvDocument) |
//! | `cv-theme` | the [`ThemeSettings`](crate::theme::ThemeSettings) |
//!
//! The two keys are independent. A missing or undecodable document does not
//! affect the theme, and the other way around.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per key, written
//!   atomically (temp file, then rename).
//! - [`mem_backend::MemBackend`]: in-memory, for tests. Can simulate write
//!   failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── cv-data.json      # Document
//! ├── cv-theme.json     # Theme
//! └── config.json       # Settings (see config.rs)
//! ```

pub mod backend;
pub mod cv_store;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;
pub use cv_store::CvStore;

pub const DOCUMENT_KEY: &str = "cv-data";
pub const THEME_KEY: &str = "cv-theme";
