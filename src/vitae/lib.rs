//! # Vitae Architecture
//!
//! Vitae is a **UI-agnostic CV editing library**. It holds one structured résumé
//! document plus its visual theme, persists both, renders them to a styled HTML
//! page and exports them as JSON or as a single-page PDF. The `vitae` binary is
//! one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (section names, key=value fields)      │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic over the store, renderer and exporters    │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!              ┌───────────────┼────────────────┐
//!              ▼               ▼                ▼
//! ┌──────────────────┐ ┌───────────────┐ ┌────────────────────┐
//! │ store/           │ │ render/       │ │ export/            │
//! │ CvStore over a   │ │ pure HTML     │ │ JSON, PDF via a    │
//! │ StorageBackend   │ │ from doc+theme│ │ Rasterizer         │
//! └──────────────────┘ └───────────────┘ └────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr (diagnostics go through `tracing`)
//! - **Never** calls `std::process::exit`
//!
//! Expected user-facing outcomes (an import that does not decode, a declined
//! reset, a failed PDF export) are reported as [`commands::CmdMessage`]s, not
//! as errors.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): unit tests of business logic against
//!    `MemBackend`. This is where most testing lives.
//! 2. **Model, store, render, export**: unit tests next to the code.
//! 3. **API** (`api.rs`): dispatch and input normalization.
//! 4. **CLI**: argument parsing and output formatting, plus end-to-end runs of
//!    the binary in `tests/`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`model`]: The CV document, its sections and entries
//! - [`theme`]: Palette, font and template settings
//! - [`store`]: Storage abstraction, backends and the document store
//! - [`render`]: HTML rendering
//! - [`export`]: JSON and PDF export, rasterization
//! - [`config`]: Configuration management
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod model;
pub mod render;
pub mod store;
pub mod theme;
