//! # CLI Behavior
//!
//! This is **one possible UI client** for vitae, not the application itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution (`vitae`)
//!
//! Running `vitae` with no arguments prints the document overview, the same as `vitae show`.
//!
//! ## Entry Ids
//!
//! `show` prints every list entry with its id. `edit` and `remove` take that id;
//! `add` prints the id it assigned.
//!
//! ## Confirmation
//!
//! `reset` asks on the terminal. When stdin is not a terminal the reset is
//! declined unless `-y` is given.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers
//! - `print`: Output formatting (messages, overview, theme, config)
//! - `setup`: Argument parsing via clap, grouped help

mod commands;
mod print;
pub mod setup;

pub use commands::run;
