use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::json::parse_document;
use crate::store::{CvStore, StorageBackend};
use std::fs;
use std::path::Path;

/// Replaces the whole document with the contents of `path`.
///
/// An unreadable or invalid file is reported as an error message and the
/// current document stays as it is.
pub fn run<B: StorageBackend>(store: &mut CvStore<B>, path: &Path) -> Result<CmdResult> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return Ok(CmdResult::default().with_message(CmdMessage::error(format!(
                "Could not read {}: {}",
                path.display(),
                e
            ))))
        }
    };

    let document = match parse_document(&content) {
        Ok(doc) => doc,
        Err(e) => return Ok(CmdResult::default().with_message(CmdMessage::error(e.to_string()))),
    };

    store.replace_document(document)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Imported CV data from {}",
        path.display()
    ))))
}
