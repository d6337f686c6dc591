use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::export::{json, pdf, Rasterizer};
use crate::store::{CvStore, StorageBackend};
use std::path::Path;

fn outcome(written: Result<std::path::PathBuf>, what: &str) -> CmdResult {
    match written {
        Ok(path) => CmdResult::default()
            .with_message(CmdMessage::success(format!(
                "{} exported to {}",
                what,
                path.display()
            )))
            .with_written_file(path),
        Err(e) => CmdResult::default().with_message(CmdMessage::error(e.to_string())),
    }
}

/// Writes `cv-data.json` into `dir`.
pub fn json<B: StorageBackend>(store: &CvStore<B>, dir: &Path) -> Result<CmdResult> {
    Ok(outcome(json::export_to(store.document(), dir), "CV data"))
}

/// Writes `<name>_cv.pdf` into `dir`. Failures are reported, not raised.
pub fn pdf<B: StorageBackend>(
    store: &CvStore<B>,
    rasterizer: &dyn Rasterizer,
    dir: &Path,
) -> Result<CmdResult> {
    Ok(outcome(
        pdf::export_to(store.document(), store.theme(), rasterizer, dir),
        "PDF",
    ))
}
