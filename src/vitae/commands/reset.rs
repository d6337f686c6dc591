use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{CvStore, StorageBackend};

/// Restores the sample document once `confirm` agrees. The theme is kept.
pub fn run<B: StorageBackend>(
    store: &mut CvStore<B>,
    confirm: impl FnOnce() -> bool,
) -> Result<CmdResult> {
    let message = if store.reset_document(confirm)? {
        CmdMessage::success("CV data reset to the sample document")
    } else {
        CmdMessage::info("Reset cancelled")
    };
    Ok(CmdResult::default().with_message(message))
}
