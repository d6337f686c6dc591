use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VitaeError};
use crate::export::write_atomically;
use crate::render;
use crate::store::{CvStore, StorageBackend};
use crate::theme::TemplateVariant;
use std::path::Path;

/// Renders the preview page.
///
/// `template` overrides the stored template for this render only. Without an
/// `output` path the HTML is returned in [`CmdResult::html`].
pub fn run<B: StorageBackend>(
    store: &CvStore<B>,
    template: Option<TemplateVariant>,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let mut theme = store.theme().clone();
    if let Some(variant) = template {
        theme.template = variant;
    }
    let html = render::render_html(store.document(), &theme)?;

    let Some(output) = output else {
        return Ok(CmdResult::default().with_html(html));
    };
    let file_name = output
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| VitaeError::Api(format!("invalid output path: {}", output.display())))?;
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let path = write_atomically(dir, file_name, html.as_bytes())?;
    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Preview written to {}",
            path.display()
        )))
        .with_written_file(path))
}
