use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Section, SectionValue};
use crate::store::{CvStore, StorageBackend};

/// Parses the textual form of a whole section.
///
/// `summary` takes the raw text; every other section takes JSON in the same
/// shape `show <section>` prints.
pub fn parse(section: Section, raw: &str) -> std::result::Result<SectionValue, String> {
    if section == Section::Summary {
        return Ok(SectionValue::Summary(raw.to_string()));
    }
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| format!("Invalid JSON for {}: {}", section, e))?;
    let value = SectionValue::from_json(section, value)
        .map_err(|e| format!("Invalid value for {}: {}", section, e))?;
    value
        .check_ids()
        .map_err(|e| format!("Invalid value for {}: {}", section, e))?;
    Ok(value)
}

/// Replaces one section. Malformed input is reported and changes nothing.
pub fn run<B: StorageBackend>(
    store: &mut CvStore<B>,
    section: Section,
    raw: &str,
) -> Result<CmdResult> {
    let value = match parse(section, raw) {
        Ok(value) => value,
        Err(e) => return Ok(CmdResult::default().with_message(CmdMessage::error(e))),
    };
    store.update_section(value)?;
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("{} updated", section))))
}
