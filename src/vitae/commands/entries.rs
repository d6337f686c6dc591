//! Field-level editing of list entries and of the personal block.
//!
//! Every operation works on a copy of the section and only hands it to the
//! store once all fields applied cleanly, so a bad field leaves both memory
//! and storage as they were.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VitaeError};
use crate::model::{fresh_id, Entry, Section, SectionValue};
use crate::store::{CvStore, StorageBackend};

/// `key=value` pairs, applied in order.
pub type Fields = Vec<(String, String)>;

#[derive(Debug, Clone)]
pub enum EntryOp {
    Add(Fields),
    Edit { id: String, fields: Fields },
    Remove { id: String },
}

/// Splits `key=value`. Only the first `=` separates.
pub fn parse_field(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

struct Outcome {
    id: String,
    label: String,
    kind: &'static str,
}

fn apply<T: Entry>(mut items: Vec<T>, op: &EntryOp) -> Result<(Vec<T>, Outcome)> {
    let not_found = |id: &str| VitaeError::EntryNotFound {
        section: T::KIND.to_string(),
        id: id.to_string(),
    };

    let outcome = match op {
        EntryOp::Add(fields) => {
            let id = fresh_id(items.iter().map(|e| e.id()));
            let mut entry = T::with_id(id.clone());
            for (key, value) in fields {
                entry.set_field(key, value)?;
            }
            let label = entry.label();
            items.push(entry);
            Outcome {
                id,
                label,
                kind: T::KIND,
            }
        }
        EntryOp::Edit { id, fields } => {
            let pos = items
                .iter()
                .position(|e| e.id() == id)
                .ok_or_else(|| not_found(id))?;
            let mut entry = items[pos].clone();
            for (key, value) in fields {
                entry.set_field(key, value)?;
            }
            let label = entry.label();
            items[pos] = entry;
            Outcome {
                id: id.clone(),
                label,
                kind: T::KIND,
            }
        }
        EntryOp::Remove { id } => {
            let pos = items
                .iter()
                .position(|e| e.id() == id)
                .ok_or_else(|| not_found(id))?;
            let removed = items.remove(pos);
            Outcome {
                id: id.clone(),
                label: removed.label(),
                kind: T::KIND,
            }
        }
    };
    Ok((items, outcome))
}

fn apply_to_section<B: StorageBackend>(
    store: &CvStore<B>,
    section: Section,
    op: &EntryOp,
) -> Result<(SectionValue, Outcome)> {
    let doc = store.document();
    let (value, outcome) = match section {
        Section::SocialLinks => {
            let (v, o) = apply(doc.social_links.clone(), op)?;
            (SectionValue::SocialLinks(v), o)
        }
        Section::Experience => {
            let (v, o) = apply(doc.experience.clone(), op)?;
            (SectionValue::Experience(v), o)
        }
        Section::Education => {
            let (v, o) = apply(doc.education.clone(), op)?;
            (SectionValue::Education(v), o)
        }
        Section::Skills => {
            let (v, o) = apply(doc.skills.clone(), op)?;
            (SectionValue::Skills(v), o)
        }
        Section::Languages => {
            let (v, o) = apply(doc.languages.clone(), op)?;
            (SectionValue::Languages(v), o)
        }
        Section::Projects => {
            let (v, o) = apply(doc.projects.clone(), op)?;
            (SectionValue::Projects(v), o)
        }
        Section::CustomSections => {
            let (v, o) = apply(doc.custom_sections.clone(), op)?;
            (SectionValue::CustomSections(v), o)
        }
        Section::Personal | Section::Summary => {
            return Err(VitaeError::Api(format!(
                "{} is not a list section; use `set {}` instead",
                section, section
            )))
        }
    };
    Ok((value, outcome))
}

pub fn run<B: StorageBackend>(
    store: &mut CvStore<B>,
    section: Section,
    op: EntryOp,
) -> Result<CmdResult> {
    let (value, outcome) = apply_to_section(store, section, &op)?;
    store.update_section(value)?;

    let mut result = CmdResult::default();
    let message = match op {
        EntryOp::Add(fields) => {
            result.created_id = Some(outcome.id.clone());
            if fields.is_empty() {
                result.add_message(CmdMessage::warning(format!(
                    "New {} has no fields set; use `edit` to fill it in",
                    outcome.kind
                )));
            }
            format!("Added {} {} [{}]", outcome.kind, outcome.label, outcome.id)
        }
        EntryOp::Edit { .. } => {
            format!("Updated {} {} [{}]", outcome.kind, outcome.label, outcome.id)
        }
        EntryOp::Remove { .. } => {
            format!("Removed {} {} [{}]", outcome.kind, outcome.label, outcome.id)
        }
    };
    result.add_message(CmdMessage::success(message));
    Ok(result)
}

/// Sets fields of the personal block.
pub fn edit_personal<B: StorageBackend>(
    store: &mut CvStore<B>,
    fields: &[(String, String)],
) -> Result<CmdResult> {
    let mut personal = store.document().personal.clone();
    for (key, value) in fields {
        personal.set_field(key, value)?;
    }
    store.update_section(SectionValue::Personal(personal))?;
    Ok(CmdResult::default().with_message(CmdMessage::success("Updated personal info")))
}
