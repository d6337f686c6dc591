use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{CvDocument, Entry, Section};
use crate::store::{CvStore, StorageBackend};

const SUMMARY_PREVIEW_CHARS: usize = 60;

/// One row of the document overview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionOverview {
    pub section: Section,
    /// Short text for `personal` and `summary`.
    pub text: Option<String>,
    pub entries: Vec<EntryLine>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine {
    pub id: String,
    pub label: String,
}

fn lines<T: Entry>(items: &[T]) -> Vec<EntryLine> {
    items
        .iter()
        .map(|e| EntryLine {
            id: e.id().to_string(),
            label: e.label(),
        })
        .collect()
}

fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() > SUMMARY_PREVIEW_CHARS {
        let cut: String = flat.chars().take(SUMMARY_PREVIEW_CHARS).collect();
        format!("{}…", cut.trim_end())
    } else {
        flat
    }
}

pub fn overview(doc: &CvDocument) -> Vec<SectionOverview> {
    Section::ALL
        .into_iter()
        .map(|section| {
            let (text, entries) = match section {
                Section::Personal => {
                    let p = &doc.personal;
                    let text = [p.name.as_str(), p.job_title.as_str()]
                        .into_iter()
                        .filter(|s| !s.trim().is_empty())
                        .collect::<Vec<_>>()
                        .join(", ");
                    (Some(text), Vec::new())
                }
                Section::Summary => (Some(preview(&doc.summary)), Vec::new()),
                Section::SocialLinks => (None, lines(&doc.social_links)),
                Section::Experience => (None, lines(&doc.experience)),
                Section::Education => (None, lines(&doc.education)),
                Section::Skills => (None, lines(&doc.skills)),
                Section::Languages => (None, lines(&doc.languages)),
                Section::Projects => (None, lines(&doc.projects)),
                Section::CustomSections => (None, lines(&doc.custom_sections)),
            };
            SectionOverview {
                section,
                text,
                entries,
            }
        })
        .collect()
}

/// Without a section: the overview. With one: that section as JSON.
pub fn run<B: StorageBackend>(store: &CvStore<B>, section: Option<Section>) -> Result<CmdResult> {
    let doc = store.document();
    match section {
        None => Ok(CmdResult::default().with_overview(overview(doc))),
        Some(section) => {
            let value = doc.section(section).to_json()?;
            Ok(CmdResult::default().with_section_json(value))
        }
    }
}
