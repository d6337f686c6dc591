use crate::config::VitaeConfig;
use crate::theme::ThemeSettings;
use std::path::PathBuf;

pub mod config;
pub mod entries;
pub mod export;
pub mod import;
pub mod render;
pub mod reset;
pub mod section;
pub mod show;
pub mod theme;

pub use show::{EntryLine, SectionOverview};

#[derive(Debug, Clone)]
pub struct VitaePaths {
    /// Holds `cv-data.json`, `cv-theme.json` and `config.json`.
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub messages: Vec<CmdMessage>,
    pub overview: Vec<SectionOverview>,
    pub section_json: Option<serde_json::Value>,
    pub html: Option<String>,
    pub written_files: Vec<PathBuf>,
    pub theme: Option<ThemeSettings>,
    pub config: Option<VitaeConfig>,
    /// Id of the entry created by `add`.
    pub created_id: Option<String>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_overview(mut self, overview: Vec<SectionOverview>) -> Self {
        self.overview = overview;
        self
    }

    pub fn with_section_json(mut self, value: serde_json::Value) -> Self {
        self.section_json = Some(value);
        self
    }

    pub fn with_html(mut self, html: String) -> Self {
        self.html = Some(html);
        self
    }

    pub fn with_written_file(mut self, path: PathBuf) -> Self {
        self.written_files.push(path);
        self
    }

    pub fn with_theme(mut self, theme: ThemeSettings) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn with_config(mut self, config: VitaeConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// True when any message is an error; the CLI exits non-zero.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
