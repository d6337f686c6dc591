use thiserror::Error;

#[derive(Error, Debug)]
pub enum VitaeError {
    #[error("No entry with id {id} in {section}")]
    EntryNotFound { section: String, id: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Import failed: {0}")]
    Import(String),

    #[error("Render error: {0}")]
    Render(#[from] minijinja::Error),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl VitaeError {
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VitaeError>;
