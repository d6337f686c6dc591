use super::write_atomically;
use crate::error::{Result, VitaeError};
use crate::model::CvDocument;
use std::path::{Path, PathBuf};

/// Fixed file name of the JSON export.
pub const EXPORT_FILE_NAME: &str = "cv-data.json";

pub fn to_pretty_json(doc: &CvDocument) -> Result<String> {
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Decodes an imported file. Any schema mismatch, or a list with blank or
/// repeated ids, is an [`VitaeError::Import`].
pub fn parse_document(content: &str) -> Result<CvDocument> {
    let doc: CvDocument =
        serde_json::from_str(content).map_err(|e| VitaeError::Import(e.to_string()))?;
    doc.check_ids().map_err(VitaeError::Import)?;
    Ok(doc)
}

/// Writes `doc` as `cv-data.json` into `dir`.
pub fn export_to(doc: &CvDocument, dir: &Path) -> Result<PathBuf> {
    let json = to_pretty_json(doc)?;
    write_atomically(dir, EXPORT_FILE_NAME, json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn export_is_pretty_and_lossless() {
        let doc = CvDocument::default();
        let json = to_pretty_json(&doc).unwrap();
        assert!(json.contains("\n  \"personal\""));
        assert_eq!(parse_document(&json).unwrap(), doc);
    }

    #[test]
    fn malformed_input_is_an_import_error() {
        let err = parse_document("{not json").unwrap_err();
        assert!(matches!(err, VitaeError::Import(_)));
    }

    #[test]
    fn wrong_shape_is_an_import_error() {
        let err = parse_document(r#"{"personal": {}}"#).unwrap_err();
        assert!(matches!(err, VitaeError::Import(_)));
    }

    #[test]
    fn duplicate_sibling_ids_are_an_import_error() {
        let mut value = serde_json::to_value(CvDocument::default()).unwrap();
        value["skills"][0]["id"] = serde_json::json!("dup");
        value["skills"][1]["id"] = serde_json::json!("dup");
        let err = parse_document(&value.to_string()).unwrap_err();
        assert!(matches!(err, VitaeError::Import(ref msg) if msg.contains("'dup'")));
    }

    #[test]
    fn blank_id_is_an_import_error() {
        let mut value = serde_json::to_value(CvDocument::default()).unwrap();
        value["experience"][0]["id"] = serde_json::json!("");
        assert!(matches!(
            parse_document(&value.to_string()),
            Err(VitaeError::Import(_))
        ));
    }

    #[test]
    fn out_of_range_level_is_clamped_on_import() {
        let mut value = serde_json::to_value(CvDocument::default()).unwrap();
        value["skills"][0]["level"] = serde_json::json!(150);
        let doc = parse_document(&value.to_string()).unwrap();
        assert_eq!(doc.skills[0].level.value(), 100);
    }

    #[test]
    fn export_writes_fixed_file_name() {
        let dir = tempdir().unwrap();
        let path = export_to(&CvDocument::default(), dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), EXPORT_FILE_NAME);
        let content = std::fs::read_to_string(path).unwrap();
        assert_eq!(parse_document(&content).unwrap(), CvDocument::default());
    }
}
