//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every vitae operation, whatever the UI.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (section names, `key=value` fields, template names)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic.
//!
//! ## Generic Over StorageBackend
//!
//! `VitaeApi<B: StorageBackend>` is generic over the backend:
//! - Production: `VitaeApi<FsBackend>`
//! - Testing: `VitaeApi<MemBackend>`
//!
//! PDF export takes the [`Rasterizer`] as an argument so tests can supply a
//! fake one. [`VitaeApi::rasterizer`] builds the configured external program.

use crate::commands::{self, CmdResult, VitaePaths};
use crate::config::VitaeConfig;
use crate::error::{Result, VitaeError};
use crate::export::{CommandRasterizer, Rasterizer};
use crate::model::Section;
use crate::store::{CvStore, StorageBackend};
use crate::theme::TemplateVariant;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use commands::config::ConfigAction;
pub use commands::{CmdMessage, EntryLine, MessageLevel, SectionOverview};
pub use commands::entries::EntryOp;
pub use commands::theme::ThemeChange;

pub struct VitaeApi<B: StorageBackend> {
    store: CvStore<B>,
    paths: VitaePaths,
    config: VitaeConfig,
}

impl<B: StorageBackend> VitaeApi<B> {
    /// Rehydrates the store from `backend` and loads `config.json`.
    pub fn new(backend: B, paths: VitaePaths) -> Result<Self> {
        let config = VitaeConfig::load(&paths.data_dir)?;
        Ok(Self {
            store: CvStore::initialize(backend),
            paths,
            config,
        })
    }

    pub fn store(&self) -> &CvStore<B> {
        &self.store
    }

    pub fn show(&self, section: Option<&str>) -> Result<CmdResult> {
        let section = section.map(parse_section).transpose()?;
        commands::show::run(&self.store, section)
    }

    pub fn set_section(&mut self, section: &str, raw: &str) -> Result<CmdResult> {
        let section = parse_section(section)?;
        commands::section::run(&mut self.store, section, raw)
    }

    pub fn add_entry<F: AsRef<str>>(&mut self, section: &str, fields: &[F]) -> Result<CmdResult> {
        let section = parse_section(section)?;
        let fields = parse_fields(fields)?;
        commands::entries::run(&mut self.store, section, EntryOp::Add(fields))
    }

    /// Edits one entry, or the personal block when `section` is `personal`
    /// (which takes no id).
    pub fn edit_entry<F: AsRef<str>>(
        &mut self,
        section: &str,
        id: Option<&str>,
        fields: &[F],
    ) -> Result<CmdResult> {
        let section = parse_section(section)?;
        let fields = parse_fields(fields)?;
        match (section, id) {
            (Section::Personal, None) => commands::entries::edit_personal(&mut self.store, &fields),
            (Section::Personal, Some(_)) => Err(VitaeError::Api(
                "personal has no entries; drop the id".to_string(),
            )),
            (_, None) => Err(VitaeError::Api(format!(
                "editing {} requires an entry id",
                section
            ))),
            (_, Some(id)) => commands::entries::run(
                &mut self.store,
                section,
                EntryOp::Edit {
                    id: id.to_string(),
                    fields,
                },
            ),
        }
    }

    pub fn remove_entry(&mut self, section: &str, id: &str) -> Result<CmdResult> {
        let section = parse_section(section)?;
        commands::entries::run(
            &mut self.store,
            section,
            EntryOp::Remove { id: id.to_string() },
        )
    }

    pub fn theme(&mut self, changes: &[ThemeChange]) -> Result<CmdResult> {
        commands::theme::run(&mut self.store, changes)
    }

    pub fn theme_presets(&self) -> CmdResult {
        commands::theme::presets()
    }

    pub fn render(&self, template: Option<&str>, output: Option<&Path>) -> Result<CmdResult> {
        let template = template.map(parse_template).transpose()?;
        commands::render::run(&self.store, template, output)
    }

    pub fn export_json(&self, dir: Option<&Path>) -> Result<CmdResult> {
        let dir = self.export_dir(dir);
        commands::export::json(&self.store, &dir)
    }

    pub fn export_pdf(&self, rasterizer: &dyn Rasterizer, dir: Option<&Path>) -> Result<CmdResult> {
        let dir = self.export_dir(dir);
        commands::export::pdf(&self.store, rasterizer, &dir)
    }

    pub fn import(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    pub fn reset(&mut self, confirm: impl FnOnce() -> bool) -> Result<CmdResult> {
        commands::reset::run(&mut self.store, confirm)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.paths, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    /// The external rasterizer from `config.json`.
    pub fn rasterizer(&self) -> CommandRasterizer {
        CommandRasterizer::new(
            self.config.rasterizer.clone(),
            self.config.rasterizer_args.clone(),
        )
    }

    /// Explicit directory, else the configured one, else the working directory.
    fn export_dir(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.config.export_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn parse_section(raw: &str) -> Result<Section> {
    Section::from_str(raw).map_err(|e| {
        VitaeError::Api(format!(
            "{}, expected one of: {}",
            e,
            Section::ALL
                .iter()
                .map(|s| s.key())
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

fn parse_template(raw: &str) -> Result<TemplateVariant> {
    TemplateVariant::from_str(raw).map_err(VitaeError::Api)
}

fn parse_fields<F: AsRef<str>>(raw: &[F]) -> Result<commands::entries::Fields> {
    raw.iter()
        .map(|f| commands::entries::parse_field(f.as_ref()).map_err(VitaeError::Api))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use tempfile::{tempdir, TempDir};

    fn api() -> (VitaeApi<MemBackend>, TempDir) {
        let dir = tempdir().unwrap();
        let paths = VitaePaths {
            data_dir: dir.path().to_path_buf(),
        };
        (VitaeApi::new(MemBackend::new(), paths).unwrap(), dir)
    }

    #[test]
    fn section_names_are_normalized() {
        let (api, _dir) = api();
        let res = api.show(Some("custom-sections")).unwrap();
        assert!(res.section_json.unwrap().as_array().unwrap().is_empty());
        assert!(matches!(api.show(Some("hobbies")), Err(VitaeError::Api(_))));
    }

    #[test]
    fn add_entry_parses_fields() {
        let (mut api, _dir) = api();
        let res = api
            .add_entry("language", &["name=German", "proficiency=fluent"])
            .unwrap();
        let id = res.created_id.unwrap();
        let langs = &api.store().document().languages;
        assert_eq!(langs.last().unwrap().id, id);
        assert!(matches!(
            api.add_entry("language", &["nonsense"]),
            Err(VitaeError::Api(_))
        ));
    }

    #[test]
    fn edit_entry_routes_personal_without_id() {
        let (mut api, _dir) = api();
        api.edit_entry("personal", None, &["email=jane@example.com"])
            .unwrap();
        assert_eq!(api.store().document().personal.email, "jane@example.com");
        assert!(api.edit_entry("skills", None, &["name=x"]).is_err());
        assert!(api.edit_entry("personal", Some("x"), &["name=x"]).is_err());
    }

    #[test]
    fn export_dir_falls_back_to_config() {
        let (mut api, dir) = api();
        let out = dir.path().join("out");
        api.config(ConfigAction::Set(
            "export-dir".into(),
            out.display().to_string(),
        ))
        .unwrap();
        let res = api.export_json(None).unwrap();
        assert_eq!(res.written_files, vec![out.join("cv-data.json")]);
    }

    #[test]
    fn rasterizer_follows_config() {
        let (mut api, _dir) = api();
        api.config(ConfigAction::Set("rasterizer-args".into(), "{output}".into()))
            .unwrap();
        assert_eq!(api.config.rasterizer_args, vec!["{output}".to_string()]);
    }

    #[test]
    fn unknown_template_is_rejected() {
        let (api, _dir) = api();
        assert!(matches!(
            api.render(Some("fancy"), None),
            Err(VitaeError::Api(_))
        ));
    }
}
