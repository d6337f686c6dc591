use crate::commands::{CmdMessage, CmdResult, VitaePaths};
use crate::config::VitaeConfig;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(paths: &VitaePaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = VitaeConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = VitaeConfig::load(dir)?;
            let message = match config.get(&key) {
                Some(val) => CmdMessage::info(val),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            Ok(CmdResult::default().with_message(message))
        }
        ConfigAction::Set(key, value) => {
            let mut config = VitaeConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e)));
            }
            config.save(dir)?;
            let shown = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, shown)))
                .with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn paths(dir: &std::path::Path) -> VitaePaths {
        VitaePaths {
            data_dir: dir.to_path_buf(),
        }
    }

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());
        let res = run(
            &paths,
            ConfigAction::Set("rasterizer".into(), "chromium-shot".into()),
        )
        .unwrap();
        assert!(!res.has_errors());

        let res = run(&paths, ConfigAction::ShowKey("rasterizer".into())).unwrap();
        assert_eq!(res.messages[0].content, "chromium-shot");
    }

    #[test]
    fn unknown_key_is_an_error_message() {
        let dir = tempdir().unwrap();
        let paths = paths(dir.path());
        let res = run(&paths, ConfigAction::ShowKey("colour".into())).unwrap();
        assert!(res.has_errors());
        let res = run(&paths, ConfigAction::Set("colour".into(), "x".into())).unwrap();
        assert!(res.has_errors());
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn show_all_returns_defaults() {
        let dir = tempdir().unwrap();
        let res = run(&paths(dir.path()), ConfigAction::ShowAll).unwrap();
        assert_eq!(res.config.unwrap().rasterizer, "wkhtmltoimage");
    }
}
