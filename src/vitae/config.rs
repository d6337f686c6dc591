//! # Configuration
//!
//! Settings live in `<data_dir>/config.json`. A missing file means defaults;
//! missing keys inside the file take their individual defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `rasterizer` | `wkhtmltoimage` | Program that turns the rendered HTML into a PNG |
//! | `rasterizer-args` | `--quiet --width 794 {input} {output}` | Its arguments, `{input}`/`{output}` are substituted |
//! | `export-dir` | current directory | Where `export` writes files when `-o` is not given |

use crate::error::{Result, VitaeError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_RASTERIZER: &str = "wkhtmltoimage";

pub const KEYS: &[&str] = &["rasterizer", "rasterizer-args", "export-dir"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VitaeConfig {
    #[serde(default = "default_rasterizer")]
    pub rasterizer: String,

    #[serde(default = "default_rasterizer_args")]
    pub rasterizer_args: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_dir: Option<PathBuf>,
}

fn default_rasterizer() -> String {
    DEFAULT_RASTERIZER.to_string()
}

fn default_rasterizer_args() -> Vec<String> {
    ["--quiet", "--width", "794", "{input}", "{output}"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for VitaeConfig {
    fn default() -> Self {
        Self {
            rasterizer: default_rasterizer(),
            rasterizer_args: default_rasterizer_args(),
            export_dir: None,
        }
    }
}

impl VitaeConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        serde_json::from_str(&content)
            .map_err(|e| VitaeError::Config(format!("{}: {}", config_path.display(), e)))
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "rasterizer" => Some(self.rasterizer.clone()),
            "rasterizer-args" => Some(self.rasterizer_args.join(" ")),
            "export-dir" => Some(
                self.export_dir
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "rasterizer" => {
                if value.trim().is_empty() {
                    return Err("rasterizer cannot be empty".to_string());
                }
                self.rasterizer = value.trim().to_string();
            }
            "rasterizer-args" => {
                let args: Vec<String> = value.split_whitespace().map(str::to_string).collect();
                if !args.iter().any(|a| a.contains("{output}")) {
                    return Err("rasterizer-args must contain {output}".to_string());
                }
                self.rasterizer_args = args;
            }
            "export-dir" => {
                self.export_dir = if value.trim().is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value.trim()))
                };
            }
            _ => {
                return Err(format!(
                    "Unknown config key: {} (expected one of: {})",
                    key,
                    KEYS.join(", ")
                ))
            }
        }
        Ok(())
    }
}
