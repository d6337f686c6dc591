use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, VitaeError};
use crate::store::{CvStore, StorageBackend};
use crate::theme::{find_font, find_palette, Palette, TemplateVariant, FONTS, PALETTES};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeChange {
    Template(TemplateVariant),
    /// Preset name, e.g. `forest-green`.
    Palette(String),
    Font(String),
    Color { role: String, value: String },
}

/// Applies `changes` in order. With no changes, reports the current theme.
///
/// Either every change applies or none does.
pub fn run<B: StorageBackend>(store: &mut CvStore<B>, changes: &[ThemeChange]) -> Result<CmdResult> {
    if changes.is_empty() {
        return Ok(CmdResult::default().with_theme(store.theme().clone()));
    }

    store.update_theme_with(|theme| {
        for change in changes {
            match change {
                ThemeChange::Template(variant) => theme.template = *variant,
                ThemeChange::Palette(name) => {
                    let preset = find_palette(name).ok_or_else(|| {
                        VitaeError::invalid_field(
                            "palette",
                            format!(
                                "unknown palette '{}', expected one of: {}",
                                name,
                                PALETTES
                                    .iter()
                                    .map(|p| p.name)
                                    .collect::<Vec<_>>()
                                    .join(", ")
                            ),
                        )
                    })?;
                    theme.palette = preset.palette();
                }
                ThemeChange::Font(key) => {
                    let preset = find_font(key).ok_or_else(|| {
                        VitaeError::invalid_field(
                            "font",
                            format!(
                                "unknown font '{}', expected one of: {}",
                                key,
                                FONTS.iter().map(|f| f.key).collect::<Vec<_>>().join(", ")
                            ),
                        )
                    })?;
                    theme.font = preset.key.to_string();
                }
                ThemeChange::Color { role, value } => theme.palette.set(role, value)?,
            }
        }
        Ok(())
    })?;

    Ok(CmdResult::default()
        .with_theme(store.theme().clone())
        .with_message(CmdMessage::success("Theme updated")))
}

/// Lists the available templates, palettes and fonts.
pub fn presets() -> CmdResult {
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::info(format!(
        "Templates: {}",
        TemplateVariant::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    )));
    for preset in PALETTES {
        let colors = preset
            .colors
            .iter()
            .zip(Palette::ROLES)
            .map(|(c, role)| format!("{}={}", role, c))
            .collect::<Vec<_>>()
            .join(" ");
        result.add_message(CmdMessage::info(format!(
            "Palette {}: {}",
            preset.name, colors
        )));
    }
    for font in FONTS {
        result.add_message(CmdMessage::info(format!(
            "Font {}: {}, {}",
            font.key, font.name, font.fallback
        )));
    }
    result
}
