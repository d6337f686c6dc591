//! # Theme
//!
//! Presentation settings are kept apart from the document: a [`Palette`] of
//! five colors, a font key and a [`TemplateVariant`]. The theme is persisted
//! under its own key and defaults independently of the document.
//!
//! Stored field names are `color`, `font` and `template`. The longer
//! `colorPalette`, `fontFamily` and `templateVariant` are accepted on input.

use crate::error::{Result, VitaeError};
use crate::model::normalize_key;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Five color roles. Every value passes [`is_color_value`], including on
/// decode, so a stored palette can be written into style attributes as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPalette")]
pub struct Palette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub header_text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPalette {
    primary: String,
    secondary: String,
    background: String,
    text: String,
    header_text: String,
}

impl TryFrom<RawPalette> for Palette {
    type Error = String;

    fn try_from(raw: RawPalette) -> std::result::Result<Self, Self::Error> {
        let palette = Palette {
            primary: raw.primary,
            secondary: raw.secondary,
            background: raw.background,
            text: raw.text,
            header_text: raw.header_text,
        };
        for (role, value) in palette.roles() {
            if !is_color_value(value) {
                return Err(format!("{} is not a color value: '{}'", role, value));
            }
        }
        Ok(palette)
    }
}

impl Palette {
    pub const ROLES: &'static [&'static str] =
        &["primary", "secondary", "background", "text", "headerText"];

    fn from_hex(primary: &str, secondary: &str, background: &str, text: &str, header: &str) -> Self {
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            background: background.to_string(),
            text: text.to_string(),
            header_text: header.to_string(),
        }
    }

    /// Each role name with its value, in [`Palette::ROLES`] order.
    pub fn roles(&self) -> [(&'static str, &str); 5] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
            ("headerText", self.header_text.as_str()),
        ]
    }

    /// Sets a single color role.
    pub fn set(&mut self, role: &str, value: &str) -> Result<()> {
        let value = value.trim();
        if !is_color_value(value) {
            return Err(VitaeError::invalid_field(
                role,
                format!("'{}' is not a hex color (#rgb or #rrggbb) or color name", value),
            ));
        }
        let slot = match normalize_key(role).as_str() {
            "primary" => &mut self.primary,
            "secondary" => &mut self.secondary,
            "background" | "bg" => &mut self.background,
            "text" => &mut self.text,
            "headertext" | "header" => &mut self.header_text,
            _ => {
                return Err(VitaeError::invalid_field(
                    role,
                    format!("unknown color role, expected one of: {}", Self::ROLES.join(", ")),
                ))
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

/// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa` and bare CSS color names.
pub fn is_color_value(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic()),
    }
}

/// A named palette preset.
pub struct PalettePreset {
    pub name: &'static str,
    pub colors: [&'static str; 5],
}

impl PalettePreset {
    pub fn palette(&self) -> Palette {
        let [p, s, b, t, h] = self.colors;
        Palette::from_hex(p, s, b, t, h)
    }
}

pub const PALETTES: &[PalettePreset] = &[
    PalettePreset {
        name: "Default Blue",
        colors: ["#2563eb", "#4f46e5", "#ffffff", "#374151", "#ffffff"],
    },
    PalettePreset {
        name: "Forest Green",
        colors: ["#166534", "#15803d", "#ffffff", "#374151", "#ffffff"],
    },
    PalettePreset {
        name: "Modern Slate",
        colors: ["#475569", "#64748b", "#f8fafc", "#1e293b", "#ffffff"],
    },
    PalettePreset {
        name: "Crimson Red",
        colors: ["#dc2626", "#b91c1c", "#ffffff", "#374151", "#ffffff"],
    },
    PalettePreset {
        name: "Professional Graphite",
        colors: ["#334155", "#1e293b", "#ffffff", "#111827", "#f1f5f9"],
    },
];

/// Finds a palette preset by name, ignoring case and separators.
pub fn find_palette(name: &str) -> Option<&'static PalettePreset> {
    let wanted = normalize_key(name);
    PALETTES.iter().find(|p| normalize_key(p.name) == wanted)
}

pub struct FontPreset {
    /// Stored value, e.g. `source-sans-pro`.
    pub key: &'static str,
    pub name: &'static str,
    pub fallback: &'static str,
}

pub const FONTS: &[FontPreset] = &[
    FontPreset {
        key: "inter",
        name: "Inter",
        fallback: "sans-serif",
    },
    FontPreset {
        key: "lora",
        name: "Lora",
        fallback: "serif",
    },
    FontPreset {
        key: "roboto",
        name: "Roboto",
        fallback: "sans-serif",
    },
    FontPreset {
        key: "source-sans-pro",
        name: "Source Sans Pro",
        fallback: "sans-serif",
    },
];

pub fn find_font(key: &str) -> Option<&'static FontPreset> {
    let wanted = normalize_key(key);
    FONTS
        .iter()
        .find(|f| normalize_key(f.key) == wanted || normalize_key(f.name) == wanted)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    #[default]
    Modern,
    Classic,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 2] = [TemplateVariant::Modern, TemplateVariant::Classic];

    pub fn as_str(self) -> &'static str {
        match self {
            TemplateVariant::Modern => "modern",
            TemplateVariant::Classic => "classic",
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateVariant {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        TemplateVariant::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown template '{}', expected modern or classic", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeSettings {
    #[serde(rename = "color", alias = "colorPalette")]
    pub palette: Palette,
    #[serde(rename = "font", alias = "fontFamily")]
    pub font: String,
    #[serde(rename = "template", alias = "templateVariant")]
    pub template: TemplateVariant,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            palette: PALETTES[0].palette(),
            font: FONTS[0].key.to_string(),
            template: TemplateVariant::Modern,
        }
    }
}

impl ThemeSettings {
    /// CSS `font-family` value for the selected font.
    ///
    /// Unknown keys are used as a family name, stripped of anything that
    /// could break out of a style attribute.
    pub fn font_stack(&self) -> String {
        match find_font(&self.font) {
            Some(preset) => format!("'{}', {}", preset.name, preset.fallback),
            None => {
                let family: String = self
                    .font
                    .chars()
                    .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-'))
                    .collect();
                if family.trim().is_empty() {
                    "sans-serif".to_string()
                } else {
                    format!("'{}', sans-serif", family.trim())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_theme_is_blue_inter_modern() {
        let theme = ThemeSettings::default();
        assert_eq!(theme.palette.primary, "#2563eb");
        assert_eq!(theme.font, "inter");
        assert_eq!(theme.template, TemplateVariant::Modern);
    }

    #[test]
    fn persisted_keys_use_short_names() {
        let value = serde_json::to_value(ThemeSettings::default()).unwrap();
        assert!(value.get("color").is_some());
        assert_eq!(value["font"], "inter");
        assert_eq!(value["template"], "modern");
        assert_eq!(value["color"]["headerText"], "#ffffff");
    }

    #[test]
    fn long_key_aliases_are_accepted() {
        let theme: ThemeSettings = serde_json::from_value(json!({
            "colorPalette": PALETTES[1].palette(),
            "fontFamily": "lora",
            "templateVariant": "classic",
        }))
        .unwrap();
        assert_eq!(theme.palette.primary, "#166534");
        assert_eq!(theme.template, TemplateVariant::Classic);
    }

    #[test]
    fn palette_lookup_ignores_case_and_spacing() {
        assert_eq!(find_palette("forest-green").map(|p| p.name), Some("Forest Green"));
        assert_eq!(find_palette("CRIMSON RED").map(|p| p.name), Some("Crimson Red"));
        assert!(find_palette("neon").is_none());
    }

    #[test]
    fn font_stack_uses_preset_or_sanitized_name() {
        let mut theme = ThemeSettings::default();
        assert_eq!(theme.font_stack(), "'Inter', sans-serif");
        theme.font = "lora".into();
        assert_eq!(theme.font_stack(), "'Lora', serif");
        theme.font = "Comic\"; color:red".into();
        assert_eq!(theme.font_stack(), "'Comic colorred', sans-serif");
    }

    #[test]
    fn palette_decode_rejects_non_color_values() {
        let mut value = serde_json::to_value(PALETTES[0].palette()).unwrap();
        value["primary"] = json!("red;background-image:url(x)");
        let err = serde_json::from_value::<Palette>(value).unwrap_err();
        assert!(err.to_string().contains("primary is not a color value"));

        let ok: Palette = serde_json::from_value(json!({
            "primary": "navy",
            "secondary": "#abc",
            "background": "#ffffff",
            "text": "#11223344",
            "headerText": "white",
        }))
        .unwrap();
        assert_eq!(ok.primary, "navy");
    }

    #[test]
    fn palette_set_validates_colors() {
        let mut palette = ThemeSettings::default().palette;
        palette.set("header-text", "#000").unwrap();
        assert_eq!(palette.header_text, "#000");
        assert!(palette.set("primary", "#12345").is_err());
        assert!(palette.set("primary", "red;x").is_err());
        assert!(palette.set("border", "#fff").is_err());
        assert_eq!(palette.primary, "#2563eb");
    }
}
