use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use vitae::api::{CmdMessage, MessageLevel, SectionOverview};
use vitae::config::{VitaeConfig, KEYS};
use vitae::theme::ThemeSettings;

const LINE_WIDTH: usize = 100;
const SECTION_WIDTH: usize = 16;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

fn pad_to(s: &str, width: usize) -> String {
    let fitted = truncate_to_width(s, width);
    let padding = width.saturating_sub(fitted.width());
    format!("{}{}", fitted, " ".repeat(padding))
}

/// Overview lines: section name, then either its text or one line per entry
/// with its id.
pub(super) fn render_overview(overview: &[SectionOverview]) -> String {
    let mut out = String::new();
    let available = LINE_WIDTH.saturating_sub(SECTION_WIDTH);
    let id_width = overview
        .iter()
        .flat_map(|row| row.entries.iter())
        .map(|e| e.id.width() + 2)
        .max()
        .unwrap_or(0);

    for row in overview {
        let name = pad_to(row.section.key(), SECTION_WIDTH);
        match &row.text {
            Some(text) if !text.is_empty() => {
                out.push_str(&format!("{}{}\n", name, truncate_to_width(text, available)));
            }
            Some(_) => out.push_str(&format!("{}{}\n", name, "(empty)")),
            None if row.entries.is_empty() => {
                out.push_str(&format!("{}{}\n", name, "(none)"));
            }
            None => {
                for (i, entry) in row.entries.iter().enumerate() {
                    let lead = if i == 0 {
                        name.clone()
                    } else {
                        " ".repeat(SECTION_WIDTH)
                    };
                    let label = truncate_to_width(&entry.label, available.saturating_sub(id_width));
                    out.push_str(&format!(
                        "{}{}{}\n",
                        lead,
                        pad_to(&entry.id, id_width),
                        label
                    ));
                }
            }
        }
    }
    out
}

pub(super) fn print_overview(overview: &[SectionOverview]) {
    for line in render_overview(overview).lines() {
        match line.split_once(' ') {
            Some((section, rest)) => println!("{} {}", section.bold(), rest),
            None => println!("{}", line),
        }
    }
}

pub(super) fn render_theme(theme: &ThemeSettings) -> String {
    let mut out = String::new();
    out.push_str(&format!("template    = {}\n", theme.template));
    out.push_str(&format!("font        = {}\n", theme.font));
    for (role, value) in theme.palette.roles() {
        out.push_str(&format!("{:<11} = {}\n", role, value));
    }
    out
}

pub(super) fn render_config(config: &VitaeConfig) -> String {
    KEYS.iter()
        .map(|k| format!("{} = {}\n", k, config.get(k).unwrap_or_default()))
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitae::api::EntryLine;
    use vitae::model::Section;

    #[test]
    fn truncation_respects_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        let cut = truncate_to_width("日本語のテキスト", 7);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 7);
    }

    #[test]
    fn overview_aligns_entries_under_section() {
        let overview = vec![
            SectionOverview {
                section: Section::Summary,
                text: Some("Builds things".into()),
                entries: vec![],
            },
            SectionOverview {
                section: Section::Skills,
                text: None,
                entries: vec![
                    EntryLine {
                        id: "skill-1".into(),
                        label: "Rust (90)".into(),
                    },
                    EntryLine {
                        id: "s2".into(),
                        label: "Go (40)".into(),
                    },
                ],
            },
            SectionOverview {
                section: Section::Projects,
                text: None,
                entries: vec![],
            },
        ];
        let out = render_overview(&overview);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], format!("{:<16}Builds things", "summary"));
        assert_eq!(lines[1], format!("{:<16}{:<9}Rust (90)", "skills", "skill-1"));
        assert_eq!(lines[2], format!("{:<16}{:<9}Go (40)", "", "s2"));
        assert_eq!(lines[3], format!("{:<16}(none)", "projects"));
    }

    #[test]
    fn config_lists_every_key() {
        let out = render_config(&VitaeConfig::default());
        assert!(out.contains("rasterizer = wkhtmltoimage\n"));
        assert!(out.contains("export-dir = \n"));
    }
}
