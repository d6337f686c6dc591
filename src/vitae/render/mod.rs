//! # Template Renderer
//!
//! Rendering is a pure function of the document and the theme:
//!
//! ```text
//! (CvDocument, ThemeSettings) --view::build--> CvView --minijinja--> HTML
//! ```
//!
//! Each [`TemplateVariant`] maps to one layout template. Adding a variant is
//! one enum arm plus one template file. Templates are stand-alone files under
//! `render/templates/`, included as string constants and compiled once.
//!
//! Layouts apply the palette through the `style` filter:
//! `{{ header.name | style("primary") }}` wraps the escaped text in a span
//! colored with the palette's `primary` role. The page wrapper sets the font
//! and background. Everything user supplied goes through HTML escaping.

use crate::error::Result;
use crate::model::CvDocument;
use crate::theme::{TemplateVariant, ThemeSettings};
use minijinja::{AutoEscape, Environment, Error, ErrorKind, HtmlEscape, State, Value};
use once_cell::sync::Lazy;
use serde::Serialize;

pub mod view;

pub use view::CvView;

const PAGE_TEMPLATE: &str = include_str!("templates/page.html");
const MODERN_TEMPLATE: &str = include_str!("templates/modern.html");
const CLASSIC_TEMPLATE: &str = include_str!("templates/classic.html");

static TEMPLATES: Lazy<std::result::Result<Environment<'static>, String>> =
    Lazy::new(|| build_environment().map_err(|e| e.to_string()));

fn build_environment() -> std::result::Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.add_filter("style", style_filter);
    env.add_template("page.html", PAGE_TEMPLATE)?;
    env.add_template(layout_name(TemplateVariant::Modern), MODERN_TEMPLATE)?;
    env.add_template(layout_name(TemplateVariant::Classic), CLASSIC_TEMPLATE)?;
    Ok(env)
}

fn layout_name(variant: TemplateVariant) -> &'static str {
    match variant {
        TemplateVariant::Modern => "modern.html",
        TemplateVariant::Classic => "classic.html",
    }
}

/// Wraps `value` in a span colored with the palette role `role`.
///
/// Falls back to the plain escaped text when the role is unknown.
fn style_filter(state: &State, value: Value, role: &str) -> Value {
    let text = if value.is_safe() {
        value.to_string()
    } else {
        HtmlEscape(&value.to_string()).to_string()
    };
    let color = state
        .lookup("palette")
        .and_then(|palette| palette.get_attr(role).ok())
        .and_then(|c| c.as_str().map(str::to_string));
    match color {
        Some(color) => Value::from_safe_string(format!(
            "<span style=\"color:{}\">{}</span>",
            HtmlEscape(&color),
            text
        )),
        None => Value::from_safe_string(text),
    }
}

#[derive(Serialize)]
struct PageContext<'a> {
    layout: &'static str,
    #[serde(flatten)]
    view: &'a CvView,
}

fn environment() -> Result<&'static Environment<'static>> {
    TEMPLATES
        .as_ref()
        .map_err(|msg| Error::new(ErrorKind::InvalidOperation, msg.clone()).into())
}

/// Renders an already built view as a complete HTML page.
pub fn render_view(view: &CvView, variant: TemplateVariant) -> Result<String> {
    let env = environment()?;
    let page = env.get_template("page.html")?;
    Ok(page.render(PageContext {
        layout: layout_name(variant),
        view,
    })?)
}

/// Renders `doc` as a standalone HTML page using the theme's template.
pub fn render_html(doc: &CvDocument, theme: &ThemeSettings) -> Result<String> {
    render_view(&view::build(doc, theme), theme.template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CustomSection, Project};
    use crate::theme::PALETTES;

    fn themed(variant: TemplateVariant) -> ThemeSettings {
        ThemeSettings {
            template: variant,
            ..ThemeSettings::default()
        }
    }

    fn blank_optional_fields() -> CvDocument {
        let mut doc = CvDocument::default();
        doc.personal.photo_url.clear();
        doc.personal.email.clear();
        doc.personal.phone.clear();
        doc.personal.website.clear();
        doc.social_links.clear();
        for edu in &mut doc.education {
            edu.gpa = None;
        }
        doc
    }

    #[test]
    fn every_variant_renders_the_sample() {
        let doc = CvDocument::default();
        for variant in TemplateVariant::ALL {
            let html = render_html(&doc, &themed(variant)).unwrap();
            assert!(html.starts_with("<!DOCTYPE html>"), "{variant}");
            assert!(html.contains("Alex Doe"), "{variant}");
            assert!(html.contains("Innovate Inc."), "{variant}");
            assert!(html.contains("Project Alpha"), "{variant}");
            assert!(html.contains("GPA"), "{variant}");
            assert!(html.contains("picsum.photos"), "{variant}");
        }
    }

    #[test]
    fn empty_optional_fields_leave_no_markup() {
        let doc = blank_optional_fields();
        for variant in TemplateVariant::ALL {
            let html = render_html(&doc, &themed(variant)).unwrap();
            assert!(!html.contains("GPA"), "{variant}");
            assert!(!html.contains("<img"), "{variant}");
            assert!(!html.contains("cv-contact"), "{variant}");
            assert!(!html.contains("cv-social"), "{variant}");
            assert!(!html.contains("none"), "{variant}");
        }
    }

    #[test]
    fn bullet_markers_are_not_rendered() {
        let html = render_html(&CvDocument::default(), &ThemeSettings::default()).unwrap();
        assert!(html.contains("<li>Led the development"));
        assert!(!html.contains("• Led"));
    }

    #[test]
    fn user_text_is_escaped() {
        let mut doc = CvDocument::default();
        doc.personal.name = "<script>alert(1)</script>".into();
        doc.summary = "R&D \"lead\"".into();
        for variant in TemplateVariant::ALL {
            let html = render_html(&doc, &themed(variant)).unwrap();
            assert!(!html.contains("<script>"), "{variant}");
            assert!(html.contains("&lt;script&gt;"), "{variant}");
            assert!(html.contains("R&amp;D"), "{variant}");
        }
    }

    #[test]
    fn palette_and_font_are_applied() {
        let theme = ThemeSettings {
            palette: PALETTES[3].palette(),
            font: "lora".into(),
            template: TemplateVariant::Classic,
        };
        let html = render_html(&CvDocument::default(), &theme).unwrap();
        assert!(html.contains("color:#dc2626"));
        assert!(html.contains("Lora"));
        assert!(!html.contains("#2563eb"));
    }

    #[test]
    fn projects_and_custom_sections_are_rendered() {
        let mut doc = CvDocument::default();
        doc.projects.push(Project {
            id: "p2".into(),
            name: "Beta".into(),
            url: "".into(),
            description: "Line one\nLine two".into(),
        });
        doc.custom_sections.push(CustomSection {
            id: "c1".into(),
            title: "Volunteering".into(),
            content: "Food bank".into(),
        });
        for variant in TemplateVariant::ALL {
            let html = render_html(&doc, &themed(variant)).unwrap();
            assert!(html.contains("Beta"), "{variant}");
            assert!(html.contains("Line two"), "{variant}");
            assert!(html.contains("Volunteering"), "{variant}");
            assert!(html.contains("Food bank"), "{variant}");
        }
    }

    #[test]
    fn empty_sections_are_omitted() {
        let mut doc = CvDocument::default();
        doc.languages.clear();
        doc.projects.clear();
        for variant in TemplateVariant::ALL {
            let html = render_html(&doc, &themed(variant)).unwrap();
            assert!(!html.contains("Languages"), "{variant}");
            assert!(!html.contains("Projects"), "{variant}");
        }
    }
}
