//! Presentational tree handed to the templates.
//!
//! All decisions about what is shown live here, so the templates only branch
//! on presence: blank fields become `None`, blank entries are dropped and
//! descriptions are already split into bullets.

use crate::model::CvDocument;
use crate::theme::{Palette, ThemeSettings};
use serde::Serialize;

/// Leading characters treated as bullet markers in descriptions.
const BULLET_MARKERS: &[char] = &['•', '-', '*', '·', '–'];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CvView {
    pub palette: Palette,
    /// CSS `font-family` value.
    pub font: String,
    pub header: HeaderView,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceView>,
    pub education: Vec<EducationView>,
    pub skills: Vec<SkillView>,
    pub languages: Vec<LanguageView>,
    pub projects: Vec<ProjectView>,
    pub custom_sections: Vec<CustomView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub name: Option<String>,
    pub job_title: Option<String>,
    pub photo: Option<PhotoView>,
    pub contacts: Vec<ContactView>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhotoView {
    pub url: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactView {
    /// `email`, `phone`, `website` or `social`.
    pub kind: &'static str,
    pub label: String,
    pub href: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceView {
    pub position: Option<String>,
    pub company: Option<String>,
    pub dates: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationView {
    pub degree: Option<String>,
    pub institution: Option<String>,
    pub graduation_date: Option<String>,
    pub gpa: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillView {
    pub name: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguageView {
    pub name: String,
    pub proficiency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectView {
    pub name: Option<String>,
    pub url: Option<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomView {
    pub title: Option<String>,
    pub paragraphs: Vec<String>,
}

/// Trimmed text, or `None` when there is nothing to show.
fn text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Splits a description into bullet lines, dropping markers and blank lines.
pub fn bullets(description: &str) -> Vec<String> {
    description
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let stripped = match line.strip_prefix(BULLET_MARKERS) {
                Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                    rest.trim_start()
                }
                _ => line,
            };
            text(stripped)
        })
        .collect()
}

fn paragraphs(content: &str) -> Vec<String> {
    content.lines().filter_map(text).collect()
}

fn website_href(url: &str) -> String {
    if url.contains("://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

fn date_range(start: &str, end: &str) -> Option<String> {
    match (text(start), text(end)) {
        (Some(s), Some(e)) => Some(format!("{} - {}", s, e)),
        (Some(only), None) | (None, Some(only)) => Some(only),
        (None, None) => None,
    }
}

fn contacts(doc: &CvDocument) -> Vec<ContactView> {
    let personal = &doc.personal;
    let mut out = Vec::new();

    if let Some(email) = text(&personal.email) {
        out.push(ContactView {
            kind: "email",
            href: Some(format!("mailto:{}", email)),
            label: email,
        });
    }
    if let Some(phone) = text(&personal.phone) {
        let dial: String = phone
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '+')
            .collect();
        out.push(ContactView {
            kind: "phone",
            href: (!dial.is_empty()).then(|| format!("tel:{}", dial)),
            label: phone,
        });
    }
    if let Some(website) = text(&personal.website) {
        out.push(ContactView {
            kind: "website",
            href: Some(website_href(&website)),
            label: website,
        });
    }
    for link in &doc.social_links {
        let url = text(&link.url);
        let Some(label) = text(&link.network).or_else(|| url.clone()) else {
            continue;
        };
        out.push(ContactView {
            kind: "social",
            label,
            href: url.map(|u| website_href(&u)),
        });
    }
    out
}

/// Builds the presentational tree for `doc` styled with `theme`.
pub fn build(doc: &CvDocument, theme: &ThemeSettings) -> CvView {
    let personal = &doc.personal;
    let name = text(&personal.name);

    let header = HeaderView {
        photo: text(&personal.photo_url).map(|url| PhotoView {
            url,
            alt: name.clone().unwrap_or_else(|| "Photo".to_string()),
        }),
        name,
        job_title: text(&personal.job_title),
        contacts: contacts(doc),
    };

    let experience = doc
        .experience
        .iter()
        .map(|e| ExperienceView {
            position: text(&e.position),
            company: text(&e.company),
            dates: date_range(&e.start_date, &e.end_date),
            bullets: bullets(&e.description),
        })
        .filter(|e| {
            e.position.is_some() || e.company.is_some() || e.dates.is_some() || !e.bullets.is_empty()
        })
        .collect();

    let education = doc
        .education
        .iter()
        .map(|e| EducationView {
            degree: text(&e.degree),
            institution: text(&e.institution),
            graduation_date: text(&e.graduation_date),
            gpa: e.gpa.as_deref().and_then(text),
        })
        .filter(|e| {
            e.degree.is_some()
                || e.institution.is_some()
                || e.graduation_date.is_some()
                || e.gpa.is_some()
        })
        .collect();

    let skills = doc
        .skills
        .iter()
        .filter_map(|s| {
            text(&s.name).map(|name| SkillView {
                name,
                level: s.level.value(),
            })
        })
        .collect();

    let languages = doc
        .languages
        .iter()
        .filter_map(|l| {
            text(&l.name).map(|name| LanguageView {
                name,
                proficiency: l.proficiency.to_string(),
            })
        })
        .collect();

    let projects = doc
        .projects
        .iter()
        .map(|p| ProjectView {
            name: text(&p.name),
            url: text(&p.url).map(|u| website_href(&u)),
            bullets: bullets(&p.description),
        })
        .filter(|p| p.name.is_some() || p.url.is_some() || !p.bullets.is_empty())
        .collect();

    let custom_sections = doc
        .custom_sections
        .iter()
        .map(|c| CustomView {
            title: text(&c.title),
            paragraphs: paragraphs(&c.content),
        })
        .filter(|c| c.title.is_some() || !c.paragraphs.is_empty())
        .collect();

    CvView {
        palette: theme.palette.clone(),
        font: theme.font_stack(),
        header,
        summary: text(&doc.summary),
        experience,
        education,
        skills,
        languages,
        projects,
        custom_sections,
    }
}
