//! Per-entry editing for the list sections.
//!
//! Field names are matched after [`normalize_key`], so `start-date`,
//! `start_date` and `startDate` all address the same field. The `id` field is
//! never editable.

use super::{
    normalize_key, CustomSection, Education, Experience, Language, PersonalInfo, Project, Skill,
    SkillLevel, SocialLink,
};
use crate::error::{Result, VitaeError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// An item of one of the ordered list sections.
pub trait Entry: Clone + Serialize + DeserializeOwned {
    /// Singular, human readable name used in messages.
    const KIND: &'static str;

    /// Editable fields, as shown in error messages.
    const FIELDS: &'static [&'static str];

    fn id(&self) -> &str;

    /// A new entry with the given id and every other field at its default.
    fn with_id(id: String) -> Self;

    /// Sets one field from its textual form.
    fn set_field(&mut self, field: &str, value: &str) -> Result<()>;

    /// Short one-line description for listings.
    fn label(&self) -> String;
}

fn unknown_field<E: Entry>(field: &str) -> VitaeError {
    VitaeError::invalid_field(
        field,
        format!(
            "unknown {} field, expected one of: {}",
            E::KIND,
            E::FIELDS.join(", ")
        ),
    )
}

fn non_empty_or(primary: &str, fallback: &str) -> String {
    if primary.trim().is_empty() {
        fallback.to_string()
    } else {
        primary.to_string()
    }
}

impl Entry for SocialLink {
    const KIND: &'static str = "social link";
    const FIELDS: &'static [&'static str] = &["network", "url"];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            network: String::new(),
            url: String::new(),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "network" => self.network = value.to_string(),
            "url" => self.url = value.to_string(),
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        format!("{}: {}", non_empty_or(&self.network, "(network)"), self.url)
    }
}

impl Entry for Experience {
    const KIND: &'static str = "experience";
    const FIELDS: &'static [&'static str] = &[
        "company",
        "position",
        "startDate",
        "endDate",
        "description",
    ];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            company: String::new(),
            position: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            description: String::new(),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "company" => self.company = value.to_string(),
            "position" => self.position = value.to_string(),
            "startdate" | "start" => self.start_date = value.to_string(),
            "enddate" | "end" => self.end_date = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        format!(
            "{} at {}",
            non_empty_or(&self.position, "(position)"),
            non_empty_or(&self.company, "(company)")
        )
    }
}

impl Entry for Education {
    const KIND: &'static str = "education";
    const FIELDS: &'static [&'static str] = &["institution", "degree", "graduationDate", "gpa"];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            institution: String::new(),
            degree: String::new(),
            graduation_date: String::new(),
            gpa: None,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "institution" => self.institution = value.to_string(),
            "degree" => self.degree = value.to_string(),
            "graduationdate" | "graduation" => self.graduation_date = value.to_string(),
            // An empty value clears the GPA.
            "gpa" => {
                self.gpa = Some(value.trim())
                    .filter(|v| !v.is_empty())
                    .map(str::to_string)
            }
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        format!(
            "{}, {}",
            non_empty_or(&self.degree, "(degree)"),
            non_empty_or(&self.institution, "(institution)")
        )
    }
}

impl Entry for Skill {
    const KIND: &'static str = "skill";
    const FIELDS: &'static [&'static str] = &["name", "level"];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            level: SkillLevel::DEFAULT,
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "name" => self.name = value.to_string(),
            "level" => {
                let raw: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| VitaeError::invalid_field("level", "expected an integer"))?;
                self.level = SkillLevel::new(raw);
            }
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        format!("{} ({})", non_empty_or(&self.name, "(skill)"), self.level)
    }
}

impl Entry for Language {
    const KIND: &'static str = "language";
    const FIELDS: &'static [&'static str] = &["name", "proficiency"];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            proficiency: Default::default(),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "name" => self.name = value.to_string(),
            "proficiency" | "level" => {
                self.proficiency = value
                    .parse()
                    .map_err(|e: String| VitaeError::invalid_field("proficiency", e))?;
            }
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        format!("{} ({})", non_empty_or(&self.name, "(language)"), self.proficiency)
    }
}

impl Entry for Project {
    const KIND: &'static str = "project";
    const FIELDS: &'static [&'static str] = &["name", "url", "description"];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            name: String::new(),
            url: String::new(),
            description: String::new(),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "name" => self.name = value.to_string(),
            "url" => self.url = value.to_string(),
            "description" => self.description = value.to_string(),
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        non_empty_or(&self.name, "(project)")
    }
}

impl Entry for CustomSection {
    const KIND: &'static str = "custom section";
    const FIELDS: &'static [&'static str] = &["title", "content"];

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(id: String) -> Self {
        Self {
            id,
            title: String::new(),
            content: String::new(),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        match normalize_key(field).as_str() {
            "title" => self.title = value.to_string(),
            "content" => self.content = value.to_string(),
            _ => return Err(unknown_field::<Self>(field)),
        }
        Ok(())
    }

    fn label(&self) -> String {
        non_empty_or(&self.title, "(untitled)")
    }
}

impl PersonalInfo {
    pub const FIELDS: &'static [&'static str] =
        &["name", "jobTitle", "email", "phone", "website", "photo"];

    pub fn set_field(&mut self, field: &str, value: &str) -> Result<()> {
        let slot = match normalize_key(field).as_str() {
            "name" => &mut self.name,
            "jobtitle" | "title" => &mut self.job_title,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "website" => &mut self.website,
            "photo" | "photourl" => &mut self.photo_url,
            _ => {
                return Err(VitaeError::invalid_field(
                    field,
                    format!("unknown personal field, expected one of: {}", Self::FIELDS.join(", ")),
                ))
            }
        };
        *slot = value.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Proficiency;

    #[test]
    fn new_entries_use_documented_defaults() {
        let skill = Skill::with_id("s".into());
        assert_eq!(skill.level.value(), 50);
        assert!(skill.name.is_empty());

        let lang = Language::with_id("l".into());
        assert_eq!(lang.proficiency, Proficiency::Intermediate);

        let edu = Education::with_id("e".into());
        assert_eq!(edu.gpa, None);
    }

    #[test]
    fn field_names_accept_any_spelling() {
        let mut exp = Experience::with_id("x".into());
        exp.set_field("start-date", "Jan 2020").unwrap();
        exp.set_field("end_date", "Present").unwrap();
        exp.set_field("Position", "Lead").unwrap();
        assert_eq!(exp.start_date, "Jan 2020");
        assert_eq!(exp.end_date, "Present");
        assert_eq!(exp.position, "Lead");
    }

    #[test]
    fn skill_level_edit_clamps() {
        let mut skill = Skill::with_id("s".into());
        skill.set_field("level", "150").unwrap();
        assert_eq!(skill.level.value(), 100);
        skill.set_field("level", "-3").unwrap();
        assert_eq!(skill.level.value(), 0);
    }

    #[test]
    fn skill_level_edit_rejects_text() {
        let mut skill = Skill::with_id("s".into());
        let err = skill.set_field("level", "lots").unwrap_err();
        assert!(matches!(err, VitaeError::InvalidField { .. }));
        assert_eq!(skill.level, SkillLevel::DEFAULT);
    }

    #[test]
    fn proficiency_edit_is_validated() {
        let mut lang = Language::with_id("l".into());
        lang.set_field("proficiency", "fluent").unwrap();
        assert_eq!(lang.proficiency, Proficiency::Fluent);
        assert!(lang.set_field("proficiency", "Expert").is_err());
        assert_eq!(lang.proficiency, Proficiency::Fluent);
    }

    #[test]
    fn empty_gpa_clears_it() {
        let mut edu = Education::with_id("e".into());
        edu.set_field("gpa", "3.9").unwrap();
        assert_eq!(edu.gpa.as_deref(), Some("3.9"));
        edu.set_field("gpa", "  ").unwrap();
        assert_eq!(edu.gpa, None);
    }

    #[test]
    fn id_is_not_editable() {
        let mut link = SocialLink::with_id("keep".into());
        assert!(link.set_field("id", "other").is_err());
        assert_eq!(link.id, "keep");
    }

    #[test]
    fn personal_fields_accept_photo_aliases() {
        let mut personal = crate::model::CvDocument::default().personal;
        personal.set_field("photoUrl", "me.png").unwrap();
        assert_eq!(personal.photo_url, "me.png");
        personal.set_field("job-title", "CTO").unwrap();
        assert_eq!(personal.job_title, "CTO");
        assert!(personal.set_field("age", "40").is_err());
    }
}
