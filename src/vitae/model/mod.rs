//! # Document Model
//!
//! The CV is a single aggregate, [`CvDocument`], made of nine top-level
//! sections. One is a record ([`PersonalInfo`]), one is free text (`summary`)
//! and the other seven are ordered lists of entries.
//!
//! ## Identity
//!
//! Every list entry carries a string `id` assigned when the entry is created
//! (see [`new_id`] and [`fresh_id`]). Ids are opaque: imported files may use
//! any string, new entries get a v4 UUID and the sample uses fixed ids.
//!
//! ## Validation lives in the types
//!
//! - [`SkillLevel`] clamps to `0..=100` on construction *and* on decode, so a
//!   stored or imported `150` reads back as `100`.
//! - [`Proficiency`] is a closed enum; any other value fails to decode.
//!
//! ## Sections
//!
//! Mutation happens one whole section at a time. [`Section`] names a section
//! and [`SectionValue`] carries a typed replacement for exactly one of them.
//! [`CvDocument::set_section`] swaps that section and leaves the rest alone.
//!
//! ## Wire format
//!
//! Serialized field names are camelCase. The photo field is stored as `photo`
//! and `photoUrl` is accepted as an alias.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

mod defaults;
pub mod entry;

pub use entry::Entry;

/// Generates a new entry id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Generates an id that does not collide with any of `siblings`.
pub fn fresh_id<'a>(siblings: impl IntoIterator<Item = &'a str>) -> String {
    let taken: HashSet<&str> = siblings.into_iter().collect();
    loop {
        let id = new_id();
        if !taken.contains(id.as_str()) {
            return id;
        }
    }
}

/// Every id in `entries` must be non-blank and unique among its siblings.
pub fn check_ids<E: Entry>(entries: &[E]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for entry in entries {
        let id = entry.id();
        if id.trim().is_empty() {
            return Err(format!("{} without an id", E::KIND));
        }
        if !seen.insert(id) {
            return Err(format!("duplicate {} id '{}'", E::KIND, id));
        }
    }
    Ok(())
}

/// Lowercases and drops `-`, `_` and spaces, so `job-title`, `job_title` and
/// `jobTitle` all compare equal.
pub(crate) fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub job_title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
    #[serde(rename = "photo", alias = "photoUrl")]
    pub photo_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub network: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub position: String,
    pub start_date: String,
    pub end_date: String,
    /// Newline-separated bullet lines.
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub id: String,
    pub institution: String,
    pub degree: String,
    pub graduation_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
}

/// A skill rating, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct SkillLevel(u8);

impl SkillLevel {
    pub const MAX: u8 = 100;

    /// Level given to newly added skills.
    pub const DEFAULT: SkillLevel = SkillLevel(50);

    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(0, Self::MAX as i64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for SkillLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for SkillLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LevelVisitor;

        impl Visitor<'_> for LevelVisitor {
            type Value = SkillLevel;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a number between 0 and 100")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<SkillLevel, E> {
                Ok(SkillLevel::new(v))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<SkillLevel, E> {
                Ok(SkillLevel::new(v.min(SkillLevel::MAX as u64) as i64))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<SkillLevel, E> {
                if v.is_finite() {
                    Ok(SkillLevel::new(v.round().clamp(0.0, SkillLevel::MAX as f64) as i64))
                } else {
                    Err(E::custom("skill level must be a finite number"))
                }
            }
        }

        deserializer.deserialize_any(LevelVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    pub level: SkillLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

impl Proficiency {
    pub const ALL: [Proficiency; 5] = [
        Proficiency::Beginner,
        Proficiency::Intermediate,
        Proficiency::Advanced,
        Proficiency::Fluent,
        Proficiency::Native,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Fluent => "Fluent",
            Proficiency::Native => "Native",
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Proficiency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Proficiency::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Proficiency::ALL.iter().map(|p| p.as_str()).collect();
                format!("expected one of {}", names.join(", "))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: String,
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomSection {
    pub id: String,
    pub title: String,
    pub content: String,
}

/// The résumé itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvDocument {
    pub personal: PersonalInfo,
    pub social_links: Vec<SocialLink>,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<Skill>,
    pub languages: Vec<Language>,
    pub projects: Vec<Project>,
    pub custom_sections: Vec<CustomSection>,
}

impl Default for CvDocument {
    /// The built-in sample document.
    fn default() -> Self {
        defaults::SAMPLE_DOCUMENT.clone()
    }
}

impl CvDocument {
    /// Returns a copy of one section.
    pub fn section(&self, section: Section) -> SectionValue {
        match section {
            Section::Personal => SectionValue::Personal(self.personal.clone()),
            Section::SocialLinks => SectionValue::SocialLinks(self.social_links.clone()),
            Section::Summary => SectionValue::Summary(self.summary.clone()),
            Section::Experience => SectionValue::Experience(self.experience.clone()),
            Section::Education => SectionValue::Education(self.education.clone()),
            Section::Skills => SectionValue::Skills(self.skills.clone()),
            Section::Languages => SectionValue::Languages(self.languages.clone()),
            Section::Projects => SectionValue::Projects(self.projects.clone()),
            Section::CustomSections => SectionValue::CustomSections(self.custom_sections.clone()),
        }
    }

    /// Checks the ids of every list section. See [`check_ids`].
    pub fn check_ids(&self) -> Result<(), String> {
        check_ids(&self.social_links)?;
        check_ids(&self.experience)?;
        check_ids(&self.education)?;
        check_ids(&self.skills)?;
        check_ids(&self.languages)?;
        check_ids(&self.projects)?;
        check_ids(&self.custom_sections)
    }

    /// Replaces the section named by `value`. Every other section is untouched.
    pub fn set_section(&mut self, value: SectionValue) {
        match value {
            SectionValue::Personal(v) => self.personal = v,
            SectionValue::SocialLinks(v) => self.social_links = v,
            SectionValue::Summary(v) => self.summary = v,
            SectionValue::Experience(v) => self.experience = v,
            SectionValue::Education(v) => self.education = v,
            SectionValue::Skills(v) => self.skills = v,
            SectionValue::Languages(v) => self.languages = v,
            SectionValue::Projects(v) => self.projects = v,
            SectionValue::CustomSections(v) => self.custom_sections = v,
        }
    }
}

/// Names one top-level section of a [`CvDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Personal,
    SocialLinks,
    Summary,
    Experience,
    Education,
    Skills,
    Languages,
    Projects,
    CustomSections,
}

impl Section {
    pub const ALL: [Section; 9] = [
        Section::Personal,
        Section::SocialLinks,
        Section::Summary,
        Section::Experience,
        Section::Education,
        Section::Skills,
        Section::Languages,
        Section::Projects,
        Section::CustomSections,
    ];

    /// The section's JSON key.
    pub fn key(self) -> &'static str {
        match self {
            Section::Personal => "personal",
            Section::SocialLinks => "socialLinks",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Skills => "skills",
            Section::Languages => "languages",
            Section::Projects => "projects",
            Section::CustomSections => "customSections",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = String;

    /// Accepts the JSON key in any casing, plus singular forms (`skill`,
    /// `link`, ...) so that `add skill` reads naturally.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_key(s).as_str() {
            "personal" | "personalinfo" => Ok(Section::Personal),
            "sociallinks" | "sociallink" | "social" | "links" | "link" => Ok(Section::SocialLinks),
            "summary" => Ok(Section::Summary),
            "experience" | "experiences" | "job" | "jobs" => Ok(Section::Experience),
            "education" | "educations" | "school" => Ok(Section::Education),
            "skills" | "skill" => Ok(Section::Skills),
            "languages" | "language" => Ok(Section::Languages),
            "projects" | "project" => Ok(Section::Projects),
            "customsections" | "customsection" | "custom" => Ok(Section::CustomSections),
            _ => Err(format!("unknown section '{}'", s)),
        }
    }
}

/// A typed replacement value for exactly one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionValue {
    Personal(PersonalInfo),
    SocialLinks(Vec<SocialLink>),
    Summary(String),
    Experience(Vec<Experience>),
    Education(Vec<Education>),
    Skills(Vec<Skill>),
    Languages(Vec<Language>),
    Projects(Vec<Project>),
    CustomSections(Vec<CustomSection>),
}

impl SectionValue {
    pub fn section(&self) -> Section {
        match self {
            SectionValue::Personal(_) => Section::Personal,
            SectionValue::SocialLinks(_) => Section::SocialLinks,
            SectionValue::Summary(_) => Section::Summary,
            SectionValue::Experience(_) => Section::Experience,
            SectionValue::Education(_) => Section::Education,
            SectionValue::Skills(_) => Section::Skills,
            SectionValue::Languages(_) => Section::Languages,
            SectionValue::Projects(_) => Section::Projects,
            SectionValue::CustomSections(_) => Section::CustomSections,
        }
    }

    /// Checks the entry ids of a list section; always passes for the others.
    pub fn check_ids(&self) -> Result<(), String> {
        match self {
            SectionValue::Personal(_) | SectionValue::Summary(_) => Ok(()),
            SectionValue::SocialLinks(v) => check_ids(v),
            SectionValue::Experience(v) => check_ids(v),
            SectionValue::Education(v) => check_ids(v),
            SectionValue::Skills(v) => check_ids(v),
            SectionValue::Languages(v) => check_ids(v),
            SectionValue::Projects(v) => check_ids(v),
            SectionValue::CustomSections(v) => check_ids(v),
        }
    }

    /// Decodes `value` with the schema of `section`.
    pub fn from_json(section: Section, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match section {
            Section::Personal => SectionValue::Personal(serde_json::from_value(value)?),
            Section::SocialLinks => SectionValue::SocialLinks(serde_json::from_value(value)?),
            Section::Summary => SectionValue::Summary(serde_json::from_value(value)?),
            Section::Experience => SectionValue::Experience(serde_json::from_value(value)?),
            Section::Education => SectionValue::Education(serde_json::from_value(value)?),
            Section::Skills => SectionValue::Skills(serde_json::from_value(value)?),
            Section::Languages => SectionValue::Languages(serde_json::from_value(value)?),
            Section::Projects => SectionValue::Projects(serde_json::from_value(value)?),
            Section::CustomSections => {
                SectionValue::CustomSections(serde_json::from_value(value)?)
            }
        })
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        match self {
            SectionValue::Personal(v) => serde_json::to_value(v),
            SectionValue::SocialLinks(v) => serde_json::to_value(v),
            SectionValue::Summary(v) => serde_json::to_value(v),
            SectionValue::Experience(v) => serde_json::to_value(v),
            SectionValue::Education(v) => serde_json::to_value(v),
            SectionValue::Skills(v) => serde_json::to_value(v),
            SectionValue::Languages(v) => serde_json::to_value(v),
            SectionValue::Projects(v) => serde_json::to_value(v),
            SectionValue::CustomSections(v) => serde_json::to_value(v),
        }
    }
}
