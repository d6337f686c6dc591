use super::{
    CvDocument, Education, Experience, Language, PersonalInfo, Proficiency, Project,
    Skill, SkillLevel, SocialLink,
};
use once_cell::sync::Lazy;

/// Sample document shown on first run and restored by `reset`.
///
/// Ids are fixed so an unsaved sample addresses the same entries in every
/// process.
pub(super) static SAMPLE_DOCUMENT: Lazy<CvDocument> = Lazy::new(sample_document);

fn social(id: &str, network: &str, url: &str) -> SocialLink {
    SocialLink {
        id: id.to_string(),
        network: network.to_string(),
        url: url.to_string(),
    }
}

fn skill(id: &str, name: &str, level: i64) -> Skill {
    Skill {
        id: id.to_string(),
        name: name.to_string(),
        level: SkillLevel::new(level),
    }
}

fn language(id: &str, name: &str, proficiency: Proficiency) -> Language {
    Language {
        id: id.to_string(),
        name: name.to_string(),
        proficiency,
    }
}

fn sample_document() -> CvDocument {
    CvDocument {
        personal: PersonalInfo {
            name: "Alex Doe".to_string(),
            job_title: "Senior Frontend Developer".to_string(),
            email: "alex.doe@example.com".to_string(),
            phone: "+1 (555) 123-4567".to_string(),
            website: "alexdoe.dev".to_string(),
            photo_url: "https://picsum.photos/200".to_string(),
        },
        social_links: vec![
            social("social-1", "LinkedIn", "https://linkedin.com/in/alexdoe"),
            social("social-2", "GitHub", "https://github.com/alexdoe"),
        ],
        summary: "A passionate and creative frontend developer with 8+ years of experience \
                  in building responsive and user-friendly web applications using modern \
                  technologies like React, TypeScript, and Next.js. Proven ability to lead \
                  projects, mentor junior developers, and collaborate effectively with \
                  cross-functional teams to deliver high-quality products."
            .to_string(),
        experience: vec![
            Experience {
                id: "exp-1".to_string(),
                company: "Innovate Inc.".to_string(),
                position: "Senior Frontend Developer".to_string(),
                start_date: "Jan 2020".to_string(),
                end_date: "Present".to_string(),
                description: [
                    "• Led the development of a new design system, improving consistency and reducing development time by 30%.",
                    "• Architected and built a complex single-page application for data visualization.",
                    "• Mentored a team of 4 junior developers, fostering their growth and skills.",
                ]
                .join("\n"),
            },
            Experience {
                id: "exp-2".to_string(),
                company: "Tech Solutions LLC".to_string(),
                position: "Frontend Developer".to_string(),
                start_date: "Jun 2016".to_string(),
                end_date: "Dec 2019".to_string(),
                description: [
                    "• Developed and maintained client-facing websites using React and Redux.",
                    "• Collaborated with UI/UX designers to translate wireframes into high-quality code.",
                    "• Improved website performance by 20% through code optimization and lazy loading techniques.",
                ]
                .join("\n"),
            },
        ],
        education: vec![Education {
            id: "edu-1".to_string(),
            institution: "State University".to_string(),
            degree: "B.S. in Computer Science".to_string(),
            graduation_date: "May 2016".to_string(),
            gpa: Some("3.8".to_string()),
        }],
        skills: vec![
            skill("skill-1", "React", 95),
            skill("skill-2", "TypeScript", 90),
            skill("skill-3", "Node.js", 75),
            skill("skill-4", "UI/UX Design", 80),
            skill("skill-5", "Tailwind CSS", 95),
        ],
        languages: vec![
            language("lang-1", "English", Proficiency::Native),
            language("lang-2", "Spanish", Proficiency::Advanced),
        ],
        projects: vec![Project {
            id: "project-1".to_string(),
            name: "Project Alpha".to_string(),
            url: "https://github.com/alexdoe/project-alpha".to_string(),
            description: "A personal portfolio website built with Next.js and deployed on Vercel."
                .to_string(),
        }],
        custom_sections: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_has_expected_shape() {
        let doc = CvDocument::default();
        assert_eq!(doc.personal.name, "Alex Doe");
        assert_eq!(doc.social_links.len(), 2);
        assert_eq!(doc.experience.len(), 2);
        assert_eq!(doc.education.len(), 1);
        assert_eq!(doc.education[0].gpa.as_deref(), Some("3.8"));
        assert_eq!(doc.skills.len(), 5);
        assert_eq!(doc.languages.len(), 2);
        assert_eq!(doc.projects.len(), 1);
        assert!(doc.custom_sections.is_empty());
    }

    #[test]
    fn sample_ids_are_fixed() {
        let doc = CvDocument::default();
        assert_eq!(doc.skills[0].id, "skill-1");
        assert_eq!(doc.experience[1].id, "exp-2");
        assert_eq!(doc.projects[0].id, "project-1");
    }

    #[test]
    fn sample_ids_are_unique() {
        let doc = CvDocument::default();
        let ids: Vec<&str> = doc
            .social_links
            .iter()
            .map(|e| e.id.as_str())
            .chain(doc.experience.iter().map(|e| e.id.as_str()))
            .chain(doc.skills.iter().map(|e| e.id.as_str()))
            .chain(doc.education.iter().map(|e| e.id.as_str()))
            .chain(doc.languages.iter().map(|e| e.id.as_str()))
            .chain(doc.projects.iter().map(|e| e.id.as_str()))
            .collect();
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }
}
