use proptest::prelude::*;
use vitae::export::json::{parse_document, to_pretty_json};
use vitae::model::{
    CvDocument, Language, Proficiency, Section, SectionValue, Skill, SkillLevel,
};
use vitae::store::mem_backend::MemBackend;
use vitae::store::CvStore;

fn proficiency() -> impl Strategy<Value = Proficiency> {
    prop::sample::select(Proficiency::ALL.to_vec())
}

fn skills() -> impl Strategy<Value = Vec<Skill>> {
    prop::collection::vec(("[a-z0-9-]{1,12}", "\\PC{0,20}", -50i64..200), 0..6).prop_map(
        |items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (id, name, level))| Skill {
                    id: format!("{}-{}", id, i),
                    name,
                    level: SkillLevel::new(level),
                })
                .collect()
        },
    )
}

fn languages() -> impl Strategy<Value = Vec<Language>> {
    prop::collection::vec(("\\PC{0,20}", proficiency()), 0..4).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (name, proficiency))| Language {
                id: format!("lang-{}", i),
                name,
                proficiency,
            })
            .collect()
    })
}

fn document() -> impl Strategy<Value = CvDocument> {
    ("\\PC{0,30}", "\\PC{0,200}", skills(), languages()).prop_map(
        |(name, summary, skills, languages)| {
            let mut doc = CvDocument::default();
            doc.personal.name = name;
            doc.summary = summary;
            doc.skills = skills;
            doc.languages = languages;
            doc
        },
    )
}

proptest! {
    #[test]
    fn json_export_round_trips(doc in document()) {
        let json = to_pretty_json(&doc).unwrap();
        prop_assert_eq!(parse_document(&json).unwrap(), doc);
    }

    #[test]
    fn skill_levels_stay_in_range(raw in any::<i64>()) {
        prop_assert!(SkillLevel::new(raw).value() <= SkillLevel::MAX);
    }

    #[test]
    fn section_update_leaves_other_sections_alone(
        start in document(),
        new_skills in skills(),
    ) {
        let backend = MemBackend::new();
        let mut store = CvStore::initialize(backend);
        store.replace_document(start.clone()).unwrap();

        store.update_section(SectionValue::Skills(new_skills.clone())).unwrap();

        for section in Section::ALL {
            if section == Section::Skills {
                prop_assert_eq!(store.document().section(section), SectionValue::Skills(new_skills.clone()));
            } else {
                prop_assert_eq!(store.document().section(section), start.section(section));
            }
        }
    }
}
