//! Parsed resume structure.
//!
//! Everything here is built by `parse::ResumeParser` from raw extracted text
//! and is immutable afterwards. Order matters throughout: sections, skill
//! categories, experiences, and bullets all keep the order they had in the
//! source document, and the patcher relies on that order to line edits up
//! with the original markup.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Canonical resume section kinds. `Header` is the implicit block before the
/// first recognized heading (name + contact line, typically).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Header,
    Summary,
    Skills,
    Experience,
    Education,
    Certifications,
    Other,
}

impl SectionKind {
    /// Display label used when synthesizing a document from scratch.
    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Header => "Header",
            SectionKind::Summary => "Summary",
            SectionKind::Skills => "Skills",
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::Certifications => "Certifications",
            SectionKind::Other => "Other",
        }
    }
}

/// One segmented region of the resume: the heading line that opened it plus
/// everything up to the next heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    /// The heading text as written in the source (trailing colon stripped).
    pub title: String,
    pub raw_content: String,
    /// Non-empty content lines of this section, in source order.
    pub items: Vec<String>,
}

/// A single work history entry. Bullets keep source order; the tailoring
/// plan produces exactly one replacement per bullet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    /// `None` when the role is ongoing (`current` is set) or no end date parsed.
    pub end_date: Option<NaiveDate>,
    pub current: bool,
    pub bullet_points: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub school: String,
    pub degree: String,
    pub field: Option<String>,
    pub graduation_date: Option<NaiveDate>,
}

/// A named skill grouping (`Languages: Rust, Python` → name "Languages").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub links: Vec<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.links.is_empty()
    }
}

/// The fully parsed resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeModel {
    pub sections: Vec<Section>,
    pub experiences: Vec<WorkExperience>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillCategory>,
    /// Skills that appeared outside any `Category: ...` line.
    pub extra_skills: Vec<String>,
    pub contact: ContactInfo,
    /// Sum of merged employment intervals, in years, one decimal.
    pub total_experience_years: f32,
    /// The raw text the model was parsed from; keyword scoring scans this.
    pub full_text: String,
}

impl ResumeModel {
    /// First section of the given kind, if the resume has one.
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.section(kind).is_some()
    }

    /// The most recent job title. Experiences are kept in source order and
    /// resumes list newest first, so this is the first entry's title.
    pub fn current_title(&self) -> Option<&str> {
        self.experiences
            .first()
            .map(|e| e.title.as_str())
            .filter(|t| !t.is_empty())
    }

    /// Every skill string the resume carries: categorized items first (in
    /// category order), then uncategorized extras.
    pub fn skill_items(&self) -> Vec<&str> {
        self.skills
            .iter()
            .flat_map(|c| c.items.iter().map(String::as_str))
            .chain(self.extra_skills.iter().map(String::as_str))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_resume() -> ResumeModel {
        ResumeModel {
            sections: vec![Section {
                kind: SectionKind::Skills,
                title: "Skills".to_string(),
                raw_content: "Languages: Rust, Python".to_string(),
                items: vec!["Languages: Rust, Python".to_string()],
            }],
            experiences: vec![WorkExperience {
                company: "Acme Corp".to_string(),
                title: "Software Engineer".to_string(),
                location: None,
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                end_date: None,
                current: true,
                bullet_points: vec!["Built the billing service".to_string()],
            }],
            education: vec![],
            skills: vec![SkillCategory {
                name: "Languages".to_string(),
                items: vec!["Rust".to_string(), "Python".to_string()],
            }],
            extra_skills: vec!["Docker".to_string()],
            contact: ContactInfo {
                email: Some("dev@example.com".to_string()),
                phone: None,
                links: vec![],
            },
            total_experience_years: 4.5,
            full_text: "...".to_string(),
        }
    }

    #[test]
    fn test_section_lookup_by_kind() {
        let resume = make_resume();
        assert!(resume.has_section(SectionKind::Skills));
        assert!(!resume.has_section(SectionKind::Education));
        assert_eq!(
            resume.section(SectionKind::Skills).unwrap().title,
            "Skills"
        );
    }

    #[test]
    fn test_current_title_is_first_experience() {
        let resume = make_resume();
        assert_eq!(resume.current_title(), Some("Software Engineer"));
    }

    #[test]
    fn test_current_title_none_without_experience() {
        let mut resume = make_resume();
        resume.experiences.clear();
        assert_eq!(resume.current_title(), None);
    }

    #[test]
    fn test_skill_items_include_categorized_and_extras() {
        let resume = make_resume();
        let items = resume.skill_items();
        assert_eq!(items, vec!["Rust", "Python", "Docker"]);
    }

    #[test]
    fn test_resume_model_round_trips_through_json() {
        let resume = make_resume();
        let json = serde_json::to_string(&resume).unwrap();
        let recovered: ResumeModel = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, resume);
    }

    #[test]
    fn test_contact_is_empty() {
        assert!(ContactInfo::default().is_empty());
        let contact = ContactInfo {
            email: Some("a@b.c".to_string()),
            ..Default::default()
        };
        assert!(!contact.is_empty());
    }
}
