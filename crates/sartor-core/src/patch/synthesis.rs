//! Synthesis fallback: a generic document built from scratch.
//!
//! Used when the original template exposes no usable anchors. The output is
//! a minimal valid package (content types, relationships, one markup part)
//! with a fixed section order: header, summary, skills, experience,
//! education, certifications. Original styling is intentionally not
//! preserved; callers see which path was taken via the outcome enum.

use std::io::{Cursor, Write};

use tracing::info;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::errors::TailorError;
use crate::models::{EducationEntry, ResumeModel, SectionKind, WorkExperience};
use crate::patch::markup::escape_text;
use crate::plan::TailoringPlan;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Builds a fresh package from the parsed resume and the plan.
pub(crate) fn synthesize(
    resume: &ResumeModel,
    plan: &TailoringPlan,
) -> Result<Vec<u8>, TailorError> {
    let body = build_body(resume, plan);
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let parts: [(&str, &str); 3] = [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", RELS),
        ("word/document.xml", &document),
    ];
    for (name, content) in parts {
        writer
            .start_file(name, FileOptions::default())
            .and_then(|_| writer.write_all(content.as_bytes()).map_err(Into::into))
            .map_err(|e| {
                TailorError::invalid_package(format!("failed to assemble synthesized part {name}: {e}"))
            })?;
    }
    let bytes = writer
        .finish()
        .map_err(|e| TailorError::invalid_package(format!("failed to finish synthesized package: {e}")))?
        .into_inner();

    info!(bytes = bytes.len(), "synthesized fallback document");
    Ok(bytes)
}

fn build_body(resume: &ResumeModel, plan: &TailoringPlan) -> String {
    let mut paragraphs: Vec<String> = Vec::new();

    // Header: name line (when the parse found one) plus a contact line.
    if let Some(name) = resume
        .section(SectionKind::Header)
        .and_then(|s| s.items.first())
    {
        paragraphs.push(paragraph(name));
    }
    let contact_parts: Vec<&str> = resume
        .contact
        .email
        .as_deref()
        .into_iter()
        .chain(resume.contact.phone.as_deref())
        .chain(resume.contact.links.first().map(String::as_str))
        .collect();
    if !contact_parts.is_empty() {
        paragraphs.push(paragraph(&contact_parts.join(" | ")));
    }

    if !plan.summary.is_empty() {
        paragraphs.push(heading("Summary"));
        paragraphs.push(paragraph(&plan.summary));
    }

    if !plan.skill_text.is_empty() || !resume.extra_skills.is_empty() {
        paragraphs.push(heading("Skills"));
        for (label, value) in &plan.skill_text {
            paragraphs.push(paragraph(&format!("{label}: {value}")));
        }
        if !resume.extra_skills.is_empty() {
            paragraphs.push(paragraph(&resume.extra_skills.join(", ")));
        }
    }

    if !resume.experiences.is_empty() {
        paragraphs.push(heading("Experience"));
        for experience in &resume.experiences {
            push_experience(&mut paragraphs, experience, plan);
        }
    }

    if !resume.education.is_empty() {
        paragraphs.push(heading("Education"));
        for entry in &resume.education {
            let line = education_line(entry);
            if !line.is_empty() {
                paragraphs.push(paragraph(&line));
            }
        }
    }

    if let Some(section) = resume.section(SectionKind::Certifications) {
        if !section.items.is_empty() {
            paragraphs.push(heading("Certifications"));
            for item in &section.items {
                paragraphs.push(paragraph(item));
            }
        }
    }

    paragraphs.join("")
}

fn push_experience(paragraphs: &mut Vec<String>, experience: &WorkExperience, plan: &TailoringPlan) {
    let title_line = match (experience.company.is_empty(), experience.title.is_empty()) {
        (false, false) => format!("{} — {}", experience.company, experience.title),
        (false, true) => experience.company.clone(),
        (true, false) => experience.title.clone(),
        (true, true) => return,
    };
    paragraphs.push(paragraph(&title_line));

    if let Some(line) = date_location_line(experience) {
        paragraphs.push(paragraph(&line));
    }

    let bullets = plan
        .experience_bullets
        .get(experience.company.trim())
        .unwrap_or(&experience.bullet_points);
    for bullet in bullets {
        paragraphs.push(paragraph(&format!("• {bullet}")));
    }
}

fn date_location_line(experience: &WorkExperience) -> Option<String> {
    let start = experience.start_date.map(|d| d.format("%b %Y").to_string());
    let end = if experience.current {
        Some("Present".to_string())
    } else {
        experience.end_date.map(|d| d.format("%b %Y").to_string())
    };
    let dates = match (start, end) {
        (Some(s), Some(e)) => Some(format!("{s} – {e}")),
        (Some(s), None) => Some(s),
        (None, Some(e)) => Some(e),
        (None, None) => None,
    };
    match (dates, experience.location.as_deref()) {
        (Some(d), Some(l)) => Some(format!("{d} | {l}")),
        (Some(d), None) => Some(d),
        (None, Some(l)) => Some(l.to_string()),
        (None, None) => None,
    }
}

fn education_line(entry: &EducationEntry) -> String {
    let qualification = match (entry.degree.is_empty(), entry.field.as_deref()) {
        (false, Some(field)) => format!("{} in {field}", entry.degree),
        (false, None) => entry.degree.clone(),
        (true, Some(field)) => field.to_string(),
        (true, None) => String::new(),
    };
    let mut line = match (qualification.is_empty(), entry.school.is_empty()) {
        (false, false) => format!("{qualification}, {}", entry.school),
        (false, true) => qualification,
        (true, false) => entry.school.clone(),
        (true, true) => return String::new(),
    };
    if let Some(date) = entry.graduation_date {
        line = format!("{line} ({})", date.format("%Y"));
    }
    line
}

fn paragraph(text: &str) -> String {
    format!(
        r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#,
        escape_text(text)
    )
}

fn heading(text: &str) -> String {
    paragraph(text)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use indexmap::IndexMap;

    use super::*;
    use crate::models::{ContactInfo, Section, SkillCategory};
    use crate::patch::markup::validate_markup;
    use crate::patch::package::DocumentPackage;

    fn make_resume() -> ResumeModel {
        ResumeModel {
            sections: vec![
                Section {
                    kind: SectionKind::Header,
                    title: String::new(),
                    raw_content: "Jane Doe\njane@doe.dev".to_string(),
                    items: vec!["Jane Doe".to_string(), "jane@doe.dev".to_string()],
                },
                Section {
                    kind: SectionKind::Certifications,
                    title: "Certifications".to_string(),
                    raw_content: "AWS SAA".to_string(),
                    items: vec!["AWS SAA".to_string()],
                },
            ],
            experiences: vec![WorkExperience {
                company: "Acme Corp".to_string(),
                title: "Engineer".to_string(),
                location: Some("Remote".to_string()),
                start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
                end_date: None,
                current: true,
                bullet_points: vec!["Did the original thing".to_string()],
            }],
            education: vec![EducationEntry {
                school: "State University".to_string(),
                degree: "BS".to_string(),
                field: Some("Computer Science".to_string()),
                graduation_date: NaiveDate::from_ymd_opt(2019, 5, 1),
            }],
            skills: vec![SkillCategory {
                name: "Languages".to_string(),
                items: vec!["Python".to_string()],
            }],
            extra_skills: vec!["Agile".to_string()],
            contact: ContactInfo {
                email: Some("jane@doe.dev".to_string()),
                phone: Some("(415) 555-0199".to_string()),
                links: vec!["github.com/janedoe".to_string()],
            },
            total_experience_years: 4.5,
            full_text: String::new(),
        }
    }

    fn make_plan() -> TailoringPlan {
        let mut skill_text = IndexMap::new();
        skill_text.insert("Languages".to_string(), "Python, Rust".to_string());
        let mut experience_bullets = IndexMap::new();
        experience_bullets.insert(
            "Acme Corp".to_string(),
            vec!["Did the tailored thing".to_string()],
        );
        TailoringPlan {
            summary: "Engineer with 4 years of experience.".to_string(),
            skill_text,
            experience_bullets,
        }
    }

    #[test]
    fn test_synthesized_package_is_openable_and_valid() {
        let bytes = synthesize(&make_resume(), &make_plan()).unwrap();
        let package = DocumentPackage::open(&bytes).unwrap();
        let body = package.body_str().unwrap();
        assert!(validate_markup(body).is_ok());
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let bytes = synthesize(&make_resume(), &make_plan()).unwrap();
        let package = DocumentPackage::open(&bytes).unwrap();
        let body = package.body_str().unwrap();

        let order = [
            "Jane Doe",
            "Summary",
            "Skills",
            "Experience",
            "Education",
            "Certifications",
        ];
        let positions: Vec<usize> = order
            .iter()
            .map(|s| body.find(s).unwrap_or_else(|| panic!("missing {s}")))
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn test_plan_content_wins_over_originals() {
        let bytes = synthesize(&make_resume(), &make_plan()).unwrap();
        let package = DocumentPackage::open(&bytes).unwrap();
        let body = package.body_str().unwrap();

        assert!(body.contains("Python, Rust"));
        assert!(body.contains("• Did the tailored thing"));
        assert!(!body.contains("Did the original thing"));
        assert!(body.contains("Jan 2020 – Present | Remote"));
        assert!(body.contains("BS in Computer Science, State University (2019)"));
        assert!(body.contains("jane@doe.dev | (415) 555-0199 | github.com/janedoe"));
    }

    #[test]
    fn test_empty_resume_still_produces_valid_package() {
        let resume = ResumeModel {
            sections: vec![],
            experiences: vec![],
            education: vec![],
            skills: vec![],
            extra_skills: vec![],
            contact: ContactInfo::default(),
            total_experience_years: 0.0,
            full_text: String::new(),
        };
        let plan = TailoringPlan {
            summary: String::new(),
            skill_text: IndexMap::new(),
            experience_bullets: IndexMap::new(),
        };
        let bytes = synthesize(&resume, &plan).unwrap();
        let package = DocumentPackage::open(&bytes).unwrap();
        assert!(validate_markup(package.body_str().unwrap()).is_ok());
    }

    #[test]
    fn test_text_is_escaped() {
        let mut resume = make_resume();
        resume.experiences[0].company = "Smith & Sons".to_string();
        let mut plan = make_plan();
        plan.experience_bullets = IndexMap::new();
        plan.experience_bullets.insert(
            "Smith & Sons".to_string(),
            vec!["Cut costs by <10%>".to_string()],
        );

        let bytes = synthesize(&resume, &plan).unwrap();
        let package = DocumentPackage::open(&bytes).unwrap();
        let body = package.body_str().unwrap();
        assert!(body.contains("Smith &amp; Sons"));
        assert!(body.contains("&lt;10%&gt;"));
        assert!(validate_markup(body).is_ok());
    }
}
