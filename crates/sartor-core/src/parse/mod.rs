//! Structural Parser — raw extracted text (plus an optional markup view)
//! into a [`ResumeModel`].
//!
//! The parser never fails: malformed input degrades into absent sections
//! and `ParseDegraded`/`SectionMissing` warnings, and downstream stages
//! always receive a usable model. "Present" end dates are resolved against
//! an injectable reference date so the scorer stays clock-free.

pub mod contact;
pub mod dates;
pub mod education;
pub mod experience;
pub mod segment;
pub mod skills;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::Heuristics;
use crate::errors::Warning;
use crate::models::{ResumeModel, Section, SectionKind};

/// Style flags for one line of extracted text, parallel to `text.lines()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineStyle {
    pub bold: bool,
    pub italic: bool,
    pub list: bool,
}

/// Lightweight markup view produced by the upstream document extractor.
/// Lines beyond the vector's length are treated as unstyled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextMarkup {
    pub lines: Vec<LineStyle>,
}

impl TextMarkup {
    pub fn is_bold(&self, line: usize) -> bool {
        self.lines.get(line).map(|l| l.bold).unwrap_or(false)
    }

    pub fn is_list(&self, line: usize) -> bool {
        self.lines.get(line).map(|l| l.list).unwrap_or(false)
    }
}

pub struct ResumeParser {
    heuristics: Heuristics,
    reference_date: NaiveDate,
}

impl ResumeParser {
    pub fn new(heuristics: Heuristics) -> Self {
        ResumeParser {
            heuristics,
            reference_date: Utc::now().date_naive(),
        }
    }

    /// Pins the date ongoing roles are measured against. Defaults to today;
    /// tests inject a fixed date so `total_experience_years` is stable.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    pub fn parse(&self, raw_text: &str, markup: Option<&TextMarkup>) -> (ResumeModel, Vec<Warning>) {
        let mut warnings: Vec<Warning> = Vec::new();

        let mut sections = segment::segment(raw_text, markup, &self.heuristics);
        let recognized = sections
            .iter()
            .any(|s| !matches!(s.kind, SectionKind::Header | SectionKind::Other));

        if !recognized {
            // Best effort: all content becomes one `Other` section so the
            // model is never empty-handed.
            for section in &mut sections {
                if section.kind == SectionKind::Header {
                    section.kind = SectionKind::Other;
                }
            }
            if !raw_text.trim().is_empty() {
                warnings.push(Warning::ParseDegraded {
                    detail: "no section headings recognized; content kept as a single block"
                        .to_string(),
                });
            }
        }
        debug!("Segmented resume into {} section(s)", sections.len());

        let experiences =
            experience::parse_experiences(&experience_text(&sections), &self.heuristics);
        let (skill_categories, extra_skills) =
            skills::parse_skills(&section_text(&sections, SectionKind::Skills), &self.heuristics);
        let education = education::parse_education(
            &section_text(&sections, SectionKind::Education),
            &self.heuristics,
        );
        let contact = contact::extract_contact(raw_text);

        for kind in [
            SectionKind::Summary,
            SectionKind::Skills,
            SectionKind::Experience,
            SectionKind::Education,
        ] {
            if !sections.iter().any(|s| s.kind == kind) {
                warnings.push(Warning::SectionMissing { kind });
            }
        }

        let total_experience_years =
            dates::total_experience_years(&experiences, self.reference_date);

        info!(
            "Parsed resume: {} section(s), {} experience(s), {} skill category(ies), {:.1} years",
            sections.len(),
            experiences.len(),
            skill_categories.len(),
            total_experience_years
        );

        let model = ResumeModel {
            sections,
            experiences,
            education,
            skills: skill_categories,
            extra_skills,
            contact,
            total_experience_years,
            full_text: raw_text.to_string(),
        };
        (model, warnings)
    }
}

/// Concatenated content of every section of `kind`, in document order.
fn section_text(sections: &[Section], kind: SectionKind) -> String {
    let mut out = String::new();
    for section in sections.iter().filter(|s| s.kind == kind) {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&section.raw_content);
    }
    out
}

/// Experience content plus any `Other` sections that follow it. Bold
/// company names split into their own `Other` sections during segmentation;
/// re-joining them here puts those companies back into the state machine's
/// line flow (the section title line included).
fn experience_text(sections: &[Section]) -> String {
    let mut out = String::new();
    let mut in_flow = false;

    for section in sections {
        match section.kind {
            SectionKind::Experience => {
                in_flow = true;
                push_block(&mut out, None, &section.raw_content);
            }
            SectionKind::Other if in_flow => {
                push_block(&mut out, Some(&section.title), &section.raw_content);
            }
            SectionKind::Header => {}
            _ => in_flow = false,
        }
    }
    out
}

fn push_block(out: &mut String, title: Option<&str>, content: &str) {
    if let Some(title) = title {
        if !title.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(title);
        }
    }
    if !content.trim().is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(content);
    }
}
