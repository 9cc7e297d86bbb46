//! Education section parsing.
//!
//! Degree lines are recognized by a credential keyword (`Bachelor`, `B.S.`,
//! `MBA`, ...). The school is the nearest non-degree line, whether it comes
//! before or after the degree; `degree in field` and `Degree, Field` both
//! split into degree + field. Graduation dates ride on whichever line
//! carries them.

use crate::config::Heuristics;
use crate::models::EducationEntry;
use crate::parse::dates::extract_dates;
use crate::parse::experience::strip_bullet_glyph;

/// Credential tokens after lowercasing and stripping dots (`B.S.` → `bs`).
const DEGREE_TOKENS: &[&str] = &[
    "bs", "ba", "bsc", "be", "btech", "ms", "ma", "msc", "mtech", "mba", "phd", "md", "jd",
];

/// Credential word prefixes (`Bachelor of Science`, `Doctorate`).
const DEGREE_PREFIXES: &[&str] = &["bachelor", "master", "associate", "doctor", "diploma"];

pub fn parse_education(content: &str, heuristics: &Heuristics) -> Vec<EducationEntry> {
    let mut entries: Vec<EducationEntry> = Vec::new();
    let mut pending_school: Option<String> = None;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line = strip_bullet_glyph(line, heuristics).unwrap_or(line);

        let extraction = extract_dates(line);
        let graduation = extraction
            .as_ref()
            .and_then(|e| e.range.end.or(e.range.start));
        let text = match &extraction {
            Some(e) if !e.prefix.is_empty() => e.prefix.clone(),
            Some(_) => String::new(),
            None => line.to_string(),
        };

        if text.is_empty() {
            // Pure date line: attach to the most recent dateless entry.
            if let Some(last) = entries.last_mut() {
                if last.graduation_date.is_none() {
                    last.graduation_date = graduation;
                }
            }
            continue;
        }

        if is_degree_line(&text) {
            let (degree, field) = split_degree_field(&text);
            entries.push(EducationEntry {
                school: pending_school.take().unwrap_or_default(),
                degree,
                field,
                graduation_date: graduation,
            });
            continue;
        }

        // Not a degree line: it names the school. Fill a degree entry that
        // is still waiting for one, otherwise hold it for the next degree.
        match entries.last_mut() {
            Some(last) if last.school.is_empty() => {
                last.school = text;
                if last.graduation_date.is_none() {
                    last.graduation_date = graduation;
                }
            }
            _ => pending_school = Some(text),
        }
    }

    // A school line with no degree anywhere still records the institution.
    if let Some(school) = pending_school {
        entries.push(EducationEntry {
            school,
            degree: String::new(),
            field: None,
            graduation_date: None,
        });
    }

    entries
}

fn is_degree_line(text: &str) -> bool {
    for word in text.split_whitespace() {
        let cleaned: String = word
            .chars()
            .filter(|c| c.is_ascii_alphabetic())
            .collect::<String>()
            .to_lowercase();
        if cleaned.is_empty() {
            continue;
        }
        if DEGREE_TOKENS.iter().any(|t| *t == cleaned) {
            return true;
        }
        if DEGREE_PREFIXES.iter().any(|p| cleaned.starts_with(p)) {
            return true;
        }
    }
    false
}

/// `B.S. in Computer Science` → (`B.S.`, `Computer Science`);
/// `M.S., Data Science` → (`M.S.`, `Data Science`).
fn split_degree_field(text: &str) -> (String, Option<String>) {
    // Byte positions in the lowercased copy only line up for ASCII input.
    let lower = if text.is_ascii() {
        text.to_lowercase()
    } else {
        text.to_string()
    };
    if let Some(pos) = lower.find(" in ") {
        let degree = text[..pos].trim().trim_end_matches(',').to_string();
        let field = text[pos + 4..].trim().to_string();
        if !field.is_empty() {
            return (degree, Some(field));
        }
    }
    if let Some((degree, field)) = text.split_once(',') {
        let field = field.trim();
        if !field.is_empty() {
            return (degree.trim().to_string(), Some(field.to_string()));
        }
    }
    (text.trim().to_string(), None)
}
