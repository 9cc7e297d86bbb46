//! Section segmentation.
//!
//! A line opens a new section when it matches the header vocabulary as a
//! whole trimmed line (case-insensitive, trailing colon ignored), or when it
//! is short and rendered bold in the optional markup view. Bold lines that
//! match no vocabulary become `Other` sections; the experience parser knows
//! how to reattach those when they were really bold company names.

use crate::config::{normalize_header, Heuristics};
use crate::models::{Section, SectionKind};
use crate::parse::TextMarkup;

/// A heading never exceeds this many characters.
const MAX_HEADER_CHARS: usize = 50;

pub fn segment(text: &str, markup: Option<&TextMarkup>, heuristics: &Heuristics) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut kind = SectionKind::Header;
    let mut title = String::new();
    let mut buffer: Vec<&str> = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if let Some((next_kind, next_title)) = classify_header(line, index, markup, heuristics) {
            flush(&mut sections, kind, &title, &buffer);
            buffer.clear();
            kind = next_kind;
            title = next_title;
        } else {
            buffer.push(line);
        }
    }
    flush(&mut sections, kind, &title, &buffer);

    sections
}

/// Decides whether `line` is a section heading and, if so, of which kind.
fn classify_header(
    line: &str,
    index: usize,
    markup: Option<&TextMarkup>,
    heuristics: &Heuristics,
) -> Option<(SectionKind, String)> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_HEADER_CHARS {
        return None;
    }

    let title = trimmed.trim_end_matches(':').trim().to_string();

    if let Some(kind) = heuristics.section_kind_of(trimmed) {
        return Some((kind, title));
    }

    let bold = markup.map(|m| m.is_bold(index)).unwrap_or(false);
    if bold {
        let kind = loose_kind(trimmed, heuristics).unwrap_or(SectionKind::Other);
        return Some((kind, title));
    }

    None
}

/// Word-level vocabulary containment for bold lines that are not verbatim
/// headings (`My Experience`, `Core Skills & Tools`).
fn loose_kind(line: &str, heuristics: &Heuristics) -> Option<SectionKind> {
    let normalized = normalize_header(line);
    let words: Vec<&str> = normalized.split_whitespace().collect();

    let lists = [
        (&heuristics.summary_headers, SectionKind::Summary),
        (&heuristics.skills_headers, SectionKind::Skills),
        (&heuristics.experience_headers, SectionKind::Experience),
        (&heuristics.education_headers, SectionKind::Education),
        (&heuristics.certification_headers, SectionKind::Certifications),
    ];
    for (vocabulary, kind) in lists {
        for entry in vocabulary.iter() {
            let hit = if entry.contains(' ') {
                normalized.contains(entry.as_str())
            } else {
                words.iter().any(|w| w == entry)
            };
            if hit {
                return Some(kind);
            }
        }
    }
    None
}

fn flush(sections: &mut Vec<Section>, kind: SectionKind, title: &str, buffer: &[&str]) {
    let items: Vec<String> = buffer
        .iter()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect();

    // The implicit pre-heading block only counts when it has content.
    if kind == SectionKind::Header && items.is_empty() {
        return;
    }

    sections.push(Section {
        kind,
        title: title.to_string(),
        raw_content: buffer.join("\n"),
        items,
    });
}
