//! Work history parsing — a per-line state machine over the experience
//! section's content.
//!
//! Layout convention: company line first, then title and/or date lines (in
//! either order, possibly combined as `Title | Jan 2020 – Present`), then
//! glyph-marked bullets. A wrapped bullet continues the previous one until
//! the next glyph, date, or company line. A company-shaped line while
//! collecting bullets closes the entry and opens the next.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Heuristics;
use crate::models::WorkExperience;
use crate::parse::dates::extract_dates;

/// Company and title lines stay under this length.
const MAX_HEADING_CHARS: usize = 60;

static CITY_STATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z .'\-]+,\s*[A-Z]{2}$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingCompany,
    AwaitingTitleOrDate,
    CollectingBullets,
}

pub fn parse_experiences(content: &str, heuristics: &Heuristics) -> Vec<WorkExperience> {
    let mut experiences: Vec<WorkExperience> = Vec::new();
    let mut entry: Option<WorkExperience> = None;
    let mut state = State::AwaitingCompany;

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let bullet = strip_bullet_glyph(line, heuristics);

        match state {
            State::AwaitingCompany => {
                if bullet.is_some() {
                    // Stray bullet before any company line; nothing to attach it to.
                    continue;
                }
                if is_pure_date_line(line) {
                    continue;
                }
                if looks_like_heading(line, heuristics) {
                    entry = Some(new_entry(line));
                    state = State::AwaitingTitleOrDate;
                }
            }

            State::AwaitingTitleOrDate => {
                let Some(e) = entry.as_mut() else { continue };

                if let Some(text) = bullet {
                    e.bullet_points.push(text.to_string());
                    state = State::CollectingBullets;
                    continue;
                }

                if let Some(extraction) = extract_dates(line) {
                    if extraction.is_end_anchored() {
                        apply_range(e, &extraction.range);
                        if e.title.is_empty() && !extraction.prefix.is_empty() {
                            e.title = extraction.prefix.clone();
                        }
                        continue;
                    }
                }

                if e.location.is_none() && looks_like_location(line) {
                    e.location = Some(line.to_string());
                    continue;
                }

                if e.title.is_empty() && looks_like_heading(line, heuristics) {
                    e.title = line.to_string();
                    continue;
                }

                if looks_like_heading(line, heuristics) {
                    // Title and dates already set; this is the next company.
                    finish(&mut experiences, entry.take());
                    entry = Some(new_entry(line));
                    continue;
                }

                // Anything else starts the bullet list, glyph or not.
                e.bullet_points.push(line.to_string());
                state = State::CollectingBullets;
            }

            State::CollectingBullets => {
                let Some(e) = entry.as_mut() else { continue };

                if let Some(text) = bullet {
                    e.bullet_points.push(text.to_string());
                    continue;
                }

                if is_pure_date_line(line) {
                    // A date under the bullets belongs to this entry when it
                    // has none yet; otherwise it is noise.
                    if e.start_date.is_none() {
                        if let Some(extraction) = extract_dates(line) {
                            apply_range(e, &extraction.range);
                        }
                    }
                    continue;
                }

                if looks_like_heading(line, heuristics) {
                    finish(&mut experiences, entry.take());
                    entry = Some(new_entry(line));
                    state = State::AwaitingTitleOrDate;
                    continue;
                }

                // A glyphless line opening with an accomplishment verb is a
                // fresh bullet whose glyph was lost in extraction; anything
                // else is a wrapped continuation of the previous bullet.
                if starts_with_imperative(line, heuristics) {
                    e.bullet_points.push(line.to_string());
                    continue;
                }
                match e.bullet_points.last_mut() {
                    Some(last) => {
                        last.push(' ');
                        last.push_str(line);
                    }
                    None => e.bullet_points.push(line.to_string()),
                }
            }
        }
    }
    finish(&mut experiences, entry.take());

    experiences
}

/// Splits a bullet glyph off the front of a line. ASCII glyphs (`-`, `*`,
/// `>`) need trailing whitespace so hyphenated words don't read as bullets;
/// typographic glyphs count either way.
pub fn strip_bullet_glyph<'a>(line: &'a str, heuristics: &Heuristics) -> Option<&'a str> {
    let trimmed = line.trim_start();
    for glyph in &heuristics.bullet_glyphs {
        if let Some(rest) = trimmed.strip_prefix(glyph.as_str()) {
            if glyph.is_ascii() && !rest.starts_with(char::is_whitespace) {
                continue;
            }
            let text = rest.trim();
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

fn is_pure_date_line(line: &str) -> bool {
    extract_dates(line).map_or(false, |e| e.is_pure_date_line())
}

fn looks_like_location(line: &str) -> bool {
    line.eq_ignore_ascii_case("remote")
        || line.eq_ignore_ascii_case("hybrid")
        || CITY_STATE_RE.is_match(line)
}

/// Company/title shape: short, starts uppercase (or a digit), does not open
/// with an accomplishment verb, is not itself a date line, and is not a
/// label (`Something:`) or a full sentence.
fn looks_like_heading(line: &str, heuristics: &Heuristics) -> bool {
    if line.len() < 2 || line.chars().count() > MAX_HEADING_CHARS {
        return false;
    }
    if line.ends_with(':') {
        return false;
    }
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() > 8 {
        return false;
    }
    if line.ends_with('.') && words.len() >= 5 {
        return false;
    }
    if starts_with_imperative(line, heuristics) {
        return false;
    }
    if is_pure_date_line(line) {
        return false;
    }
    line.chars()
        .next()
        .map(|c| c.is_uppercase() || c.is_numeric())
        .unwrap_or(false)
}

fn starts_with_imperative(line: &str, heuristics: &Heuristics) -> bool {
    let Some(first_word) = line.split_whitespace().next() else {
        return false;
    };
    let first_clean = first_word.trim_matches(|c: char| !c.is_alphanumeric());
    heuristics
        .imperative_verbs
        .iter()
        .any(|v| v.eq_ignore_ascii_case(first_clean))
}

/// Builds a fresh entry from a company line, peeling off `| location`,
/// `| dates`, or trailing `(2019-2021)` segments when the line carries them.
fn new_entry(line: &str) -> WorkExperience {
    let mut entry = WorkExperience {
        company: String::new(),
        title: String::new(),
        location: None,
        start_date: None,
        end_date: None,
        current: false,
        bullet_points: Vec::new(),
    };

    let mut parts = line.split(&['|', '·'][..]).map(str::trim);
    let company_part = parts.next().unwrap_or(line);
    match extract_dates(company_part) {
        Some(extraction) if extraction.is_end_anchored() && !extraction.prefix.is_empty() => {
            entry.company = extraction.prefix.clone();
            apply_range(&mut entry, &extraction.range);
        }
        _ => {
            entry.company = company_part.trim_end_matches(',').to_string();
        }
    }

    for part in parts {
        if part.is_empty() {
            continue;
        }
        if looks_like_location(part) {
            if entry.location.is_none() {
                entry.location = Some(part.to_string());
            }
        } else if let Some(extraction) = extract_dates(part) {
            if extraction.is_pure_date_line() {
                apply_range(&mut entry, &extraction.range);
            }
        }
    }

    entry
}

fn apply_range(entry: &mut WorkExperience, range: &crate::parse::dates::DateRange) {
    if entry.start_date.is_none() {
        entry.start_date = range.start;
    }
    if entry.end_date.is_none() {
        entry.end_date = range.end;
    }
    entry.current = entry.current || range.current;
}

fn finish(experiences: &mut Vec<WorkExperience>, entry: Option<WorkExperience>) {
    if let Some(e) = entry {
        if !e.company.is_empty() {
            experiences.push(e);
        }
    }
}
