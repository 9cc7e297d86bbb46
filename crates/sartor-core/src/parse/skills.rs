//! Skills section parsing.
//!
//! `Category: item, item, …` lines become named categories, kept in source
//! order. Comma lists without a category label land in the uncategorized
//! overflow, de-duplicated case-insensitively while preserving first
//! occurrence.

use crate::config::Heuristics;
use crate::models::SkillCategory;
use crate::parse::experience::strip_bullet_glyph;

/// Category labels stay short; a colon deep into a line is prose, not a label.
const MAX_CATEGORY_CHARS: usize = 40;

pub fn parse_skills(content: &str, heuristics: &Heuristics) -> (Vec<SkillCategory>, Vec<String>) {
    let mut categories: Vec<SkillCategory> = Vec::new();
    let mut extras: Vec<String> = Vec::new();

    for raw_line in content.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        let line = strip_bullet_glyph(line, heuristics).unwrap_or(line);

        if let Some((name, rest)) = split_category(line) {
            let items = split_items(rest);
            if !items.is_empty() {
                categories.push(SkillCategory {
                    name: name.to_string(),
                    items,
                });
                continue;
            }
        }

        if line.contains(&[',', ';', '|', '•'][..]) {
            for item in split_items(line) {
                push_unique(&mut extras, item);
            }
        } else {
            push_unique(&mut extras, line.to_string());
        }
    }

    (categories, extras)
}

/// Splits `Languages: Rust, Python` into `("Languages", "Rust, Python")`.
/// Rejects URLs (`https://...`) and colons that appear too deep to be labels.
fn split_category(line: &str) -> Option<(&str, &str)> {
    let (name, rest) = line.split_once(':')?;
    let name = name.trim();
    if name.is_empty() || name.chars().count() > MAX_CATEGORY_CHARS {
        return None;
    }
    if rest.starts_with("//") || name.contains(',') {
        return None;
    }
    Some((name, rest.trim()))
}

fn split_items(text: &str) -> Vec<String> {
    text.split(&[',', ';', '|', '•'][..])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

fn push_unique(list: &mut Vec<String>, item: String) {
    if !list.iter().any(|s| s.eq_ignore_ascii_case(&item)) {
        list.push(item);
    }
}
