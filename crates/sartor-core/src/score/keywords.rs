//! Keyword sub-score.
//!
//! Extracts the most frequent content words from the job description and
//! checks how many of them appear anywhere in the resume text. Descriptions
//! too short to carry a meaningful vocabulary yield the neutral score rather
//! than punishing the candidate.

use std::collections::{BTreeMap, HashSet};

use crate::config::Heuristics;
use crate::score::NEUTRAL_SCORE;

/// Descriptions shorter than this are treated as uninformative.
const MIN_DESCRIPTION_CHARS: usize = 100;
/// Tokens shorter than this never become keywords.
const MIN_TOKEN_LEN: usize = 3;
/// A token must occur at least this often in the description to count.
const MIN_FREQUENCY: usize = 2;
/// Cap on the extracted keyword list.
const TOP_KEYWORDS: usize = 20;

pub(crate) struct KeywordBreakdown {
    pub score: u32,
    pub hits: u32,
    pub total: u32,
}

impl KeywordBreakdown {
    fn neutral() -> Self {
        KeywordBreakdown {
            score: NEUTRAL_SCORE,
            hits: 0,
            total: 0,
        }
    }
}

pub(crate) fn score_keywords(
    resume_text: &str,
    description: &str,
    heuristics: &Heuristics,
) -> KeywordBreakdown {
    if description.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return KeywordBreakdown::neutral();
    }

    let keywords = extract_keywords(description, heuristics);
    if keywords.is_empty() {
        return KeywordBreakdown::neutral();
    }

    let resume_tokens: HashSet<String> = tokens(resume_text).collect();
    let hits = keywords
        .iter()
        .filter(|k| resume_tokens.contains(k.as_str()))
        .count();

    let total = keywords.len();
    let score = ((hits as f32 / total as f32) * 100.0).round() as u32;
    KeywordBreakdown {
        score: score.min(100),
        hits: hits as u32,
        total: total as u32,
    }
}

/// Top description tokens by frequency. Ties break alphabetically so the
/// extraction is stable across runs.
fn extract_keywords(description: &str, heuristics: &Heuristics) -> Vec<String> {
    let mut freq: BTreeMap<String, usize> = BTreeMap::new();
    for token in tokens(description) {
        if heuristics.is_stop_word(&token) {
            continue;
        }
        *freq.entry(token).or_insert(0) += 1;
    }

    let mut candidates: Vec<(String, usize)> = freq
        .into_iter()
        .filter(|(_, count)| *count >= MIN_FREQUENCY)
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    candidates
        .into_iter()
        .take(TOP_KEYWORDS)
        .map(|(token, _)| token)
        .collect()
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.chars().count() >= MIN_TOKEN_LEN)
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .into_iter()
}
