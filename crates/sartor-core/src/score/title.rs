//! Title sub-score.
//!
//! Ladder: exact match or desired-title override → 100; otherwise
//! stop-word-filtered word overlap (Jaccard), lifted to a fixed high value
//! when both titles share ≥2 domain keywords; a shared seniority marker
//! alone is worth a moderate score; the floor is low but never zero.

use std::collections::BTreeSet;

use crate::config::Heuristics;
use crate::score::TitleSimilarity;

const EXACT_SCORE: u32 = 100;
const DOMAIN_BOOST_SCORE: u32 = 85;
const SENIORITY_SCORE: u32 = 60;
const FLOOR_SCORE: u32 = 25;

pub(crate) fn score_title(
    resume_title: Option<&str>,
    job_title: &str,
    desired_titles: &[String],
    heuristics: &Heuristics,
) -> (u32, TitleSimilarity) {
    let job_trimmed = job_title.trim();

    if desired_titles
        .iter()
        .any(|d| d.trim().eq_ignore_ascii_case(job_trimmed) && !d.trim().is_empty())
    {
        return (EXACT_SCORE, TitleSimilarity::Desired);
    }

    let Some(resume_trimmed) = resume_title.map(str::trim).filter(|t| !t.is_empty()) else {
        return (FLOOR_SCORE, TitleSimilarity::Minimal);
    };
    if job_trimmed.is_empty() {
        return (FLOOR_SCORE, TitleSimilarity::Minimal);
    }

    if resume_trimmed.eq_ignore_ascii_case(job_trimmed) {
        return (EXACT_SCORE, TitleSimilarity::Exact);
    }

    let resume_words = title_words(resume_trimmed, heuristics);
    let job_words = title_words(job_trimmed, heuristics);

    let intersection = resume_words.intersection(&job_words).count();
    let union = resume_words.union(&job_words).count();
    let base = if union == 0 {
        0
    } else {
        ((intersection as f32 / union as f32) * 100.0).round() as u32
    };

    let shared_domain = heuristics
        .title_domain_keywords
        .iter()
        .filter(|k| resume_words.contains(k.as_str()) && job_words.contains(k.as_str()))
        .count();

    if shared_domain >= 2 {
        return (base.max(DOMAIN_BOOST_SCORE), TitleSimilarity::DomainBoost);
    }

    let shared_seniority = heuristics
        .seniority_keywords
        .iter()
        .any(|k| resume_words.contains(k.as_str()) && job_words.contains(k.as_str()));

    if base >= SENIORITY_SCORE {
        return (base.min(100), TitleSimilarity::WordOverlap);
    }
    if shared_seniority {
        return (SENIORITY_SCORE, TitleSimilarity::SeniorityOnly);
    }
    if base > FLOOR_SCORE {
        return (base, TitleSimilarity::WordOverlap);
    }
    (FLOOR_SCORE, TitleSimilarity::Minimal)
}

fn title_words<'a>(title: &'a str, heuristics: &Heuristics) -> BTreeSet<String> {
    title
        .to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .filter(|w| !heuristics.is_stop_word(w))
        .map(|w| w.to_string())
        .collect()
}
