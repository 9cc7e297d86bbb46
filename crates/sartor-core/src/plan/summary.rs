//! Deterministic tailored-summary composer.
//!
//! Two to three sentences built from fixed templates: who the candidate is,
//! what they bring, and (when the posting names a company) where they want
//! to take it. No external calls, so two runs over the same inputs produce
//! the same text.

use crate::models::{JobModel, ResumeModel};
use crate::score::MatchScore;

/// Skills quoted in the strengths sentence, at most.
const SUMMARY_SKILLS: usize = 3;

pub(crate) fn build_summary(resume: &ResumeModel, job: &JobModel, score: &MatchScore) -> String {
    let mut sentences = vec![
        positioning_sentence(resume, job),
        strengths_sentence(resume, score),
    ];
    if let Some(closing) = closing_sentence(job) {
        sentences.push(closing);
    }
    sentences.join(" ")
}

fn positioning_sentence(resume: &ResumeModel, job: &JobModel) -> String {
    let years = resume.total_experience_years.round() as u32;
    let target = target_phrase(job);
    match (resume.current_title(), years) {
        (Some(title), y) if y >= 1 => {
            format!("{title} with {y} years of experience, {target}.")
        }
        (Some(title), _) => format!("{title} {target}."),
        (None, y) if y >= 1 => {
            format!("Professional with {y} years of experience, {target}.")
        }
        (None, _) => format!("Professional {target}."),
    }
}

fn target_phrase(job: &JobModel) -> String {
    let title = job.title.trim();
    let company = job.company.trim();
    match (title.is_empty(), company.is_empty()) {
        (false, false) => format!("pursuing the {title} role at {company}"),
        (false, true) => format!("pursuing the {title} role"),
        (true, false) => format!("pursuing a new role at {company}"),
        (true, true) => "open to the next opportunity".to_string(),
    }
}

/// Quotes matched skills when the score found any, otherwise falls back to
/// the resume's own top skills so the sentence never reads empty.
fn strengths_sentence(resume: &ResumeModel, score: &MatchScore) -> String {
    let matched = &score.details.matched_skills;
    let pool: Vec<&str> = if matched.is_empty() {
        resume.skill_items().into_iter().take(SUMMARY_SKILLS).collect()
    } else {
        matched.iter().map(String::as_str).take(SUMMARY_SKILLS).collect()
    };
    if pool.is_empty() {
        return "Known for dependable, detail-oriented delivery.".to_string();
    }
    format!("Key strengths include {}.", join_natural(&pool))
}

fn closing_sentence(job: &JobModel) -> Option<String> {
    let company = job.company.trim();
    if company.is_empty() {
        return None;
    }
    Some(format!("Ready to bring that track record to {company}."))
}

fn join_natural(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [one] => (*one).to_string(),
        [first, second] => format!("{first} and {second}"),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}
