//! Skills sub-score.
//!
//! The resume side is the union of its listed skills and any technology
//! dictionary terms found in the raw text, so a resume that mentions Kafka
//! only inside a bullet still gets credit for it. A job skill counts as
//! matched when any resume skill is a case-insensitive substring of it or
//! vice versa ("react" matches "react.js").

use std::collections::HashSet;

use crate::config::Heuristics;
use crate::models::{JobModel, ResumeModel};
use crate::score::NEUTRAL_SCORE;

/// Weight of the required portion vs the preferred portion.
const REQUIRED_POINTS: f32 = 70.0;
const PREFERRED_POINTS: f32 = 30.0;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SkillsBreakdown {
    pub score: u32,
    /// Job skills covered by the resume, sorted.
    pub matched: Vec<String>,
    /// Job skills the resume lacks, sorted.
    pub missing: Vec<String>,
}

pub(crate) fn score_skills(
    resume: &ResumeModel,
    job: &JobModel,
    heuristics: &Heuristics,
) -> SkillsBreakdown {
    if job.has_no_skill_requirements() {
        return SkillsBreakdown {
            score: NEUTRAL_SCORE,
            matched: Vec::new(),
            missing: Vec::new(),
        };
    }

    let resume_skills = resume_skill_set(resume, heuristics);

    let mut matched: Vec<String> = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    let mut matched_required = 0usize;
    for skill in &job.required_skills {
        if is_matched(skill, &resume_skills) {
            matched_required += 1;
            matched.push(skill.clone());
        } else {
            missing.push(skill.clone());
        }
    }

    // Preferred counts only what required didn't already claim.
    let preferred_only: Vec<&String> = job
        .preferred_skills
        .iter()
        .filter(|s| !job.required_skills.contains(*s))
        .collect();
    let mut matched_preferred = 0usize;
    for skill in &preferred_only {
        if is_matched(skill, &resume_skills) {
            matched_preferred += 1;
            matched.push((*skill).clone());
        } else {
            missing.push((*skill).clone());
        }
    }

    let required_ratio = matched_required as f32 / job.required_skills.len().max(1) as f32;
    let preferred_ratio = matched_preferred as f32 / preferred_only.len().max(1) as f32;

    let raw = REQUIRED_POINTS * required_ratio + PREFERRED_POINTS * preferred_ratio;
    let score = (raw.round() as u32).min(100);

    matched.sort();
    missing.sort();

    SkillsBreakdown {
        score,
        matched,
        missing,
    }
}

/// Lowercased resume skill strings plus technology terms detected in the
/// raw text. Plain terms match whole words; terms with symbols or spaces
/// (`c++`, `machine learning`) match as substrings.
fn resume_skill_set(resume: &ResumeModel, heuristics: &Heuristics) -> Vec<String> {
    let mut skills: Vec<String> = resume
        .skill_items()
        .iter()
        .map(|s| s.to_lowercase())
        .collect();

    let text_lower = resume.full_text.to_lowercase();
    let tokens: HashSet<&str> = text_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();

    for term in &heuristics.tech_terms {
        let found = if term.chars().all(|c| c.is_alphanumeric()) {
            tokens.contains(term.as_str())
        } else {
            text_lower.contains(term.as_str())
        };
        if found && !skills.iter().any(|s| s == term) {
            skills.push(term.clone());
        }
    }

    skills
}

fn is_matched(job_skill: &str, resume_skills: &[String]) -> bool {
    let job_lower = job_skill.to_lowercase();
    resume_skills
        .iter()
        .any(|r| r.contains(&job_lower) || job_lower.contains(r.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactInfo, SkillCategory};

    fn make_resume(skill_items: Vec<&str>, full_text: &str) -> ResumeModel {
        ResumeModel {
            sections: vec![],
            experiences: vec![],
            education: vec![],
            skills: vec![SkillCategory {
                name: "Skills".to_string(),
                items: skill_items.iter().map(|s| s.to_string()).collect(),
            }],
            extra_skills: vec![],
            contact: ContactInfo::default(),
            total_experience_years: 0.0,
            full_text: full_text.to_string(),
        }
    }

    fn make_job(required: &[&str], preferred: &[&str]) -> JobModel {
        JobModel {
            title: "Engineer".to_string(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
        .normalize()
    }

    fn run(resume: &ResumeModel, job: &JobModel) -> SkillsBreakdown {
        score_skills(resume, job, &Heuristics::default())
    }

    #[test]
    fn test_all_required_matched_scores_70() {
        let resume = make_resume(vec!["Python", "SQL"], "");
        let job = make_job(&["python", "sql"], &["kafka"]);
        let b = run(&resume, &job);
        assert_eq!(b.score, 70);
        assert_eq!(b.matched, vec!["python", "sql"]);
        assert_eq!(b.missing, vec!["kafka"]);
    }

    #[test]
    fn test_full_match_scores_100() {
        let resume = make_resume(vec!["Python", "Kafka"], "");
        let job = make_job(&["python"], &["kafka"]);
        assert_eq!(run(&resume, &job).score, 100);
    }

    #[test]
    fn test_half_required_matched() {
        let resume = make_resume(vec!["python"], "");
        let job = make_job(&["python", "rust"], &[]);
        // 70 × (1/2) = 35
        assert_eq!(run(&resume, &job).score, 35);
    }

    #[test]
    fn test_substring_matches_both_directions() {
        let resume = make_resume(vec!["React.js"], "");
        let job = make_job(&["react"], &[]);
        assert_eq!(run(&resume, &job).score, 70);

        let resume = make_resume(vec!["react"], "");
        let job = make_job(&["react.js"], &[]);
        assert_eq!(run(&resume, &job).score, 70);
    }

    #[test]
    fn test_empty_job_skill_set_is_neutral() {
        let resume = make_resume(vec!["python"], "");
        let job = make_job(&[], &[]);
        let b = run(&resume, &job);
        assert_eq!(b.score, NEUTRAL_SCORE);
        assert!(b.matched.is_empty());
        assert!(b.missing.is_empty());
    }

    #[test]
    fn test_tech_terms_in_raw_text_count_as_skills() {
        // Kafka appears only in a bullet, not in the skills list.
        let resume = make_resume(
            vec!["python"],
            "Built ingestion on kafka handling 2M events/day",
        );
        let job = make_job(&["kafka"], &[]);
        assert_eq!(run(&resume, &job).score, 70);
    }

    #[test]
    fn test_whole_word_detection_avoids_partial_hits() {
        // "go" must not be detected inside "going"; it's not in the tech
        // dictionary anyway, but "java" inside "javascript" is the classic
        // trap for the dictionary scan.
        let resume = make_resume(vec![], "we write javascript here");
        let job = make_job(&["java"], &[]);
        // The raw-text scan only adds "javascript"; "java" then matches it
        // by substring, which is the documented two-way rule.
        assert_eq!(run(&resume, &job).score, 70);
    }

    #[test]
    fn test_no_resume_skills_scores_zero() {
        let resume = make_resume(vec![], "nothing relevant here");
        let job = make_job(&["rust"], &["kafka"]);
        let b = run(&resume, &job);
        assert_eq!(b.score, 0);
        assert_eq!(b.missing, vec!["kafka", "rust"]);
    }

    #[test]
    fn test_score_clamped_to_100() {
        let resume = make_resume(vec!["a", "b"], "");
        let job = make_job(&["a"], &["b"]);
        assert!(run(&resume, &job).score <= 100);
    }
}
