//! Match Score Engine — deterministic heuristic fit between a resume and a
//! job posting.
//!
//! `score` is pure: no clock, no randomness, no hidden state. Every
//! absent-signal case degrades to [`NEUTRAL_SCORE`], never to zero, so
//! missing data cannot masquerade as poor fit. Identical inputs produce
//! bit-identical output, detail lists included.

pub mod experience;
pub mod keywords;
pub mod skills;
pub mod title;

use serde::{Deserialize, Serialize};

use crate::config::{Heuristics, ScoreOptions};
use crate::models::{JobModel, ResumeModel};

/// The canonical neutral sub-score, used everywhere a required signal is
/// absent (empty job skill set, short description, missing keywords).
pub const NEUTRAL_SCORE: u32 = 50;

/// How the title sub-score was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TitleSimilarity {
    /// Case-insensitive exact title match.
    Exact,
    /// The job title is on the candidate's desired-title list.
    Desired,
    /// ≥2 shared domain keywords lifted a weak word overlap.
    DomainBoost,
    /// Scored by stop-word-filtered word overlap alone.
    WordOverlap,
    /// Only a shared seniority marker (senior/lead/...) matched.
    SeniorityOnly,
    /// Nothing matched; floor score applied.
    Minimal,
}

/// Diagnostic detail accompanying the numeric scores. Lists are sorted so
/// output is reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreDetails {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// Shortfall against the required years, ≥ 0; zero when satisfied or
    /// unconstrained.
    pub experience_gap_years: f32,
    pub title_similarity: TitleSimilarity,
    pub keyword_hits: u32,
    pub keyword_total: u32,
}

/// Full match report. Invariant: `overall` is the weighted sum of the four
/// sub-scores, rounded; weights were validated when the options were built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub overall: u32,
    pub skills: u32,
    pub experience: u32,
    pub title: u32,
    pub keywords: u32,
    pub details: ScoreDetails,
}

pub fn score(
    resume: &ResumeModel,
    job: &JobModel,
    heuristics: &Heuristics,
    options: &ScoreOptions,
) -> MatchScore {
    let skills = skills::score_skills(resume, job, heuristics);
    let (experience_score, gap_years) =
        experience::score_experience(resume.total_experience_years, job.experience_years);
    let (title_score, title_similarity) = title::score_title(
        resume.current_title(),
        &job.title,
        &options.desired_titles,
        heuristics,
    );
    let kw = keywords::score_keywords(&resume.full_text, &job.description, heuristics);

    let w = &options.weights;
    let overall = (w.skills * skills.score as f32
        + w.experience * experience_score as f32
        + w.title * title_score as f32
        + w.keywords * kw.score as f32)
        .round() as u32;

    MatchScore {
        overall: overall.min(100),
        skills: skills.score,
        experience: experience_score,
        title: title_score,
        keywords: kw.score,
        details: ScoreDetails {
            matched_skills: skills.matched,
            missing_skills: skills.missing,
            experience_gap_years: gap_years,
            title_similarity,
            keyword_hits: kw.hits,
            keyword_total: kw.total,
        },
    }
}
