//! Tailoring Planner.
//!
//! Turns a scored (resume, job) pair into the concrete text edits the
//! patcher will apply: a fresh summary, per-category skill text, and
//! rewritten bullets per company. The rewriter is called once per work
//! experience with the full bullet batch; every failure mode keeps the
//! original text and records a [`Warning`] instead of aborting.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Heuristics, PlanOptions};
use crate::errors::Warning;
use crate::models::{JobModel, ResumeModel};
use crate::rewrite::{rewrite_with_retry, BulletRewriter, RewriteContext};
use crate::score::MatchScore;

mod summary;

/// The planner's output. Maps preserve resume order, so iterating
/// `experience_bullets` walks companies the way the document lists them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailoringPlan {
    pub summary: String,
    /// Skill category label → comma-joined item text.
    pub skill_text: IndexMap<String, String>,
    /// Company → bullet list. Always exactly as long as the source
    /// experience's bullet list, and no entry is ever empty.
    pub experience_bullets: IndexMap<String, Vec<String>>,
}

pub async fn build_plan(
    resume: &ResumeModel,
    job: &JobModel,
    score: &MatchScore,
    rewriter: &dyn BulletRewriter,
    heuristics: &Heuristics,
    options: &PlanOptions,
) -> (TailoringPlan, Vec<Warning>) {
    let mut warnings = Vec::new();
    let keywords = ranked_keywords(job, heuristics);
    let summary = summary::build_summary(resume, job, score);

    let mut skill_text = IndexMap::new();
    for category in &resume.skills {
        skill_text.insert(category.name.clone(), category.items.join(", "));
    }

    let mut experience_bullets: IndexMap<String, Vec<String>> = IndexMap::new();
    for experience in &resume.experiences {
        let company = experience.company.trim();
        if company.is_empty() || experience.bullet_points.is_empty() {
            continue;
        }
        if experience_bullets.contains_key(company) {
            debug!(company, "duplicate company name, keeping the first stint's bullets");
            continue;
        }

        let context = RewriteContext {
            job_title: job.title.clone(),
            company: company.to_string(),
            keywords: keywords.clone(),
        };

        let bullets =
            match rewrite_with_retry(rewriter, &experience.bullet_points, &context, options).await
            {
                Ok(rewritten) => {
                    if rewritten.len() != experience.bullet_points.len() {
                        warnings.push(Warning::BulletCountMismatch {
                            company: company.to_string(),
                            expected: experience.bullet_points.len(),
                            received: rewritten.len(),
                        });
                    }
                    merge_positional(&experience.bullet_points, rewritten)
                }
                Err(err) => {
                    warn!(company, "rewrite degraded, keeping original bullets: {err}");
                    warnings.push(Warning::RewriteDegraded {
                        company: company.to_string(),
                        reason: err.to_string(),
                    });
                    experience.bullet_points.clone()
                }
            };
        experience_bullets.insert(company.to_string(), bullets);
    }

    info!(
        companies = experience_bullets.len(),
        skill_categories = skill_text.len(),
        keywords = keywords.len(),
        warnings = warnings.len(),
        "tailoring plan built"
    );

    (
        TailoringPlan {
            summary,
            skill_text,
            experience_bullets,
        },
        warnings,
    )
}

/// Applies rewritten bullets position by position. A short or empty entry
/// keeps the original at that position, and the result always has the
/// source length, so a sloppy rewriter can't drop content.
fn merge_positional(original: &[String], rewritten: Vec<String>) -> Vec<String> {
    original
        .iter()
        .enumerate()
        .map(|(i, bullet)| {
            rewritten
                .get(i)
                .filter(|r| !r.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| bullet.clone())
        })
        .collect()
}

/// Terms the rewriter should weave in, most relevant first: job title words,
/// then the posting's explicit skills, then technology terms detected in the
/// description. Deduplicated case-insensitively, first occurrence wins.
fn ranked_keywords(job: &JobModel, heuristics: &Heuristics) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut ranked = Vec::new();
    let mut push = |term: &str| {
        let key = term.to_lowercase();
        if !key.is_empty() && seen.insert(key.clone()) {
            ranked.push(key);
        }
    };

    for word in job
        .title
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let lower = word.to_lowercase();
        if !heuristics.is_stop_word(&lower) {
            push(&lower);
        }
    }
    for skill in job.required_skills.iter().chain(job.preferred_skills.iter()) {
        push(skill);
    }

    let description = job.description.to_lowercase();
    let tokens: HashSet<&str> = description
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    for term in &heuristics.tech_terms {
        let found = if term.chars().all(|c| c.is_alphanumeric()) {
            tokens.contains(term.as_str())
        } else {
            description.contains(term.as_str())
        };
        if found {
            push(term);
        }
    }

    ranked
}
