//! End-to-end orchestration: parse → normalize → score → plan → patch.
//!
//! `tailor` is the one call most integrations need. It exposes every
//! intermediate artifact (the match score, the plan) alongside the final
//! document so callers can surface them without re-running stages.
//!
//! Failure model: only a corrupt document package aborts the run. Parse
//! quality issues, rewrite failures, and unlocatable anchors all degrade
//! into [`Warning`]s carried on the outcome, ordered by pipeline stage.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{Heuristics, PatchOptions, PlanOptions, ScoreOptions};
use crate::errors::{TailorError, Warning};
use crate::models::JobModel;
use crate::parse::{ResumeParser, TextMarkup};
use crate::patch::{patch, PatchOutcome};
use crate::plan::{build_plan, TailoringPlan};
use crate::rewrite::BulletRewriter;
use crate::score::{self, MatchScore};

// ────────────────────────────────────────────────────────────────────────────
// Request / outcome
// ────────────────────────────────────────────────────────────────────────────

/// Everything one tailoring run needs. Built with [`TailorRequest::new`]
/// plus `with_*` setters for the optional knobs.
pub struct TailorRequest<'a> {
    pub resume_text: &'a str,
    pub markup: Option<&'a TextMarkup>,
    pub job: JobModel,
    pub package: &'a [u8],
    pub rewriter: &'a dyn BulletRewriter,
    pub heuristics: Option<&'a Heuristics>,
    pub score_options: ScoreOptions,
    pub plan_options: PlanOptions,
    pub patch_options: PatchOptions,
}

impl<'a> TailorRequest<'a> {
    pub fn new(
        resume_text: &'a str,
        package: &'a [u8],
        job: JobModel,
        rewriter: &'a dyn BulletRewriter,
    ) -> Self {
        TailorRequest {
            resume_text,
            markup: None,
            job,
            package,
            rewriter,
            heuristics: None,
            score_options: ScoreOptions::default(),
            plan_options: PlanOptions::default(),
            patch_options: PatchOptions::default(),
        }
    }

    pub fn with_markup(mut self, markup: &'a TextMarkup) -> Self {
        self.markup = Some(markup);
        self
    }

    pub fn with_heuristics(mut self, heuristics: &'a Heuristics) -> Self {
        self.heuristics = Some(heuristics);
        self
    }

    pub fn with_score_options(mut self, options: ScoreOptions) -> Self {
        self.score_options = options;
        self
    }

    pub fn with_plan_options(mut self, options: PlanOptions) -> Self {
        self.plan_options = options;
        self
    }

    pub fn with_patch_options(mut self, options: PatchOptions) -> Self {
        self.patch_options = options;
        self
    }
}

/// The full result of a tailoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailorOutcome {
    pub score: MatchScore,
    pub plan: TailoringPlan,
    pub document: PatchOutcome,
}

impl TailorOutcome {
    /// The tailored package bytes, whichever path produced them.
    pub fn bytes(&self) -> &[u8] {
        self.document.bytes()
    }

    /// All warnings from every stage, in stage order.
    pub fn warnings(&self) -> &[Warning] {
        self.document.warnings()
    }

    pub fn is_synthesized(&self) -> bool {
        self.document.is_synthesized()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the whole pipeline for one resume/job/package triple.
pub async fn tailor(request: TailorRequest<'_>) -> Result<TailorOutcome, TailorError> {
    let default_heuristics;
    let heuristics = match request.heuristics {
        Some(h) => h,
        None => {
            default_heuristics = Heuristics::default();
            &default_heuristics
        }
    };

    // Step 1: parse the resume
    let parser = ResumeParser::new(heuristics.clone());
    let (resume, mut stage_warnings) = parser.parse(request.resume_text, request.markup);

    // Step 2: normalize the job posting
    let job = request.job.normalize();
    info!(
        "Normalized job: {} required, {} preferred skill(s) for '{}'",
        job.required_skills.len(),
        job.preferred_skills.len(),
        job.title
    );

    // Step 3: score the match
    let match_score = score::score(&resume, &job, heuristics, &request.score_options);
    info!(
        "Match score: {}/100 (skills {}, experience {}, title {}, keywords {})",
        match_score.overall,
        match_score.skills,
        match_score.experience,
        match_score.title,
        match_score.keywords
    );

    // Step 4: build the tailoring plan
    let (plan, plan_warnings) = build_plan(
        &resume,
        &job,
        &match_score,
        request.rewriter,
        heuristics,
        &request.plan_options,
    )
    .await;
    stage_warnings.extend(plan_warnings);

    // Step 5: patch the document package
    let mut document = patch(
        request.package,
        &plan,
        &resume,
        &resume.contact,
        heuristics,
        &request.patch_options,
    )?;
    document.prepend_warnings(stage_warnings);

    info!(
        "Tailoring complete: synthesized={}, warnings={}",
        document.is_synthesized(),
        document.warnings().len()
    );

    Ok(TailorOutcome {
        score: match_score,
        plan,
        document,
    })
}
