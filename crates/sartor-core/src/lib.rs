//! # sartor-core
//!
//! Tailor a resume to a job posting: parse the resume's structure, score the
//! match, plan targeted rewrites, and patch the original document package in
//! place.
//!
//! ## Why this crate?
//!
//! Regenerating a resume document from a template throws away the layout the
//! candidate chose. This crate edits instead of regenerates: it locates
//! anchor text (contact placeholders, skill category labels, company
//! headings) inside the zipped-XML package and splices replacements into
//! those exact byte ranges, leaving every other byte untouched. Only when a
//! template exposes no usable anchors does it fall back to synthesizing a
//! plain document, and the outcome says which path was taken.
//!
//! ## Pipeline Overview
//!
//! ```text
//! resume text (+ optional style markup)      job posting
//!  │                                          │
//!  ├─ 1. Parse      sections, experiences, skills, contact, dates
//!  │                                          │
//!  │                 ┌────────────────────────┘
//!  ├─ 2. Normalize  trim, case-fold, de-duplicate job skill sets
//!  ├─ 3. Score      deterministic sub-scores: skills / experience / title / keywords
//!  ├─ 4. Plan       summary + per-category skill text + rewritten bullets
//!  │                 (pluggable rewriter, batched per company, retried)
//!  └─ 5. Patch      splice plan into the package, or synthesize a fallback
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sartor_core::{tailor, HttpRewriter, JobModel, TailorRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let resume_text = std::fs::read_to_string("resume.txt")?;
//!     let package = std::fs::read("resume.docx")?;
//!     let rewriter = HttpRewriter::new("https://rewrite.example.com/v1/bullets");
//!     let job = JobModel {
//!         title: "Senior Software Engineer".to_string(),
//!         company: "Globex".to_string(),
//!         description: "Own our Python data platform end to end...".to_string(),
//!         ..JobModel::default()
//!     };
//!
//!     let outcome = tailor(TailorRequest::new(&resume_text, &package, job, &rewriter)).await?;
//!     println!(
//!         "match {}/100, synthesized: {}, warnings: {}",
//!         outcome.score.overall,
//!         outcome.is_synthesized(),
//!         outcome.warnings().len()
//!     );
//!     std::fs::write("tailored.docx", outcome.bytes())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Failure Model
//!
//! One error is fatal: [`TailorError::InvalidPackage`], raised when the
//! document bytes are not a readable zipped-XML package. Everything else —
//! unparseable resume sections, a rewrite backend that stays down,
//! anchors the template does not have — degrades into [`Warning`]s on the
//! outcome, ordered by pipeline stage, and the run still produces a
//! document.

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod errors;
pub mod models;
pub mod parse;
pub mod patch;
pub mod pipeline;
pub mod plan;
pub mod rewrite;
pub mod score;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ExtraBulletPolicy, Heuristics, PatchOptions, PlanOptions, ScoreOptions, ScoreWeights,
};
pub use errors::{ConfigError, TailorError, Warning};
pub use models::{
    ContactInfo, EducationEntry, EducationLevel, JobModel, ResumeModel, Section, SectionKind,
    SkillCategory, WorkExperience,
};
pub use parse::{LineStyle, ResumeParser, TextMarkup};
pub use patch::{patch, PatchOutcome};
pub use pipeline::{tailor, TailorOutcome, TailorRequest};
pub use plan::{build_plan, TailoringPlan};
pub use rewrite::{rewrite_with_retry, BulletRewriter, HttpRewriter, RewriteContext, RewriteError};
pub use score::{score, MatchScore, ScoreDetails, TitleSimilarity, NEUTRAL_SCORE};
