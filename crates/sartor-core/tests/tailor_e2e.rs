//! End-to-end tests over the public API: plain-text resume in, tailored
//! package bytes out.
//!
//! Everything runs in memory — packages are built with the `zip` crate and
//! a scripted rewriter stands in for the external generative service, so
//! these tests are fast, deterministic, and need no network.

use std::io::{Cursor, Read, Write};
use std::sync::atomic::{AtomicU32, Ordering};

use async_trait::async_trait;
use sartor_core::{
    tailor, BulletRewriter, JobModel, RewriteContext, RewriteError, TailorError, TailorRequest,
    TitleSimilarity, Warning,
};

// ── Test helpers ─────────────────────────────────────────────────────────────

fn docx(paragraphs: &[&str]) -> Vec<u8> {
    let body: String = paragraphs
        .iter()
        .map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>"))
        .collect();
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );

    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in [
        ("[Content_Types].xml", "<Types/>"),
        ("word/document.xml", document.as_str()),
    ] {
        writer
            .start_file(name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn body_text(bytes: &[u8]) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("tailored bytes must be a zip");
    let mut part = archive
        .by_name("word/document.xml")
        .expect("package must keep its body part");
    let mut out = String::new();
    part.read_to_string(&mut out).expect("body must stay UTF-8");
    out
}

fn resume_text() -> &'static str {
    "Priya Sharma\n\
     priya@example.dev | (206) 555-0100\n\
     \n\
     Summary\n\
     Backend engineer focused on data platforms.\n\
     \n\
     Skills\n\
     Python, AWS\n\
     \n\
     Experience\n\
     Megacorp\n\
     Software Engineer\n\
     Jan 2020 - Present\n\
     - Improved data pipeline throughput by forty percent overall\n\
     - Migrated batch jobs to streaming with python and kafka\n\
     \n\
     Education\n\
     State University\n\
     BS in Computer Science, 2019\n"
}

/// Short description on purpose: below the keyword-extraction threshold the
/// keyword sub-score is the neutral constant, which keeps the expected
/// overall score exact.
fn job() -> JobModel {
    JobModel {
        title: "Senior Software Engineer".to_string(),
        company: "Globex".to_string(),
        description: "Own python services on our data platform.".to_string(),
        required_skills: ["Python".to_string()].into_iter().collect(),
        ..JobModel::default()
    }
}

fn template() -> Vec<u8> {
    docx(&[
        "Your Name",
        "email@example.com | (000) 000-0000",
        "Skills",
        "Python, AWS",
        "Experience",
        "Megacorp",
        "Improved data pipeline throughput by forty percent overall",
        "Migrated batch jobs to streaming with python and kafka",
        "Education",
        "BS, State University",
    ])
}

struct EchoRewriter;

#[async_trait]
impl BulletRewriter for EchoRewriter {
    async fn rewrite(
        &self,
        bullets: &[String],
        _context: &RewriteContext,
    ) -> Result<Vec<String>, RewriteError> {
        Ok(bullets.to_vec())
    }
}

struct PrefixRewriter;

#[async_trait]
impl BulletRewriter for PrefixRewriter {
    async fn rewrite(
        &self,
        bullets: &[String],
        _context: &RewriteContext,
    ) -> Result<Vec<String>, RewriteError> {
        Ok(bullets.iter().map(|b| format!("Refined: {b}")).collect())
    }
}

/// Rate-limits the first `failures` calls, then succeeds.
struct FlakyRewriter {
    failures: AtomicU32,
    calls: AtomicU32,
}

impl FlakyRewriter {
    fn new(failures: u32) -> Self {
        FlakyRewriter {
            failures: AtomicU32::new(failures),
            calls: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl BulletRewriter for FlakyRewriter {
    async fn rewrite(
        &self,
        bullets: &[String],
        _context: &RewriteContext,
    ) -> Result<Vec<String>, RewriteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if remaining.is_ok() {
            return Err(RewriteError::RateLimited);
        }
        Ok(bullets.iter().map(|b| format!("Refined: {b}")).collect())
    }
}

// ── Exact scoring through the whole pipeline ─────────────────────────────────

#[tokio::test]
async fn test_known_pair_scores_exactly() {
    let package = template();
    let outcome = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &EchoRewriter,
    ))
    .await
    .unwrap();

    // skills: required {python} fully covered → 70 × 1 + 30 × 0 = 70
    assert_eq!(outcome.score.skills, 70);
    assert_eq!(outcome.score.details.matched_skills, vec!["python"]);
    assert!(outcome.score.details.missing_skills.is_empty());

    // experience: ~6 years against a 3-year requirement → no gap → 100
    assert_eq!(outcome.score.experience, 100);
    assert_eq!(outcome.score.details.experience_gap_years, 0.0);

    // title: "Software Engineer" vs "Senior Software Engineer" shares two
    // domain keywords → boosted to 85
    assert_eq!(outcome.score.title, 85);
    assert_eq!(
        outcome.score.details.title_similarity,
        TitleSimilarity::DomainBoost
    );

    // keywords: description below the extraction threshold → neutral 50
    assert_eq!(outcome.score.keywords, 50);
    assert_eq!(outcome.score.details.keyword_total, 0);

    // overall: round(70 × .40 + 100 × .25 + 85 × .20 + 50 × .15) = 78
    assert_eq!(outcome.score.overall, 78);
}

#[tokio::test]
async fn test_fully_tailored_run_has_no_warnings() {
    let package = template();
    let outcome = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &PrefixRewriter,
    ))
    .await
    .unwrap();

    assert!(!outcome.is_synthesized());
    assert!(outcome.warnings().is_empty());

    let body = body_text(outcome.bytes());
    assert!(body.contains("priya@example.dev | (206) 555-0100"));
    assert!(!body.contains("email@example.com"));
    assert!(body.contains("Refined: Improved data pipeline throughput"));
    assert!(body.contains("Refined: Migrated batch jobs to streaming"));
    // Untouched paragraphs survive exactly.
    assert!(body.contains("<w:p><w:r><w:t>Education</w:t></w:r></w:p>"));
}

#[tokio::test]
async fn test_identical_inputs_give_identical_results() {
    let package = template();
    let first = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &EchoRewriter,
    ))
    .await
    .unwrap();
    let second = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &EchoRewriter,
    ))
    .await
    .unwrap();

    assert_eq!(first.score, second.score);
    assert_eq!(first.plan, second.plan);
    assert_eq!(first.bytes(), second.bytes());
}

// ── Degraded paths ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_partial_patch_reports_missing_anchor() {
    // The resume carries a labelled skill category the template lacks.
    let resume = "Priya Sharma\n\
         priya@example.dev | (206) 555-0100\n\
         \n\
         Summary\n\
         Backend engineer.\n\
         \n\
         Skills\n\
         Languages: Python, AWS\n\
         \n\
         Experience\n\
         Megacorp\n\
         Software Engineer\n\
         Jan 2020 - Present\n\
         - Improved data pipeline throughput by forty percent overall\n\
         \n\
         Education\n\
         State University\n";
    let package = docx(&[
        "Your Name",
        "email@example.com | (000) 000-0000",
        "Experience",
        "Megacorp",
        "Improved data pipeline throughput by forty percent overall",
    ]);

    let outcome = tailor(TailorRequest::new(resume, &package, job(), &PrefixRewriter))
        .await
        .unwrap();

    assert!(!outcome.is_synthesized());
    assert_eq!(
        outcome.warnings(),
        &[Warning::AnchorNotFound {
            anchor: "skill category 'Languages'".to_string(),
        }]
    );
    let body = body_text(outcome.bytes());
    assert!(body.contains("priya@example.dev"));
    assert!(body.contains("Refined: Improved data pipeline throughput"));
}

#[tokio::test]
async fn test_foreign_template_synthesizes() {
    let package = docx(&["Quarterly Newsletter", "Nothing resume-shaped in here"]);
    let outcome = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &PrefixRewriter,
    ))
    .await
    .unwrap();

    assert!(outcome.is_synthesized());
    assert!(matches!(
        outcome.warnings().last(),
        Some(Warning::TemplateIncompatible { .. })
    ));

    // The fallback document is a valid package carrying the plan's content.
    let body = body_text(outcome.bytes());
    assert!(body.contains("Priya Sharma"));
    assert!(body.contains("priya@example.dev"));
    assert!(body.contains("Refined: Improved data pipeline throughput"));
    assert!(body.contains("Globex"));
}

#[tokio::test(start_paused = true)]
async fn test_transient_rewrite_failures_are_retried() {
    let package = template();
    let rewriter = FlakyRewriter::new(2);
    let outcome = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &rewriter,
    ))
    .await
    .unwrap();

    // Two rate-limited attempts, then success on the third.
    assert_eq!(rewriter.calls.load(Ordering::SeqCst), 3);
    assert!(outcome.warnings().is_empty());
    assert!(body_text(outcome.bytes()).contains("Refined: Improved data pipeline throughput"));
}

#[tokio::test]
async fn test_corrupt_package_is_the_only_fatal_error() {
    let err = tailor(TailorRequest::new(
        resume_text(),
        b"these bytes are not a zip archive",
        job(),
        &EchoRewriter,
    ))
    .await
    .unwrap_err();

    let TailorError::InvalidPackage { reason } = err;
    assert!(!reason.is_empty());
}

// ── Output shape ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_outcome_serializes_and_round_trips() {
    let package = template();
    let outcome = tailor(TailorRequest::new(
        resume_text(),
        &package,
        job(),
        &EchoRewriter,
    ))
    .await
    .unwrap();

    let json = serde_json::to_string(&outcome).expect("outcome must serialize");
    let back: sartor_core::TailorOutcome =
        serde_json::from_str(&json).expect("outcome must deserialize");
    assert_eq!(back.score, outcome.score);
    assert_eq!(back.bytes(), outcome.bytes());
}
