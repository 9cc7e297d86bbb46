//! Document patching: scoped text replacement inside a zipped-XML package.
//!
//! The patcher never regenerates markup it does not understand. It locates
//! anchor text nodes (contact placeholders, skill category labels, company
//! headings), splices replacement text into those exact byte ranges, and
//! leaves every other byte of the package untouched. When the template
//! exposes no anchors at all, or the patched body no longer parses, it falls
//! back to synthesizing a generic document instead of failing the run.
//!
//! Only a corrupt package is fatal. Every partial result is reported through
//! [`Warning`]s on the returned [`PatchOutcome`].

mod anchors;
mod markup;
mod package;
mod synthesis;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::{Heuristics, PatchOptions};
use crate::errors::{TailorError, Warning};
use crate::models::{ContactInfo, ResumeModel};
use crate::patch::package::DocumentPackage;
use crate::plan::TailoringPlan;

// ────────────────────────────────────────────────────────────────────────────
// Outcome
// ────────────────────────────────────────────────────────────────────────────

/// The result of a patch run. Callers can always tell which path produced
/// the bytes: `Patched` preserves the original template, `Synthesized` is
/// the generic fallback layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PatchOutcome {
    /// The original package with anchored text replaced in place.
    Patched {
        bytes: Vec<u8>,
        warnings: Vec<Warning>,
    },
    /// A freshly built document; the original styling is gone.
    Synthesized {
        bytes: Vec<u8>,
        warnings: Vec<Warning>,
    },
}

impl PatchOutcome {
    pub fn bytes(&self) -> &[u8] {
        match self {
            PatchOutcome::Patched { bytes, .. } | PatchOutcome::Synthesized { bytes, .. } => bytes,
        }
    }

    pub fn warnings(&self) -> &[Warning] {
        match self {
            PatchOutcome::Patched { warnings, .. }
            | PatchOutcome::Synthesized { warnings, .. } => warnings,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, PatchOutcome::Synthesized { .. })
    }

    /// Inserts warnings from earlier pipeline stages ahead of the patch
    /// stage's own, keeping the combined list in stage order.
    pub(crate) fn prepend_warnings(&mut self, mut earlier: Vec<Warning>) {
        let warnings = match self {
            PatchOutcome::Patched { warnings, .. }
            | PatchOutcome::Synthesized { warnings, .. } => warnings,
        };
        earlier.append(warnings);
        *warnings = earlier;
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Patch entry point
// ────────────────────────────────────────────────────────────────────────────

/// Applies a tailoring plan to a document package.
///
/// Splices are gathered anchor family by anchor family (contact, skills,
/// experience) and applied in one pass. An anchor that cannot be located is
/// reported and skipped; the text at that location stays as it was. The only
/// error this returns is [`TailorError::InvalidPackage`].
pub fn patch(
    package: &[u8],
    plan: &TailoringPlan,
    resume: &ResumeModel,
    contact: &ContactInfo,
    heuristics: &Heuristics,
    options: &PatchOptions,
) -> Result<PatchOutcome, TailorError> {
    let document = DocumentPackage::open(package)?;
    let body = document.body_str()?;
    let nodes = markup::scan_text_nodes(body)?;
    debug!(nodes = nodes.len(), "scanned template text nodes");

    let contact_edits = anchors::contact_edits(&nodes, contact, heuristics);
    let skill_edits = anchors::skill_edits(&nodes, &plan.skill_text);

    // No contact and no skill anchors means this is not a resume template we
    // can edit in place. Company headings alone are too weak a signal.
    if contact_edits.anchored == 0 && skill_edits.anchored == 0 {
        warn!("no contact or skill anchors matched; synthesizing instead");
        let mut warnings = contact_edits.warnings;
        warnings.extend(skill_edits.warnings);
        warnings.push(Warning::TemplateIncompatible {
            reason: "no contact or skill anchors matched".to_string(),
        });
        let bytes = synthesis::synthesize(resume, plan)?;
        return Ok(PatchOutcome::Synthesized { bytes, warnings });
    }

    let experience_edits =
        anchors::experience_edits(body, &nodes, &plan.experience_bullets, heuristics, options);

    let mut warnings = contact_edits.warnings;
    warnings.extend(skill_edits.warnings);
    warnings.extend(experience_edits.warnings);

    let mut splices = contact_edits.splices;
    splices.extend(skill_edits.splices);
    splices.extend(experience_edits.splices);
    let splice_count = splices.len();

    let patched = markup::apply_splices(body, splices);
    if let Err(reason) = markup::validate_markup(&patched) {
        warn!(%reason, "patched markup failed validation; synthesizing instead");
        warnings.push(Warning::MarkupInvalid { reason });
        let bytes = synthesis::synthesize(resume, plan)?;
        return Ok(PatchOutcome::Synthesized { bytes, warnings });
    }

    let bytes = document.with_body(patched.as_bytes())?;
    info!(
        splices = splice_count,
        warnings = warnings.len(),
        "patched document in place"
    );
    Ok(PatchOutcome::Patched { bytes, warnings })
}

#[cfg(test)]
pub(crate) use package::make_package;

/// Test support: rereads the body part of a package this module produced.
#[cfg(test)]
pub(crate) fn package_body(bytes: &[u8]) -> String {
    let package = DocumentPackage::open(bytes).expect("reopen package");
    package.body_str().expect("utf-8 body").to_string()
}
