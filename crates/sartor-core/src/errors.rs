//! Error taxonomy — one fatal error, everything else is a structured warning.
//!
//! The pipeline degrades instead of failing: a resume that parses badly, a
//! rewrite call that rate-limits out, or a template without usable anchors
//! all produce a result plus warnings. The single condition that aborts a run
//! is a package whose bytes cannot be read or rebuilt.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::SectionKind;

/// Fatal pipeline error.
///
/// `InvalidPackage` is deliberately the only variant: every other failure
/// mode has a degraded-but-usable outcome (see [`Warning`]).
#[derive(Debug, Error)]
pub enum TailorError {
    #[error("Invalid document package: {reason}")]
    InvalidPackage { reason: String },
}

impl TailorError {
    pub fn invalid_package(reason: impl Into<String>) -> Self {
        TailorError::InvalidPackage {
            reason: reason.into(),
        }
    }
}

/// Configuration construction error. Raised when heuristics or score weights
/// are loaded, never during a pipeline run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Score weights must sum to 1.0 (±1e-6), got {sum}")]
    InvalidWeights { sum: f32 },

    #[error("Failed to read heuristics file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse heuristics JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Non-fatal, structured diagnostic attached to a pipeline result.
///
/// Warnings are accumulated in stage order so callers can explain exactly
/// which parts of the output are degraded and why.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum Warning {
    #[error("Section not found in resume: {kind:?}")]
    SectionMissing { kind: SectionKind },

    #[error("Resume structure degraded: {detail}")]
    ParseDegraded { detail: String },

    #[error("Anchor not found in document: {anchor}")]
    AnchorNotFound { anchor: String },

    #[error("Template incompatible with patching: {reason}")]
    TemplateIncompatible { reason: String },

    #[error("Bullet count mismatch for {company}: expected {expected}, rewriter returned {received}")]
    BulletCountMismatch {
        company: String,
        expected: usize,
        received: usize,
    },

    #[error("Rewrite degraded for {company}: {reason}")]
    RewriteDegraded { company: String, reason: String },

    #[error("Dropped {count} extra bullet(s) for {company}: no remaining slot in document")]
    ExtraBulletsDropped { company: String, count: usize },

    #[error("Patched markup failed validation: {reason}")]
    MarkupInvalid { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_package_message_includes_reason() {
        let err = TailorError::invalid_package("not a zip archive");
        assert_eq!(
            err.to_string(),
            "Invalid document package: not a zip archive"
        );
    }

    #[test]
    fn test_warning_serializes_with_fields() {
        let warning = Warning::BulletCountMismatch {
            company: "Acme".to_string(),
            expected: 4,
            received: 2,
        };
        let json = serde_json::to_string(&warning).unwrap();
        let recovered: Warning = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, warning);
    }

    #[test]
    fn test_warning_display_is_human_readable() {
        let warning = Warning::AnchorNotFound {
            anchor: "skill category 'Languages'".to_string(),
        };
        assert!(warning.to_string().contains("Languages"));
    }

    #[test]
    fn test_invalid_weights_message() {
        let err = ConfigError::InvalidWeights { sum: 0.9 };
        assert!(err.to_string().contains("0.9"));
    }
}
