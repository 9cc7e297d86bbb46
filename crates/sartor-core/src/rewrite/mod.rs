//! Bullet rewriting — the single seam to the external generative service.
//!
//! ARCHITECTURAL RULE: the planner never talks to a rewrite backend directly.
//! Everything goes through [`BulletRewriter`], and every adapter shares the
//! retry schedule in [`rewrite_with_retry`]. Swapping the backend (HTTP,
//! in-process model, test double) never touches planning code.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::config::PlanOptions;

pub mod http;

pub use http::HttpRewriter;

#[derive(Debug, Error)]
pub enum RewriteError {
    /// Transient failure (rate limit, server pressure, transport); retried
    /// with backoff.
    #[error("rewrite service rate limited")]
    RateLimited,

    /// Permanent failure; never retried.
    #[error("rewrite failed: {0}")]
    Failed(String),
}

/// Everything an adapter may condition the rewriting on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteContext {
    pub job_title: String,
    pub company: String,
    /// Ranked terms to weave into the rewritten bullets, most relevant first.
    pub keywords: Vec<String>,
}

/// A collaborator that rewrites one experience's bullet points as a batch.
///
/// Implementations should return exactly one output per input bullet; callers
/// tolerate a mismatched count but report it, so a sloppy backend degrades
/// the result instead of corrupting it.
#[async_trait]
pub trait BulletRewriter: Send + Sync {
    async fn rewrite(
        &self,
        bullets: &[String],
        context: &RewriteContext,
    ) -> Result<Vec<String>, RewriteError>;
}

/// Calls the rewriter under the shared retry policy.
///
/// Each attempt is bounded by `options.rewrite_timeout`. Rate limits and
/// timeouts retry with doubling backoff (1s then 2s with the default three
/// attempts); [`RewriteError::Failed`] is permanent and returned immediately.
pub async fn rewrite_with_retry(
    rewriter: &dyn BulletRewriter,
    bullets: &[String],
    context: &RewriteContext,
    options: &PlanOptions,
) -> Result<Vec<String>, RewriteError> {
    let mut last_error: Option<RewriteError> = None;

    for attempt in 0..options.max_attempts {
        if attempt > 0 {
            let delay = options.backoff_base * (1 << (attempt - 1));
            warn!(
                company = %context.company,
                "rewrite attempt {} failed, retrying after {}ms",
                attempt,
                delay.as_millis()
            );
            tokio::time::sleep(delay).await;
        }

        match tokio::time::timeout(options.rewrite_timeout, rewriter.rewrite(bullets, context))
            .await
        {
            Ok(Ok(rewritten)) => return Ok(rewritten),
            Ok(Err(RewriteError::RateLimited)) => {
                last_error = Some(RewriteError::RateLimited);
            }
            Ok(Err(err @ RewriteError::Failed(_))) => return Err(err),
            Err(_) => {
                last_error = Some(RewriteError::Failed(format!(
                    "timed out after {}s",
                    options.rewrite_timeout.as_secs()
                )));
            }
        }
    }

    Err(last_error.unwrap_or(RewriteError::RateLimited))
}
