//! HTTP-backed rewriter adapter.
//!
//! POSTs one experience's bullet batch as JSON and expects the rewritten
//! bullets back in order. Transient conditions (429, 5xx, transport) surface
//! as [`RewriteError::RateLimited`] so the shared retry schedule handles
//! them; everything else is permanent.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::rewrite::{BulletRewriter, RewriteContext, RewriteError};

/// Whole-request backstop. Attempts are normally cut off much earlier by the
/// planner's per-attempt timeout.
const CLIENT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct RewriteRequest<'a> {
    bullets: &'a [String],
    context: &'a RewriteContext,
}

#[derive(Debug, Deserialize)]
struct RewriteResponse {
    bullets: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: ServiceErrorBody,
}

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    message: String,
}

/// Rewrites bullets through a JSON-over-HTTP generative service.
#[derive(Clone)]
pub struct HttpRewriter {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpRewriter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(CLIENT_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[async_trait::async_trait]
impl BulletRewriter for HttpRewriter {
    async fn rewrite(
        &self,
        bullets: &[String],
        context: &RewriteContext,
    ) -> Result<Vec<String>, RewriteError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&RewriteRequest { bullets, context });
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await.map_err(|e| {
            debug!("rewrite transport error: {e}");
            RewriteError::RateLimited
        })?;

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            return Err(RewriteError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse error message
            let message = serde_json::from_str::<ServiceError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(RewriteError::Failed(format!(
                "status {}: {message}",
                status.as_u16()
            )));
        }

        let parsed: RewriteResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Failed(format!("malformed response: {e}")))?;

        debug!(
            sent = bullets.len(),
            received = parsed.bullets.len(),
            "rewrite service responded"
        );
        Ok(parsed.bullets)
    }
}
