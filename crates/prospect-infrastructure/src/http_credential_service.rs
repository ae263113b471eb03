//! HTTP adapter for the remote credential authority.
//!
//! Both endpoints answer with `{ "status": "...", "message": "..." }` where
//! status is one of `success`, `rotation-required` or `failure`. The adapter
//! performs a single request per call and never retries.
//!
//! Mapping rules:
//! - transport errors, timeouts and unparseable bodies become `Unreachable`
//! - a structured `failure` becomes `Rejected`, whatever the HTTP status
//! - 401/403 without a structured body is still a rejection

use async_trait::async_trait;
use prospect_core::auth::{
    CredentialRotator, CredentialValidator, RotationOutcome, ValidationOutcome,
};
use prospect_core::config::AuthSettings;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    identifier: &'a str,
    secret: &'a str,
    kind: &'a str,
}

#[derive(Debug, Serialize)]
struct RotateRequest<'a> {
    identifier: &'a str,
    new_secret: &'a str,
    kind: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
enum ReplyStatus {
    Success,
    RotationRequired,
    Failure,
}

#[derive(Debug, Deserialize)]
struct AuthorityReply {
    status: ReplyStatus,
    #[serde(default)]
    message: Option<String>,
}

/// What came back from one round-trip, before outcome mapping.
enum Exchange {
    Reply(AuthorityReply),
    /// Auth-refusal HTTP status without a structured body
    Refused(StatusCode),
    Transport(String),
}

/// Talks to the credential authority over HTTP/JSON.
#[derive(Clone)]
pub struct HttpCredentialService {
    client: Client,
    base_url: String,
    kind: String,
    timeout: Duration,
}

impl HttpCredentialService {
    pub fn new(base_url: impl Into<String>, kind: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            kind: kind.into(),
            timeout,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(
            settings.base_url.clone(),
            settings.kind.clone(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    async fn exchange<B: Serialize + ?Sized>(&self, endpoint: &str, body: &B) -> Exchange {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = match self
            .client
            .post(&url)
            .json(body)
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Exchange::Transport(format!("request to {} failed: {}", url, e)),
        };

        let status = response.status();
        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => return Exchange::Transport(format!("failed to read response body: {}", e)),
        };

        match serde_json::from_str::<AuthorityReply>(&text) {
            Ok(reply) => Exchange::Reply(reply),
            Err(_) if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                Exchange::Refused(status)
            }
            Err(e) => Exchange::Transport(format!("malformed response ({}): {}", status, e)),
        }
    }
}

#[async_trait]
impl CredentialValidator for HttpCredentialService {
    async fn validate(&self, identifier: &str, secret: &str) -> ValidationOutcome {
        let request = LoginRequest {
            identifier,
            secret,
            kind: &self.kind,
        };

        let outcome = match self.exchange("/auth/login", &request).await {
            Exchange::Reply(reply) => match reply.status {
                ReplyStatus::Success => ValidationOutcome::Accepted,
                ReplyStatus::RotationRequired => ValidationOutcome::AcceptedRotationRequired,
                ReplyStatus::Failure => ValidationOutcome::Rejected {
                    reason: reply.message,
                },
            },
            Exchange::Refused(_) => ValidationOutcome::Rejected { reason: None },
            Exchange::Transport(detail) => ValidationOutcome::Unreachable { detail },
        };

        match &outcome {
            ValidationOutcome::Unreachable { detail } => {
                tracing::warn!("[Auth] Validation for '{}' unreachable: {}", identifier, detail)
            }
            other => tracing::debug!("[Auth] Validation for '{}': {:?}", identifier, other),
        }
        outcome
    }
}

#[async_trait]
impl CredentialRotator for HttpCredentialService {
    async fn rotate(&self, identifier: &str, new_secret: &str) -> RotationOutcome {
        let request = RotateRequest {
            identifier,
            new_secret,
            kind: &self.kind,
        };

        match self.exchange("/auth/rotate", &request).await {
            Exchange::Reply(reply) => match reply.status {
                ReplyStatus::Success => RotationOutcome::Rotated,
                ReplyStatus::Failure => RotationOutcome::Rejected {
                    reason: reply.message,
                },
                ReplyStatus::RotationRequired => RotationOutcome::Rejected {
                    reason: reply
                        .message
                        .or_else(|| Some("the authority still requires a new secret".to_string())),
                },
            },
            Exchange::Refused(status) => RotationOutcome::Rejected {
                reason: Some(format!("refused with HTTP {}", status.as_u16())),
            },
            Exchange::Transport(detail) => {
                tracing::warn!("[Auth] Rotation for '{}' unreachable: {}", identifier, detail);
                RotationOutcome::Unreachable { detail }
            }
        }
    }
}
