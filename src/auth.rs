/*!
 * Client for the remote credential-check service.
 *
 * The service is an external collaborator: it validates operator
 * credentials before the web layer admits a session, and records an
 * audit entry per translation. The audit call is fire-and-forget — its
 * failure must never block or fail a translation request.
 */

use std::time::Duration;

use anyhow::{anyhow, Result};
use log::warn;
use reqwest::Client;
use serde_json::json;

/// Outcome of a credential check, mapped from the service's tri-state reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// Credentials accepted (`1`)
    Valid,
    /// Account or password incorrect (`0`)
    Invalid,
    /// The credential service itself failed (`-1`)
    ServiceFailure,
}

impl CredentialStatus {
    /// Map the remote integer reply to a status
    pub fn from_reply(reply: i64) -> Result<Self> {
        match reply {
            1 => Ok(Self::Valid),
            0 => Ok(Self::Invalid),
            -1 => Ok(Self::ServiceFailure),
            other => Err(anyhow!("Unknown credential service reply: {}", other)),
        }
    }
}

/// Client for the credential-check endpoint
#[derive(Debug, Clone)]
pub struct AuthClient {
    /// HTTP client for API requests
    client: Client,
    /// Credential service endpoint URL
    endpoint: String,
}

impl AuthClient {
    /// Create a new client for the given endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            endpoint: endpoint.into(),
        }
    }

    /// Verify a user id and password against the remote service
    pub async fn verify_credentials(
        &self,
        user_id: &str,
        password: &str,
    ) -> Result<CredentialStatus> {
        let body = json!({
            "Userid": user_id,
            "UserPasswd": password,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| anyhow!("Failed to reach credential service: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("Credential service error: {}", status));
        }

        let reply: i64 = response
            .json()
            .await
            .map_err(|e| anyhow!("Failed to parse credential service reply: {}", e))?;
        CredentialStatus::from_reply(reply)
    }

    /// Record an audit action for a user, without waiting for the result.
    ///
    /// The request is spawned and any failure is only logged; auditing
    /// never blocks or fails the translation it accompanies.
    pub fn record_action(&self, user_id: &str, action: &str) {
        let client = self.client.clone();
        let endpoint = self.endpoint.clone();
        let body = json!({
            "Userid": user_id,
            "Action": action,
        });

        tokio::spawn(async move {
            if let Err(e) = client.post(&endpoint).json(&body).send().await {
                warn!("Audit call failed (ignored): {}", e);
            }
        });
    }
}
