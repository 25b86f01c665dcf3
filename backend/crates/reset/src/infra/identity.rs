//! Identity Provider Client
//!
//! HTTP implementation of [`CredentialAuthority`]. Timeout and retry policy
//! belong to the provider deployment; this client makes one bounded call.

use kernel::id::UserId;

use crate::domain::repository::CredentialAuthority;
use crate::error::{ResetError, ResetResult};

/// Credential authority backed by the identity provider's HTTP API
#[derive(Clone)]
pub struct HttpCredentialAuthority {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCredentialAuthority {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn credential_url(&self, user_id: UserId) -> String {
        format!(
            "{}/users/{}/credential",
            self.base_url.trim_end_matches('/'),
            user_id
        )
    }
}

impl CredentialAuthority for HttpCredentialAuthority {
    async fn update_credential(&self, user_id: UserId, new_credential: &str) -> ResetResult<()> {
        let response = self
            .client
            .put(self.credential_url(user_id))
            .json(&serde_json::json!({ "credential": new_credential }))
            .send()
            .await
            .map_err(|e| ResetError::IdentityProvider(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(ResetError::IdentityProvider(format!(
                "provider returned {}",
                response.status()
            )));
        }

        tracing::info!(user_id = %user_id, "Credential rotated");

        Ok(())
    }
}
